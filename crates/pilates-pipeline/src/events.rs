//! Run event system for observability.
//!
//! Emits [`PipelineEvent`]s via a [`tokio::sync::broadcast`] channel so that
//! observers (loggers, progress displays, tests) can follow a run without
//! coupling to the runner internals.

use pilates_types::{Stage, StageScope};
use serde::{Deserialize, Serialize};

/// Events emitted during a mock run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    RunStarted {
        region: String,
        sim_years: Vec<i32>,
    },
    RunCompleted {
        base_output: String,
        stage_count: usize,
        duration_ms: u64,
    },
    RunFailed {
        error: String,
    },
    StageStarted {
        stage: Stage,
        scope: StageScope,
    },
    StageCompleted {
        stage: Stage,
        scope: StageScope,
        markers_written: usize,
        delay_ms: u64,
    },
    StageFailed {
        stage: Stage,
        error: String,
    },
}

/// Event emitter wrapping a broadcast sender.
#[derive(Clone)]
pub struct EventEmitter {
    sender: tokio::sync::broadcast::Sender<PipelineEvent>,
}

impl EventEmitter {
    /// Create a new emitter with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = tokio::sync::broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit an event to all current subscribers.
    ///
    /// If there are no active receivers the event is silently dropped.
    pub fn emit(&self, event: PipelineEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to events. Returns a broadcast receiver.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<PipelineEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new(256)
    }
}

//! Pipeline runner — the year loop that drives the stage simulators.
//!
//! For every simulation year the per-year stages run in lineup order, then
//! the final stage runs once over all years. Stages are awaited one at a
//! time; nothing overlaps.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pilates_types::{PilatesError, Result, Stage, StageScope};
use serde::Serialize;

use crate::config::RunConfig;
use crate::delay::{Delay, TokioDelay};
use crate::events::{EventEmitter, PipelineEvent};
use crate::marker::write_manifest;
use crate::stage::{default_lineup, StageLineup, StageSimulator};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Drives a mock run. Owns the stage lineup, the delay and the event emitter.
pub struct PipelineRunner {
    lineup: StageLineup,
    delay: Arc<dyn Delay>,
    events: EventEmitter,
}

/// One executed stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageInvocation {
    pub stage: Stage,
    pub scope: StageScope,
    pub markers_written: usize,
    pub delay: Duration,
}

/// The result of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub base_output: PathBuf,
    pub sim_years: Vec<i32>,
    /// Every stage invocation, in execution order.
    pub invocations: Vec<StageInvocation>,
}

impl RunReport {
    pub fn total_delay(&self) -> Duration {
        self.invocations.iter().map(|i| i.delay).sum()
    }

    pub fn markers_written(&self) -> usize {
        self.invocations.iter().map(|i| i.markers_written).sum()
    }

    /// Number of times `stage` ran.
    pub fn count(&self, stage: Stage) -> usize {
        self.invocations.iter().filter(|i| i.stage == stage).count()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn log_header(header: &str) {
    tracing::info!("#############################################");
    tracing::info!("# {} #", header);
    tracing::info!("#############################################");
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// PipelineRunner
// ---------------------------------------------------------------------------

impl PipelineRunner {
    /// The default lineup with a real (Tokio) delay.
    pub fn new() -> Self {
        Self::with_parts(default_lineup(), Arc::new(TokioDelay))
    }

    /// The default lineup with the given delay.
    pub fn with_delay(delay: Arc<dyn Delay>) -> Self {
        Self::with_parts(default_lineup(), delay)
    }

    pub fn with_parts(lineup: StageLineup, delay: Arc<dyn Delay>) -> Self {
        Self {
            lineup,
            delay,
            events: EventEmitter::default(),
        }
    }

    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    /// Create a fresh timestamped output root for `config` and run every
    /// stage into it.
    pub async fn run(&self, config: &RunConfig) -> Result<RunReport> {
        let base_output = config.base_output_at(chrono::Local::now().naive_local());
        if let Err(source) = tokio::fs::create_dir_all(&base_output).await {
            let err = PilatesError::CreateDir {
                path: base_output,
                source,
            };
            self.events.emit(PipelineEvent::RunFailed {
                error: err.to_string(),
            });
            return Err(err);
        }
        tracing::info!("The output folder is {}", base_output.display());
        self.run_in(config, &base_output).await
    }

    /// Run every stage into an existing (or to-be-created) output root.
    pub async fn run_in(&self, config: &RunConfig, base_output: &Path) -> Result<RunReport> {
        let started = Instant::now();
        let result = self.execute(config, base_output).await;
        match &result {
            Ok(report) => self.events.emit(PipelineEvent::RunCompleted {
                base_output: report.base_output.display().to_string(),
                stage_count: report.invocations.len(),
                duration_ms: millis(started.elapsed()),
            }),
            Err(err) => self.events.emit(PipelineEvent::RunFailed {
                error: err.to_string(),
            }),
        }
        result
    }

    async fn execute(&self, config: &RunConfig, base_output: &Path) -> Result<RunReport> {
        let sim_years = config.sim_years();
        self.events.emit(PipelineEvent::RunStarted {
            region: config.region.clone(),
            sim_years: sim_years.clone(),
        });
        tracing::info!(
            "Going to run pilates for city {}, years {:?}",
            config.region,
            sim_years
        );

        let mut invocations = Vec::new();
        for &year in &sim_years {
            log_header(&format!("PROCESSING YEAR {year}"));
            for simulator in self.lineup.per_year() {
                let invocation = self
                    .run_stage(simulator.as_ref(), StageScope::Year(year), config, base_output)
                    .await?;
                invocations.push(invocation);
            }
        }

        let invocation = self
            .run_stage(
                self.lineup.finalizer(),
                StageScope::Years(sim_years.clone()),
                config,
                base_output,
            )
            .await?;
        invocations.push(invocation);

        tracing::info!("Finished");
        Ok(RunReport {
            base_output: base_output.to_path_buf(),
            sim_years,
            invocations,
        })
    }

    /// Write the stage's markers, wait the step delay, log completion.
    async fn run_stage(
        &self,
        simulator: &dyn StageSimulator,
        scope: StageScope,
        config: &RunConfig,
        base_output: &Path,
    ) -> Result<StageInvocation> {
        let stage = simulator.stage();
        log_header(stage.banner());
        self.events.emit(PipelineEvent::StageStarted {
            stage,
            scope: scope.clone(),
        });

        let manifest = simulator.manifest(&scope, config);
        let markers_written = match write_manifest(base_output, &manifest).await {
            Ok(n) => n,
            Err(err) => {
                self.events.emit(PipelineEvent::StageFailed {
                    stage,
                    error: err.to_string(),
                });
                return Err(err);
            }
        };

        let delay = config.step_delay();
        tracing::info!(
            "Imitating processing of step by sleeping for '{}' sec.",
            config.step_delay_seconds()
        );
        self.delay.wait(delay).await;

        match scope.year() {
            Some(year) => tracing::info!(
                stage = %stage,
                markers = markers_written,
                "Completed MOCK.WorkflowStage.{} of {}",
                stage.label(),
                year
            ),
            None => tracing::info!(
                stage = %stage,
                markers = markers_written,
                "Completed MOCK.WorkflowStage.{}",
                stage.label()
            ),
        }

        self.events.emit(PipelineEvent::StageCompleted {
            stage,
            scope: scope.clone(),
            markers_written,
            delay_ms: millis(delay),
        });
        Ok(StageInvocation {
            stage,
            scope,
            markers_written,
            delay,
        })
    }
}

impl Default for PipelineRunner {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

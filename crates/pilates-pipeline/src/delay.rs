//! The wait that stands in for real model processing time.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

/// Abstraction over "imitate processing" so tests can avoid real waits.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Sleeps on the Tokio timer.
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately.
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

/// Records every requested wait without sleeping.
///
/// Cloning yields another handle to the **same** record.
#[derive(Clone, Default)]
pub struct RecordingDelay {
    waits: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every wait requested so far, in order.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().map(|w| w.clone()).unwrap_or_default()
    }

    pub fn total(&self) -> Duration {
        self.waits().iter().sum()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        if let Ok(mut waits) = self.waits.lock() {
            waits.push(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_delay_records_without_sleeping() {
        let delay = RecordingDelay::new();
        let handle = delay.clone();

        let started = std::time::Instant::now();
        delay.wait(Duration::from_secs(3600)).await;
        delay.wait(Duration::from_millis(250)).await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(
            handle.waits(),
            vec![Duration::from_secs(3600), Duration::from_millis(250)]
        );
        assert_eq!(handle.total(), Duration::from_millis(3_600_250));
    }

    #[tokio::test]
    async fn no_delay_returns_immediately() {
        let started = std::time::Instant::now();
        NoDelay.wait(Duration::from_secs(3600)).await;
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_delay_advances_the_clock() {
        let started = tokio::time::Instant::now();
        TokioDelay.wait(Duration::from_secs(2)).await;
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}

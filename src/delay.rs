use std::time::Duration;

use async_trait::async_trait;

/// Simulated latency applied before each request is issued.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self);
}

/// Sleeps on the tokio timer for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

#[async_trait]
impl Delay for FixedDelay {
    async fn wait(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_waits_for_its_duration() {
        let start = Instant::now();
        FixedDelay::from_millis(1500).wait().await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn no_delay_returns_immediately() {
        let start = Instant::now();
        NoDelay.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}

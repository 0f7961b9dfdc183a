//! Replication driver configuration.

/// Configuration for the replication tick loop.
#[derive(Debug, Clone)]
pub struct ReplicationConfig {
    /// Target ticks per second for [`run`](crate::ReplicationDriver::run).
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 20.0,
            max_ticks: 0,
        }
    }
}

impl ReplicationConfig {
    /// Override the tick rate.
    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Limit the number of ticks the loop will run.
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }
}

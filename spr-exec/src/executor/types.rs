use crate::executor::result::DispatchError;

/// Shape of the worker pool. The in-flight cap is not part of this: it lives in the
/// [`ConcurrencyBudget`](crate::executor::ConcurrencyBudget) handed to the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub workers: usize,
    pub queue_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            queue_capacity: 64,
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.workers == 0 {
            return Err(DispatchError::InvalidConfig(
                "worker pool size must be at least 1".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(DispatchError::InvalidConfig(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

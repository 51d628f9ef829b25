use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::executor::result::DispatchError;

/// Caps the number of transport calls in flight at once.
///
/// Cloning shares the same budget. Two budgets built with `new` are independent, so
/// separate dispatch runs in one process never contend with each other.
#[derive(Debug, Clone)]
pub struct ConcurrencyBudget {
    permits: Arc<Semaphore>,
    cap: usize,
}

impl ConcurrencyBudget {
    pub fn new(cap: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(cap)),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub async fn acquire(&self) -> Result<BudgetPermit, DispatchError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| DispatchError::BudgetClosed)?;
        Ok(BudgetPermit { _permit: permit })
    }
}

/// Returns its slot to the budget when dropped.
#[derive(Debug)]
pub struct BudgetPermit {
    _permit: OwnedSemaphorePermit,
}

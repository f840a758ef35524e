use std::sync::{Arc, OnceLock};

use crate::tasks::{
    error::ProvisionError,
    service::{ServiceKind, ServiceResult},
};

/// Write-once cell shared between one builder and the collector.
///
/// The builder fills it exactly once before signalling readiness; the
/// collector only reads it after the signal has been received.
#[derive(Debug, Clone)]
pub struct ResultSlot {
    kind: ServiceKind,
    cell: Arc<OnceLock<ServiceResult>>,
}

impl ResultSlot {
    pub fn new(kind: ServiceKind) -> Self {
        ResultSlot {
            kind,
            cell: Arc::new(OnceLock::new()),
        }
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Stores `result`.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::SlotAlreadyFilled`] on a second write; the
    /// first value is kept.
    pub fn fill(&self, result: ServiceResult) -> Result<(), ProvisionError> {
        self.cell
            .set(result)
            .map_err(|_| ProvisionError::SlotAlreadyFilled(self.kind))
    }

    pub fn get(&self) -> Option<&ServiceResult> {
        self.cell.get()
    }

    pub fn is_filled(&self) -> bool {
        self.cell.get().is_some()
    }
}

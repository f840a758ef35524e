use std::io;

use thiserror::Error;

use crate::tasks::service::ServiceKind;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProvisionError {
    #[error("{0} is not set")]
    MissingSetting(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Result slot for {0} was already filled")]
    SlotAlreadyFilled(ServiceKind),

    #[error("Builder for {0} exited without signalling readiness")]
    SignalLost(ServiceKind),

    #[error("Timed out waiting for {}", join(.pending))]
    Timeout { pending: Vec<ServiceKind> },

    #[error("{} builder(s) failed: {}", .0.len(), join(.0))]
    Aggregate(Vec<ProvisionError>),

    #[error("Failed to report result: {0}")]
    Report(String),

    #[error("{kind} provisioning failed: {message}")]
    Provider { kind: ServiceKind, message: String },
}

impl From<io::Error> for ProvisionError {
    fn from(err: io::Error) -> Self {
        ProvisionError::Report(err.to_string())
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

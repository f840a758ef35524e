use std::future::Future;

#[cfg(feature = "tracing")]
use tracing::{Instrument, Level};

use crate::tasks::service::ServiceKind;

/// Wraps a builder future in a `builder` span tagged with its service kind
/// when the `tracing` feature is enabled, and returns it untouched otherwise.
pub trait MaybeInstrument: Future + Sized {
    #[cfg(feature = "tracing")]
    fn maybe_instrument(self, kind: ServiceKind) -> impl Future<Output = Self::Output> {
        let span = tracing::span!(Level::DEBUG, "builder", kind = %kind);
        self.instrument(span)
    }

    #[cfg(not(feature = "tracing"))]
    fn maybe_instrument(self, _kind: ServiceKind) -> Self {
        self
    }
}

impl<F: Future> MaybeInstrument for F {}

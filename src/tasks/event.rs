use crate::tasks::error::ProvisionError;

/// One-shot notification sent by a builder task to the collector.
///
/// Exactly one `Readiness` is sent per builder, after its result slot has
/// been written (or after it gave up). The collector consumes exactly one
/// per builder.
///
/// # Examples
///
/// ```rust
/// use provisioner::tasks::event::Readiness;
/// use tokio::sync::oneshot;
///
/// #[tokio::main]
/// async fn main() {
///     let (tx, rx) = oneshot::channel::<Readiness>();
///     tx.send(Readiness::Ready).unwrap();
///     assert!(rx.await.unwrap().is_ready());
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    /// The result slot is fully written and may be read
    Ready,

    /// The builder could not produce its result; the slot stays empty
    Failed(ProvisionError),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

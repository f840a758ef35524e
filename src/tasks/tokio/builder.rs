use std::{fmt, sync::Arc, time::Duration};

use tokio::{sync::oneshot, task::JoinHandle};

use crate::{
    helper::tracing::MaybeInstrument,
    tasks::{
        delay::DelaySource,
        error::ProvisionError,
        event::Readiness,
        service::{ServiceKind, ServiceResult},
        slot::ResultSlot,
    },
};

/// Function value a builder calls once its delay has elapsed.
pub type Producer = Arc<dyn Fn() -> Result<ServiceResult, ProvisionError> + Send + Sync>;

/// Simulated provisioning of one service.
///
/// Every builder shares the same control flow: sleep for a delay drawn from
/// the shared [`DelaySource`], call its producer, write the record into its
/// [`ResultSlot`] and then send exactly one [`Readiness`] on its signal
/// channel. The slot write is sequenced before the send, and the oneshot
/// hand-off publishes it to the receiver.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use provisioner::tasks::{
///     config::DelayRange, delay::DelaySource, event::Readiness,
///     service::ServiceKind, slot::ResultSlot, tokio::builder::BuilderTask,
/// };
/// use tokio::sync::oneshot;
///
/// #[tokio::main]
/// async fn main() {
///     let range = DelayRange { min: 1, max: 2, unit: Duration::from_millis(1) };
///     let slot = ResultSlot::new(ServiceKind::Vault);
///     let (tx, rx) = oneshot::channel();
///
///     BuilderTask::for_kind(ServiceKind::Vault)
///         .run(tx, slot.clone(), DelaySource::seeded(range, 1).unwrap())
///         .await;
///
///     assert_eq!(rx.await.unwrap(), Readiness::Ready);
///     assert_eq!(slot.get(), Some(&ServiceKind::Vault.produce()));
/// }
/// ```
#[derive(Clone)]
pub struct BuilderTask {
    kind: ServiceKind,
    producer: Producer,
    fixed_delay: Option<Duration>,
}

impl fmt::Debug for BuilderTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderTask")
            .field("kind", &self.kind)
            .field("fixed_delay", &self.fixed_delay)
            .finish_non_exhaustive()
    }
}

impl BuilderTask {
    pub fn new<F>(kind: ServiceKind, producer: F) -> Self
    where
        F: Fn() -> Result<ServiceResult, ProvisionError> + Send + Sync + 'static,
    {
        BuilderTask {
            kind,
            producer: Arc::new(producer),
            fixed_delay: None,
        }
    }

    /// Builder that writes the literal record of `kind`.
    pub fn for_kind(kind: ServiceKind) -> Self {
        Self::new(kind, move || Ok(kind.produce()))
    }

    /// One literal builder per service kind, in launch order.
    pub fn defaults() -> Vec<Self> {
        ServiceKind::ALL.into_iter().map(Self::for_kind).collect()
    }

    /// Sleeps for exactly `delay` instead of drawing from the shared source.
    pub fn fixed_delay(mut self, delay: Duration) -> Self {
        self.fixed_delay = Some(delay);
        self
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    pub async fn run(
        self,
        signal: oneshot::Sender<Readiness>,
        slot: ResultSlot,
        delay: DelaySource,
    ) {
        let wait = self.fixed_delay.unwrap_or_else(|| delay.next_delay());

        #[cfg(feature = "tracing")]
        tracing::debug!(delay_ms = wait.as_millis() as u64, "Builder sleeping");

        tokio::time::sleep(wait).await;

        let readiness = match self.produce_into(&slot) {
            Ok(()) => Readiness::Ready,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "Builder failed");

                Readiness::Failed(e)
            }
        };

        if signal.send(readiness).is_err() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Readiness channel closed, collector is gone");
        }
    }

    /// Spawns [`BuilderTask::run`] on the current runtime.
    pub fn spawn(
        self,
        signal: oneshot::Sender<Readiness>,
        slot: ResultSlot,
        delay: DelaySource,
    ) -> JoinHandle<()> {
        let kind = self.kind;
        tokio::spawn(self.run(signal, slot, delay).maybe_instrument(kind))
    }

    fn produce_into(&self, slot: &ResultSlot) -> Result<(), ProvisionError> {
        let result = (self.producer)()?;
        if result.kind() != self.kind {
            return Err(ProvisionError::Provider {
                kind: self.kind,
                message: format!("producer returned a {} record", result.kind()),
            });
        }
        slot.fill(result)
    }
}

use std::{future::Future, time::Duration};

use futures::{FutureExt, StreamExt, stream::FuturesUnordered};
use tokio::{
    sync::oneshot::{self, error::RecvError},
    task::JoinHandle,
    time::Instant,
};

use crate::tasks::{
    config::{CollectorConfig, FailurePolicy},
    delay::DelaySource,
    error::ProvisionError,
    event::Readiness,
    report::ReportSink,
    service::{ServiceKind, ServiceResult},
    slot::ResultSlot,
    state::CollectorState,
    tokio::builder::BuilderTask,
};

/// Results collected by a successful run, in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisionOutcome {
    pub completed: Vec<ServiceResult>,
}

impl ProvisionOutcome {
    pub fn kinds(&self) -> Vec<ServiceKind> {
        self.completed.iter().map(ServiceResult::kind).collect()
    }
}

struct Launched {
    kind: ServiceKind,
    slot: ResultSlot,
    handle: JoinHandle<()>,
    reported: bool,
}

/// Builders launched by one run. Dropping it aborts every builder that has
/// not reported yet, including when the caller drops the run future.
struct Launches(Vec<Launched>);

impl Drop for Launches {
    fn drop(&mut self) {
        abort_outstanding(&self.0);
    }
}

/// Fan-out/fan-in over a set of builder tasks.
///
/// [`Collector::run`] spawns every builder with a private result slot and a
/// private oneshot signal, then consumes exactly one signal per builder in
/// arrival order. Each iteration suspends until any signal is ready; the
/// result of a ready builder is handed to the [`ReportSink`] before the next
/// signal is awaited.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use provisioner::tasks::{
///     config::CollectorConfig,
///     report::WriterReporter,
///     tokio::{builder::BuilderTask, collector::Collector},
/// };
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = CollectorConfig::new()
///         .delay(1, 3)
///         .delay_unit(Duration::from_millis(1))
///         .timeout_ms(5_000);
///     let collector = Collector::new(config)?;
///
///     let mut reporter = WriterReporter::new(Vec::new());
///     let outcome = collector.run(BuilderTask::defaults(), &mut reporter).await?;
///
///     assert_eq!(outcome.completed.len(), 3);
///     let printed = String::from_utf8(reporter.into_inner())?;
///     assert!(printed.contains("GitLab is Ready!"));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Collector {
    config: CollectorConfig,
    delay: DelaySource,
}

impl Collector {
    /// Validates `config` and seeds the shared delay source.
    pub fn new(config: CollectorConfig) -> Result<Self, ProvisionError> {
        config.validate()?;
        let delay = match config.seed {
            Some(seed) => DelaySource::seeded(config.delay.clone(), seed)?,
            None => DelaySource::new(config.delay.clone())?,
        };
        Ok(Collector { config, delay })
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn delay_source(&self) -> &DelaySource {
        &self.delay
    }

    /// Launches `builders` and waits for all of them.
    ///
    /// # Errors
    ///
    /// - [`ProvisionError::Timeout`] when the configured deadline passes
    ///   before every builder has reported; stragglers are aborted.
    /// - The first builder failure under [`FailurePolicy::FailFast`];
    ///   outstanding builders are aborted.
    /// - [`ProvisionError::Aggregate`] under [`FailurePolicy::CollectAll`]
    ///   once every builder has reported and at least one failed.
    /// - Any error returned by the sink.
    pub async fn run<S>(
        &self,
        builders: Vec<BuilderTask>,
        sink: &mut S,
    ) -> Result<ProvisionOutcome, ProvisionError>
    where
        S: ReportSink + ?Sized,
    {
        let mut launched = Launches(Vec::with_capacity(builders.len()));
        let signals = FuturesUnordered::new();

        for (index, builder) in builders.into_iter().enumerate() {
            let kind = builder.kind();
            let slot = ResultSlot::new(kind);
            let (signal_tx, signal_rx) = oneshot::channel::<Readiness>();
            let handle = builder.spawn(signal_tx, slot.clone(), self.delay.clone());

            #[cfg(feature = "tracing")]
            tracing::debug!(kind = %kind, "Builder launched");

            launched.0.push(Launched {
                kind,
                slot,
                handle,
                reported: false,
            });
            signals.push(signal_rx.map(move |signal| (index, signal)));
        }

        self.collect(&mut launched.0, signals, sink).await
    }

    async fn collect<S, F>(
        &self,
        launched: &mut [Launched],
        mut signals: FuturesUnordered<F>,
        sink: &mut S,
    ) -> Result<ProvisionOutcome, ProvisionError>
    where
        S: ReportSink + ?Sized,
        F: Future<Output = (usize, Result<Readiness, RecvError>)>,
    {
        let deadline = self
            .config
            .timeout_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));
        let mut state = CollectorState::new(launched.len());
        let mut outcome = ProvisionOutcome::default();
        let mut failures = Vec::new();

        while !state.is_done() {
            let next = tokio::select! {
                next = signals.next() => next,
                _ = deadline_elapsed(deadline) => {
                    let pending = pending_kinds(launched);

                    #[cfg(feature = "tracing")]
                    tracing::error!(?pending, remaining = state.remaining(), "Deadline passed before every builder reported");

                    return Err(ProvisionError::Timeout { pending });
                }
            };
            let Some((index, signal)) = next else {
                break;
            };

            state = state.advance();
            let entry = &mut launched[index];
            entry.reported = true;

            let failure = match signal {
                Ok(Readiness::Ready) => match entry.slot.get() {
                    Some(result) => {
                        #[cfg(feature = "tracing")]
                        tracing::info!(kind = %entry.kind, remaining = state.remaining(), "Builder ready");

                        sink.report(result)?;
                        outcome.completed.push(result.clone());
                        continue;
                    }
                    None => ProvisionError::SignalLost(entry.kind),
                },
                Ok(Readiness::Failed(e)) => e,
                Err(_) => ProvisionError::SignalLost(entry.kind),
            };

            #[cfg(feature = "tracing")]
            tracing::warn!(kind = %entry.kind, error = %failure, "Builder did not complete");

            match self.config.failure_policy {
                FailurePolicy::FailFast => return Err(failure),
                FailurePolicy::CollectAll => failures.push(failure),
            }
        }

        if !failures.is_empty() {
            return Err(ProvisionError::Aggregate(failures));
        }
        Ok(outcome)
    }
}

async fn deadline_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn pending_kinds(launched: &[Launched]) -> Vec<ServiceKind> {
    launched
        .iter()
        .filter(|entry| !entry.reported)
        .map(|entry| entry.kind)
        .collect()
}

fn abort_outstanding(launched: &[Launched]) {
    for entry in launched.iter().filter(|entry| !entry.reported) {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = %entry.kind, "Aborting builder");

        entry.handle.abort();
    }
}

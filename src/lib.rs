//! # provisioner
//!
//! Simulated provisioning of a secrets vault, a source-control platform and
//! a deployment platform. One builder task is spawned per service; each
//! sleeps for a random delay, writes a fixed connection record and signals
//! readiness on its own oneshot channel. A single collector waits on every
//! channel and reports each record as soon as its builder is ready.
//!
//! ## Features
//!
//! - **Fan-out/fan-in**: builders run in parallel on the tokio runtime, the
//!   collector suspends until any of them reports
//! - **Write-once results**: a builder's slot is filled before its signal is
//!   sent, so the collector never observes a partial record
//! - **Deadlines**: optional timeout that aborts stragglers
//! - **Failure policy**: fail fast on the first failed builder, or collect
//!   every failure
//! - **Serialization**: optional serde support for all records
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use provisioner::tasks::{
//!     config::CollectorConfig,
//!     report::WriterReporter,
//!     tokio::{builder::BuilderTask, collector::Collector},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Delays of 1 to 5 milliseconds instead of 3 to 20 seconds
//!     let config = CollectorConfig::new()
//!         .delay(1, 5)
//!         .delay_unit(Duration::from_millis(1));
//!
//!     let collector = Collector::new(config)?;
//!     let mut reporter = WriterReporter::new(std::io::stdout());
//!     let outcome = collector.run(BuilderTask::defaults(), &mut reporter).await?;
//!
//!     println!("ready in order: {:?}", outcome.kinds());
//!     Ok(())
//! }
//! ```
//!
//! ## Custom producers
//!
//! ```rust
//! use provisioner::tasks::{
//!     config::{CollectorConfig, FailurePolicy},
//!     error::ProvisionError,
//!     service::ServiceKind,
//!     report::WriterReporter,
//!     tokio::{builder::BuilderTask, collector::Collector},
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let failing = BuilderTask::new(ServiceKind::Deployment, || {
//!         Err(ProvisionError::Provider {
//!             kind: ServiceKind::Deployment,
//!             message: "connection refused".to_string(),
//!         })
//!     });
//!
//!     let config = CollectorConfig::new()
//!         .delay(0, 0)
//!         .failure_policy(FailurePolicy::CollectAll);
//!     let collector = Collector::new(config).unwrap();
//!     let mut reporter = WriterReporter::new(Vec::new());
//!
//!     let builders = vec![BuilderTask::for_kind(ServiceKind::Vault), failing];
//!     let err = collector.run(builders, &mut reporter).await.unwrap_err();
//!     assert!(matches!(err, ProvisionError::Aggregate(ref failures) if failures.len() == 1));
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `tracing` (default): structured logging integration, required by the
//!   `provisioner` binary
//! - `serde`: Enable serialization support for all types

pub mod helper;
pub mod tasks;

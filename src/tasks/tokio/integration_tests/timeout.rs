use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::time::Instant;

use crate::tasks::{
    error::ProvisionError,
    service::ServiceKind,
    tokio::{
        builder::BuilderTask,
        collector::Collector,
        integration_tests::helper::{RecordingReporter, paused_config, pinned},
    },
};

#[tokio::test(start_paused = true)]
async fn gives_up_on_stragglers() {
    let collector = Collector::new(paused_config(1).timeout_ms(10_000)).unwrap();
    let mut reporter = RecordingReporter::default();
    let builders = vec![
        pinned(ServiceKind::Vault, 3),
        pinned(ServiceKind::SourceControl, 30),
        pinned(ServiceKind::Deployment, 5),
    ];

    let started = Instant::now();
    let err = collector.run(builders, &mut reporter).await.unwrap_err();

    assert_eq!(
        err,
        ProvisionError::Timeout {
            pending: vec![ServiceKind::SourceControl]
        }
    );
    assert_eq!(started.elapsed(), Duration::from_secs(10));
    assert_eq!(
        reporter.kinds(),
        vec![ServiceKind::Vault, ServiceKind::Deployment]
    );
}

#[tokio::test(start_paused = true)]
async fn lists_every_pending_builder() {
    let collector = Collector::new(paused_config(1).timeout_ms(1_000)).unwrap();
    let mut reporter = RecordingReporter::default();
    let builders = ServiceKind::ALL
        .into_iter()
        .map(|kind| pinned(kind, 3))
        .collect();

    let err = collector.run(builders, &mut reporter).await.unwrap_err();

    assert_eq!(
        err,
        ProvisionError::Timeout {
            pending: ServiceKind::ALL.to_vec()
        }
    );
    assert!(reporter.reports.is_empty());
    assert_eq!(
        err.to_string(),
        "Timed out waiting for Vault, GitLab, ArgoCD"
    );
}

#[tokio::test(start_paused = true)]
async fn deadline_after_last_builder_is_not_hit() {
    let collector = Collector::new(paused_config(4).timeout_ms(20_001)).unwrap();
    let mut reporter = RecordingReporter::default();

    let outcome = collector
        .run(BuilderTask::defaults(), &mut reporter)
        .await
        .unwrap();

    assert_eq!(outcome.completed.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_run_aborts_builders() {
    let produced = Arc::new(AtomicUsize::new(0));
    let builders = ServiceKind::ALL
        .into_iter()
        .map(|kind| {
            let produced = produced.clone();
            BuilderTask::new(kind, move || {
                produced.fetch_add(1, Ordering::SeqCst);
                Ok(kind.produce())
            })
            .fixed_delay(Duration::from_secs(5))
        })
        .collect();
    let collector = Collector::new(paused_config(1)).unwrap();
    let mut reporter = RecordingReporter::default();

    let run = collector.run(builders, &mut reporter);
    assert!(tokio::time::timeout(Duration::from_secs(1), run).await.is_err());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(produced.load(Ordering::SeqCst), 0);
    assert!(reporter.reports.is_empty());
}

use std::time::Duration;

use tokio::{sync::oneshot, time::Instant};

use crate::tasks::{
    config::DelayRange,
    delay::DelaySource,
    error::ProvisionError,
    event::Readiness,
    service::ServiceKind,
    slot::ResultSlot,
    tokio::{builder::BuilderTask, integration_tests::helper::failing_builder},
};

#[tokio::test(start_paused = true)]
async fn writes_slot_before_signalling() {
    let delay = DelaySource::seeded(DelayRange::default(), 11).unwrap();

    for kind in ServiceKind::ALL {
        let slot = ResultSlot::new(kind);
        let (tx, rx) = oneshot::channel();
        let handle = BuilderTask::for_kind(kind).spawn(tx, slot.clone(), delay.clone());

        assert_eq!(rx.await.unwrap(), Readiness::Ready);
        assert_eq!(slot.get(), Some(&kind.produce()));
        handle.await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn sleeps_within_range() {
    let delay = DelaySource::new(DelayRange::default()).unwrap();

    for _ in 0..50 {
        let slot = ResultSlot::new(ServiceKind::Vault);
        let (tx, rx) = oneshot::channel();
        let started = Instant::now();
        BuilderTask::for_kind(ServiceKind::Vault).spawn(tx, slot, delay.clone());

        rx.await.unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(3), "too short: {:?}", elapsed);
        assert!(elapsed <= Duration::from_secs(20), "too long: {:?}", elapsed);
    }
}

#[tokio::test(start_paused = true)]
async fn fixed_delay_overrides_source() {
    let delay = DelaySource::seeded(DelayRange::default(), 3).unwrap();
    let slot = ResultSlot::new(ServiceKind::Deployment);
    let (tx, rx) = oneshot::channel();
    let started = Instant::now();

    BuilderTask::for_kind(ServiceKind::Deployment)
        .fixed_delay(Duration::from_secs(42))
        .spawn(tx, slot, delay);

    rx.await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(42));
}

#[tokio::test(start_paused = true)]
async fn failing_producer_leaves_slot_empty() {
    let delay = DelaySource::seeded(DelayRange::default(), 5).unwrap();
    let slot = ResultSlot::new(ServiceKind::SourceControl);
    let (tx, rx) = oneshot::channel();

    failing_builder(ServiceKind::SourceControl, "auth rejected").spawn(tx, slot.clone(), delay);

    match rx.await.unwrap() {
        Readiness::Failed(ProvisionError::Provider { kind, message }) => {
            assert_eq!(kind, ServiceKind::SourceControl);
            assert_eq!(message, "auth rejected");
        }
        other => panic!("unexpected readiness: {:?}", other),
    }
    assert!(!slot.is_filled());
}

#[tokio::test(start_paused = true)]
async fn rejects_record_of_another_kind() {
    let delay = DelaySource::seeded(DelayRange::default(), 5).unwrap();
    let slot = ResultSlot::new(ServiceKind::Vault);
    let (tx, rx) = oneshot::channel();

    BuilderTask::new(ServiceKind::Vault, || Ok(ServiceKind::Deployment.produce()))
        .spawn(tx, slot.clone(), delay);

    assert!(matches!(
        rx.await.unwrap(),
        Readiness::Failed(ProvisionError::Provider {
            kind: ServiceKind::Vault,
            ..
        })
    ));
    assert!(!slot.is_filled());
}

#[tokio::test(start_paused = true)]
async fn prefilled_slot_is_reported() {
    let delay = DelaySource::seeded(DelayRange::default(), 5).unwrap();
    let slot = ResultSlot::new(ServiceKind::Vault);
    slot.fill(ServiceKind::Vault.produce()).unwrap();
    let (tx, rx) = oneshot::channel();

    BuilderTask::for_kind(ServiceKind::Vault).spawn(tx, slot, delay);

    assert_eq!(
        rx.await.unwrap(),
        Readiness::Failed(ProvisionError::SlotAlreadyFilled(ServiceKind::Vault))
    );
}

#[tokio::test(start_paused = true)]
async fn closed_signal_channel_is_tolerated() {
    let delay = DelaySource::seeded(DelayRange::default(), 9).unwrap();
    let slot = ResultSlot::new(ServiceKind::Deployment);
    let (tx, rx) = oneshot::channel();
    drop(rx);

    let handle = BuilderTask::for_kind(ServiceKind::Deployment).spawn(tx, slot.clone(), delay);

    assert!(handle.await.is_ok());
    assert!(slot.is_filled());
}

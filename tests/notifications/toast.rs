use std::collections::HashMap;
use std::time::Duration;

use stockpanel::notifications::{
    RemovalReason, ToastEvent, ToastId, ToastKind, ToastQueue, ToastRequest, ToastSettings,
};
use tokio::sync::broadcast;

fn drain_removals(events: &mut broadcast::Receiver<ToastEvent>) -> Vec<(ToastId, RemovalReason)> {
    let mut removed = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let ToastEvent::Removed { id, reason } = event {
            removed.push((id, reason));
        }
    }
    removed
}

#[tokio::test(start_paused = true)]
async fn test_toast_expires_after_default_duration() {
    let queue = ToastQueue::new();
    let id = queue.add_toast(ToastRequest::success("T", "M"));

    // Present immediately after the call
    assert!(queue.contains(id));
    assert_eq!(queue.get(id).unwrap().duration, Duration::from_millis(5_000));

    tokio::time::sleep(Duration::from_millis(4_900)).await;
    assert!(queue.contains(id), "toast removed too early");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!queue.contains(id), "toast not removed after its duration");
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_custom_duration_and_settings() {
    let queue = ToastQueue::with_settings(ToastSettings {
        default_duration: Duration::from_millis(1_000),
    });
    let short = queue.add_toast(ToastRequest::info("Corto", "1s"));
    let long = queue.add_toast(
        ToastRequest::success("Toast de larga duración", "Este toast durará 10 segundos")
            .duration(Duration::from_secs(10)),
    );

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    assert!(!queue.contains(short));
    assert!(queue.contains(long));

    tokio::time::sleep(Duration::from_secs(9)).await;
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_remaining_counts_down() {
    let queue = ToastQueue::new();
    let id = queue.add_toast(ToastRequest::warning("Advertencia", "Ten cuidado"));

    tokio::time::sleep(Duration::from_millis(2_000)).await;
    let toast = queue.get(id).unwrap();
    let remaining = toast.remaining();
    assert!(remaining <= Duration::from_millis(3_000));
    assert!(remaining >= Duration::from_millis(2_990));
}

#[tokio::test]
async fn test_remove_toast_twice_is_idempotent() {
    let queue = ToastQueue::new();
    let keep = queue.add_toast(ToastRequest::info("Quedarse", "x"));
    let id = queue.add_toast(ToastRequest::error("Error", "Algo salió mal"));

    queue.remove_toast(id);
    let after_first = queue.snapshot();
    queue.remove_toast(id);

    assert_eq!(queue.snapshot(), after_first);
    assert_eq!(after_first.len(), 1);
    assert_eq!(after_first[0].id, keep);
}

#[tokio::test]
async fn test_snapshot_keeps_insertion_order() {
    let queue = ToastQueue::new();
    queue.add_toast(ToastRequest::success("Uno", "1"));
    queue.add_toast(ToastRequest::error("Dos", "2"));
    queue.add_toast(ToastRequest::warning("Tres", "3"));

    let kinds: Vec<ToastKind> = queue.snapshot().iter().map(|toast| toast.kind).collect();
    assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error, ToastKind::Warning]);
}

#[tokio::test(start_paused = true)]
async fn test_three_toasts_each_removed_exactly_once() {
    let queue = ToastQueue::new();
    let mut events = queue.events();

    let ids = [
        queue.add_toast(ToastRequest::info("A", "a").duration(Duration::from_millis(3_000))),
        queue.add_toast(ToastRequest::info("B", "b").duration(Duration::from_millis(1_000))),
        queue.add_toast(ToastRequest::info("C", "c").duration(Duration::from_millis(2_000))),
    ];

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert!(queue.is_empty());

    let removed = drain_removals(&mut events);
    let mut counts: HashMap<ToastId, usize> = HashMap::new();
    for (id, reason) in &removed {
        assert_eq!(*reason, RemovalReason::Expired);
        *counts.entry(*id).or_default() += 1;
    }
    assert_eq!(counts.len(), 3);
    for id in ids {
        assert_eq!(counts[&id], 1);
    }

    // Later toast expired first: removal order follows timers, not insertion
    let order: Vec<ToastId> = removed.iter().map(|(id, _)| *id).collect();
    assert_eq!(order, vec![ids[1], ids[2], ids[0]]);
}

#[tokio::test(start_paused = true)]
async fn test_dismissed_toast_timer_does_not_fire() {
    let queue = ToastQueue::new();
    let mut events = queue.events();
    let id = queue.add_toast(ToastRequest::success("Guardado", "ok"));

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    queue.remove_toast(id);

    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(drain_removals(&mut events), vec![(id, RemovalReason::Dismissed)]);
}

#[tokio::test(start_paused = true)]
async fn test_clear_toasts_cancels_timers() {
    let queue = ToastQueue::new();
    let mut events = queue.events();
    let first = queue.add_toast(ToastRequest::info("Uno", "1"));
    let second = queue.add_toast(ToastRequest::info("Dos", "2"));

    queue.clear_toasts();
    assert!(queue.is_empty());

    tokio::time::sleep(Duration::from_millis(6_000)).await;
    assert_eq!(
        drain_removals(&mut events),
        vec![(first, RemovalReason::Cleared), (second, RemovalReason::Cleared)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_subscribe_sees_add_and_expiry() {
    let queue = ToastQueue::new();
    let mut updates = queue.subscribe();

    let id = queue.add_toast(ToastRequest::info("Información", "Aquí tienes información importante"));
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update()[0].id, id);

    updates.changed().await.unwrap();
    assert!(updates.borrow().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_duration_stays_until_dismissed() {
    let queue = ToastQueue::new();
    let mut events = queue.events();
    let id = queue.add_toast(ToastRequest::info("Fijo", "Permanece hasta cerrarlo").duration(Duration::MAX));

    let toast = queue.get(id).unwrap();
    assert_eq!(toast.duration, Duration::MAX);
    assert!(toast.remaining() > Duration::from_secs(86_400 * 365));

    tokio::time::sleep(Duration::from_secs(3_600)).await;
    assert!(queue.contains(id));

    queue.remove_toast(id);
    assert!(queue.is_empty());
    assert_eq!(drain_removals(&mut events), vec![(id, RemovalReason::Dismissed)]);
}

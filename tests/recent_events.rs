use checkout_service::webhook::notification::{EventSource, NotificationEvent};
use checkout_service::webhook::recent::{RecentEventBuffer, RECENT_EVENT_CAPACITY};
use std::sync::Arc;

#[test]
fn snapshot_of_empty_buffer_is_empty() {
    let buffer = RecentEventBuffer::new();
    assert!(buffer.snapshot().is_empty());
}

#[test]
fn keeps_only_the_newest_25_events() {
    let buffer = RecentEventBuffer::new();
    for i in 0..30 {
        buffer.record(event(&format!("evt-{i}")));
    }

    let snapshot = buffer.snapshot();
    assert_eq!(snapshot.len(), RECENT_EVENT_CAPACITY);
    assert_eq!(snapshot.first().unwrap().merchant_reference, "evt-29");
    assert_eq!(snapshot.last().unwrap().merchant_reference, "evt-5");
}

#[test]
fn concurrent_writers_never_exceed_capacity() {
    let buffer = Arc::new(RecentEventBuffer::new());
    let mut handles = Vec::new();
    for t in 0..4 {
        let buffer = Arc::clone(&buffer);
        handles.push(std::thread::spawn(move || {
            for i in 0..50 {
                buffer.record(event(&format!("t{t}-{i}")));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(buffer.snapshot().len(), RECENT_EVENT_CAPACITY);
}

fn event(merchant_reference: &str) -> NotificationEvent {
    NotificationEvent {
        event_code: "AUTHORISATION".to_string(),
        success: true,
        merchant_reference: merchant_reference.to_string(),
        psp_reference: "PSP001".to_string(),
        original_reference: None,
        reason: None,
        amount: None,
        stored_payment_method_id: None,
        recurring_detail_reference: None,
        source: EventSource::ClassicItem,
        received_at: chrono::Utc::now(),
    }
}

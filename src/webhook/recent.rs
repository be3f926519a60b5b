use crate::webhook::notification::NotificationEvent;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const RECENT_EVENT_CAPACITY: usize = 25;

/// Bounded newest-first buffer of accepted webhook events, shared by all
/// request workers. Audit visibility only; not a delivery-tracking store.
#[derive(Default)]
pub struct RecentEventBuffer {
    events: Mutex<VecDeque<NotificationEvent>>,
}

impl RecentEventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: NotificationEvent) {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push_front(event);
        while events.len() > RECENT_EVENT_CAPACITY {
            events.pop_back();
        }
    }

    /// Point-in-time copy, newest first.
    pub fn snapshot(&self) -> Vec<NotificationEvent> {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.iter().cloned().collect()
    }
}

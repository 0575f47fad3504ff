use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{ReceiptId, StudentId};

/// signals emitted after state changes commit
///
/// notification events are fire-and-forget: a consumer failing to
/// deliver an SMS can never unwind the receipt that triggered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    StudentAdmitted {
        student_id: StudentId,
        class_label: String,
        timestamp: DateTime<Utc>,
    },
    StudentUpdated {
        student_id: StudentId,
        timestamp: DateTime<Utc>,
    },
    ScheduleChanged {
        class_label: String,
        item_count: usize,
        timestamp: DateTime<Utc>,
    },
    ReceiptIssued {
        receipt_id: ReceiptId,
        receipt_number: u64,
        student_id: StudentId,
        payment_date: NaiveDate,
        amount_received: Money,
        closing_balance: Money,
        timestamp: DateTime<Utc>,
    },
    SmsRequested {
        receipt_id: ReceiptId,
        mobile: String,
        timestamp: DateTime<Utc>,
    },
    WhatsAppRequested {
        receipt_id: ReceiptId,
        mobile: String,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

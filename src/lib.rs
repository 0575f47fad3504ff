pub mod admin;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod issuance;
pub mod receipt;
pub mod report;
pub mod schedule;
pub mod store;
pub mod student;
pub mod types;

// re-export key types
pub use decimal::Money;
pub use engine::{
    BillingSelection, ChargeAdjustments, ComputationEngine, ComputationInput, FeeBreakdownRow,
    FeeComputation, FineAssessment, FineCalculator, FineConfig,
};
pub use errors::{FeeError, Result};
pub use events::{Event, EventStore};
pub use issuance::{ReceiptIssuer, ReceiptRequest};
pub use receipt::FeeReceipt;
pub use schedule::{FeeSchedule, FeeScheduleItem};
pub use store::{JsonStore, MemoryStore, RecordStore};
pub use student::{AdmissionDetails, Student};
pub use types::{
    BillingMonth, Concession, Frequency, NotificationFlags, PaymentDetails, PaymentMode,
    ReceiptId, StudentId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

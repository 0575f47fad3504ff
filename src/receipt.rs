use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::engine::{BillingSelection, FeeBreakdownRow};
use crate::types::{Concession, NotificationFlags, PaymentDetails, ReceiptId, StudentId};

/// one immutable entry in a student's fee ledger
///
/// receipts are never edited or deleted; a correction is a new receipt.
/// `receipt_number` is assigned by the store in append order and the
/// latest receipt's `closing_balance` is the authoritative amount owed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeReceipt {
    pub id: ReceiptId,
    pub receipt_number: u64,
    pub student_id: StudentId,

    // student snapshot at issuance time
    pub student_name: String,
    pub class_label: String,
    pub section: String,

    pub payment_date: NaiveDate,
    pub selection: BillingSelection,
    /// only the rows actually charged; excluded rows are dropped
    pub rows: Vec<FeeBreakdownRow>,

    pub base_total: Money,
    pub additional_fee: Money,
    /// the concession as granted (percent or fixed amount)
    pub concession: Concession,
    /// the concession resolved against the gross total
    pub concession_amount: Money,
    pub late_fine: Money,
    pub opening_balance: Money,
    pub net_fee: Money,
    pub amount_received: Money,
    pub closing_balance: Money,

    pub payment: PaymentDetails,
    pub notify: NotificationFlags,
    pub issued_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BillingMonth;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_receipt_round_trips_through_json() {
        let receipt = FeeReceipt {
            id: Uuid::new_v4(),
            receipt_number: 1,
            student_id: Uuid::new_v4(),
            student_name: "Aarav Sharma".to_string(),
            class_label: "1".to_string(),
            section: "A".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            selection: BillingSelection::months([BillingMonth::Apr, BillingMonth::May]),
            rows: Vec::new(),
            base_total: Money::from_major(2_400),
            additional_fee: Money::ZERO,
            concession: Concession::percent(dec!(10)),
            concession_amount: Money::from_major(240),
            late_fine: Money::ZERO,
            opening_balance: Money::ZERO,
            net_fee: Money::from_major(2_160),
            amount_received: Money::from_major(1_000),
            closing_balance: Money::from_major(1_160),
            payment: PaymentDetails::default(),
            notify: NotificationFlags::default(),
            issued_at: Utc::now(),
        };

        let json = serde_json::to_string(&receipt).unwrap();
        let back: FeeReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, back);
        // the granted form survives, not just the resolved value
        assert_eq!(back.concession, Concession::Percent(dec!(10)));
        assert_eq!(back.concession_amount, Money::from_major(240));
    }
}

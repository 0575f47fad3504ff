//! read-only projections of the receipt ledger for printable summaries

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::receipt::FeeReceipt;
use crate::types::StudentId;

/// one printable line of the collection summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptSummary {
    pub receipt_number: u64,
    pub student_id: StudentId,
    pub student_name: String,
    pub class_label: String,
    /// billed months as a display string, e.g. "Apr, May"
    pub months: String,
    pub payment_date: NaiveDate,
    pub amount_received: Money,
}

impl ReceiptSummary {
    pub fn from_receipt(receipt: &FeeReceipt) -> Self {
        let months = receipt
            .selection
            .selected_months()
            .map(|m| m.label())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            receipt_number: receipt.receipt_number,
            student_id: receipt.student_id,
            student_name: receipt.student_name.clone(),
            class_label: receipt.class_label.clone(),
            months,
            payment_date: receipt.payment_date,
            amount_received: receipt.amount_received,
        }
    }
}

/// summarize receipts in ledger order
pub fn summaries(receipts: &[FeeReceipt]) -> Vec<ReceiptSummary> {
    receipts.iter().map(ReceiptSummary::from_receipt).collect()
}

/// outstanding dues per student: the latest closing balance wins
pub fn student_dues(receipts: &[FeeReceipt]) -> BTreeMap<StudentId, Money> {
    let mut dues = BTreeMap::new();
    for receipt in receipts {
        dues.insert(receipt.student_id, receipt.closing_balance);
    }
    dues
}

/// one page of a paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// slice out one page; pages are 1-based
    pub fn paginate(rows: &[T], page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total_rows = rows.len();
        let total_pages = total_rows.div_ceil(per_page).max(1);
        let start = (page - 1) * per_page;
        let slice = if start >= total_rows {
            Vec::new()
        } else {
            rows[start..(start + per_page).min(total_rows)].to_vec()
        };
        Self {
            rows: slice,
            page,
            per_page,
            total_rows,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BillingSelection;
    use crate::types::{BillingMonth, Concession, NotificationFlags, PaymentDetails};
    use chrono::Utc;
    use uuid::Uuid;

    fn receipt(number: u64, student_id: StudentId, closing: i64) -> FeeReceipt {
        FeeReceipt {
            id: Uuid::new_v4(),
            receipt_number: number,
            student_id,
            student_name: "Aarav Sharma".to_string(),
            class_label: "1".to_string(),
            section: "A".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            selection: BillingSelection::months([BillingMonth::Apr, BillingMonth::May]),
            rows: Vec::new(),
            base_total: Money::from_major(2_400),
            additional_fee: Money::ZERO,
            concession: Concession::None,
            concession_amount: Money::ZERO,
            late_fine: Money::ZERO,
            opening_balance: Money::ZERO,
            net_fee: Money::from_major(2_400),
            amount_received: Money::from_major(1_000),
            closing_balance: Money::from_major(closing),
            payment: PaymentDetails::default(),
            notify: NotificationFlags::NONE,
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_projection() {
        let student = Uuid::new_v4();
        let rows = summaries(&[receipt(1, student, 1_400)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].months, "Apr, May");
        assert_eq!(rows[0].amount_received, Money::from_major(1_000));
    }

    #[test]
    fn test_student_dues_latest_wins() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let ledger = vec![receipt(1, a, 500), receipt(2, b, 0), receipt(3, a, 200)];

        let dues = student_dues(&ledger);
        assert_eq!(dues[&a], Money::from_major(200));
        assert_eq!(dues[&b], Money::ZERO);
    }

    #[test]
    fn test_pagination() {
        let student = Uuid::new_v4();
        let ledger: Vec<FeeReceipt> = (1..=7).map(|n| receipt(n, student, 0)).collect();
        let rows = summaries(&ledger);

        let first = Page::paginate(&rows, 1, 3);
        assert_eq!(first.rows.len(), 3);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.rows[0].receipt_number, 1);

        let last = Page::paginate(&rows, 3, 3);
        assert_eq!(last.rows.len(), 1);
        assert_eq!(last.rows[0].receipt_number, 7);

        let past_end = Page::paginate(&rows, 9, 3);
        assert!(past_end.rows.is_empty());
        assert_eq!(past_end.total_rows, 7);
    }

    #[test]
    fn test_empty_listing() {
        let page: Page<ReceiptSummary> = Page::paginate(&[], 1, 10);
        assert!(page.rows.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}

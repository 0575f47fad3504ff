use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::decimal::Money;
use crate::engine::{
    BillingSelection, ChargeAdjustments, ComputationEngine, ComputationInput, FeeComputation,
};
use crate::errors::{FeeError, Result};
use crate::events::{Event, EventStore};
use crate::receipt::FeeReceipt;
use crate::store::RecordStore;
use crate::student::Student;
use crate::types::{NotificationFlags, PaymentDetails, StudentId};

/// everything the operator entered for one receipt
#[derive(Debug, Clone)]
pub struct ReceiptRequest {
    pub selection: BillingSelection,
    pub payment_date: NaiveDate,
    pub adjustments: ChargeAdjustments,
    pub amount_received: Money,
    pub payment: PaymentDetails,
    pub notify: NotificationFlags,
}

/// validates and commits fee computations as ledger entries
pub struct ReceiptIssuer {
    engine: ComputationEngine,
}

impl ReceiptIssuer {
    pub fn new(engine: ComputationEngine) -> Self {
        Self { engine }
    }

    /// opening balance for a student: the closing balance of the last
    /// receipt in append order, 0 if none
    ///
    /// append order is deliberate; a receipt entered out of date order
    /// still chains from the last one written
    pub fn opening_balance_for<S: RecordStore>(
        &self,
        store: &S,
        student_id: StudentId,
    ) -> Result<Money> {
        let receipts = store.receipts_for(student_id)?;
        Ok(receipts
            .last()
            .map(|r| r.closing_balance)
            .unwrap_or(Money::ZERO))
    }

    /// run the computation against current store state without writing
    pub fn preview<S: RecordStore>(
        &self,
        store: &S,
        student: &Student,
        request: &ReceiptRequest,
    ) -> Result<FeeComputation> {
        let schedule_items = store.schedule_items(&student.class_label)?;
        let opening_balance = self.opening_balance_for(store, student.id)?;

        Ok(self.engine.compute(&ComputationInput {
            schedule_items: &schedule_items,
            selection: &request.selection,
            payment_date: request.payment_date,
            adjustments: request.adjustments,
            opening_balance,
            amount_received: request.amount_received,
        }))
    }

    /// validate and append one receipt to the ledger
    ///
    /// rejects before writing if nothing was received; on success the
    /// notification events are emitted after the append, so a consumer
    /// failure cannot unwind the receipt
    pub fn issue<S: RecordStore>(
        &self,
        store: &mut S,
        student: &Student,
        request: ReceiptRequest,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<FeeReceipt> {
        if !request.amount_received.is_positive() {
            return Err(FeeError::NothingReceived {
                amount: request.amount_received,
            });
        }

        let computation = self.preview(store, student, &request)?;
        let receipt_number = store.next_receipt_number()?;
        let now = time_provider.now();

        let receipt = FeeReceipt {
            id: Uuid::new_v4(),
            receipt_number,
            student_id: student.id,
            student_name: student.name.clone(),
            class_label: student.class_label.clone(),
            section: student.section.clone(),
            payment_date: computation.payment_date,
            selection: request.selection,
            rows: computation.included_rows(),
            base_total: computation.base_total,
            additional_fee: computation.additional_fee,
            concession: request.adjustments.concession,
            concession_amount: computation.concession,
            late_fine: computation.late_fine,
            opening_balance: computation.opening_balance,
            net_fee: computation.net_fee,
            amount_received: computation.amount_received,
            closing_balance: computation.closing_balance,
            payment: request.payment,
            notify: request.notify,
            issued_at: now,
        };

        store.append_receipt(receipt.clone())?;

        events.emit(Event::ReceiptIssued {
            receipt_id: receipt.id,
            receipt_number: receipt.receipt_number,
            student_id: receipt.student_id,
            payment_date: receipt.payment_date,
            amount_received: receipt.amount_received,
            closing_balance: receipt.closing_balance,
            timestamp: now,
        });
        if receipt.notify.send_sms {
            events.emit(Event::SmsRequested {
                receipt_id: receipt.id,
                mobile: student.mobile.clone(),
                timestamp: now,
            });
        }
        if receipt.notify.send_whatsapp {
            events.emit(Event::WhatsAppRequested {
                receipt_id: receipt.id,
                mobile: student.mobile.clone(),
                timestamp: now,
            });
        }

        Ok(receipt)
    }
}

impl Default for ReceiptIssuer {
    fn default() -> Self {
        Self::new(ComputationEngine::default())
    }
}

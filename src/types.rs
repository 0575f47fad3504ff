use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a student
pub type StudentId = Uuid;

/// unique identifier for a receipt
pub type ReceiptId = Uuid;

/// billing months of the academic year, April through March
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BillingMonth {
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
    Jan,
    Feb,
    Mar,
}

impl BillingMonth {
    pub const ALL: [BillingMonth; 12] = [
        BillingMonth::Apr,
        BillingMonth::May,
        BillingMonth::Jun,
        BillingMonth::Jul,
        BillingMonth::Aug,
        BillingMonth::Sep,
        BillingMonth::Oct,
        BillingMonth::Nov,
        BillingMonth::Dec,
        BillingMonth::Jan,
        BillingMonth::Feb,
        BillingMonth::Mar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BillingMonth::Apr => "Apr",
            BillingMonth::May => "May",
            BillingMonth::Jun => "Jun",
            BillingMonth::Jul => "Jul",
            BillingMonth::Aug => "Aug",
            BillingMonth::Sep => "Sep",
            BillingMonth::Oct => "Oct",
            BillingMonth::Nov => "Nov",
            BillingMonth::Dec => "Dec",
            BillingMonth::Jan => "Jan",
            BillingMonth::Feb => "Feb",
            BillingMonth::Mar => "Mar",
        }
    }
}

/// billing frequency of a schedule item
///
/// `Daily` is only produced for the synthetic late-fine row, never
/// configured on a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    #[serde(rename = "One-time")]
    OneTime,
    #[serde(rename = "Per-Term")]
    PerTerm,
    Daily,
}

/// fee concession applied to a receipt
///
/// percent and amount concessions are mutually exclusive by construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Concession {
    #[default]
    None,
    /// percentage of the gross total
    Percent(Decimal),
    /// fixed amount
    Amount(Money),
}

impl Concession {
    /// percent concession; zero or negative collapses to none
    pub fn percent(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Concession::Percent(value)
        } else {
            Concession::None
        }
    }

    /// fixed-amount concession; zero or negative collapses to none
    pub fn amount(value: Money) -> Self {
        if value.is_positive() {
            Concession::Amount(value)
        } else {
            Concession::None
        }
    }

    /// concession value against a gross total
    pub fn amount_against(&self, gross: Money) -> Money {
        match self {
            Concession::None => Money::ZERO,
            Concession::Percent(p) => gross.percentage(*p),
            Concession::Amount(a) => *a,
        }
    }
}

/// how a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMode {
    #[default]
    Cash,
    Cheque,
    Online,
    Upi,
}

/// operator-entered payment metadata attached to a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentDetails {
    pub mode: PaymentMode,
    pub bank_name: String,
    pub cheque_number: String,
    pub cheque_date: Option<NaiveDate>,
    pub remark: String,
}

/// which notification channels to signal after a receipt commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFlags {
    pub send_sms: bool,
    pub send_whatsapp: bool,
}

impl Default for NotificationFlags {
    fn default() -> Self {
        Self {
            send_sms: true,
            send_whatsapp: true,
        }
    }
}

impl NotificationFlags {
    pub const NONE: NotificationFlags = NotificationFlags {
        send_sms: false,
        send_whatsapp: false,
    };
}

pub mod fine;

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::schedule::FeeScheduleItem;
use crate::types::{BillingMonth, Concession, Frequency};

pub use fine::{FineAssessment, FineCalculator, FineConfig};

/// item name used for the synthetic late-fine breakdown row
pub const LATE_FINE_ITEM: &str = "Late Fee Fine";

/// which months a receipt bills, plus per-item inclusion overrides
///
/// items default to included; an override only excludes an item from
/// this receipt, the schedule itself is untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BillingSelection {
    months: BTreeSet<BillingMonth>,
    inclusion: BTreeMap<String, bool>,
}

impl BillingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// select the given months
    pub fn months(months: impl IntoIterator<Item = BillingMonth>) -> Self {
        Self {
            months: months.into_iter().collect(),
            inclusion: BTreeMap::new(),
        }
    }

    /// select every month of the academic year
    pub fn select_all() -> Self {
        Self::months(BillingMonth::ALL)
    }

    pub fn select(&mut self, month: BillingMonth) {
        self.months.insert(month);
    }

    pub fn deselect(&mut self, month: BillingMonth) {
        self.months.remove(&month);
    }

    pub fn is_selected(&self, month: BillingMonth) -> bool {
        self.months.contains(&month)
    }

    pub fn month_count(&self) -> u32 {
        self.months.len() as u32
    }

    pub fn selected_months(&self) -> impl Iterator<Item = BillingMonth> + '_ {
        self.months.iter().copied()
    }

    /// override whether a named item is billed on this receipt
    pub fn set_included(&mut self, item: impl Into<String>, included: bool) {
        self.inclusion.insert(item.into(), included);
    }

    /// absent override means included
    pub fn is_included(&self, item: &str) -> bool {
        self.inclusion.get(item).copied().unwrap_or(true)
    }
}

/// one computed line of a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdownRow {
    pub item: String,
    pub frequency: Frequency,
    pub unit_amount: Money,
    pub quantity: u32,
    pub line_total: Money,
    pub included: bool,
    pub is_penalty: bool,
}

/// operator adjustments layered on top of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ChargeAdjustments {
    /// added to the base total before concession; negative values are
    /// accepted and simply propagate
    pub additional_fee: Money,
    pub concession: Concession,
}

/// everything the computation needs, passed explicitly
#[derive(Debug, Clone)]
pub struct ComputationInput<'a> {
    pub schedule_items: &'a [FeeScheduleItem],
    pub selection: &'a BillingSelection,
    pub payment_date: NaiveDate,
    pub adjustments: ChargeAdjustments,
    pub opening_balance: Money,
    pub amount_received: Money,
}

/// full computed result for one prospective receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeComputation {
    pub rows: Vec<FeeBreakdownRow>,
    pub month_count: u32,
    pub payment_date: NaiveDate,
    pub base_total: Money,
    pub additional_fee: Money,
    pub gross_total: Money,
    pub concession: Money,
    pub late_fine: Money,
    pub opening_balance: Money,
    pub net_fee: Money,
    pub amount_received: Money,
    pub closing_balance: Money,
}

impl FeeComputation {
    /// rows actually charged; this is what a persisted receipt keeps
    pub fn included_rows(&self) -> Vec<FeeBreakdownRow> {
        self.rows.iter().filter(|r| r.included).cloned().collect()
    }
}

/// the fee computation engine
///
/// pure and total: the same input always yields the same breakdown,
/// and no input produces an error
pub struct ComputationEngine {
    fine: FineCalculator,
}

impl ComputationEngine {
    pub fn new(fine_config: FineConfig) -> Self {
        Self {
            fine: FineCalculator::new(fine_config),
        }
    }

    /// compute the breakdown and balances for one prospective receipt
    pub fn compute(&self, input: &ComputationInput<'_>) -> FeeComputation {
        let month_count = input.selection.month_count();

        let mut rows: Vec<FeeBreakdownRow> = input
            .schedule_items
            .iter()
            .map(|item| {
                let quantity = match item.frequency {
                    Frequency::Monthly => month_count,
                    // charged once per receipt, never scaled by months
                    Frequency::OneTime | Frequency::PerTerm | Frequency::Daily => 1,
                };
                let included = input.selection.is_included(&item.item);
                let line_total = if included {
                    item.amount.times(quantity)
                } else {
                    Money::ZERO
                };
                FeeBreakdownRow {
                    item: item.item.clone(),
                    frequency: item.frequency,
                    unit_amount: item.amount,
                    quantity,
                    line_total,
                    included,
                    is_penalty: false,
                }
            })
            .collect();

        let fine = self.fine.assess(input.payment_date);
        if fine.is_late() {
            // not subject to inclusion overrides
            rows.push(FeeBreakdownRow {
                item: LATE_FINE_ITEM.to_string(),
                frequency: Frequency::Daily,
                unit_amount: self.fine.config.daily_rate,
                quantity: fine.late_days,
                line_total: fine.fine_amount,
                included: true,
                is_penalty: true,
            });
        }

        let base_total: Money = rows
            .iter()
            .filter(|r| r.included)
            .map(|r| r.line_total)
            .sum();
        let gross_total = base_total + input.adjustments.additional_fee;
        let concession = input.adjustments.concession.amount_against(gross_total);
        let net_fee = gross_total - concession + input.opening_balance;
        let closing_balance = net_fee - input.amount_received;

        FeeComputation {
            rows,
            month_count,
            payment_date: input.payment_date,
            base_total,
            additional_fee: input.adjustments.additional_fee,
            gross_total,
            concession,
            late_fine: fine.fine_amount,
            opening_balance: input.opening_balance,
            net_fee,
            amount_received: input.amount_received,
            closing_balance,
        }
    }
}

impl Default for ComputationEngine {
    fn default() -> Self {
        Self::new(FineConfig::default())
    }
}

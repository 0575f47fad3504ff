use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{FeeError, Result};
use crate::types::Frequency;

/// one billable fee component, scoped to a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeScheduleItem {
    pub item: String,
    pub amount: Money,
    pub frequency: Frequency,
}

impl FeeScheduleItem {
    /// create a schedule item; amounts must be non-negative
    pub fn new(item: impl Into<String>, amount: Money, frequency: Frequency) -> Result<Self> {
        let item = item.into();
        if amount.is_negative() {
            return Err(FeeError::InvalidAmount { item, amount });
        }
        Ok(Self {
            item,
            amount,
            frequency,
        })
    }
}

/// class-wise fee schedule: class label -> ordered list of items
///
/// duplicate item names within a class are allowed and billed independently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FeeSchedule {
    classes: BTreeMap<String, Vec<FeeScheduleItem>>,
}

impl FeeSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// items for a class; an unknown class yields an empty list, not an error
    pub fn items(&self, class_label: &str) -> &[FeeScheduleItem] {
        self.classes
            .get(class_label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// replace the full item list for a class
    pub fn set_items(&mut self, class_label: impl Into<String>, items: Vec<FeeScheduleItem>) {
        self.classes.insert(class_label.into(), items);
    }

    /// append one item to a class
    pub fn add_item(&mut self, class_label: impl Into<String>, item: FeeScheduleItem) {
        self.classes.entry(class_label.into()).or_default().push(item);
    }

    /// clear all items for a class
    pub fn remove_all_items(&mut self, class_label: &str) {
        self.classes.remove(class_label);
    }

    /// class labels with a configured schedule
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// seed structure used when no schedule has been configured yet
    pub fn standard() -> Self {
        let mut schedule = Self::new();
        schedule.set_items(
            "Nursery",
            vec![
                FeeScheduleItem {
                    item: "Reg Fee".to_string(),
                    amount: Money::from_major(300),
                    frequency: Frequency::OneTime,
                },
                FeeScheduleItem {
                    item: "Monthly Fee".to_string(),
                    amount: Money::from_major(800),
                    frequency: Frequency::Monthly,
                },
                FeeScheduleItem {
                    item: "Transport Fee".to_string(),
                    amount: Money::from_major(400),
                    frequency: Frequency::Monthly,
                },
            ],
        );
        schedule.set_items(
            "KG",
            vec![
                FeeScheduleItem {
                    item: "Reg Fee".to_string(),
                    amount: Money::from_major(350),
                    frequency: Frequency::OneTime,
                },
                FeeScheduleItem {
                    item: "Monthly Fee".to_string(),
                    amount: Money::from_major(900),
                    frequency: Frequency::Monthly,
                },
            ],
        );
        schedule.set_items(
            "1",
            vec![
                FeeScheduleItem {
                    item: "Reg Fee".to_string(),
                    amount: Money::from_major(400),
                    frequency: Frequency::OneTime,
                },
                FeeScheduleItem {
                    item: "Monthly Fee".to_string(),
                    amount: Money::from_major(1_000),
                    frequency: Frequency::Monthly,
                },
                FeeScheduleItem {
                    item: "Science Lab Fee".to_string(),
                    amount: Money::from_major(200),
                    frequency: Frequency::OneTime,
                },
            ],
        );
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_class_is_empty() {
        let schedule = FeeSchedule::new();
        assert!(schedule.items("7").is_empty());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = FeeScheduleItem::new(
            "Reg Fee",
            Money::ZERO - Money::from_major(10),
            Frequency::OneTime,
        );
        assert!(matches!(result, Err(FeeError::InvalidAmount { .. })));
    }

    #[test]
    fn test_duplicate_items_kept() {
        let mut schedule = FeeSchedule::new();
        let fee =
            FeeScheduleItem::new("Exam Fee", Money::from_major(50), Frequency::PerTerm).unwrap();
        schedule.add_item("5", fee.clone());
        schedule.add_item("5", fee);
        assert_eq!(schedule.items("5").len(), 2);
    }

    #[test]
    fn test_remove_all_items() {
        let mut schedule = FeeSchedule::standard();
        assert!(!schedule.items("Nursery").is_empty());
        schedule.remove_all_items("Nursery");
        assert!(schedule.items("Nursery").is_empty());
    }

    #[test]
    fn test_standard_seed() {
        let schedule = FeeSchedule::standard();
        let class_one = schedule.items("1");
        assert_eq!(class_one.len(), 3);
        assert_eq!(class_one[0].item, "Reg Fee");
        assert_eq!(class_one[1].amount, Money::from_major(1_000));
        assert_eq!(class_one[1].frequency, Frequency::Monthly);
    }
}

pub mod json;

use crate::errors::{FeeError, Result};
use crate::receipt::FeeReceipt;
use crate::schedule::{FeeSchedule, FeeScheduleItem};
use crate::student::Student;
use crate::types::StudentId;

pub use json::JsonStore;

/// persistence boundary for the three record collections
///
/// receipts are append-only: the trait deliberately has no way to
/// update or delete one
pub trait RecordStore {
    fn students(&self) -> Result<Vec<Student>>;
    fn find_student(&self, id: StudentId) -> Result<Student>;
    fn add_student(&mut self, student: Student) -> Result<()>;
    fn update_student(&mut self, student: Student) -> Result<()>;

    fn all_receipts(&self) -> Result<Vec<FeeReceipt>>;
    /// receipts for one student, in append order
    fn receipts_for(&self, student_id: StudentId) -> Result<Vec<FeeReceipt>>;
    /// next monotonic receipt number
    fn next_receipt_number(&self) -> Result<u64>;
    fn append_receipt(&mut self, receipt: FeeReceipt) -> Result<()>;

    fn schedule_items(&self, class_label: &str) -> Result<Vec<FeeScheduleItem>>;
    fn set_schedule_items(&mut self, class_label: &str, items: Vec<FeeScheduleItem>)
        -> Result<()>;
    fn clear_schedule(&mut self, class_label: &str) -> Result<()>;
}

/// in-memory record store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    students: Vec<Student>,
    receipts: Vec<FeeReceipt>,
    schedule: FeeSchedule,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(schedule: FeeSchedule) -> Self {
        Self {
            schedule,
            ..Self::default()
        }
    }
}

impl RecordStore for MemoryStore {
    fn students(&self) -> Result<Vec<Student>> {
        Ok(self.students.clone())
    }

    fn find_student(&self, id: StudentId) -> Result<Student> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(FeeError::StudentNotFound { id })
    }

    fn add_student(&mut self, student: Student) -> Result<()> {
        self.students.push(student);
        Ok(())
    }

    fn update_student(&mut self, student: Student) -> Result<()> {
        let slot = self
            .students
            .iter_mut()
            .find(|s| s.id == student.id)
            .ok_or(FeeError::StudentNotFound { id: student.id })?;
        *slot = student;
        Ok(())
    }

    fn all_receipts(&self) -> Result<Vec<FeeReceipt>> {
        Ok(self.receipts.clone())
    }

    fn receipts_for(&self, student_id: StudentId) -> Result<Vec<FeeReceipt>> {
        Ok(self
            .receipts
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }

    fn next_receipt_number(&self) -> Result<u64> {
        Ok(self
            .receipts
            .iter()
            .map(|r| r.receipt_number)
            .max()
            .unwrap_or(0)
            + 1)
    }

    fn append_receipt(&mut self, receipt: FeeReceipt) -> Result<()> {
        self.receipts.push(receipt);
        Ok(())
    }

    fn schedule_items(&self, class_label: &str) -> Result<Vec<FeeScheduleItem>> {
        Ok(self.schedule.items(class_label).to_vec())
    }

    fn set_schedule_items(
        &mut self,
        class_label: &str,
        items: Vec<FeeScheduleItem>,
    ) -> Result<()> {
        self.schedule.set_items(class_label, items);
        Ok(())
    }

    fn clear_schedule(&mut self, class_label: &str) -> Result<()> {
        self.schedule.remove_all_items(class_label);
        Ok(())
    }
}

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{FeeError, Result};
use crate::receipt::FeeReceipt;
use crate::schedule::{FeeSchedule, FeeScheduleItem};
use crate::store::RecordStore;
use crate::student::Student;
use crate::types::StudentId;

const TMP_SUFFIX: &str = "tmp";

/// the persisted document: three collections plus a version counter
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoreDocument {
    version: u64,
    students: Vec<Student>,
    receipts: Vec<FeeReceipt>,
    schedule: FeeSchedule,
}

/// file-backed record store
///
/// the whole document is read-modify-written on every mutation, with
/// an expected-version check so a concurrent writer surfaces as a
/// `VersionConflict` instead of a silent lost update. a failed
/// mutation is rolled back in memory; after a conflict call
/// [`reload`] to pick up the other writer's changes before retrying.
///
/// [`reload`]: JsonStore::reload
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    doc: StoreDocument,
}

impl JsonStore {
    /// open an existing store file, or start an empty one
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            StoreDocument::default()
        };
        Ok(Self { path, doc })
    }

    /// open a store seeded with a fee schedule if none exists yet
    pub fn open_with_schedule(path: impl Into<PathBuf>, schedule: FeeSchedule) -> Result<Self> {
        let mut store = Self::open(path)?;
        if store.doc.version == 0 && store.doc.schedule.classes().next().is_none() {
            store.doc.schedule = schedule;
            store.commit()?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// re-read the document from disk, discarding unsaved state
    pub fn reload(&mut self) -> Result<()> {
        if self.path.exists() {
            let raw = fs::read_to_string(&self.path)?;
            self.doc = serde_json::from_str(&raw)?;
        }
        Ok(())
    }

    fn disk_version(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }
        let raw = fs::read_to_string(&self.path)?;
        let doc: StoreDocument = serde_json::from_str(&raw)?;
        Ok(doc.version)
    }

    /// persist the document if nobody else wrote since we loaded it
    fn commit(&mut self) -> Result<()> {
        let on_disk = self.disk_version()?;
        if on_disk != self.doc.version {
            return Err(FeeError::VersionConflict {
                expected: self.doc.version,
                actual: on_disk,
            });
        }

        self.doc.version += 1;
        if let Err(e) = self.write_document() {
            // a failed write must leave the version matching disk
            self.doc.version -= 1;
            return Err(e);
        }
        Ok(())
    }

    fn write_document(&self) -> Result<()> {
        let tmp = self.path.with_extension(TMP_SUFFIX);
        let payload = serde_json::to_string_pretty(&self.doc)?;
        let mut file = File::create(&tmp)?;
        file.write_all(payload.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonStore {
    fn students(&self) -> Result<Vec<Student>> {
        Ok(self.doc.students.clone())
    }

    fn find_student(&self, id: StudentId) -> Result<Student> {
        self.doc
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(FeeError::StudentNotFound { id })
    }

    fn add_student(&mut self, student: Student) -> Result<()> {
        self.doc.students.push(student);
        if let Err(e) = self.commit() {
            self.doc.students.pop();
            return Err(e);
        }
        Ok(())
    }

    fn update_student(&mut self, student: Student) -> Result<()> {
        let slot = self
            .doc
            .students
            .iter_mut()
            .find(|s| s.id == student.id)
            .ok_or(FeeError::StudentNotFound { id: student.id })?;
        let previous = std::mem::replace(slot, student);
        if let Err(e) = self.commit() {
            if let Some(slot) = self.doc.students.iter_mut().find(|s| s.id == previous.id) {
                *slot = previous;
            }
            return Err(e);
        }
        Ok(())
    }

    fn all_receipts(&self) -> Result<Vec<FeeReceipt>> {
        Ok(self.doc.receipts.clone())
    }

    fn receipts_for(&self, student_id: StudentId) -> Result<Vec<FeeReceipt>> {
        Ok(self
            .doc
            .receipts
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }

    fn next_receipt_number(&self) -> Result<u64> {
        Ok(self
            .doc
            .receipts
            .iter()
            .map(|r| r.receipt_number)
            .max()
            .unwrap_or(0)
            + 1)
    }

    fn append_receipt(&mut self, receipt: FeeReceipt) -> Result<()> {
        self.doc.receipts.push(receipt);
        if let Err(e) = self.commit() {
            // a failed commit must not leave a phantom receipt in memory
            self.doc.receipts.pop();
            return Err(e);
        }
        Ok(())
    }

    fn schedule_items(&self, class_label: &str) -> Result<Vec<FeeScheduleItem>> {
        Ok(self.doc.schedule.items(class_label).to_vec())
    }

    fn set_schedule_items(
        &mut self,
        class_label: &str,
        items: Vec<FeeScheduleItem>,
    ) -> Result<()> {
        let previous = self.doc.schedule.items(class_label).to_vec();
        self.doc.schedule.set_items(class_label, items);
        if let Err(e) = self.commit() {
            self.doc.schedule.set_items(class_label, previous);
            return Err(e);
        }
        Ok(())
    }

    fn clear_schedule(&mut self, class_label: &str) -> Result<()> {
        let previous = self.doc.schedule.items(class_label).to_vec();
        self.doc.schedule.remove_all_items(class_label);
        if let Err(e) = self.commit() {
            self.doc.schedule.set_items(class_label, previous);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::student::AdmissionDetails;
    use crate::types::Frequency;
    use tempfile::tempdir;

    fn sample_student() -> Student {
        Student::admit(
            "Aarav Sharma",
            "1",
            "A",
            "2024-25",
            "Rajesh Sharma",
            "Priya Sharma",
            "9876543210",
            "12 MG Road, Jaipur",
            AdmissionDetails::default(),
        )
    }

    #[test]
    fn test_open_save_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");

        let student = sample_student();
        {
            let mut store = JsonStore::open(&path).unwrap();
            store.add_student(student.clone()).unwrap();
        }

        let store = JsonStore::open(&path).unwrap();
        assert_eq!(store.find_student(student.id).unwrap().name, student.name);
    }

    #[test]
    fn test_version_conflict_detected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");

        let mut first = JsonStore::open(&path).unwrap();
        first.add_student(sample_student()).unwrap();

        // second writer loads the same version, then first writes again
        let mut second = JsonStore::open(&path).unwrap();
        first.add_student(sample_student()).unwrap();

        let result = second.add_student(sample_student());
        assert!(matches!(result, Err(FeeError::VersionConflict { .. })));
        // the rejected student is not left in memory
        assert_eq!(second.students().unwrap().len(), 1);

        // reload resolves the conflict
        second.reload().unwrap();
        second.add_student(sample_student()).unwrap();
        assert_eq!(second.students().unwrap().len(), 3);
    }

    #[test]
    fn test_transient_io_failure_is_retryable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut store = JsonStore::open(&path).unwrap();

        // occupy the temp path so the next write fails
        let blocker = path.with_extension("tmp");
        fs::create_dir(&blocker).unwrap();

        let result = store.add_student(sample_student());
        assert!(matches!(result, Err(FeeError::Io(_))));
        assert!(store.students().unwrap().is_empty());

        // once the io problem clears, the same store writes again
        // without any version conflict
        fs::remove_dir(&blocker).unwrap();
        store.add_student(sample_student()).unwrap();
        assert_eq!(store.students().unwrap().len(), 1);

        store.reload().unwrap();
        assert_eq!(store.students().unwrap().len(), 1);
    }

    #[test]
    fn test_seeded_schedule() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");

        let store = JsonStore::open_with_schedule(&path, FeeSchedule::standard()).unwrap();
        let items = store.schedule_items("Nursery").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].amount, Money::from_major(800));
        assert_eq!(items[1].frequency, Frequency::Monthly);

        // an existing file is not reseeded
        let store = JsonStore::open_with_schedule(&path, FeeSchedule::new()).unwrap();
        assert_eq!(store.schedule_items("Nursery").unwrap().len(), 3);
    }
}

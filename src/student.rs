use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::StudentId;

/// a student record, created once by admission and updated in place
///
/// the core never deletes students; receipts keep referencing the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub class_label: String,
    pub section: String,
    pub session: String,
    pub father_name: String,
    pub mother_name: String,
    pub mobile: String,
    pub address: String,
    pub photo: Option<String>,
    pub admission: AdmissionDetails,
}

/// admission metadata captured when the student record is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AdmissionDetails {
    pub registration_number: String,
    pub admission_date: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub category: String,
    pub transport: String,
}

impl Student {
    /// admit a new student, assigning a fresh id
    #[allow(clippy::too_many_arguments)]
    pub fn admit(
        name: impl Into<String>,
        class_label: impl Into<String>,
        section: impl Into<String>,
        session: impl Into<String>,
        father_name: impl Into<String>,
        mother_name: impl Into<String>,
        mobile: impl Into<String>,
        address: impl Into<String>,
        admission: AdmissionDetails,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            class_label: class_label.into(),
            section: section.into(),
            session: session.into(),
            father_name: father_name.into(),
            mother_name: mother_name.into(),
            mobile: mobile.into(),
            address: address.into(),
            photo: None,
            admission,
        }
    }
}

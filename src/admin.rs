//! administrative operations around the record store: admission,
//! student edits, and class schedule management

use hourglass_rs::SafeTimeProvider;

use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::schedule::FeeScheduleItem;
use crate::store::RecordStore;
use crate::student::Student;

/// record a new admission
pub fn admit_student<S: RecordStore>(
    store: &mut S,
    student: Student,
    time_provider: &SafeTimeProvider,
    events: &mut EventStore,
) -> Result<Student> {
    store.add_student(student.clone())?;
    events.emit(Event::StudentAdmitted {
        student_id: student.id,
        class_label: student.class_label.clone(),
        timestamp: time_provider.now(),
    });
    Ok(student)
}

/// update an existing student record
pub fn update_student<S: RecordStore>(
    store: &mut S,
    student: Student,
    time_provider: &SafeTimeProvider,
    events: &mut EventStore,
) -> Result<()> {
    store.update_student(student.clone())?;
    events.emit(Event::StudentUpdated {
        student_id: student.id,
        timestamp: time_provider.now(),
    });
    Ok(())
}

/// replace the fee schedule for a class
pub fn set_class_schedule<S: RecordStore>(
    store: &mut S,
    class_label: &str,
    items: Vec<FeeScheduleItem>,
    time_provider: &SafeTimeProvider,
    events: &mut EventStore,
) -> Result<()> {
    let item_count = items.len();
    store.set_schedule_items(class_label, items)?;
    events.emit(Event::ScheduleChanged {
        class_label: class_label.to_string(),
        item_count,
        timestamp: time_provider.now(),
    });
    Ok(())
}

/// clear the fee schedule for a class
pub fn clear_class_schedule<S: RecordStore>(
    store: &mut S,
    class_label: &str,
    time_provider: &SafeTimeProvider,
    events: &mut EventStore,
) -> Result<()> {
    store.clear_schedule(class_label)?;
    events.emit(Event::ScheduleChanged {
        class_label: class_label.to_string(),
        item_count: 0,
        timestamp: time_provider.now(),
    });
    Ok(())
}

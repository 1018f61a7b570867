mod assignment;
mod course;
mod enrollment;
mod reminder;
mod shared;
mod user;

pub use assignment::{Assignment, AssignmentKind, AssignmentWithCourse, UnknownAssignmentKind};
pub use course::Course;
pub use enrollment::{Enrollment, Submission};
pub use reminder::{DeliveryReport, ReminderEvent, ReminderTriple};
pub use shared::entity::{Entity, ID};
pub use user::{default_lead_times, ReminderPreference, User};

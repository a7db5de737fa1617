mod assignment;
mod course;
mod notification;
mod reminder;
mod shared;
mod submission;
mod user;

pub use assignment::Assignment;
pub use course::{Course, CourseMembership};
pub use notification::Notification;
pub use reminder::{format_deadline, Reminder, ReminderEmail, ReminderStage, StageTransition};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use submission::Submission;
pub use user::{User, UserRole};

pub mod create_assignment_reminders;
pub mod send_reminders;

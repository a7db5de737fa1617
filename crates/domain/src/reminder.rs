use crate::shared::entity::{Entity, ID};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MILLIS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;

/// A `Reminder` tracks the deadline-notification progress for one
/// (student, assignment) pair. It is created when the assignment is
/// created and advances through `ReminderStage`s as the deadline
/// approaches, emitting at most one notification per stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub student_id: ID,
    pub assignment_id: ID,
    /// Denormalized copy of the assignment deadline at creation time,
    /// unix timestamp in millis
    pub deadline: i64,
    pub stage: ReminderStage,
}

impl Reminder {
    pub fn new(student_id: ID, assignment_id: ID, deadline: i64) -> Self {
        Self {
            id: Default::default(),
            student_id,
            assignment_id,
            deadline,
            stage: ReminderStage::Pending,
        }
    }

    /// Evaluate the reminder against the current time and return the
    /// transition it should take, if any.
    ///
    /// The machine is level-triggered: each stage fires only while the
    /// time-to-deadline is inside its window. A window that has fully
    /// passed between two sweeps is skipped, never caught up on, which
    /// keeps every sweep idempotent and stateless.
    pub fn evaluate(&self, now: i64) -> Option<StageTransition> {
        let hours_left = (self.deadline - now) as f64 / MILLIS_PER_HOUR;
        match self.stage {
            ReminderStage::Completed => None,
            ReminderStage::Pending if hours_left <= 24.0 && hours_left > 12.0 => {
                Some(StageTransition::Send24)
            }
            ReminderStage::Sent24 if hours_left <= 12.0 && hours_left > 0.0 => {
                Some(StageTransition::Send12)
            }
            _ if hours_left <= 0.0 => Some(StageTransition::Complete),
            _ => None,
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Discrete point in a reminder's progression towards its deadline.
/// Monotonically non-decreasing; `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStage {
    Pending,
    Sent24,
    Sent12,
    Completed,
}

impl ReminderStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent24 => "sent24",
            Self::Sent12 => "sent12",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for ReminderStage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent24" => Ok(Self::Sent24),
            "sent12" => Ok(Self::Sent12),
            "completed" => Ok(Self::Completed),
            _ => Err(()),
        }
    }
}

/// The action a sweep should take for one reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTransition {
    Send24,
    Send12,
    Complete,
}

impl StageTransition {
    pub fn next_stage(&self) -> ReminderStage {
        match self {
            Self::Send24 => ReminderStage::Sent24,
            Self::Send12 => ReminderStage::Sent12,
            Self::Complete => ReminderStage::Completed,
        }
    }

    /// Subject and body of the email for this transition. `Complete`
    /// transitions are silent.
    pub fn email_content(&self, title: &str, deadline: i64) -> Option<ReminderEmail> {
        let due = format_deadline(deadline);
        match self {
            Self::Send24 => Some(ReminderEmail {
                subject: format!(r#"Reminder: Assignment "{}" due in 24 hours"#, title),
                body: format!(
                    r#"Your assignment "{}" is due on {}. Please complete it on time."#,
                    title, due
                ),
            }),
            Self::Send12 => Some(ReminderEmail {
                subject: format!(r#"Reminder: Assignment "{}" due in 12 hours"#, title),
                body: format!(r#"Hurry up! Your assignment "{}" is due on {}."#, title, due),
            }),
            Self::Complete => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEmail {
    pub subject: String,
    pub body: String,
}

/// Render a deadline timestamp for human-readable messages.
pub fn format_deadline(deadline: i64) -> String {
    match Utc.timestamp_millis_opt(deadline).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => deadline.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const HOUR: i64 = 1000 * 60 * 60;

    fn reminder_at(stage: ReminderStage, hours_left: i64) -> (Reminder, i64) {
        let now = 1_600_000_000_000;
        let mut reminder = Reminder::new(ID::new(), ID::new(), now + hours_left * HOUR);
        reminder.stage = stage;
        (reminder, now)
    }

    #[test]
    fn pending_far_from_deadline_does_not_transition() {
        let (reminder, now) = reminder_at(ReminderStage::Pending, 48);
        assert_eq!(reminder.evaluate(now), None);
    }

    #[test]
    fn pending_inside_24h_window_sends_24h_notice() {
        let (reminder, now) = reminder_at(ReminderStage::Pending, 20);
        assert_eq!(reminder.evaluate(now), Some(StageTransition::Send24));
    }

    #[test]
    fn pending_that_missed_the_24h_window_is_skipped_not_caught_up() {
        // Level-triggered: at 6 hours left a pending reminder does
        // nothing; the 24h window has passed and is never replayed.
        let (reminder, now) = reminder_at(ReminderStage::Pending, 6);
        assert_eq!(reminder.evaluate(now), None);
    }

    #[test]
    fn sent24_inside_12h_window_sends_12h_notice() {
        let (reminder, now) = reminder_at(ReminderStage::Sent24, 6);
        assert_eq!(reminder.evaluate(now), Some(StageTransition::Send12));
    }

    #[test]
    fn sent24_outside_its_window_does_not_transition() {
        let (reminder, now) = reminder_at(ReminderStage::Sent24, 20);
        assert_eq!(reminder.evaluate(now), None);
    }

    #[test]
    fn every_live_stage_completes_after_the_deadline() {
        for stage in [
            ReminderStage::Pending,
            ReminderStage::Sent24,
            ReminderStage::Sent12,
        ]
        .iter()
        {
            let (reminder, now) = reminder_at(*stage, -1);
            assert_eq!(reminder.evaluate(now), Some(StageTransition::Complete));
        }
    }

    #[test]
    fn completed_is_terminal() {
        for hours_left in [-10, 0, 6, 20, 48].iter() {
            let (reminder, now) = reminder_at(ReminderStage::Completed, *hours_left);
            assert_eq!(reminder.evaluate(now), None);
        }
    }

    #[test]
    fn boundaries_are_inclusive_on_the_lower_edge() {
        // Exactly 24h left is inside the 24h window, exactly 12h left is
        // inside the 12h window, exactly 0h left completes.
        let (reminder, now) = reminder_at(ReminderStage::Pending, 24);
        assert_eq!(reminder.evaluate(now), Some(StageTransition::Send24));

        let (reminder, now) = reminder_at(ReminderStage::Sent24, 12);
        assert_eq!(reminder.evaluate(now), Some(StageTransition::Send12));

        let (reminder, now) = reminder_at(ReminderStage::Sent12, 0);
        assert_eq!(reminder.evaluate(now), Some(StageTransition::Complete));
    }

    #[test]
    fn email_content_uses_the_stage_template() {
        let deadline = 1_600_000_000_000;
        let email = StageTransition::Send24
            .email_content("Lab 3", deadline)
            .unwrap();
        assert_eq!(email.subject, r#"Reminder: Assignment "Lab 3" due in 24 hours"#);
        assert!(email.body.starts_with(r#"Your assignment "Lab 3" is due on"#));

        let email = StageTransition::Send12
            .email_content("Lab 3", deadline)
            .unwrap();
        assert_eq!(email.subject, r#"Reminder: Assignment "Lab 3" due in 12 hours"#);
        assert!(email.body.starts_with("Hurry up!"));

        assert!(StageTransition::Complete
            .email_content("Lab 3", deadline)
            .is_none());
    }

    #[test]
    fn stage_roundtrips_through_str() {
        for stage in [
            ReminderStage::Pending,
            ReminderStage::Sent24,
            ReminderStage::Sent12,
            ReminderStage::Completed,
        ]
        .iter()
        {
            assert_eq!(stage.as_str().parse::<ReminderStage>(), Ok(*stage));
        }
        assert!("bogus".parse::<ReminderStage>().is_err());
    }
}

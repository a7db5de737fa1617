use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::{Arc, Mutex};
use volp_domain::{Reminder, ReminderStage, ID};

pub struct InMemoryReminderRepo {
    reminders: Arc<Mutex<Vec<Reminder>>>,
}

impl InMemoryReminderRepo {
    pub fn new(reminders: Arc<Mutex<Vec<Reminder>>>) -> Self {
        Self { reminders }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        for reminder in reminders {
            insert(reminder, &self.reminders);
        }
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_incomplete(&self) -> Vec<Reminder> {
        find_by(&self.reminders, |r| r.stage != ReminderStage::Completed)
    }

    async fn update_stage(
        &self,
        reminder_id: &ID,
        expected: ReminderStage,
        new_stage: ReminderStage,
    ) -> anyhow::Result<bool> {
        // Single lock acquisition makes the compare-and-swap atomic
        let updated = update_by(
            &self.reminders,
            |r| r.id == *reminder_id && r.stage == expected,
            |r| r.stage = new_stage,
        );
        Ok(updated > 0)
    }
}

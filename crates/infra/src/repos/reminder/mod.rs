mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use volp_domain::{Reminder, ReminderStage, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// All reminders that have not reached the terminal stage yet.
    async fn find_incomplete(&self) -> Vec<Reminder>;
    /// Conditional stage update: succeeds only while the stored stage
    /// still equals `expected`. Returns `false` on a stale-stage
    /// conflict, which callers treat as "another sweep got here first".
    async fn update_stage(
        &self,
        reminder_id: &ID,
        expected: ReminderStage,
        new_stage: ReminderStage,
    ) -> anyhow::Result<bool>;
}

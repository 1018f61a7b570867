use super::ISentReminderRepo;
use campus_scheduler_domain::ReminderEvent;
use std::collections::HashSet;
use std::sync::Mutex;

pub struct InMemorySentReminderRepo {
    sent: Mutex<HashSet<ReminderEvent>>,
}

impl InMemorySentReminderRepo {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISentReminderRepo for InMemorySentReminderRepo {
    async fn contains(&self, event: &ReminderEvent) -> anyhow::Result<bool> {
        Ok(self.sent.lock().unwrap().contains(event))
    }

    async fn insert(&self, event: &ReminderEvent) -> anyhow::Result<()> {
        self.sent.lock().unwrap().insert(event.clone());
        Ok(())
    }
}

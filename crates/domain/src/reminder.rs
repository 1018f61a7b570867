use crate::assignment::Assignment;
use crate::course::Course;
use crate::shared::entity::ID;
use crate::user::User;
use serde::{Deserialize, Serialize};

/// One reminder obligation: the `User` should be notified about the
/// `Assignment` at exactly `lead_time_days` days before its due date.
/// The sent-reminders ledger is keyed by this tuple so that each
/// obligation is dispatched at most once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderEvent {
    pub user_id: ID,
    pub assignment_id: ID,
    pub lead_time_days: u32,
}

/// A (user, course, assignment) combination eligible for a reminder.
#[derive(Debug, Clone)]
pub struct ReminderTriple {
    pub user: User,
    pub course: Course,
    pub assignment: Assignment,
}

impl ReminderTriple {
    pub fn event(&self, lead_time_days: u32) -> ReminderEvent {
        ReminderEvent {
            user_id: self.user.id.clone(),
            assignment_id: self.assignment.id.clone(),
            lead_time_days,
        }
    }
}

/// Outcome of one scan for a single lead-time value. Ephemeral, used
/// for logs and the manual-trigger response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub lead_time_days: u32,
    pub matched: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped_duplicates: usize,
    pub degraded: bool,
}

impl DeliveryReport {
    pub fn new(lead_time_days: u32, degraded: bool) -> Self {
        Self {
            lead_time_days,
            matched: 0,
            sent: 0,
            failed: 0,
            skipped_duplicates: 0,
            degraded,
        }
    }
}

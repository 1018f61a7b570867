use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lead times (whole days before a due date) every user starts out with.
pub fn default_lead_times() -> BTreeSet<u32> {
    vec![1, 3, 7].into_iter().collect()
}

/// Per-user reminder settings. A stored record missing `lead_times`
/// decodes to the default set rather than failing the scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderPreference {
    pub enabled: bool,
    #[serde(default = "default_lead_times")]
    pub lead_times: BTreeSet<u32>,
}

impl Default for ReminderPreference {
    fn default() -> Self {
        Self {
            enabled: true,
            lead_times: default_lead_times(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub full_name: String,
    pub reminder_preference: ReminderPreference,
}

impl User {
    pub fn new(email: &str, full_name: &str) -> Self {
        Self {
            id: Default::default(),
            email: email.into(),
            full_name: full_name.into(),
            reminder_preference: Default::default(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_users_get_default_preferences() {
        let user = User::new("ada@campus.test", "Ada Lovelace");
        assert!(user.reminder_preference.enabled);
        assert_eq!(user.reminder_preference.lead_times, default_lead_times());
    }

    #[test]
    fn missing_lead_times_decode_to_default() {
        let pref: ReminderPreference = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
        assert_eq!(pref.lead_times, default_lead_times());
    }

    #[test]
    fn explicit_lead_times_are_kept() {
        let pref: ReminderPreference =
            serde_json::from_str(r#"{"enabled":false,"lead_times":[2,5]}"#).unwrap();
        assert!(!pref.enabled);
        assert_eq!(pref.lead_times, vec![2, 5].into_iter().collect());
    }
}

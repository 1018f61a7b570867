use crate::shared::entity::ID;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One handed-in attempt at an `Assignment`. At most one per
/// (user, assignment) pair, enforced by the submission flow upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub assignment_id: ID,
    pub submitted_at: DateTime<Utc>,
    pub score: Option<f64>,
}

/// Membership of a user in a course, together with everything the user
/// has submitted there. Keyed by (user_id, course_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub user_id: ID,
    pub course_id: ID,
    pub submissions: Vec<Submission>,
}

impl Enrollment {
    pub fn new(user_id: ID, course_id: ID) -> Self {
        Self {
            user_id,
            course_id,
            submissions: Vec::new(),
        }
    }

    pub fn has_submission(&self, assignment_id: &ID) -> bool {
        self.submissions
            .iter()
            .any(|s| s.assignment_id == *assignment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn finds_submission_by_assignment() {
        let assignment_id = ID::new();
        let mut enrollment = Enrollment::new(ID::new(), ID::new());
        assert!(!enrollment.has_submission(&assignment_id));

        enrollment.submissions.push(Submission {
            assignment_id: assignment_id.clone(),
            submitted_at: Utc::now(),
            score: Some(87.5),
        });
        assert!(enrollment.has_submission(&assignment_id));
        assert!(!enrollment.has_submission(&ID::new()));
    }
}

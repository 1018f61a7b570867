use crate::course::Course;
use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    Quiz,
    Assignment,
    Project,
    Exam,
}

impl AssignmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Assignment => "assignment",
            Self::Project => "project",
            Self::Exam => "exam",
        }
    }
}

impl Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Unknown assignment kind: {0}")]
pub struct UnknownAssignmentKind(String);

impl FromStr for AssignmentKind {
    type Err = UnknownAssignmentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz" => Ok(Self::Quiz),
            "assignment" => Ok(Self::Assignment),
            "project" => Ok(Self::Project),
            "exam" => Ok(Self::Exam),
            _ => Err(UnknownAssignmentKind(s.to_string())),
        }
    }
}

/// An `Assignment` belongs to exactly one `Course` and is due at a
/// specific instant. Only active assignments are considered by the
/// reminder scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: ID,
    pub course_id: ID,
    pub title: String,
    pub kind: AssignmentKind,
    pub max_score: f64,
    pub due_at: DateTime<Utc>,
    pub active: bool,
}

impl Entity for Assignment {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Catalog query result: an `Assignment` joined with its parent `Course`.
#[derive(Debug, Clone)]
pub struct AssignmentWithCourse {
    pub assignment: Assignment,
    pub course: Course,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrips_through_str() {
        for kind in [
            AssignmentKind::Quiz,
            AssignmentKind::Assignment,
            AssignmentKind::Project,
            AssignmentKind::Exam,
        ] {
            assert_eq!(kind.as_str().parse::<AssignmentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("homework".parse::<AssignmentKind>().is_err());
    }
}

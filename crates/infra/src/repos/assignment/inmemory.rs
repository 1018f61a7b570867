use super::IAssignmentRepo;
use crate::repos::course::ICourseRepo;
use crate::repos::shared::inmemory_repo::*;
use campus_scheduler_domain::{Assignment, AssignmentWithCourse};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

pub struct InMemoryAssignmentRepo {
    assignments: std::sync::Mutex<Vec<Assignment>>,
    /// Needed to join assignments with their parent course
    courses: Arc<dyn ICourseRepo>,
}

impl InMemoryAssignmentRepo {
    pub fn new(courses: Arc<dyn ICourseRepo>) -> Self {
        Self {
            assignments: std::sync::Mutex::new(vec![]),
            courses,
        }
    }
}

#[async_trait::async_trait]
impl IAssignmentRepo for InMemoryAssignmentRepo {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()> {
        insert(assignment, &self.assignments);
        Ok(())
    }

    async fn find_active_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<AssignmentWithCourse>> {
        let assignments = find_by(&self.assignments, |a: &Assignment| {
            a.active && a.due_at >= start && a.due_at < end
        });

        let mut with_courses = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            match self.courses.find(&assignment.course_id).await {
                Some(course) => with_courses.push(AssignmentWithCourse { assignment, course }),
                None => warn!(
                    "Assignment {} references missing course {}",
                    assignment.id, assignment.course_id
                ),
            }
        }
        Ok(with_courses)
    }
}

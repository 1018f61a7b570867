use super::IEnrollmentRepo;
use crate::repos::shared::inmemory_repo::*;
use campus_scheduler_domain::{Enrollment, ID};

pub struct InMemoryEnrollmentRepo {
    enrollments: std::sync::Mutex<Vec<Enrollment>>,
}

impl InMemoryEnrollmentRepo {
    pub fn new() -> Self {
        Self {
            enrollments: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IEnrollmentRepo for InMemoryEnrollmentRepo {
    async fn insert(&self, enrollment: &Enrollment) -> anyhow::Result<()> {
        insert(enrollment, &self.enrollments);
        Ok(())
    }

    async fn is_enrolled(&self, user_id: &ID, course_id: &ID) -> anyhow::Result<bool> {
        Ok(exists_by(&self.enrollments, |e: &Enrollment| {
            e.user_id == *user_id && e.course_id == *course_id
        }))
    }

    async fn has_submission(&self, user_id: &ID, assignment_id: &ID) -> anyhow::Result<bool> {
        Ok(exists_by(&self.enrollments, |e: &Enrollment| {
            e.user_id == *user_id && e.has_submission(assignment_id)
        }))
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Enrollment>> {
        Ok(find_by(&self.enrollments, |e: &Enrollment| {
            e.user_id == *user_id
        }))
    }
}

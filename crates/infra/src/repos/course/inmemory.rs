use super::ICourseRepo;
use crate::repos::shared::inmemory_repo::*;
use campus_scheduler_domain::{Course, ID};

pub struct InMemoryCourseRepo {
    courses: std::sync::Mutex<Vec<Course>>,
}

impl InMemoryCourseRepo {
    pub fn new() -> Self {
        Self {
            courses: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ICourseRepo for InMemoryCourseRepo {
    async fn insert(&self, course: &Course) -> anyhow::Result<()> {
        insert(course, &self.courses);
        Ok(())
    }

    async fn find(&self, course_id: &ID) -> Option<Course> {
        find(course_id, &self.courses)
    }
}

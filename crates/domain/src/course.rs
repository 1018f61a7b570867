use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A `Course` owns a set of `Assignment`s and is the unit students
/// enroll into. Authoring flows live outside this service, the
/// scheduler only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: ID,
    pub name: String,
}

impl Course {
    pub fn new(name: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
        }
    }
}

impl Entity for Course {
    fn id(&self) -> &ID {
        &self.id
    }
}

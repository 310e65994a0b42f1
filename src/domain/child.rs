use serde::{Deserialize, Serialize};

pub const MIN_CHILD_AGE: u8 = 3;
pub const MAX_CHILD_AGE: u8 = 18;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub parent_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub grade: String,
    pub avatar_url: Option<String>,
}

/// A child account that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildDraft {
    pub parent_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub grade: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<u8>,
    pub grade: Option<String>,
    pub avatar_url: Option<String>,
}

impl Child {
    pub fn from_draft(id: i64, draft: ChildDraft) -> Self {
        Self {
            id,
            parent_id: draft.parent_id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            age: draft.age,
            grade: draft.grade,
            avatar_url: draft.avatar_url,
        }
    }

    pub fn apply(&mut self, changes: ChildChanges) {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(age) = changes.age {
            self.age = age;
        }
        if let Some(grade) = changes.grade {
            self.grade = grade;
        }
        if changes.avatar_url.is_some() {
            self.avatar_url = changes.avatar_url;
        }
    }
}

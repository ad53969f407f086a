use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Category {
    /// New category with a generated id. Saving an edit keeps the old id.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: format!("cat-{}", Uuid::new_v4()),
            name: name.into(),
            color: color.into(),
        }
    }
}

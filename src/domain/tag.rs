use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Identifiable, NamedEntity};

/// Free-form label attached to any number of transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color_hex: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color_hex: "#FF9500".into(),
            sort_order: 0,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for Tag {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Tag {
    fn name(&self) -> &str {
        &self.name
    }
}

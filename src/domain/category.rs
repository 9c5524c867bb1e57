use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Identifiable, NamedEntity};
use crate::errors::{LedgerError, Result};

/// Classifies transactions for budgeting and tallies.
///
/// The category tree is exactly two levels deep: a category constructed
/// with a parent is a leaf and can never acquire children of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: CategoryKind,
    pub parent_id: Option<Uuid>,
    pub icon_name: String,
    pub color_hex: String,
    #[serde(default)]
    pub hidden: bool,
    /// Pin-to-front flag for pickers; carries no structural meaning.
    #[serde(default)]
    pub quick_select: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a root category, which may later acquire children.
    pub fn new_root(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            parent_id: None,
            icon_name: "folder".into(),
            color_hex: "#8E8E93".into(),
            hidden: false,
            quick_select: false,
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    /// Creates a leaf under `parent`. Fails when the parent is itself a
    /// leaf (depth would exceed two) or when the kinds differ.
    pub fn new_child(name: impl Into<String>, parent: &Category) -> Result<Self> {
        if parent.parent_id.is_some() {
            return Err(LedgerError::Validation(format!(
                "category `{}` is a leaf and cannot have children",
                parent.name
            )));
        }
        let mut child = Self::new_root(name, parent.kind);
        child.parent_id = Some(parent.id);
        Ok(child)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Expense,
    Income,
}

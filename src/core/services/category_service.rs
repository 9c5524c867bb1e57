use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::ledger::Ledger;
use crate::errors::{LedgerError, Result};

pub struct CategoryService;

impl CategoryService {
    pub fn add(ledger: &mut Ledger, category: Category) -> Result<Uuid> {
        Self::validate_name(ledger, None, &category.name)?;
        if let Some(parent_id) = category.parent_id {
            Self::validate_parent(ledger, parent_id, None, category.kind)?;
        }
        Ok(ledger.add_category(category))
    }

    pub fn edit(ledger: &mut Ledger, id: Uuid, changes: Category) -> Result<()> {
        Self::validate_name(ledger, Some(id), &changes.name)?;
        let current_kind = ledger
            .category(id)
            .map(|category| category.kind)
            .ok_or_else(|| LedgerError::Validation("Category not found".into()))?;
        // Children always share their parent's kind, so a root with
        // children keeps its kind until they are detached.
        if changes.kind != current_kind && !ledger.category_children(id).is_empty() {
            return Err(LedgerError::Validation(
                "Cannot change the kind of a category that has children".into(),
            ));
        }
        if let Some(parent_id) = changes.parent_id {
            Self::validate_parent(ledger, parent_id, Some(id), changes.kind)?;
            // A category with children can never be demoted to a leaf.
            if !ledger.category_children(id).is_empty() {
                return Err(LedgerError::Validation(
                    "Category with children cannot be given a parent".into(),
                ));
            }
        }
        let category = ledger
            .category_mut(id)
            .ok_or_else(|| LedgerError::Validation("Category not found".into()))?;
        category.name = changes.name;
        category.kind = changes.kind;
        category.parent_id = changes.parent_id;
        category.icon_name = changes.icon_name;
        category.color_hex = changes.color_hex;
        category.hidden = changes.hidden;
        category.quick_select = changes.quick_select;
        category.sort_order = changes.sort_order;
        ledger.touch();
        Ok(())
    }

    /// Removes a category. Without `cascade`, the category must have no
    /// children and no attached transactions. With `cascade`, the whole
    /// subtree (and its budgets) is deleted, but only when no category in
    /// the subtree has any attached transaction.
    pub fn remove(ledger: &mut Ledger, id: Uuid, cascade: bool) -> Result<()> {
        if ledger.category(id).is_none() {
            return Err(LedgerError::Validation("Category not found".into()));
        }
        let subtree = ledger.category_subtree_ids(id);
        if !cascade && subtree.len() > 1 {
            return Err(LedgerError::Validation(
                "Category has child categories; reassign or delete them first".into(),
            ));
        }
        let attached = ledger
            .transactions
            .iter()
            .filter(|txn| txn.category_id.map_or(false, |cid| subtree.contains(&cid)))
            .count();
        if attached > 0 {
            return Err(LedgerError::DeleteBlocked {
                entity: "category",
                count: attached,
            });
        }
        ledger
            .budgets
            .retain(|budget| !subtree.contains(&budget.category_id));
        ledger
            .categories
            .retain(|category| !subtree.contains(&category.id));
        ledger.touch();
        Ok(())
    }

    pub fn list(ledger: &Ledger) -> Vec<&Category> {
        ledger.categories.iter().collect()
    }

    fn validate_name(ledger: &Ledger, exclude: Option<Uuid>, candidate: &str) -> Result<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = ledger.categories.iter().any(|category| {
            let name = category.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(LedgerError::Validation(format!(
                "Category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }

    fn validate_parent(
        ledger: &Ledger,
        parent_id: Uuid,
        current: Option<Uuid>,
        kind: crate::domain::category::CategoryKind,
    ) -> Result<()> {
        if Some(parent_id) == current {
            return Err(LedgerError::Validation(
                "Category cannot be its own parent".into(),
            ));
        }
        let parent = ledger
            .category(parent_id)
            .ok_or_else(|| LedgerError::Validation("Parent category not found".into()))?;
        if parent.parent_id.is_some() {
            return Err(LedgerError::Validation(format!(
                "Category `{}` is a leaf and cannot have children",
                parent.name
            )));
        }
        if parent.kind != kind {
            return Err(LedgerError::Validation(
                "Child category kind must match its parent".into(),
            ));
        }
        Ok(())
    }
}

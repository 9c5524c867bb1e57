use uuid::Uuid;

use crate::domain::ledger::Ledger;
use crate::domain::tag::Tag;
use crate::errors::{LedgerError, Result};

pub struct TagService;

impl TagService {
    pub fn add(ledger: &mut Ledger, tag: Tag) -> Result<Uuid> {
        Self::validate_name(ledger, None, &tag.name)?;
        Ok(ledger.add_tag(tag))
    }

    pub fn edit(ledger: &mut Ledger, id: Uuid, changes: Tag) -> Result<()> {
        Self::validate_name(ledger, Some(id), &changes.name)?;
        let tag = ledger
            .tags
            .iter_mut()
            .find(|tag| tag.id == id)
            .ok_or_else(|| LedgerError::Validation("Tag not found".into()))?;
        tag.name = changes.name;
        tag.color_hex = changes.color_hex;
        tag.sort_order = changes.sort_order;
        ledger.touch();
        Ok(())
    }

    /// Removes a tag and detaches it from every transaction. Tags are
    /// free-form labels, so removal never blocks on usage.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        let before = ledger.tags.len();
        ledger.tags.retain(|tag| tag.id != id);
        if ledger.tags.len() == before {
            return Err(LedgerError::Validation("Tag not found".into()));
        }
        for txn in &mut ledger.transactions {
            txn.tag_ids.retain(|tag_id| *tag_id != id);
        }
        ledger.touch();
        Ok(())
    }

    pub fn list(ledger: &Ledger) -> Vec<&Tag> {
        ledger.tags.iter().collect()
    }

    fn validate_name(ledger: &Ledger, exclude: Option<Uuid>, candidate: &str) -> Result<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = ledger.tags.iter().any(|tag| {
            let name = tag.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| tag.id != id)
        });
        if duplicate {
            Err(LedgerError::Validation(format!(
                "Tag `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::delivery::Block;

/// Directory entry for a named occupant. Denormalized: deliveries carry a
/// copy of the name, not a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: String,
    pub name: String,
    pub apartment: String,
    pub block: Block,
    /// Free text, domain-specific document number (e.g. CPF). Not
    /// checksum-validated.
    pub document: String,
    /// Free text, format not normalized.
    pub phone: String,
}

/// Partial update from the manual edit surface.
#[derive(Debug, Clone, Default)]
pub struct ResidentEdit {
    pub name: Option<String>,
    pub apartment: Option<String>,
    pub block: Option<Block>,
    pub document: Option<String>,
    pub phone: Option<String>,
}

impl Resident {
    pub fn apply_edit(&mut self, edit: ResidentEdit) {
        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(apartment) = edit.apartment {
            self.apartment = apartment;
        }
        if let Some(block) = edit.block {
            self.block = block;
        }
        if let Some(document) = edit.document {
            self.document = document;
        }
        if let Some(phone) = edit.phone {
            self.phone = phone;
        }
    }
}

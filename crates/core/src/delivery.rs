use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Closed enumerations
// ---------------------------------------------------------------------------

/// Delivery status. Two states, one supported transition: PENDENTE → ENTREGUE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "PENDENTE")]
    Pendente,
    #[serde(rename = "ENTREGUE")]
    Entregue,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "PENDENTE",
            Self::Entregue => "ENTREGUE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ();

    /// Exact match on the wire strings; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDENTE" => Ok(Self::Pendente),
            "ENTREGUE" => Ok(Self::Entregue),
            _ => Err(()),
        }
    }
}

/// Building identifier. The condominium has a fixed set of three blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Block {
    #[serde(rename = "1")]
    B1,
    #[serde(rename = "2")]
    B2,
    #[serde(rename = "3")]
    B3,
}

impl Block {
    /// All blocks, in report column order.
    pub const ALL: [Block; 3] = [Block::B1, Block::B2, Block::B3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B1 => "1",
            Self::B2 => "2",
            Self::B3 => "3",
        }
    }

    /// Column header used by the grouped report ("Bloco 1", ...).
    pub fn label(&self) -> String {
        format!("Bloco {}", self.as_str())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Block {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::B1),
            "2" => Ok(Self::B2),
            "3" => Ok(Self::B3),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

/// A tracked parcel for one apartment.
///
/// `delivered_at` and `picked_up_by` are set together at the status
/// transition and are both absent while the delivery is pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: String,
    pub apartment: String,
    pub block: Block,
    pub resident_name: String,
    pub description: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picked_up_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeliveryError {
    /// `mark_delivered` on a record that is already delivered.
    AlreadyDelivered { id: String },
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDelivered { id } => {
                write!(f, "delivery '{id}' is already marked as delivered")
            }
        }
    }
}

impl std::error::Error for DeliveryError {}

impl Delivery {
    /// Create a pending delivery from a manual registration.
    pub fn new(
        id: impl Into<String>,
        apartment: impl Into<String>,
        block: Block,
        resident_name: impl Into<String>,
        description: impl Into<String>,
        photo_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            apartment: apartment.into(),
            block,
            resident_name: resident_name.into(),
            description: description.into(),
            status: Status::Pendente,
            created_at: now,
            delivered_at: None,
            picked_up_by: None,
            photo_url,
        }
    }

    /// The one-way PENDENTE → ENTREGUE transition.
    ///
    /// Sets status, pickup name and delivered-at together, exactly once.
    pub fn mark_delivered(
        &mut self,
        picked_up_by: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), DeliveryError> {
        if self.status == Status::Entregue {
            return Err(DeliveryError::AlreadyDelivered { id: self.id.clone() });
        }
        self.status = Status::Entregue;
        self.picked_up_by = Some(picked_up_by.into());
        self.delivered_at = Some(at);
        Ok(())
    }

    /// Apply a manual edit: provided fields replace, omitted fields keep
    /// their current value. Status, timestamps and id are not editable
    /// here; the transition has its own operation.
    pub fn apply_edit(&mut self, edit: DeliveryEdit) {
        if let Some(apartment) = edit.apartment {
            self.apartment = apartment;
        }
        if let Some(block) = edit.block {
            self.block = block;
        }
        if let Some(resident_name) = edit.resident_name {
            self.resident_name = resident_name;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(photo_url) = edit.photo_url {
            self.photo_url = Some(photo_url);
        }
    }
}

/// Partial update from the manual edit surface.
#[derive(Debug, Clone, Default)]
pub struct DeliveryEdit {
    pub apartment: Option<String>,
    pub block: Option<Block>,
    pub resident_name: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
}

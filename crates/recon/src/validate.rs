use std::fmt;

use portaria_core::{Delivery, Resident};

/// Why a row was rejected. Counted by the caller; never aborts a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// A required field is missing or blank.
    EmptyField(&'static str),
    /// Block value is not one of the recognized variants.
    InvalidBlock(String),
    /// Timestamp value does not parse.
    InvalidTimestamp { field: &'static str, value: String },
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(name) => write!(f, "required field '{name}' is empty"),
            Self::InvalidBlock(value) => write!(f, "unrecognized block '{value}'"),
            Self::InvalidTimestamp { field, value } => {
                write!(f, "field '{field}': cannot parse timestamp '{value}'")
            }
        }
    }
}

/// Accept or reject a fully-constructed delivery.
///
/// Status, block and created-at are already typed, so what remains is the
/// required-text check. The reason-carrying result replaces the source's
/// bare boolean guard without changing any accept/reject decision.
pub fn validate_delivery(d: &Delivery) -> Result<(), RowRejection> {
    if d.id.trim().is_empty() {
        return Err(RowRejection::EmptyField("id"));
    }
    if d.resident_name.trim().is_empty() {
        return Err(RowRejection::EmptyField("resident name"));
    }
    if d.apartment.trim().is_empty() {
        return Err(RowRejection::EmptyField("apartment"));
    }
    if d.description.trim().is_empty() {
        return Err(RowRejection::EmptyField("description"));
    }
    Ok(())
}

/// Thin predicate over [`validate_delivery`].
pub fn is_valid_delivery(d: &Delivery) -> bool {
    validate_delivery(d).is_ok()
}

/// Accept or reject a fully-constructed resident.
pub fn validate_resident(r: &Resident) -> Result<(), RowRejection> {
    if r.id.trim().is_empty() {
        return Err(RowRejection::EmptyField("id"));
    }
    if r.name.trim().is_empty() {
        return Err(RowRejection::EmptyField("name"));
    }
    if r.apartment.trim().is_empty() {
        return Err(RowRejection::EmptyField("apartment"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use portaria_core::Block;

    fn delivery() -> Delivery {
        Delivery::new(
            "1",
            "101",
            Block::B1,
            "João da Silva",
            "Pacote Amazon",
            None,
            Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn accepts_well_formed_delivery() {
        assert!(is_valid_delivery(&delivery()));
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut d = delivery();
        d.resident_name = "  ".into();
        assert_eq!(
            validate_delivery(&d),
            Err(RowRejection::EmptyField("resident name"))
        );

        let mut d = delivery();
        d.description = String::new();
        assert_eq!(
            validate_delivery(&d),
            Err(RowRejection::EmptyField("description"))
        );
        assert!(!is_valid_delivery(&d));
    }

    #[test]
    fn resident_requires_id_name_apartment() {
        let r = Resident {
            id: "1".into(),
            name: "Maria".into(),
            apartment: "202".into(),
            block: Block::B2,
            document: String::new(),
            phone: String::new(),
        };
        assert!(validate_resident(&r).is_ok());

        let mut bad = r.clone();
        bad.name = String::new();
        assert_eq!(validate_resident(&bad), Err(RowRejection::EmptyField("name")));
    }
}

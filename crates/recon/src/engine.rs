use std::collections::HashMap;

use chrono::{DateTime, Utc};

use portaria_core::{parse_timestamp, Block, Delivery, Resident, Status};

use crate::error::ImportError;
use crate::mapper::{map_resident_row, map_row};
use crate::model::{Candidate, DeliveryOutcome, ResidentCandidate, ResidentOutcome};
use crate::validate::{validate_delivery, validate_resident, RowRejection};

/// Merge one import batch into an existing delivery collection.
///
/// Rows are processed in input order against the in-progress collection, so
/// a row referencing an identifier inserted earlier in the same batch is an
/// update against that just-inserted record. A bad row never aborts the
/// batch; it is dropped and counted in `skipped`.
///
/// `now` supplies the created-at default for inserted rows whose own
/// timestamp is missing or invalid.
pub fn reconcile_batch(
    existing: Vec<Delivery>,
    rows: &[HashMap<String, String>],
    now: DateTime<Utc>,
) -> Result<DeliveryOutcome, ImportError> {
    if rows.is_empty() {
        return Err(ImportError::Empty);
    }

    let mut deliveries = existing;
    let mut added = 0u32;
    let mut updated = 0u32;
    let mut skipped = 0u32;

    for row in rows {
        let Some(candidate) = map_row(row) else {
            skipped += 1;
            continue;
        };

        match deliveries.iter().position(|d| d.id == candidate.id) {
            Some(i) => {
                let merged = merge_update(&deliveries[i], &candidate);
                if validate_delivery(&merged).is_ok() {
                    // Overwrite in place: position in the collection is kept
                    deliveries[i] = merged;
                    updated += 1;
                } else {
                    skipped += 1;
                }
            }
            None => match build_insert(&candidate, now) {
                Ok(delivery) if validate_delivery(&delivery).is_ok() => {
                    deliveries.push(delivery);
                    added += 1;
                }
                _ => skipped += 1,
            },
        }
    }

    Ok(DeliveryOutcome { records: deliveries, added, updated, skipped })
}

/// Update path: candidate fields replace stored ones only when usable.
///
/// Scalars replace when non-empty; block and status only on an exact
/// enumerated value; timestamps only when independently valid. Anything
/// else falls back to the existing value. If the merge lands on PENDENTE,
/// the transition fields are cleared; they may not outlive the status.
fn merge_update(existing: &Delivery, c: &Candidate) -> Delivery {
    let mut merged = existing.clone();

    if let Some(v) = &c.resident_name {
        merged.resident_name = v.clone();
    }
    if let Some(v) = &c.apartment {
        merged.apartment = v.clone();
    }
    if let Some(b) = c.block.as_deref().and_then(|v| v.parse::<Block>().ok()) {
        merged.block = b;
    }
    if let Some(v) = &c.description {
        merged.description = v.clone();
    }
    if let Some(s) = c.status.as_deref().and_then(|v| v.parse::<Status>().ok()) {
        merged.status = s;
    }
    if let Some(dt) = c.created_at.as_deref().and_then(parse_timestamp) {
        merged.created_at = dt;
    }
    if let Some(dt) = c.delivered_at.as_deref().and_then(parse_timestamp) {
        merged.delivered_at = Some(dt);
    }
    if let Some(v) = &c.picked_up_by {
        merged.picked_up_by = Some(v.clone());
    }

    if merged.status == Status::Pendente {
        merged.delivered_at = None;
        merged.picked_up_by = None;
    }

    merged
}

/// Insert path: build a new record from candidate values alone.
///
/// Created-at defaults to `now` when the candidate's is missing or invalid;
/// status defaults to PENDENTE unless exactly ENTREGUE; delivered-at is set
/// only when independently valid. The block has no stored value to fall
/// back to, so an unrecognized one rejects the row.
fn build_insert(c: &Candidate, now: DateTime<Utc>) -> Result<Delivery, RowRejection> {
    let block = match c.block.as_deref() {
        Some(v) => v
            .parse::<Block>()
            .map_err(|_| RowRejection::InvalidBlock(v.to_string()))?,
        None => return Err(RowRejection::EmptyField("block")),
    };

    let status = match c.status.as_deref().and_then(|v| v.parse::<Status>().ok()) {
        Some(Status::Entregue) => Status::Entregue,
        _ => Status::Pendente,
    };

    let created_at = c
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(now);

    let (delivered_at, picked_up_by) = if status == Status::Entregue {
        (
            c.delivered_at.as_deref().and_then(parse_timestamp),
            c.picked_up_by.clone(),
        )
    } else {
        (None, None)
    };

    Ok(Delivery {
        id: c.id.clone(),
        apartment: c.apartment.clone().unwrap_or_default(),
        block,
        resident_name: c.resident_name.clone().unwrap_or_default(),
        description: c.description.clone().unwrap_or_default(),
        status,
        created_at,
        delivered_at,
        picked_up_by,
        photo_url: None,
    })
}

// ---------------------------------------------------------------------------
// Residents
// ---------------------------------------------------------------------------

/// Resident mirror of [`reconcile_batch`]: update-or-insert with the same
/// fallback-to-existing semantics, minus status and timestamp handling.
pub fn reconcile_residents(
    existing: Vec<Resident>,
    rows: &[HashMap<String, String>],
) -> Result<ResidentOutcome, ImportError> {
    if rows.is_empty() {
        return Err(ImportError::Empty);
    }

    let mut residents = existing;
    let mut added = 0u32;
    let mut updated = 0u32;
    let mut skipped = 0u32;

    for row in rows {
        let Some(candidate) = map_resident_row(row) else {
            skipped += 1;
            continue;
        };

        match residents.iter().position(|r| r.id == candidate.id) {
            Some(i) => {
                let merged = merge_resident(&residents[i], &candidate);
                if validate_resident(&merged).is_ok() {
                    residents[i] = merged;
                    updated += 1;
                } else {
                    skipped += 1;
                }
            }
            None => match build_resident(&candidate) {
                Ok(resident) if validate_resident(&resident).is_ok() => {
                    residents.push(resident);
                    added += 1;
                }
                _ => skipped += 1,
            },
        }
    }

    Ok(ResidentOutcome { records: residents, added, updated, skipped })
}

fn merge_resident(existing: &Resident, c: &ResidentCandidate) -> Resident {
    let mut merged = existing.clone();

    if let Some(v) = &c.name {
        merged.name = v.clone();
    }
    if let Some(v) = &c.apartment {
        merged.apartment = v.clone();
    }
    if let Some(b) = c.block.as_deref().and_then(|v| v.parse::<Block>().ok()) {
        merged.block = b;
    }
    if let Some(v) = &c.document {
        merged.document = v.clone();
    }
    if let Some(v) = &c.phone {
        merged.phone = v.clone();
    }

    merged
}

fn build_resident(c: &ResidentCandidate) -> Result<Resident, RowRejection> {
    let block = match c.block.as_deref() {
        Some(v) => v
            .parse::<Block>()
            .map_err(|_| RowRejection::InvalidBlock(v.to_string()))?,
        None => return Err(RowRejection::EmptyField("block")),
    };

    Ok(Resident {
        id: c.id.clone(),
        name: c.name.clone().unwrap_or_default(),
        apartment: c.apartment.clone().unwrap_or_default(),
        block,
        document: c.document.clone().unwrap_or_default(),
        phone: c.phone.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn pending(id: &str, apartment: &str, block: Block) -> Delivery {
        Delivery::new(
            id,
            apartment,
            block,
            "João da Silva",
            "Pacote Amazon",
            None,
            Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn fresh_id_inserts_and_counts_added() {
        let rows = vec![row(&[
            ("ID", "9"),
            ("Morador", "Ana Souza"),
            ("Apartamento", "504"),
            ("Bloco", "2"),
            ("Descrição", "Mercado Livre"),
        ])];
        let out = reconcile_batch(vec![pending("1", "101", Block::B1)], &rows, now()).unwrap();

        assert_eq!(out.records.len(), 2);
        assert_eq!((out.added, out.updated, out.skipped), (1, 0, 0));
        let d = &out.records[1];
        assert_eq!(d.id, "9");
        assert_eq!(d.status, Status::Pendente);
        assert_eq!(d.created_at, now(), "invalid/missing created-at defaults to now");
    }

    #[test]
    fn existing_id_updates_in_place_and_counts_updated() {
        let existing = vec![pending("1", "101", Block::B1), pending("2", "202", Block::B2)];
        let rows = vec![row(&[("ID", "1"), ("Apartamento", "103")])];
        let out = reconcile_batch(existing, &rows, now()).unwrap();

        assert_eq!(out.records.len(), 2);
        assert_eq!((out.added, out.updated), (0, 1));
        assert_eq!(out.records[0].id, "1", "updated record keeps its position");
        assert_eq!(out.records[0].apartment, "103");
        assert_eq!(out.records[0].resident_name, "João da Silva", "blank fields fall back");
    }

    #[test]
    fn update_keeps_existing_on_unrecognized_block_and_status() {
        let existing = vec![pending("1", "101", Block::B1)];
        let rows = vec![row(&[("ID", "1"), ("Bloco", "9"), ("Status", "DELIVERED")])];
        let out = reconcile_batch(existing, &rows, now()).unwrap();

        assert_eq!(out.updated, 1);
        assert_eq!(out.records[0].block, Block::B1);
        assert_eq!(out.records[0].status, Status::Pendente);
    }

    #[test]
    fn invalid_timestamp_does_not_override_existing() {
        let existing = vec![pending("1", "101", Block::B1)];
        let original_created = existing[0].created_at;
        let rows = vec![row(&[("ID", "1"), ("Data de Criação", "não é data")])];
        let out = reconcile_batch(existing, &rows, now()).unwrap();

        assert_eq!(out.records[0].created_at, original_created);
    }

    #[test]
    fn failed_validation_leaves_original_untouched() {
        // Stored record with a blank description (legacy data): a merge that
        // does not supply one fails validation and must not partially apply.
        let mut bad = pending("1", "101", Block::B1);
        bad.description = String::new();
        let snapshot = bad.clone();

        let rows = vec![row(&[("ID", "1"), ("Apartamento", "999")])];
        let out = reconcile_batch(vec![bad], &rows, now()).unwrap();

        assert_eq!((out.added, out.updated, out.skipped), (0, 0, 1));
        assert_eq!(out.records[0], snapshot, "no partial merge is observable");
    }

    #[test]
    fn insert_with_unrecognized_block_is_skipped() {
        let rows = vec![row(&[
            ("ID", "9"),
            ("Morador", "Ana"),
            ("Apartamento", "504"),
            ("Bloco", "4"),
            ("Descrição", "Caixa"),
        ])];
        let out = reconcile_batch(Vec::new(), &rows, now()).unwrap();
        assert_eq!((out.added, out.skipped), (0, 1));
        assert!(out.records.is_empty());
    }

    #[test]
    fn delivered_status_without_date_is_not_promoted() {
        // Imported row: ENTREGUE, no delivery date, over an existing pending
        // record. Status flips; delivered-at stays absent.
        let existing = vec![pending("5", "101", Block::B1)];
        let rows = vec![row(&[("ID", "5"), ("Status", "ENTREGUE")])];
        let out = reconcile_batch(existing, &rows, now()).unwrap();

        assert_eq!(out.records[0].status, Status::Entregue);
        assert_eq!(out.records[0].delivered_at, None);
    }

    #[test]
    fn reverted_status_clears_transition_fields() {
        let mut delivered = pending("5", "101", Block::B1);
        delivered
            .mark_delivered("Maria", Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap())
            .unwrap();

        let rows = vec![row(&[("ID", "5"), ("Status", "PENDENTE")])];
        let out = reconcile_batch(vec![delivered], &rows, now()).unwrap();

        let d = &out.records[0];
        assert_eq!(d.status, Status::Pendente);
        assert_eq!(d.delivered_at, None);
        assert_eq!(d.picked_up_by, None);
    }

    #[test]
    fn same_batch_insert_then_update_yields_one_record() {
        let rows = vec![
            row(&[
                ("ID", "9"),
                ("Morador", "Ana"),
                ("Apartamento", "504"),
                ("Bloco", "2"),
                ("Descrição", "Caixa"),
            ]),
            row(&[("ID", "9"), ("Apartamento", "505")]),
        ];
        let out = reconcile_batch(Vec::new(), &rows, now()).unwrap();

        assert_eq!(out.records.len(), 1);
        assert_eq!((out.added, out.updated), (1, 1));
        assert_eq!(out.records[0].apartment, "505");
    }

    #[test]
    fn rows_without_id_are_skipped_not_fatal() {
        let rows = vec![
            row(&[("Morador", "Sem Id")]),
            row(&[
                ("ID", "9"),
                ("Morador", "Ana"),
                ("Apartamento", "504"),
                ("Bloco", "2"),
                ("Descrição", "Caixa"),
            ]),
        ];
        let out = reconcile_batch(Vec::new(), &rows, now()).unwrap();
        assert_eq!((out.added, out.skipped), (1, 1));
    }

    #[test]
    fn empty_batch_is_structural_error() {
        let err = reconcile_batch(Vec::new(), &[], now()).unwrap_err();
        assert_eq!(err, ImportError::Empty);
    }

    #[test]
    fn idempotent_over_its_own_output() {
        let rows = vec![
            row(&[
                ("ID", "1"),
                ("Morador", "Ana"),
                ("Apartamento", "101"),
                ("Bloco", "1"),
                ("Descrição", "Caixa"),
                ("Data de Criação", "01/02/2026 10:00"),
            ]),
            row(&[
                ("ID", "2"),
                ("Morador", "Bia"),
                ("Apartamento", "202"),
                ("Bloco", "2"),
                ("Descrição", "Envelope"),
                ("Status", "ENTREGUE"),
                ("Data de Criação", "01/02/2026 10:00"),
                ("Data de Entrega", "02/02/2026 15:00"),
                ("Retirado Por", "Bia"),
            ]),
        ];

        let first = reconcile_batch(Vec::new(), &rows, now()).unwrap();
        assert_eq!((first.added, first.updated), (2, 0));

        let second = reconcile_batch(first.records.clone(), &rows, now()).unwrap();
        assert_eq!(second.added, 0);
        assert_eq!(second.records, first.records);
    }

    #[test]
    fn resident_batch_mirrors_insert_update_counting() {
        let rows = vec![
            row(&[
                ("ID", "1"),
                ("Nome", "Maria"),
                ("Apartamento", "202"),
                ("Bloco", "2"),
            ]),
            row(&[("ID", "1"), ("Telefone", "(21) 91234-5678")]),
        ];
        let out = reconcile_residents(Vec::new(), &rows).unwrap();

        assert_eq!(out.records.len(), 1);
        assert_eq!((out.added, out.updated), (1, 1));
        assert_eq!(out.records[0].phone, "(21) 91234-5678");
        assert_eq!(out.records[0].name, "Maria");
    }
}

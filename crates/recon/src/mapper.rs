use std::collections::HashMap;

use portaria_core::headers;

use crate::model::{Candidate, ResidentCandidate};

/// Fetch a trimmed, non-empty cell. Blank and whitespace-only values are
/// treated as absent.
fn field(row: &HashMap<String, String>, name: &str) -> Option<String> {
    row.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Translate a decoded row into a delivery candidate.
///
/// Unknown headers are ignored and missing headers yield absent fields.
/// Returns `None` when the `ID` column is absent or blank: an unidentified
/// row cannot be reconciled and is dropped before validation.
pub fn map_row(row: &HashMap<String, String>) -> Option<Candidate> {
    let id = field(row, headers::ID)?;

    Some(Candidate {
        id,
        resident_name: field(row, headers::RESIDENT),
        apartment: field(row, headers::APARTMENT),
        block: field(row, headers::BLOCK),
        description: field(row, headers::DESCRIPTION),
        status: field(row, headers::STATUS),
        created_at: field(row, headers::CREATED_AT),
        delivered_at: field(row, headers::DELIVERED_AT),
        picked_up_by: field(row, headers::PICKED_UP_BY),
    })
}

/// Translate a decoded row into a resident candidate. Same contract as
/// [`map_row`]: no `ID`, no candidate.
pub fn map_resident_row(row: &HashMap<String, String>) -> Option<ResidentCandidate> {
    let id = field(row, headers::ID)?;

    Some(ResidentCandidate {
        id,
        name: field(row, headers::NAME),
        apartment: field(row, headers::APARTMENT),
        block: field(row, headers::BLOCK),
        document: field(row, headers::DOCUMENT),
        phone: field(row, headers::PHONE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn maps_all_known_columns() {
        let c = map_row(&row(&[
            ("ID", "7"),
            ("Morador", "Ana Souza"),
            ("Apartamento", "1904"),
            ("Bloco", "2"),
            ("Descrição", "Caixa Shopee"),
            ("Status", "PENDENTE"),
            ("Data de Criação", "01/02/2026 10:00"),
            ("Data de Entrega", ""),
            ("Retirado Por", ""),
        ]))
        .unwrap();

        assert_eq!(c.id, "7");
        assert_eq!(c.resident_name.as_deref(), Some("Ana Souza"));
        assert_eq!(c.block.as_deref(), Some("2"));
        assert_eq!(c.delivered_at, None, "blank cells are absent fields");
        assert_eq!(c.picked_up_by, None);
    }

    #[test]
    fn drops_row_without_id() {
        assert!(map_row(&row(&[("Morador", "Ana")])).is_none());
        assert!(map_row(&row(&[("ID", ""), ("Morador", "Ana")])).is_none());
        assert!(map_row(&row(&[("ID", "   ")])).is_none());
    }

    #[test]
    fn ignores_unknown_headers() {
        let c = map_row(&row(&[("ID", "1"), ("Observações", "frágil")])).unwrap();
        assert_eq!(c.id, "1");
        assert!(c.description.is_none());
    }

    #[test]
    fn trims_cell_values() {
        let c = map_row(&row(&[("ID", " 3 "), ("Apartamento", " 101 ")])).unwrap();
        assert_eq!(c.id, "3");
        assert_eq!(c.apartment.as_deref(), Some("101"));
    }

    #[test]
    fn maps_resident_columns() {
        let c = map_resident_row(&row(&[
            ("ID", "2"),
            ("Nome", "Maria Oliveira"),
            ("Apartamento", "202"),
            ("Bloco", "2"),
            ("Documento", "234.567.890-11"),
            ("Telefone", "(21) 91234-5678"),
        ]))
        .unwrap();
        assert_eq!(c.name.as_deref(), Some("Maria Oliveira"));
        assert_eq!(c.phone.as_deref(), Some("(21) 91234-5678"));

        assert!(map_resident_row(&row(&[("Nome", "Maria")])).is_none());
    }
}

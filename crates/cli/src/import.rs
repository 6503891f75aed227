//! `portaria import` — CSV batch import with per-row reconciliation.

use std::path::Path;

use chrono::Utc;

use portaria_core::headers::{DELIVERY_HEADERS, RESIDENT_HEADERS};
use portaria_recon::{decode_rows, reconcile_batch, reconcile_residents, ImportError};
use portaria_store::JsonStore;

use crate::util::read_file_as_utf8;
use crate::{load_deliveries, load_residents, save_deliveries, save_residents, CliError};

pub fn cmd_import(store: &JsonStore, file: &Path) -> Result<(), CliError> {
    let text = read_file_as_utf8(file)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", file.display())))?;
    let rows = decode_rows(&text, &DELIVERY_HEADERS).map_err(|e| match e {
        ImportError::NoKnownColumns => CliError::import(e)
            .with_hint("the first row must carry the interchange headers (ID, Morador, Apartamento, ...)"),
        e => CliError::import(e),
    })?;

    let existing = load_deliveries(store)?;
    let outcome = reconcile_batch(existing, &rows, Utc::now()).map_err(CliError::import)?;
    save_deliveries(store, &outcome.records)?;

    eprintln!(
        "import: {} added, {} updated, {} skipped",
        outcome.added, outcome.updated, outcome.skipped
    );
    Ok(())
}

pub fn cmd_import_residents(store: &JsonStore, file: &Path) -> Result<(), CliError> {
    let text = read_file_as_utf8(file)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", file.display())))?;
    let rows = decode_rows(&text, &RESIDENT_HEADERS).map_err(CliError::import)?;

    let existing = load_residents(store)?;
    let outcome = reconcile_residents(existing, &rows).map_err(CliError::import)?;
    save_residents(store, &outcome.records)?;

    eprintln!(
        "import: {} added, {} updated, {} skipped",
        outcome.added, outcome.updated, outcome.skipped
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use portaria_core::Status;
    use tempfile::tempdir;

    #[test]
    fn import_inserts_then_updates_on_rerun() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data"));
        let file = dir.path().join("entregas.csv");

        std::fs::write(
            &file,
            "ID,Morador,Apartamento,Bloco,Descrição,Status,Data de Criação\n\
             1,Ana Souza,101,1,Caixa,PENDENTE,01/02/2026 10:00\n\
             2,Bia Lima,202,2,Envelope,PENDENTE,01/02/2026 11:00\n",
        )
        .unwrap();

        cmd_import(&store, &file).unwrap();
        let deliveries = load_deliveries(&store).unwrap();
        assert_eq!(deliveries.len(), 2);
        assert_eq!(deliveries[0].status, Status::Pendente);

        // Re-running the identical file updates in place, adds nothing
        cmd_import(&store, &file).unwrap();
        assert_eq!(load_deliveries(&store).unwrap().len(), 2);
    }

    #[test]
    fn empty_file_is_structural_failure_with_no_write() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data"));
        let file = dir.path().join("vazio.csv");
        std::fs::write(&file, "").unwrap();

        let err = cmd_import(&store, &file).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_IMPORT_STRUCTURAL);
        assert!(!store.path_for(portaria_store::DELIVERIES_KEY).exists());
    }

    #[test]
    fn resident_import_round() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data"));
        let file = dir.path().join("moradores.csv");
        std::fs::write(
            &file,
            "ID,Nome,Apartamento,Bloco,Documento,Telefone\n\
             1,Maria Oliveira,202,2,234.567.890-11,(21) 91234-5678\n",
        )
        .unwrap();

        cmd_import_residents(&store, &file).unwrap();
        let residents = load_residents(&store).unwrap();
        assert_eq!(residents.len(), 1);
        assert_eq!(residents[0].name, "Maria Oliveira");
    }
}

// Portaria CLI - delivery and resident registry operations

mod deliveries;
mod exit_codes;
mod export;
mod import;
mod residents;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use portaria_core::{Block, Delivery, Resident};
use portaria_export::ExportError;
use portaria_recon::ImportError;
use portaria_store::{JsonStore, StoreError, DELIVERIES_KEY, RESIDENTS_KEY};

use exit_codes::{
    EXIT_ERROR, EXIT_EXPORT_EMPTY, EXIT_IMPORT_STRUCTURAL, EXIT_INVALID_TRANSITION, EXIT_IO,
    EXIT_NOT_FOUND, EXIT_STORE_CORRUPT, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "portaria")]
#[command(about = "Delivery and resident registry for a small condominium")]
#[command(version)]
struct Cli {
    /// Data directory holding the JSON mapping files
    #[arg(long, global = true, env = "PORTARIA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new pending delivery
    #[command(after_help = "\
Examples:
  portaria add --apartment 101 --block 1 --resident 'João da Silva' --description 'Pacote Amazon'")]
    Add {
        #[arg(long)]
        apartment: String,

        /// Block number (1, 2 or 3)
        #[arg(long)]
        block: String,

        /// Resident name (denormalized, free text)
        #[arg(long)]
        resident: String,

        #[arg(long)]
        description: String,

        /// Optional photo reference (URI)
        #[arg(long)]
        photo_url: Option<String>,
    },

    /// Mark a pending delivery as delivered
    Deliver {
        id: String,

        /// Who picked the parcel up
        #[arg(long)]
        picked_up_by: String,
    },

    /// Edit a delivery; omitted flags keep current values
    Edit {
        id: String,

        #[arg(long)]
        apartment: Option<String>,

        #[arg(long)]
        block: Option<String>,

        #[arg(long)]
        resident: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        photo_url: Option<String>,
    },

    /// Delete a delivery
    Remove { id: String },

    /// List deliveries
    List {
        /// Filter by status (pendente or entregue)
        #[arg(long)]
        status: Option<String>,

        /// Output JSON instead of a human listing
        #[arg(long)]
        json: bool,
    },

    /// Import deliveries from a CSV file, updating by ID or inserting
    #[command(after_help = "\
Examples:
  portaria import entregas.csv

The file must carry the interchange header row (ID, Morador, Apartamento,
Bloco, Descrição, Status, Data de Criação, Data de Entrega, Retirado Por).
Rows without an ID are skipped; bad rows never abort the batch.")]
    Import { file: PathBuf },

    /// Export the registry
    Export {
        #[command(subcommand)]
        command: export::ExportCommands,
    },

    /// Resident directory operations
    Resident {
        #[command(subcommand)]
        command: residents::ResidentCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let store = JsonStore::new(cli.data_dir.clone().unwrap_or_else(JsonStore::default_dir));

    let result = match cli.command {
        Commands::Add { apartment, block, resident, description, photo_url } => {
            deliveries::cmd_add(&store, apartment, block, resident, description, photo_url)
        }
        Commands::Deliver { id, picked_up_by } => {
            deliveries::cmd_deliver(&store, &id, picked_up_by)
        }
        Commands::Edit { id, apartment, block, resident, description, photo_url } => {
            deliveries::cmd_edit(&store, &id, apartment, block, resident, description, photo_url)
        }
        Commands::Remove { id } => deliveries::cmd_remove(&store, &id),
        Commands::List { status, json } => deliveries::cmd_list(&store, status, json),
        Commands::Import { file } => import::cmd_import(&store, &file),
        Commands::Export { command } => export::cmd_export(&store, command),
        Commands::Resident { command } => residents::cmd_resident(&store, command),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn not_found(id: &str) -> Self {
        Self {
            code: EXIT_NOT_FOUND,
            message: format!("no record with id '{id}'"),
            hint: None,
        }
    }

    pub fn transition(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INVALID_TRANSITION, message: msg.into(), hint: None }
    }

    pub fn store(err: StoreError) -> Self {
        let code = match err {
            StoreError::Io { .. } => EXIT_IO,
            StoreError::Corrupt { .. } => EXIT_STORE_CORRUPT,
        };
        let hint = (code == EXIT_STORE_CORRUPT)
            .then(|| "fix or move the damaged file; it is never overwritten silently".to_string());
        Self { code, message: err.to_string(), hint }
    }

    pub fn import(err: ImportError) -> Self {
        Self { code: EXIT_IMPORT_STRUCTURAL, message: err.to_string(), hint: None }
    }

    pub fn export(err: ExportError) -> Self {
        let code = match err {
            ExportError::NoRecords | ExportError::NoPending => EXIT_EXPORT_EMPTY,
            _ => EXIT_ERROR,
        };
        Self { code, message: err.to_string(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

pub fn parse_block(s: &str) -> Result<Block, CliError> {
    s.parse::<Block>()
        .map_err(|_| CliError::args(format!("unrecognized block '{s}' (expected 1, 2 or 3)")))
}

pub fn load_deliveries(store: &JsonStore) -> Result<Vec<Delivery>, CliError> {
    store.load(DELIVERIES_KEY).map_err(CliError::store)
}

pub fn save_deliveries(store: &JsonStore, deliveries: &[Delivery]) -> Result<(), CliError> {
    store.save(DELIVERIES_KEY, deliveries).map_err(CliError::store)
}

pub fn load_residents(store: &JsonStore) -> Result<Vec<Resident>, CliError> {
    store.load(RESIDENTS_KEY).map_err(CliError::store)
}

pub fn save_residents(store: &JsonStore, residents: &[Resident]) -> Result<(), CliError> {
    store.save(RESIDENTS_KEY, residents).map_err(CliError::store)
}

/// Caller-assigned identifiers: milliseconds since the epoch, the same
/// scheme the manual registration surface always used.
pub fn next_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

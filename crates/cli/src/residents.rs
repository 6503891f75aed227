//! `portaria resident` — resident directory operations.

use std::fs;
use std::path::PathBuf;

use clap::Subcommand;

use portaria_core::{Resident, ResidentEdit};
use portaria_export::render_residents_flat;
use portaria_store::JsonStore;

use crate::{load_residents, next_id, parse_block, save_residents, CliError};

#[derive(Subcommand)]
pub enum ResidentCommands {
    /// Register a resident
    #[command(after_help = "\
Examples:
  portaria resident add --name 'Maria Oliveira' --apartment 202 --block 2 \\
      --document '234.567.890-11' --phone '(21) 91234-5678'")]
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        apartment: String,

        /// Block number (1, 2 or 3)
        #[arg(long)]
        block: String,

        /// Document number, free text (e.g. CPF)
        #[arg(long, default_value = "")]
        document: String,

        #[arg(long, default_value = "")]
        phone: String,
    },

    /// Edit a resident; omitted flags keep current values
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        apartment: Option<String>,

        #[arg(long)]
        block: Option<String>,

        #[arg(long)]
        document: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Delete a resident
    Remove { id: String },

    /// List residents
    List {
        /// Output JSON instead of a human listing
        #[arg(long)]
        json: bool,
    },

    /// Import residents from a CSV file, updating by ID or inserting
    Import { file: PathBuf },

    /// Export the resident directory as a flat CSV
    Export {
        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

pub fn cmd_resident(store: &JsonStore, cmd: ResidentCommands) -> Result<(), CliError> {
    match cmd {
        ResidentCommands::Add { name, apartment, block, document, phone } => {
            cmd_add(store, name, apartment, block, document, phone)
        }
        ResidentCommands::Edit { id, name, apartment, block, document, phone } => {
            cmd_edit(store, &id, name, apartment, block, document, phone)
        }
        ResidentCommands::Remove { id } => cmd_remove(store, &id),
        ResidentCommands::List { json } => cmd_list(store, json),
        ResidentCommands::Import { file } => crate::import::cmd_import_residents(store, &file),
        ResidentCommands::Export { output } => cmd_export(store, output),
    }
}

fn cmd_add(
    store: &JsonStore,
    name: String,
    apartment: String,
    block: String,
    document: String,
    phone: String,
) -> Result<(), CliError> {
    let block = parse_block(&block)?;
    let mut residents = load_residents(store)?;

    let id = next_id();
    residents.push(Resident { id: id.clone(), name, apartment, block, document, phone });
    save_residents(store, &residents)?;

    eprintln!("registered resident {id}");
    Ok(())
}

fn cmd_edit(
    store: &JsonStore,
    id: &str,
    name: Option<String>,
    apartment: Option<String>,
    block: Option<String>,
    document: Option<String>,
    phone: Option<String>,
) -> Result<(), CliError> {
    let block = block.as_deref().map(parse_block).transpose()?;

    let mut residents = load_residents(store)?;
    let resident = residents
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| CliError::not_found(id))?;

    resident.apply_edit(ResidentEdit { name, apartment, block, document, phone });
    save_residents(store, &residents)?;

    eprintln!("resident {id} updated");
    Ok(())
}

fn cmd_remove(store: &JsonStore, id: &str) -> Result<(), CliError> {
    let mut residents = load_residents(store)?;
    let before = residents.len();
    residents.retain(|r| r.id != id);
    if residents.len() == before {
        return Err(CliError::not_found(id));
    }
    save_residents(store, &residents)?;

    eprintln!("resident {id} removed");
    Ok(())
}

fn cmd_list(store: &JsonStore, json: bool) -> Result<(), CliError> {
    let residents = load_residents(store)?;

    if json {
        let out = serde_json::to_string_pretty(&residents)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    for r in &residents {
        println!(
            "{:<14} apto {:<6} bloco {}  {}  {}  {}",
            r.id, r.apartment, r.block, r.name, r.document, r.phone,
        );
    }
    eprintln!("{} residents", residents.len());
    Ok(())
}

fn cmd_export(store: &JsonStore, output: Option<PathBuf>) -> Result<(), CliError> {
    let residents = load_residents(store)?;
    let text = render_residents_flat(&residents).map_err(CliError::export)?;

    match output {
        Some(path) => {
            fs::write(&path, text)
                .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

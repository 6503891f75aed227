//! `portaria export` — render the registry into downloadable artifacts.

use std::fs;
use std::path::PathBuf;

use clap::Subcommand;

use portaria_export::{grouped_to_csv, grouped_to_pdf, render_flat, render_grouped_pending};
use portaria_store::JsonStore;

use crate::{load_deliveries, CliError};

/// Title printed at the top of the PDF report.
const PDF_TITLE: &str = "Encomendas Pendentes";

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Full registry as a flat CSV, one row per delivery
    #[command(after_help = "\
Examples:
  portaria export flat
  portaria export flat -o entregas.csv")]
    Flat {
        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Pending deliveries grouped by block, one column per block
    #[command(after_help = "\
Examples:
  portaria export grouped -o pendentes.csv")]
    Grouped {
        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// The grouped pending table as a printable PDF
    #[command(after_help = "\
Examples:
  portaria export pdf
  portaria export pdf -o relatorio.pdf")]
    Pdf {
        /// Output file
        #[arg(long, short = 'o', default_value = "encomendas.pdf")]
        output: PathBuf,
    },
}

pub fn cmd_export(store: &JsonStore, cmd: ExportCommands) -> Result<(), CliError> {
    let deliveries = load_deliveries(store)?;

    match cmd {
        ExportCommands::Flat { output } => {
            let text = render_flat(&deliveries).map_err(CliError::export)?;
            write_text(output, &text)
        }
        ExportCommands::Grouped { output } => {
            let table = render_grouped_pending(&deliveries).map_err(CliError::export)?;
            write_text(output, &grouped_to_csv(&table))
        }
        ExportCommands::Pdf { output } => {
            let table = render_grouped_pending(&deliveries).map_err(CliError::export)?;
            let bytes = grouped_to_pdf(&table, PDF_TITLE).map_err(CliError::export)?;
            fs::write(&output, bytes)
                .map_err(|e| CliError::io(format!("cannot write {}: {e}", output.display())))?;
            eprintln!("wrote {}", output.display());
            Ok(())
        }
    }
}

fn write_text(output: Option<PathBuf>, text: &str) -> Result<(), CliError> {
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

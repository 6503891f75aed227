//! Delivery CRUD and the status transition.

use chrono::Utc;

use portaria_core::{format_timestamp, Delivery, DeliveryEdit, Status};
use portaria_store::JsonStore;

use crate::{load_deliveries, next_id, parse_block, save_deliveries, CliError};

pub fn cmd_add(
    store: &JsonStore,
    apartment: String,
    block: String,
    resident: String,
    description: String,
    photo_url: Option<String>,
) -> Result<(), CliError> {
    let block = parse_block(&block)?;
    let mut deliveries = load_deliveries(store)?;

    let id = next_id();
    let delivery = Delivery::new(
        id.clone(),
        apartment,
        block,
        resident,
        description,
        photo_url,
        Utc::now(),
    );
    deliveries.push(delivery);
    save_deliveries(store, &deliveries)?;

    eprintln!("registered delivery {id}");
    Ok(())
}

pub fn cmd_deliver(store: &JsonStore, id: &str, picked_up_by: String) -> Result<(), CliError> {
    let mut deliveries = load_deliveries(store)?;
    let delivery = deliveries
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| CliError::not_found(id))?;

    delivery
        .mark_delivered(picked_up_by, Utc::now())
        .map_err(|e| CliError::transition(e.to_string()))?;
    save_deliveries(store, &deliveries)?;

    eprintln!("delivery {id} marked as delivered");
    Ok(())
}

pub fn cmd_edit(
    store: &JsonStore,
    id: &str,
    apartment: Option<String>,
    block: Option<String>,
    resident: Option<String>,
    description: Option<String>,
    photo_url: Option<String>,
) -> Result<(), CliError> {
    let block = block.as_deref().map(parse_block).transpose()?;

    let mut deliveries = load_deliveries(store)?;
    let delivery = deliveries
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| CliError::not_found(id))?;

    delivery.apply_edit(DeliveryEdit {
        apartment,
        block,
        resident_name: resident,
        description,
        photo_url,
    });
    save_deliveries(store, &deliveries)?;

    eprintln!("delivery {id} updated");
    Ok(())
}

pub fn cmd_remove(store: &JsonStore, id: &str) -> Result<(), CliError> {
    let mut deliveries = load_deliveries(store)?;
    let before = deliveries.len();
    deliveries.retain(|d| d.id != id);
    if deliveries.len() == before {
        return Err(CliError::not_found(id));
    }
    save_deliveries(store, &deliveries)?;

    eprintln!("delivery {id} removed");
    Ok(())
}

pub fn cmd_list(store: &JsonStore, status: Option<String>, json: bool) -> Result<(), CliError> {
    let filter = status
        .as_deref()
        .map(parse_status_filter)
        .transpose()?;

    let deliveries: Vec<Delivery> = load_deliveries(store)?
        .into_iter()
        .filter(|d| filter.map_or(true, |s| d.status == s))
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&deliveries)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    for d in &deliveries {
        let delivered = match (&d.delivered_at, &d.picked_up_by) {
            (Some(at), Some(by)) => format!("  entregue {} a {by}", format_timestamp(at)),
            (Some(at), None) => format!("  entregue {}", format_timestamp(at)),
            _ => String::new(),
        };
        println!(
            "{:<14} apto {:<6} bloco {}  {:<10} {}  {}{delivered}",
            d.id,
            d.apartment,
            d.block,
            d.status,
            format_timestamp(&d.created_at),
            d.resident_name,
        );
    }
    eprintln!("{} deliveries", deliveries.len());
    Ok(())
}

/// Listing filter accepts the wire strings case-insensitively.
fn parse_status_filter(s: &str) -> Result<Status, CliError> {
    s.to_uppercase()
        .parse::<Status>()
        .map_err(|_| CliError::args(format!("unrecognized status '{s}' (expected pendente or entregue)")))
}

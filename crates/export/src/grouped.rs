use std::cmp::Ordering;
use std::collections::BTreeMap;

use portaria_core::{Block, Delivery, Status};

use crate::error::ExportError;

/// The pending-only table pivoted into one column per block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedTable {
    /// Column headers, "Bloco 1" through "Bloco 3".
    pub headers: Vec<String>,
    /// One row per padded index; shorter columns carry empty cells.
    pub rows: Vec<Vec<String>>,
}

/// Build the grouped pending table: filter to PENDENTE, bucket apartment
/// labels by block, sort each bucket numerically ascending, pad every
/// bucket to the longest one.
///
/// Labels that do not parse as numbers sort after the numeric ones and keep
/// their relative input order. That tail ordering is a documented edge
/// case, not a contract.
pub fn render_grouped_pending(deliveries: &[Delivery]) -> Result<GroupedTable, ExportError> {
    let mut buckets: BTreeMap<Block, Vec<String>> =
        Block::ALL.iter().map(|b| (*b, Vec::new())).collect();

    for d in deliveries.iter().filter(|d| d.status == Status::Pendente) {
        if let Some(bucket) = buckets.get_mut(&d.block) {
            bucket.push(d.apartment.clone());
        }
    }

    if buckets.values().all(|b| b.is_empty()) {
        return Err(ExportError::NoPending);
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| compare_apartments(a, b));
    }

    let max_rows = buckets.values().map(Vec::len).max().unwrap_or(0);

    let rows = (0..max_rows)
        .map(|i| {
            Block::ALL
                .iter()
                .map(|b| buckets[b].get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(GroupedTable {
        headers: Block::ALL.iter().map(Block::label).collect(),
        rows,
    })
}

/// Numeric ascending; non-numeric labels compare equal so the stable sort
/// leaves them in input order, after the numeric ones.
fn compare_apartments(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

/// Encode the grouped table as CSV.
pub fn grouped_to_csv(table: &GroupedTable) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(table.headers.join(","));
    for row in &table.rows {
        lines.push(row.join(","));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

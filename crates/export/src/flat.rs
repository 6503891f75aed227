use portaria_core::{format_timestamp, headers, Delivery, Resident};

use crate::error::ExportError;

/// Render the full collection as a flat CSV: one row per record, all
/// fields, fixed column order. The csv writer doubles embedded quotes.
pub fn render_flat(deliveries: &[Delivery]) -> Result<String, ExportError> {
    if deliveries.is_empty() {
        return Err(ExportError::NoRecords);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers::DELIVERY_HEADERS)
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    for d in deliveries {
        let created = format_timestamp(&d.created_at);
        let delivered = d.delivered_at.as_ref().map(format_timestamp).unwrap_or_default();
        writer
            .write_record([
                d.id.as_str(),
                d.resident_name.as_str(),
                d.apartment.as_str(),
                d.block.as_str(),
                d.description.as_str(),
                d.status.as_str(),
                created.as_str(),
                delivered.as_str(),
                d.picked_up_by.as_deref().unwrap_or(""),
            ])
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }

    into_string(writer)
}

/// Render the resident directory as a flat CSV.
pub fn render_residents_flat(residents: &[Resident]) -> Result<String, ExportError> {
    if residents.is_empty() {
        return Err(ExportError::NoRecords);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers::RESIDENT_HEADERS)
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    for r in residents {
        writer
            .write_record([
                r.id.as_str(),
                r.name.as_str(),
                r.apartment.as_str(),
                r.block.as_str(),
                r.document.as_str(),
                r.phone.as_str(),
            ])
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }

    into_string(writer)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}

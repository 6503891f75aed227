//! Localized column names used by the import/export interchange files.

pub const ID: &str = "ID";
pub const RESIDENT: &str = "Morador";
pub const APARTMENT: &str = "Apartamento";
pub const BLOCK: &str = "Bloco";
pub const DESCRIPTION: &str = "Descrição";
pub const STATUS: &str = "Status";
pub const CREATED_AT: &str = "Data de Criação";
pub const DELIVERED_AT: &str = "Data de Entrega";
pub const PICKED_UP_BY: &str = "Retirado Por";

pub const NAME: &str = "Nome";
pub const DOCUMENT: &str = "Documento";
pub const PHONE: &str = "Telefone";

/// Delivery columns, in flat-export order.
pub const DELIVERY_HEADERS: [&str; 9] = [
    ID, RESIDENT, APARTMENT, BLOCK, DESCRIPTION, STATUS, CREATED_AT, DELIVERED_AT, PICKED_UP_BY,
];

/// Resident columns, in flat-export order.
pub const RESIDENT_HEADERS: [&str; 6] = [ID, NAME, APARTMENT, BLOCK, DOCUMENT, PHONE];

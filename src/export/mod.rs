//! Exports of already-fetched bookings

pub mod invoice;
pub mod sheet;

pub use invoice::{InvoiceFormat, InvoiceLayout};
pub use sheet::SheetFormat;

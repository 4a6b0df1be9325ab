//! Receipt printing
//!
//! Renders sale tickets to ESC/POS and ships them to the configured
//! network printer. Without `PRINTER_ADDR` the rendered bytes are still
//! returned so callers can preview them.

mod renderer;
mod service;

pub use renderer::ReceiptRenderer;
pub use service::{PrintOutcome, PrintService};

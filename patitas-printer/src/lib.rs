//! # patitas-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 encoding for Western-European receipts (accents, €)
//! - Network printing (TCP port 9100)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Sale receipt rendering → patitas-server
//!
//! ## Example
//!
//! ```ignore
//! use patitas_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! // Build ESC/POS content
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("Patitas Pet Spa");
//! builder.reset_size();
//! builder.sep_double();
//! builder.left();
//! builder.line_lr("TOTAL", "42,50 €");
//! builder.cut_feed(4);
//!
//! // Send to network printer
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{convert_to_cp1252, pad_text, text_width, truncate_text};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{NetworkPrinter, Printer};

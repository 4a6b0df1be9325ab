//! Print service — renders receipts and talks to the printer

use chrono_tz::Tz;
use patitas_printer::{NetworkPrinter, Printer};
use serde::Serialize;
use shared::models::{BusinessSettings, Sale};

use crate::utils::{AppError, AppResult};

use super::ReceiptRenderer;

/// Result of a print request. When no printer is configured the ticket
/// is still rendered so the caller can preview it.
#[derive(Debug, Serialize)]
pub struct PrintOutcome {
    pub printed: bool,
    pub bytes: usize,
}

#[derive(Clone)]
pub struct PrintService {
    renderer_width: usize,
    timezone: Tz,
    printer_addr: Option<String>,
}

impl PrintService {
    pub fn new(printer_addr: Option<String>, timezone: Tz) -> Self {
        Self {
            renderer_width: 48,
            timezone,
            printer_addr,
        }
    }

    pub fn render_receipt(&self, sale: &Sale, settings: &BusinessSettings) -> Vec<u8> {
        ReceiptRenderer::new(self.renderer_width, self.timezone).render(sale, settings)
    }

    /// Render the sale ticket and send it to the configured printer.
    pub async fn print_receipt(
        &self,
        sale: &Sale,
        settings: &BusinessSettings,
    ) -> AppResult<PrintOutcome> {
        let data = self.render_receipt(sale, settings);

        let Some(addr) = &self.printer_addr else {
            tracing::debug!(
                ticket = sale.ticket_number,
                bytes = data.len(),
                "No printer configured, receipt rendered only"
            );
            return Ok(PrintOutcome {
                printed: false,
                bytes: data.len(),
            });
        };

        let printer = NetworkPrinter::from_addr(addr)
            .map_err(|e| AppError::internal(format!("Printer misconfigured: {e}")))?;
        printer
            .print(&data)
            .await
            .map_err(|e| AppError::unavailable(format!("Print failed: {e}")))?;

        tracing::info!(ticket = sale.ticket_number, addr, "Receipt printed");
        Ok(PrintOutcome {
            printed: true,
            bytes: data.len(),
        })
    }
}

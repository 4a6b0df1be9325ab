//! Sale receipt renderer
//!
//! Turns a completed sale into an 80mm ESC/POS ticket: business header,
//! line items, coupon discount, totals and payment method.

use chrono_tz::Tz;
use patitas_printer::EscPosBuilder;
use shared::models::{BusinessSettings, PaymentMethod, Sale};

pub struct ReceiptRenderer {
    width: usize,
    timezone: Tz,
}

impl ReceiptRenderer {
    /// Common widths: 32 characters for 58mm paper, 48 for 80mm.
    pub fn new(width: usize, timezone: Tz) -> Self {
        Self { width, timezone }
    }

    /// Render a sale receipt to ESC/POS bytes.
    pub fn render(&self, sale: &Sale, settings: &BusinessSettings) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        // Cash payments pop the drawer as the ticket starts printing
        if sale.payment_method == PaymentMethod::Cash {
            b.open_drawer();
        }

        self.render_header(&mut b, sale, settings);
        self.render_items(&mut b, sale);
        self.render_totals(&mut b, sale);
        self.render_footer(&mut b, sale, settings);

        b.build()
    }

    fn render_header(&self, b: &mut EscPosBuilder, sale: &Sale, settings: &BusinessSettings) {
        b.center();
        b.double_size();
        b.bold();
        b.line(&settings.business_name);
        b.bold_off();
        b.reset_size();

        if let Some(address) = &settings.address {
            b.line(address);
        }
        if let Some(phone) = &settings.phone {
            b.line(&format!("Tel: {phone}"));
        }
        if let Some(tax_id) = &settings.tax_id {
            b.line(&format!("NIF: {tax_id}"));
        }

        b.newline();
        b.left();
        b.line_lr(
            &format!("Ticket #{:04}", sale.ticket_number),
            &format_timestamp(sale.created_at, self.timezone),
        );
        b.sep_double();
    }

    fn render_items(&self, b: &mut EscPosBuilder, sale: &Sale) {
        for item in &sale.items {
            if item.quantity > 1 {
                b.line(&item.name);
                b.line_lr(
                    &format!("  {} x {}", item.quantity, format_eur(item.unit_price)),
                    &format_eur(item.amount()),
                );
            } else {
                b.line_lr(&item.name, &format_eur(item.amount()));
            }
        }
        b.sep_single();
    }

    fn render_totals(&self, b: &mut EscPosBuilder, sale: &Sale) {
        b.line_lr("Subtotal", &format_eur(sale.subtotal));
        if sale.discount > 0.0 {
            let label = match &sale.coupon_code {
                Some(code) => format!("Descuento ({code})"),
                None => "Descuento".to_string(),
            };
            b.line_lr(&label, &format!("-{}", format_eur(sale.discount)));
        }

        b.bold();
        b.double_size();
        b.line_lr("TOTAL", &format_eur(sale.total));
        b.reset_size();
        b.bold_off();

        b.line_lr("Pago", payment_label(sale.payment_method));
        b.sep_single();
    }

    fn render_footer(&self, b: &mut EscPosBuilder, sale: &Sale, settings: &BusinessSettings) {
        b.center();
        if let Some(footer) = &settings.receipt_footer {
            b.line(footer);
        }
        // Sales are immutable; a correction rings up a new sale that
        // references this ticket. The QR lets staff pull it up by scan.
        b.newline();
        b.qr_code(&ticket_reference(sale), 6);
        b.left();
        b.cut_feed(3);
    }
}

/// Scannable lookup key for a rung-up sale.
fn ticket_reference(sale: &Sale) -> String {
    format!("PATITAS:TICKET:{:04}", sale.ticket_number)
}

impl Default for ReceiptRenderer {
    fn default() -> Self {
        Self::new(48, chrono_tz::Europe::Madrid)
    }
}

fn payment_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "Efectivo",
        PaymentMethod::Card => "Tarjeta",
        PaymentMethod::Transfer => "Transferencia",
    }
}

/// "14,90 EUR" — comma decimal, currency spelled out. The € glyph maps
/// to 0x80 in Windows-1252 but not every printer font carries it.
fn format_eur(amount: f64) -> String {
    format!("{:.2} EUR", amount).replace('.', ",")
}

/// DD/MM/YYYY HH:mm in the business timezone.
fn format_timestamp(ts: i64, tz: Tz) -> String {
    match chrono::DateTime::from_timestamp_millis(ts) {
        Some(dt) => dt.with_timezone(&tz).format("%d/%m/%Y %H:%M").to_string(),
        None => "--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use shared::models::SaleItem;

    fn sale() -> Sale {
        Sale {
            id: 1,
            ticket_number: 42,
            client_id: None,
            items: vec![
                SaleItem {
                    name: "Baño y corte".to_string(),
                    quantity: 1,
                    unit_price: 35.0,
                },
                SaleItem {
                    name: "Champú hipoalergénico".to_string(),
                    quantity: 2,
                    unit_price: 14.9,
                },
            ],
            subtotal: 64.8,
            discount: 12.96,
            coupon_code: Some("BIENVENIDO20".to_string()),
            total: 51.84,
            payment_method: PaymentMethod::Card,
            created_at: 1756204800000,
        }
    }

    #[test]
    fn receipt_contains_business_and_totals() {
        let renderer = ReceiptRenderer::new(48, chrono_tz::Europe::Madrid);
        let data = renderer.render(&sale(), &seed::settings());

        let text = String::from_utf8_lossy(&data);
        assert!(text.contains("Patitas Pet Spa"));
        assert!(text.contains("Ticket #0042"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("51,84 EUR"));
        assert!(text.contains("BIENVENIDO20"));
        assert!(text.contains("Tarjeta"));
    }

    #[test]
    fn amounts_use_comma_decimals() {
        assert_eq!(format_eur(14.9), "14,90 EUR");
        assert_eq!(format_eur(0.0), "0,00 EUR");
    }

    #[test]
    fn cash_sale_pulses_the_drawer() {
        let renderer = ReceiptRenderer::new(48, chrono_tz::Europe::Madrid);
        let drawer_kick = [0x1B, 0x70, 0x00];

        let mut cash = sale();
        cash.payment_method = PaymentMethod::Cash;
        let data = renderer.render(&cash, &seed::settings());
        assert!(data.windows(3).any(|w| w == drawer_kick));

        // Card payments leave the drawer closed
        let data = renderer.render(&sale(), &seed::settings());
        assert!(!data.windows(3).any(|w| w == drawer_kick));
    }

    #[test]
    fn footer_carries_the_ticket_qr() {
        let renderer = ReceiptRenderer::new(48, chrono_tz::Europe::Madrid);
        let data = renderer.render(&sale(), &seed::settings());

        let text = String::from_utf8_lossy(&data);
        assert!(text.contains("PATITAS:TICKET:0042"));
    }
}

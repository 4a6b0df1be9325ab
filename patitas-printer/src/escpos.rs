//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::{convert_to_cp1252, text_width};

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers. All text is
/// converted to Windows-1252 at `build()`.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(4096);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Separators ===

    /// Print a line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    /// Print a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    ///
    /// Left text is left-aligned, right text is right-aligned,
    /// with spaces filling the gap.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = text_width(left);
        let rw = text_width(right);

        if lw + rw >= self.width {
            // Too long, just print with space
            self.text(left);
            self.text(" ");
            self.line(right);
        } else {
            let spaces = self.width - lw - rw;
            self.text(left);
            self.text(&" ".repeat(spaces));
            self.line(right);
        }
        self
    }

    // === Paper Control ===

    /// Full cut with feed — feeds n lines then cuts.
    /// Uses GS V 66 n, which lets the printer manage cutter-to-head
    /// distance and wastes less top margin on the next ticket than a
    /// separate feed + cut.
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        // GS V 66 n - Full cut after feeding n lines
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    // === Cash Drawer ===

    /// Open cash drawer (pin 2)
    pub fn open_drawer(&mut self) -> &mut Self {
        // ESC p m t1 t2 - Generate pulse on pin m
        self.buf.extend_from_slice(&[0x1B, 0x70, 0x00, 25, 250]);
        self
    }

    // === QR Code ===

    /// Print a QR code
    ///
    /// Size: 1-16 (module size in dots)
    pub fn qr_code(&mut self, data: &str, size: u8) -> &mut Self {
        let size = size.clamp(1, 16);

        // Function 165: Select model (Model 2)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x31, 0x00]);

        // Function 167: Set module size
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, size]);

        // Function 169: Set error correction (L)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31]);

        // Function 180: Store data
        let data_bytes = data.as_bytes();
        let len = data_bytes.len() + 3;
        let p_l = (len & 0xFF) as u8;
        let p_h = ((len >> 8) & 0xFF) as u8;
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
        self.buf.extend_from_slice(data_bytes);

        // Function 181: Print
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);

        self
    }

    // === Build ===

    /// Build the final byte buffer with Windows-1252 encoding
    ///
    /// Converts all UTF-8 text to 1252 while preserving ESC/POS commands.
    pub fn build(self) -> Vec<u8> {
        convert_to_cp1252(&self.buf)
    }

    /// Build without encoding conversion (for debugging or ASCII content)
    pub fn build_raw(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let mut b = EscPosBuilder::new(32);
        b.center()
            .double_size()
            .line("Patitas")
            .reset_size()
            .left()
            .line("Recibo");

        let data = b.build_raw();
        assert!(!data.is_empty());
    }

    #[test]
    fn test_line_lr() {
        let mut b = EscPosBuilder::new(20);
        b.line_lr("TOTAL", "12,00");

        let data = b.build_raw();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("TOTAL"));
        assert!(s.contains("12,00"));
        // Single line, right side flush to column 20
        assert!(s.contains("TOTAL          12,00"));
    }

    #[test]
    fn test_drawer_pulse_and_qr() {
        let mut b = EscPosBuilder::new(48);
        b.open_drawer().qr_code("TICKET:0001", 6);

        let data = b.build_raw();
        // ESC p 0 - drawer kick on pin 2
        assert!(data.windows(3).any(|w| w == [0x1B, 0x70, 0x00]));
        // GS ( k ... function 180 stores the payload verbatim
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("TICKET:0001"));
    }

    #[test]
    fn test_separators() {
        let mut b = EscPosBuilder::new(10);
        b.sep_double();

        let data = b.build_raw();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("=========="));
    }
}

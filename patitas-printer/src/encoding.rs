//! Windows-1252 encoding utilities for Western-European thermal printers
//!
//! Most receipt printers sold in Spain ship with code page WPC1252 (or the
//! near-identical CP858) selectable via ESC t. This module provides:
//! - Column-width calculation (1252 is single-width, one column per char)
//! - Truncating/padding strings to column widths
//! - Converting UTF-8 to Windows-1252 while preserving ESC/POS commands

/// Printable column width of a string.
///
/// Windows-1252 is a single-byte encoding, so every encodable character
/// occupies one column. Unencodable characters are replaced with `?` by
/// the conversion pass and still take one column.
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a column width.
pub fn truncate_text(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to a specific column width.
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_text(s: &str, width: usize, align_right: bool) -> String {
    let current = text_width(s);
    if current >= width {
        return truncate_text(s, width);
    }
    let spaces = width - current;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to Windows-1252.
///
/// ASCII bytes (0x00-0x7F) are passed through exactly as is, which
/// protects ESC/POS command sequences from being corrupted. Bytes >= 0x80
/// are collected as UTF-8 runs and re-encoded to 1252, so accented text
/// and the Euro sign come out right on the printer.
///
/// The output is prefixed with `ESC t 16` to select code page WPC1252.
pub fn convert_to_cp1252(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + 8);

    // ESC t 16 - select character code table WPC1252
    result.extend_from_slice(&[0x1B, 0x74, 0x10]);

    let mut run = Vec::new();
    for &b in bytes {
        if b < 0x80 {
            flush_run(&mut result, &mut run);
            result.push(b);
            // Re-select the code page after printer init (ESC @ resets it)
            if result.len() >= 2
                && result[result.len() - 2] == 0x1B
                && b == 0x40
            {
                result.extend_from_slice(&[0x1B, 0x74, 0x10]);
            }
        } else {
            run.push(b);
        }
    }
    flush_run(&mut result, &mut run);

    result
}

fn flush_run(out: &mut Vec<u8>, run: &mut Vec<u8>) {
    if run.is_empty() {
        return;
    }
    let text = String::from_utf8_lossy(run);
    let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(&text);
    out.extend_from_slice(&encoded);
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let out = convert_to_cp1252(b"TOTAL 12.00");
        // Skip the 3-byte code page prefix
        assert_eq!(&out[3..], b"TOTAL 12.00");
    }

    #[test]
    fn euro_sign_encodes_to_single_byte() {
        let out = convert_to_cp1252("€".as_bytes());
        assert_eq!(&out[3..], &[0x80]);
    }

    #[test]
    fn accents_encode() {
        let out = convert_to_cp1252("Baño".as_bytes());
        assert_eq!(&out[3..], &[b'B', b'a', 0xF1, b'o']);
    }

    #[test]
    fn commands_survive_conversion() {
        // ESC E 1 (bold on) surrounded by text
        let mut input = Vec::new();
        input.extend_from_slice("Peluquería".as_bytes());
        input.extend_from_slice(&[0x1B, 0x45, 0x01]);
        let out = convert_to_cp1252(&input);
        assert!(out.windows(3).any(|w| w == [0x1B, 0x45, 0x01]));
    }

    #[test]
    fn pad_and_truncate_by_columns() {
        assert_eq!(pad_text("añejo", 8, false), "añejo   ");
        assert_eq!(pad_text("añejo", 8, true), "   añejo");
        assert_eq!(truncate_text("peluquería", 4), "pelu");
        assert_eq!(text_width("añejo"), 5);
    }
}

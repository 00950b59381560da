// ESC/POS framing for the raw printer device.

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;

/// Report text, a newline, feed `feed_lines` lines (ESC d n), then a full cut (GS V 0).
pub fn receipt_bytes(text: &str, feed_lines: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 7);
    out.extend_from_slice(text.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(&[ESC, b'd', feed_lines]);
    out.extend_from_slice(&[GS, b'V', 0x00]);
    out
}

//! Terminal rendering of the access code.
//!
//! The code is drawn with half-height unicode blocks so a QR module is one
//! character wide and half a line tall, with the standard quiet zone around
//! it so door readers can lock on.

use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

use access_key_auth::Timestamp;
use crate::DisplayError;

pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn render_qr(data: &str) -> Result<String, DisplayError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| DisplayError::Render(e.to_string()))?;

    // inverted: dark modules are blank cells, so the code scans on dark-background terminals
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

/// One full screen: barcode (optional), the hex code and the countdown.
pub fn render_frame(code: &str, seconds_left: Timestamp, show_qr: bool) -> Result<String, DisplayError> {
    let mut frame = String::new();
    if show_qr {
        frame.push_str(CLEAR_SCREEN);
        frame.push_str(&render_qr(code)?);
        frame.push('\n');
    }
    frame.push_str(&format!("{}  (rotates in {}s)\n", code, seconds_left));
    Ok(frame)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn qr_is_square_block_art() {
        let art = render_qr("505ee4f968e530cd17e1b4cd").unwrap();
        let lines: Vec<&str> = art.lines().collect();

        // version 2 for 24 alphanumeric-ish bytes: 25 modules + 2 * 4 quiet zone
        let width = lines[0].chars().count();
        assert!(width >= 29);
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert_eq!(lines.len(), (width + 1) / 2);
    }

    #[test]
    fn quiet_zone_is_solid_for_dark_terminals() {
        let art = render_qr("505ee4f968e530cd17e1b4cd").unwrap();
        let lines: Vec<&str> = art.lines().collect();

        // light modules are drawn filled, so the 4-module border is two full rows
        assert!(lines[0].chars().all(|c| c == '█'));
        assert!(lines[1].chars().all(|c| c == '█'));
        assert!(lines[2].contains(' '));
    }

    #[test]
    fn frame_without_qr_is_one_line() {
        let frame = render_frame("505ee4f968e530cd17e1b4cd", 3, false).unwrap();
        assert_eq!(frame, "505ee4f968e530cd17e1b4cd  (rotates in 3s)\n");
    }

    #[test]
    fn frame_with_qr_clears_and_ends_with_code() {
        let frame = render_frame("505ee4f968e530cd17e1b4cd", 5, true).unwrap();
        assert!(frame.starts_with(CLEAR_SCREEN));
        assert!(frame.ends_with("505ee4f968e530cd17e1b4cd  (rotates in 5s)\n"));
    }
}

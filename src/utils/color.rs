use eframe::egui::Color32;

pub trait ColorExt {
    /// Parses `#rrggbb` codes, the form the badge palette is written in.
    fn from_hex_code(hex: &str) -> Option<Self>
    where
        Self: Sized;
}

impl ColorExt for Color32 {
    fn from_hex_code(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color32::from_rgb(r, g, b))
    }
}

/// Brand blue used for the navbar title, drop zone and primary buttons.
pub fn primary() -> Color32 {
    Color32::from_hex_code("#0d6efd").unwrap_or(Color32::LIGHT_BLUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_or_without_hash() {
        assert_eq!(Color32::from_hex_code("#ffc107"), Some(Color32::from_rgb(255, 193, 7)));
        assert_eq!(Color32::from_hex_code("6c757d"), Some(Color32::from_rgb(108, 117, 125)));
    }

    #[test]
    fn rejects_malformed_codes() {
        assert_eq!(Color32::from_hex_code("#fff"), None);
        assert_eq!(Color32::from_hex_code("#gg0000"), None);
        assert_eq!(Color32::from_hex_code("#é0000"), None);
    }
}

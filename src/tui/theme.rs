use ratatui::style::Color;

use super::to_color;

/// Flexoki accents (https://stephango.com/flexoki), the palette the UI
/// styling leans on.
pub mod flexoki {
    pub const BASE_500: u32 = 0x878580;
    pub const BASE_300: u32 = 0xB7B5AC;

    pub const RED_400: u32 = 0xD14D41;
    pub const YELLOW_400: u32 = 0xD0A215;
    pub const GREEN_400: u32 = 0x879A39;
    pub const BLUE_400: u32 = 0x4385BE;
    pub const BLUE_600: u32 = 0x205EA6;
    pub const CYAN_400: u32 = 0x3AA99F;
}

/// Parses a Rebrickable `rgb` value ("C91A09", optionally "#C91A09") into a
/// terminal color for the swatch.
pub fn parse_rgb(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(to_color)
}

//! Text metrics calculations

/// Convert a value in font units to points at `font_size`
pub fn scale_font_units(value: i32, units_per_em: u16, font_size: f32) -> f32 {
    value as f32 / units_per_em as f32 * font_size
}

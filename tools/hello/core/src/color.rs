//! RGB565 helpers. Red in the top 5 bits, green in the middle 6, blue in the low 5.

pub type Color = u16;

pub const BLACK: Color = 0x0000;
pub const WHITE: Color = 0xFFFF;
pub const RED: Color = 0xF800;
pub const GREEN: Color = 0x07E0;
pub const BLUE: Color = 0x001F;

/// Pack 8-bit channels, dropping the low bits of each.
pub const fn rgb565(r: u8, g: u8, b: u8) -> Color {
    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3)
}

/// Expand back to 8-bit channels, replicating the high bits into the low ones.
pub const fn to_rgb888(color: Color) -> [u8; 3] {
    let r = ((color >> 11) & 0x1F) as u8;
    let g = ((color >> 5) & 0x3F) as u8;
    let b = (color & 0x1F) as u8;
    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
}

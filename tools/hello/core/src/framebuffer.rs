//! # Frame Buffer
//!
//! A fixed-size, row-major grid of RGB565 pixels with a stride equal to its
//! width. All drawing goes through a single bounds check in [`FrameBuffer::plot`],
//! so shapes that hang off any edge are clipped cell by cell instead of
//! rejected.

use alloc::vec;
use alloc::vec::Vec;

use bit_field::BitField;

use crate::color::Color;
use crate::font::{self, GLYPH_WIDTH};
use crate::host::Frame;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u16>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    pub fn pitch(&self) -> usize {
        self.width as usize * core::mem::size_of::<u16>()
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            pixels: &self.pixels,
            width: self.width,
            height: self.height,
            pitch: self.pitch(),
        }
    }

    /// `None` when `(x, y)` is off the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Write one cell if it lies on the buffer, otherwise do nothing.
    #[inline(always)]
    pub fn plot(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill `[x, x + w) × [y, y + h)`, clipped to the buffer.
    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        // clip up front so fully off-buffer rects cost nothing
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize;
        for row in y0..y1 {
            let start = row as usize * stride;
            self.pixels[start + x0 as usize..start + x1 as usize].fill(color);
        }
    }

    /// Overlay the set bits of `ch`'s glyph with its top-left at `(x, y)`.
    /// Characters without a glyph leave the buffer untouched.
    pub fn draw_glyph(&mut self, x: i32, y: i32, ch: char, color: Color) -> bool {
        let Some(glyph) = font::glyph(ch) else {
            return false;
        };

        for (gy, row) in glyph.iter().enumerate() {
            let py = y.saturating_add(gy as i32);
            for gx in 0..GLYPH_WIDTH as usize {
                if row.get_bit(gx) {
                    self.plot(x.saturating_add(gx as i32), py, color);
                }
            }
        }
        true
    }

    /// Draw `text` on one line, one glyph cell per char.
    ///
    /// Returns how many chars had no glyph; they still take up a cell.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) -> usize {
        let mut skipped = 0;
        let mut cx = x;
        for ch in text.chars() {
            if !self.draw_glyph(cx, y, ch, color) {
                skipped += 1;
            }
            cx = cx.saturating_add(GLYPH_WIDTH);
        }
        skipped
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, RED, WHITE};

    fn lit(fb: &FrameBuffer, background: Color) -> usize {
        fb.pixels().iter().filter(|&&p| p != background).count()
    }

    #[test]
    fn new_buffer_is_background() {
        let fb = FrameBuffer::new(4, 3, 0x1234);
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(|&p| p == 0x1234));
        assert_eq!(fb.pitch(), 8);
        assert_eq!(fb.frame().bytes().len(), 24);
    }

    #[test]
    fn rectangle_inside_fills_exactly() {
        let mut fb = FrameBuffer::new(32, 32, BLACK);
        fb.draw_rectangle(2, 3, 4, 5, RED);
        assert_eq!(lit(&fb, BLACK), 20);
        assert_eq!(fb.pixel(2, 3), Some(RED));
        assert_eq!(fb.pixel(5, 7), Some(RED));
        assert_eq!(fb.pixel(6, 7), Some(BLACK));
        assert_eq!(fb.pixel(5, 8), Some(BLACK));
    }

    #[test]
    fn rectangle_is_clipped_on_every_edge() {
        let mut fb = FrameBuffer::new(10, 10, BLACK);
        fb.draw_rectangle(-3, -2, 5, 4, RED);
        assert_eq!(lit(&fb, BLACK), 2 * 2);

        let mut fb = FrameBuffer::new(10, 10, BLACK);
        fb.draw_rectangle(8, 9, 20, 20, RED);
        assert_eq!(lit(&fb, BLACK), 2);
    }

    #[test]
    fn rectangle_fully_off_buffer_is_noop() {
        let mut fb = FrameBuffer::new(10, 10, BLACK);
        fb.draw_rectangle(10, 0, 5, 5, RED);
        fb.draw_rectangle(0, -5, 5, 5, RED);
        fb.draw_rectangle(i32::MAX - 1, i32::MAX - 1, 20, 20, RED);
        fb.draw_rectangle(2, 2, 0, 7, RED);
        fb.draw_rectangle(2, 2, -4, 7, RED);
        assert_eq!(lit(&fb, BLACK), 0);
    }

    #[test]
    fn glyph_matches_font_bits() {
        let mut fb = FrameBuffer::new(16, 16, BLACK);
        assert!(fb.draw_glyph(4, 4, 'A', WHITE));

        let glyph = font::glyph('A').unwrap();
        for gy in 0..8 {
            for gx in 0..8 {
                let expected = if glyph[gy].get_bit(gx) { WHITE } else { BLACK };
                assert_eq!(fb.pixel(4 + gx as i32, 4 + gy as i32), Some(expected));
            }
        }
    }

    #[test]
    fn glyph_outside_printable_range_writes_nothing() {
        let mut fb = FrameBuffer::new(16, 16, BLACK);
        let before = fb.clone();
        assert!(!fb.draw_glyph(0, 0, '\u{7f}', WHITE));
        assert!(!fb.draw_glyph(0, 0, '\n', WHITE));
        assert_eq!(fb, before);
    }

    #[test]
    fn glyph_straddling_corner_is_clipped() {
        let mut fb = FrameBuffer::new(8, 8, BLACK);
        fb.draw_glyph(-4, -4, '#', WHITE);
        fb.draw_glyph(6, 6, '#', WHITE);
        assert!(lit(&fb, BLACK) > 0);
    }

    #[test]
    fn glyphs_at_extreme_origins_are_clipped() {
        let mut fb = FrameBuffer::new(16, 16, BLACK);
        assert!(fb.draw_glyph(i32::MAX, 0, 'A', WHITE));
        assert!(fb.draw_glyph(0, i32::MAX, 'A', WHITE));
        assert!(fb.draw_glyph(i32::MAX - 3, i32::MAX - 3, '#', WHITE));
        assert!(fb.draw_glyph(i32::MIN, i32::MIN, '#', WHITE));
        assert_eq!(fb.draw_text(i32::MAX - 20, 0, "Hello", WHITE), 0);
        assert_eq!(fb.draw_text(i32::MIN, 4, "Hello", WHITE), 0);
        assert_eq!(lit(&fb, BLACK), 0);
    }

    #[test]
    fn text_advances_eight_cells_per_char() {
        let mut a = FrameBuffer::new(64, 8, BLACK);
        a.draw_text(0, 0, "AB", WHITE);

        let mut b = FrameBuffer::new(64, 8, BLACK);
        b.draw_glyph(0, 0, 'A', WHITE);
        b.draw_glyph(8, 0, 'B', WHITE);

        assert_eq!(a, b);
    }

    #[test]
    fn unsupported_chars_keep_their_cell() {
        let mut a = FrameBuffer::new(64, 8, BLACK);
        assert_eq!(a.draw_text(0, 0, "A\u{1}B", WHITE), 1);

        let mut b = FrameBuffer::new(64, 8, BLACK);
        b.draw_glyph(0, 0, 'A', WHITE);
        b.draw_glyph(16, 0, 'B', WHITE);

        assert_eq!(a, b);
    }

    #[test]
    fn frame_rows_follow_pitch() {
        let mut fb = FrameBuffer::new(4, 2, BLACK);
        fb.plot(1, 1, RED);
        let frame = fb.frame();
        assert_eq!(frame.row(1), Some(&[BLACK, RED, BLACK, BLACK][..]));
        assert_eq!(frame.row(2), None);
    }
}

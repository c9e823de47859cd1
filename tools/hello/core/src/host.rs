//! The capabilities a frontend lends to the renderer.
//!
//! [`Host`] covers the per-frame sinks (video out, input in, log out) and
//! [`Environment`] the one-time negotiation done around init. Neither knows
//! about libretro; the shim in `hello-libretro` implements both on top of the
//! registered C callbacks.

use core::fmt;

use log::Level;

use crate::error::SinkError;

/// A borrowed view of the rendered frame. Valid for the duration of
/// [`Host::present`] only; the renderer overwrites the storage next frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub pixels: &'a [u16],
    pub width: u32,
    pub height: u32,
    /// Row stride in bytes.
    pub pitch: usize,
}

impl<'a> Frame<'a> {
    pub fn bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.pixels)
    }

    pub fn row(&self, y: u32) -> Option<&'a [u16]> {
        if y >= self.height {
            return None;
        }
        let stride = self.pitch / core::mem::size_of::<u16>();
        let start = y as usize * stride;
        self.pixels.get(start..start + self.width as usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sink {
    Video,
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sink::Video => "video refresh",
        };
        f.write_str(name)
    }
}

/// Pixel encodings a frontend can be asked for. Only RGB565 is ever requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Argb1555,
    Xrgb8888,
    Rgb565,
}

pub trait Host {
    /// Hand a finished frame to the frontend.
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError>;

    /// Latch input state for this frame.
    fn poll(&mut self);

    /// Whether `button` is held on the first joypad.
    fn button(&mut self, button: Button) -> bool;

    fn log(&mut self, level: Level, message: &str);
}

pub trait Environment {
    fn set_pixel_format(&mut self, format: PixelFormat) -> bool;

    /// Tell the frontend the core runs without a content file.
    fn set_support_no_game(&mut self, supported: bool) -> bool;

    /// Ask the frontend to stop running the core.
    fn shutdown(&mut self);
}

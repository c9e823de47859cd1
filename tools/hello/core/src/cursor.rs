use bitflags::bitflags;

use crate::host::{Button, Host};

bitflags! {
    /// D-pad directions held this frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pad: u8 {
        const UP = 0x08;
        const DOWN = 0x04;
        const LEFT = 0x02;
        const RIGHT = 0x01;
    }
}

impl Pad {
    /// Query the four directions, x axis first.
    pub fn read(host: &mut impl Host) -> Self {
        let mut pad = Pad::empty();
        pad.set(Pad::RIGHT, host.button(Button::Right));
        pad.set(Pad::LEFT, host.button(Button::Left));
        pad.set(Pad::DOWN, host.button(Button::Down));
        pad.set(Pad::UP, host.button(Button::Up));
        pad
    }

    fn axis(self, positive: Pad, negative: Pad) -> i32 {
        self.contains(positive) as i32 - self.contains(negative) as i32
    }
}

/// Largest legal top-left corner for a `w × h` square inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(frame_w: u32, frame_h: u32, rect_w: i32, rect_h: i32) -> Self {
        Self {
            max_x: (frame_w as i32 - rect_w).max(0),
            max_y: (frame_h as i32 - rect_h).max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
    /// +1 moving right, -1 moving left. Only bounce mode reads it.
    pub dir: i32,
    /// How many times bounce mode has reversed.
    pub flips: u32,
}

impl Cursor {
    pub fn new(x: i32, y: i32, bounds: Bounds) -> Self {
        Self {
            x: x.clamp(0, bounds.max_x),
            y: y.clamp(0, bounds.max_y),
            dir: 1,
            flips: 0,
        }
    }

    /// Autonomous horizontal motion: a triangle wave between 0 and `max_x`.
    pub fn bounce(&mut self, step: i32, bounds: Bounds) {
        let delta = self.dir.saturating_mul(step);
        self.x = self.x.saturating_add(delta).clamp(0, bounds.max_x);
        if self.x == 0 || self.x == bounds.max_x {
            self.dir = -self.dir;
            self.flips = self.flips.wrapping_add(1);
        }
    }

    /// Move one unit per held direction. Opposing directions cancel.
    pub fn steer(&mut self, pad: Pad, bounds: Bounds) {
        self.x = (self.x + pad.axis(Pad::RIGHT, Pad::LEFT)).clamp(0, bounds.max_x);
        self.y = (self.y + pad.axis(Pad::DOWN, Pad::UP)).clamp(0, bounds.max_y);
    }
}

use hello_core::color::to_rgb888;
use hello_core::{Button, Environment, Frame, Host, PixelFormat, SinkError};
use image::{Rgb, RgbImage};
use log::Level;

/// Runs the core without a window. Keeps the most recent frame as an image.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub held: Vec<Button>,
    pub last_frame: Option<RgbImage>,
    pub presented: u64,
    pub polls: u64,
}

impl HeadlessHost {
    pub fn holding(held: Vec<Button>) -> Self {
        Self {
            held,
            ..Self::default()
        }
    }
}

pub fn to_image(frame: &Frame<'_>) -> RgbImage {
    RgbImage::from_fn(frame.width, frame.height, |x, y| {
        let pixel = frame
            .row(y)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or_default();
        Rgb(to_rgb888(pixel))
    })
}

impl Host for HeadlessHost {
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError> {
        self.last_frame = Some(to_image(&frame));
        self.presented += 1;
        Ok(())
    }

    fn poll(&mut self) {
        self.polls += 1;
    }

    fn button(&mut self, button: Button) -> bool {
        self.held.contains(&button)
    }

    fn log(&mut self, level: Level, message: &str) {
        match level {
            Level::Error => tracing::error!(target: "hello_core", "{message}"),
            Level::Warn => tracing::warn!(target: "hello_core", "{message}"),
            Level::Info => tracing::info!(target: "hello_core", "{message}"),
            Level::Debug => tracing::debug!(target: "hello_core", "{message}"),
            Level::Trace => tracing::trace!(target: "hello_core", "{message}"),
        }
    }
}

/// Accepts RGB565 and content-less runs, like most libretro frontends.
#[derive(Debug, Default)]
pub struct HeadlessEnv {
    pub shutdown_requested: bool,
}

impl Environment for HeadlessEnv {
    fn set_pixel_format(&mut self, format: PixelFormat) -> bool {
        format == PixelFormat::Rgb565
    }

    fn set_support_no_game(&mut self, _supported: bool) -> bool {
        true
    }

    fn shutdown(&mut self) {
        self.shutdown_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use hello_core::color::{RED, WHITE};

    use super::*;

    #[test]
    fn frame_converts_to_rgb888() {
        let pixels = [RED, WHITE, 0, 0x07E0];
        let frame = Frame {
            pixels: &pixels,
            width: 2,
            height: 2,
            pitch: 4,
        };

        let image = to_image(&frame);
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(0, 1), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([0, 255, 0]));
    }
}

#![allow(dead_code)]

use hello_core::{Button, Environment, Frame, Host, PixelFormat, Sink, SinkError};
use log::Level;

/// Records everything the renderer asks of its host.
#[derive(Default)]
pub struct RecordingHost {
    pub video_registered: bool,
    pub held: Vec<Button>,
    pub deliveries: Vec<Delivery>,
    pub polls: usize,
    pub logs: Vec<(Level, String)>,
}

pub struct Delivery {
    pub pixels: Vec<u16>,
    pub width: u32,
    pub height: u32,
    pub pitch: usize,
}

impl RecordingHost {
    pub fn with_video() -> Self {
        Self {
            video_registered: true,
            ..Self::default()
        }
    }
}

impl Host for RecordingHost {
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError> {
        if !self.video_registered {
            return Err(SinkError::Missing(Sink::Video));
        }
        self.deliveries.push(Delivery {
            pixels: frame.pixels.to_vec(),
            width: frame.width,
            height: frame.height,
            pitch: frame.pitch,
        });
        Ok(())
    }

    fn poll(&mut self) {
        self.polls += 1;
    }

    fn button(&mut self, button: Button) -> bool {
        self.held.contains(&button)
    }

    fn log(&mut self, level: Level, message: &str) {
        self.logs.push((level, message.to_owned()));
    }
}

pub struct AcceptingEnv;

impl Environment for AcceptingEnv {
    fn set_pixel_format(&mut self, format: PixelFormat) -> bool {
        format == PixelFormat::Rgb565
    }

    fn set_support_no_game(&mut self, _supported: bool) -> bool {
        true
    }

    fn shutdown(&mut self) {
        panic!("shutdown requested by a core that negotiated successfully");
    }
}

use crate::{HEIGHT, WIDTH};

pub const LIBRARY_NAME: &str = "Hello World Core";
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const FPS: f64 = 60.0;
/// Nominal only, the core never produces audio.
pub const SAMPLE_RATE: f64 = 48_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemInfo {
    pub library_name: &'static str,
    pub library_version: &'static str,
    pub valid_extensions: &'static str,
    pub need_fullpath: bool,
    pub block_extract: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub base_width: u32,
    pub base_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub aspect_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub fps: f64,
    pub sample_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvInfo {
    pub geometry: Geometry,
    pub timing: Timing,
}

/// Video standard reported to the frontend. The core only ever runs at 60 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ntsc,
}

pub const fn system_info() -> SystemInfo {
    SystemInfo {
        library_name: LIBRARY_NAME,
        library_version: LIBRARY_VERSION,
        valid_extensions: "",
        need_fullpath: false,
        block_extract: false,
    }
}

pub fn av_info() -> AvInfo {
    AvInfo {
        geometry: Geometry {
            base_width: WIDTH,
            base_height: HEIGHT,
            max_width: WIDTH,
            max_height: HEIGHT,
            aspect_ratio: WIDTH as f32 / HEIGHT as f32,
        },
        timing: Timing {
            fps: FPS,
            sample_rate: SAMPLE_RATE,
        },
    }
}

pub const fn region() -> Region {
    Region::Ntsc
}

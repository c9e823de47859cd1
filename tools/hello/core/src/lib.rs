#![cfg_attr(not(test), no_std)]
//! Frame renderer behind the hello-retro libretro core.
//!
//! Everything here is host-agnostic: the renderer talks to the outside world
//! only through the [`host::Host`] and [`host::Environment`] traits, so the
//! libretro shim, the headless frontend and the tests all drive the same code.
extern crate alloc;

pub mod color;
pub mod config;
pub mod cursor;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod host;
pub mod renderer;
pub mod system;

pub use config::{CoreConfig, CursorMode};
pub use error::{ConfigError, CoreError, SinkError};
pub use framebuffer::FrameBuffer;
pub use host::{Button, Environment, Frame, Host, PixelFormat, Sink};
pub use renderer::Renderer;

pub const WIDTH: u32 = 320;
pub const HEIGHT: u32 = 240;

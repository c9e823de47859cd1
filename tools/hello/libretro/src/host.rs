use std::mem;
use std::os::raw::{c_uint, c_void};
use std::ptr;

use hello_core::{Button, Environment, Frame, Host, PixelFormat, Sink, SinkError};
use libretro_sys::{
    EnvironmentFn, InputPollFn, InputStateFn, LogCallback, LogPrintfFn, PixelFormat as RetroPixelFormat, VideoRefreshFn,
    DEVICE_ID_JOYPAD_DOWN, DEVICE_ID_JOYPAD_LEFT, DEVICE_ID_JOYPAD_RIGHT, DEVICE_ID_JOYPAD_UP,
    DEVICE_JOYPAD, ENVIRONMENT_GET_LOG_INTERFACE, ENVIRONMENT_SET_PIXEL_FORMAT,
    ENVIRONMENT_SET_SUPPORT_NO_GAME, ENVIRONMENT_SHUTDOWN,
};
use log::Level;

/// The per-frame callbacks a frontend registers through the `retro_set_*`
/// entry points. Any of them may be missing.
#[derive(Default, Clone, Copy)]
pub struct RetroHost {
    pub video: Option<VideoRefreshFn>,
    pub input_poll: Option<InputPollFn>,
    pub input_state: Option<InputStateFn>,
}

fn joypad_id(button: Button) -> c_uint {
    match button {
        Button::Up => DEVICE_ID_JOYPAD_UP,
        Button::Down => DEVICE_ID_JOYPAD_DOWN,
        Button::Left => DEVICE_ID_JOYPAD_LEFT,
        Button::Right => DEVICE_ID_JOYPAD_RIGHT,
    }
}

// libretro-sys types some callbacks as safe fns and others as unsafe ones
impl Host for RetroHost {
    #[allow(unused_unsafe)]
    fn present(&mut self, frame: Frame<'_>) -> Result<(), SinkError> {
        let video = self.video.ok_or(SinkError::Missing(Sink::Video))?;
        let data = frame.bytes();
        unsafe { video(data.as_ptr().cast(), frame.width, frame.height, frame.pitch) };
        Ok(())
    }

    #[allow(unused_unsafe)]
    fn poll(&mut self) {
        if let Some(poll) = self.input_poll {
            unsafe { poll() };
        }
    }

    #[allow(unused_unsafe)]
    fn button(&mut self, button: Button) -> bool {
        match self.input_state {
            Some(state) => unsafe { state(0, DEVICE_JOYPAD, 0, joypad_id(button)) != 0 },
            None => false,
        }
    }

    fn log(&mut self, level: Level, message: &str) {
        log::log!(target: "hello_core", level, "{message}");
    }
}

// `LogCallback` holds a non-nullable fn pointer; the frontend may leave it
// null, so the request is made through an `Option` with the same layout.
const _: () = assert!(mem::size_of::<LogCallback>() == mem::size_of::<Option<LogPrintfFn>>());

/// Environment commands, issued through the frontend's environment callback.
#[derive(Default, Clone, Copy)]
pub struct RetroEnvironment {
    callback: Option<EnvironmentFn>,
}

impl RetroEnvironment {
    pub fn new(callback: Option<EnvironmentFn>) -> Self {
        Self { callback }
    }

    pub fn is_registered(&self) -> bool {
        self.callback.is_some()
    }

    #[allow(unused_unsafe)]
    fn command(&mut self, cmd: c_uint, data: *mut c_void) -> bool {
        match self.callback {
            Some(environment) => unsafe { environment(cmd, data) },
            None => false,
        }
    }

    /// Ask for the frontend's log interface. `None` if it has none to give.
    pub fn log_interface(&mut self) -> Option<LogPrintfFn> {
        let mut callback: Option<LogPrintfFn> = None;
        let data = ptr::addr_of_mut!(callback).cast();
        if self.command(ENVIRONMENT_GET_LOG_INTERFACE, data) {
            callback
        } else {
            None
        }
    }
}

impl Environment for RetroEnvironment {
    fn set_pixel_format(&mut self, format: PixelFormat) -> bool {
        let mut format = match format {
            PixelFormat::Argb1555 => RetroPixelFormat::ARGB1555,
            PixelFormat::Xrgb8888 => RetroPixelFormat::ARGB8888,
            PixelFormat::Rgb565 => RetroPixelFormat::RGB565,
        };
        self.command(ENVIRONMENT_SET_PIXEL_FORMAT, ptr::addr_of_mut!(format).cast())
    }

    fn set_support_no_game(&mut self, supported: bool) -> bool {
        let mut supported = supported;
        self.command(ENVIRONMENT_SET_SUPPORT_NO_GAME, ptr::addr_of_mut!(supported).cast())
    }

    fn shutdown(&mut self) {
        self.command(ENVIRONMENT_SHUTDOWN, ptr::null_mut());
    }
}

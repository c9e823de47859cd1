use alloc::format;
use alloc::string::ToString;

use log::Level;

use crate::config::{CoreConfig, CursorMode};
use crate::cursor::{Bounds, Cursor, Pad};
use crate::error::{ConfigError, CoreError};
use crate::font;
use crate::framebuffer::FrameBuffer;
use crate::host::{Environment, Host, PixelFormat};
use crate::{HEIGHT, WIDTH};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Running,
    /// Init failed in a way the frontend cannot recover from.
    Halted,
}

/// One core instance: the frame buffer, the square and the session flags.
///
/// Every entry point takes the host explicitly, so any number of renderers
/// can coexist in one process.
#[derive(Debug)]
pub struct Renderer {
    config: CoreConfig,
    bounds: Bounds,
    cursor: Cursor,
    framebuffer: Option<FrameBuffer>,
    phase: Phase,
    contentless_announced: bool,
    frames: u64,
    // last failure reported through the host, so a missing sink is logged
    // once rather than every frame
    last_error: Option<CoreError>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_valid(CoreConfig::default())
    }
}

impl Renderer {
    pub fn new(config: CoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: CoreConfig) -> Self {
        let bounds = Bounds::new(WIDTH, HEIGHT, config.rect_width, config.rect_height);
        let cursor = Cursor::new(config.start_x, config.start_y, bounds);
        Self {
            config,
            bounds,
            cursor,
            framebuffer: None,
            phase: Phase::Uninitialized,
            contentless_announced: false,
            frames: 0,
            last_error: None,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Swap the configuration. The square goes back to its start position.
    pub fn set_config(&mut self, config: CoreConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.bounds = Bounds::new(WIDTH, HEIGHT, config.rect_width, config.rect_height);
        self.config = config;
        self.cursor = self.start_cursor();
        if let Some(fb) = &mut self.framebuffer {
            fb.clear(self.config.background);
        }
        Ok(())
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn framebuffer(&self) -> Option<&FrameBuffer> {
        self.framebuffer.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    fn start_cursor(&self) -> Cursor {
        Cursor::new(self.config.start_x, self.config.start_y, self.bounds)
    }

    /// Ask the frontend to run us without content. Done once per session;
    /// frontends call `retro_set_environment` more than once.
    pub fn announce_capabilities(
        &mut self,
        env: &mut impl Environment,
        host: &mut impl Host,
    ) -> bool {
        if self.contentless_announced {
            return true;
        }

        if env.set_support_no_game(true) {
            self.contentless_announced = true;
            host.log(Level::Debug, "content-less support enabled");
        } else {
            host.log(Level::Error, "failed to set content-less support");
        }
        self.contentless_announced
    }

    pub fn init(
        &mut self,
        env: &mut impl Environment,
        host: &mut impl Host,
    ) -> Result<(), CoreError> {
        self.framebuffer = Some(FrameBuffer::new(WIDTH, HEIGHT, self.config.background));
        self.cursor = self.start_cursor();
        self.frames = 0;
        self.last_error = None;

        if !env.set_pixel_format(PixelFormat::Rgb565) {
            host.log(Level::Error, "failed to set pixel format RGB565, requesting shutdown");
            env.shutdown();
            self.phase = Phase::Halted;
            return Err(CoreError::PixelFormatRejected(PixelFormat::Rgb565));
        }

        let unsupported = self
            .config
            .text
            .chars()
            .filter(|&c| font::glyph(c).is_none())
            .count();
        if unsupported > 0 {
            host.log(
                Level::Warn,
                &format!("{unsupported} char(s) in {:?} have no glyph and render blank", self.config.text),
            );
        }

        self.phase = Phase::Running;
        host.log(
            Level::Info,
            &format!("initialized {WIDTH}x{HEIGHT} RGB565, cursor mode {:?}", self.config.cursor_mode),
        );
        Ok(())
    }

    pub fn deinit(&mut self, host: &mut impl Host) {
        self.framebuffer = None;
        self.phase = Phase::Uninitialized;
        self.contentless_announced = false;
        self.cursor = self.start_cursor();
        self.frames = 0;
        self.last_error = None;
        host.log(Level::Debug, "core deinitialized");
    }

    pub fn reset(&mut self, host: &mut impl Host) {
        self.cursor = self.start_cursor();
        self.clear();
        host.log(Level::Debug, "core reset");
    }

    /// Content is optional, so any (or no) content is accepted.
    pub fn load_content(&mut self, content: Option<&[u8]>, host: &mut impl Host) -> bool {
        match content {
            Some(data) => host.log(
                Level::Debug,
                &format!("content loaded ({} bytes ignored)", data.len()),
            ),
            None => host.log(Level::Debug, "content-less start"),
        }
        self.clear();
        true
    }

    pub fn unload_content(&mut self, host: &mut impl Host) {
        host.log(Level::Debug, "content unloaded");
    }

    /// Fill the buffer with the background color. No-op before init.
    pub fn clear(&mut self) {
        if let Some(fb) = &mut self.framebuffer {
            fb.clear(self.config.background);
        }
    }

    /// Move the square according to the configured [`CursorMode`].
    pub fn update_cursor(&mut self, host: &mut impl Host) {
        match self.config.cursor_mode {
            CursorMode::Bounce => self.cursor.bounce(self.config.step, self.bounds),
            CursorMode::Input => {
                host.poll();
                let pad = Pad::read(host);
                self.cursor.steer(pad, self.bounds);
            }
        }
    }

    /// Render one frame and hand it to the host.
    ///
    /// Before init, after a failed init, or with no video sink this does as
    /// much as it can and reports the problem through the host once.
    pub fn advance_and_render(&mut self, host: &mut impl Host) -> Result<(), CoreError> {
        let result = self.render(host);
        self.report(host, result);
        result
    }

    fn render(&mut self, host: &mut impl Host) -> Result<(), CoreError> {
        match self.phase {
            Phase::Uninitialized => return Err(CoreError::NotInitialized),
            Phase::Halted => return Err(CoreError::Halted),
            Phase::Running => {}
        }

        let background = self.config.background;
        self.framebuffer
            .as_mut()
            .ok_or(CoreError::NotInitialized)?
            .clear(background);

        self.update_cursor(host);
        self.frames += 1;

        let Self {
            config,
            cursor,
            framebuffer,
            ..
        } = self;
        let fb = framebuffer.as_mut().ok_or(CoreError::NotInitialized)?;

        fb.draw_rectangle(
            cursor.x,
            cursor.y,
            config.rect_width,
            config.rect_height,
            config.rect_color,
        );
        fb.draw_text(config.text_x, config.text_y, &config.text, config.text_color);

        host.present(fb.frame())?;
        Ok(())
    }

    fn report(&mut self, host: &mut impl Host, result: Result<(), CoreError>) {
        match result {
            Ok(()) => {
                if self.last_error.take().is_some() {
                    host.log(Level::Info, "frame delivery resumed");
                }
            }
            Err(err) if self.last_error != Some(err) => {
                let level = match err {
                    CoreError::MissingSink(_) => Level::Warn,
                    _ => Level::Error,
                };
                host.log(level, &err.to_string());
                self.last_error = Some(err);
            }
            Err(_) => {}
        }
    }
}

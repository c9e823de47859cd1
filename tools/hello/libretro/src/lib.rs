//! libretro entry points for the Hello World core.
//!
//! The frontend drives a single session through the exported `retro_*`
//! functions. All of them lock the same session, so calls from different
//! threads are serialized.

pub mod config;
pub mod host;
pub mod logger;

use std::ffi::CString;
use std::os::raw::{c_char, c_uint, c_void};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::{ptr, slice};

use hello_core::system::{self, Region};
use hello_core::Renderer;
use libretro_sys::{
    AudioSampleBatchFn, AudioSampleFn, EnvironmentFn, GameGeometry, GameInfo, InputPollFn,
    InputStateFn, Region as RetroRegion, SystemAvInfo, SystemInfo, SystemTiming, VideoRefreshFn,
    API_VERSION,
};
use log::LevelFilter;
use once_cell::sync::Lazy;

use crate::config::RetroConfig;
use crate::host::{RetroEnvironment, RetroHost};

struct Session {
    renderer: Renderer,
    host: RetroHost,
    env: RetroEnvironment,
    configured: bool,
}

impl Session {
    fn new() -> Self {
        Self {
            renderer: Renderer::default(),
            host: RetroHost::default(),
            env: RetroEnvironment::default(),
            configured: false,
        }
    }

    /// Read `HELLO_RETRO_CONFIG` once per session. Bad files fall back to
    /// the defaults.
    fn configure(&mut self) {
        if self.configured {
            return;
        }
        self.configured = true;

        match RetroConfig::from_env() {
            Ok(Some(config)) => {
                logger::set_file_path(&config.log_file);
                logger::set_level(config.log_level);
                if let Err(err) = self.renderer.set_config(config.core) {
                    log::warn!("{err}, using defaults");
                }
                log::info!("loaded config from ${}", config::CONFIG_ENV);
            }
            Ok(None) => {}
            Err(err) => log::warn!("{err}, using defaults"),
        }
    }

    /// Switch to the frontend's log interface if it offers one.
    fn adopt_log_interface(&mut self) {
        if logger::has_frontend() {
            return;
        }
        if let Some(log_cb) = self.env.log_interface() {
            logger::set_frontend(Some(log_cb));
        }
    }
}

static SESSION: Lazy<Mutex<Session>> = Lazy::new(|| Mutex::new(Session::new()));

static SYSTEM_INFO: Lazy<[CString; 3]> = Lazy::new(|| {
    let info = system::system_info();
    [info.library_name, info.library_version, info.valid_extensions]
        .map(|s| CString::new(s).unwrap_or_default())
});

fn session() -> MutexGuard<'static, Session> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

#[no_mangle]
pub extern "C" fn retro_api_version() -> c_uint {
    API_VERSION
}

#[no_mangle]
pub extern "C" fn retro_set_environment(callback: Option<EnvironmentFn>) {
    logger::install(LevelFilter::Debug);
    let mut session = session();
    session.env = RetroEnvironment::new(callback);
    if !session.env.is_registered() {
        log::error!("retro_set_environment: no environment callback");
        return;
    }

    session.configure();
    session.adopt_log_interface();

    let Session { renderer, host, env, .. } = &mut *session;
    renderer.announce_capabilities(env, host);
}

#[no_mangle]
pub extern "C" fn retro_set_video_refresh(callback: Option<VideoRefreshFn>) {
    session().host.video = callback;
    log::debug!("video refresh callback {}", registered(callback.is_some()));
}

#[no_mangle]
pub extern "C" fn retro_set_audio_sample(_callback: Option<AudioSampleFn>) {
    log::debug!("audio sample callback ignored");
}

#[no_mangle]
pub extern "C" fn retro_set_audio_sample_batch(_callback: Option<AudioSampleBatchFn>) {
    log::debug!("audio batch callback ignored");
}

#[no_mangle]
pub extern "C" fn retro_set_input_poll(callback: Option<InputPollFn>) {
    session().host.input_poll = callback;
    log::debug!("input poll callback {}", registered(callback.is_some()));
}

#[no_mangle]
pub extern "C" fn retro_set_input_state(callback: Option<InputStateFn>) {
    session().host.input_state = callback;
    log::debug!("input state callback {}", registered(callback.is_some()));
}

fn registered(present: bool) -> &'static str {
    if present {
        "registered"
    } else {
        "cleared"
    }
}

#[no_mangle]
pub extern "C" fn retro_init() {
    logger::install(LevelFilter::Debug);
    let mut session = session();
    session.configure();
    session.adopt_log_interface();
    log::info!("libretro API version {API_VERSION}");

    let Session { renderer, host, env, .. } = &mut *session;
    if let Err(err) = renderer.init(env, host) {
        log::error!("init failed: {err}");
    }
}

#[no_mangle]
pub extern "C" fn retro_deinit() {
    let mut session = session();
    let Session { renderer, host, .. } = &mut *session;
    renderer.deinit(host);
    session.configured = false;

    logger::forget_frontend();
    logger::close_file();
}

/// # Safety
///
/// `info` must be null or point to writable `retro_system_info`.
#[no_mangle]
pub unsafe extern "C" fn retro_get_system_info(info: *mut SystemInfo) {
    let Some(info) = info.as_mut() else {
        log::warn!("retro_get_system_info: null info pointer");
        return;
    };

    let meta = system::system_info();
    let [name, version, extensions] = &*SYSTEM_INFO;
    *info = SystemInfo {
        library_name: name.as_ptr(),
        library_version: version.as_ptr(),
        valid_extensions: extensions.as_ptr(),
        need_fullpath: meta.need_fullpath,
        block_extract: meta.block_extract,
    };
}

/// # Safety
///
/// `info` must be null or point to writable `retro_system_av_info`.
#[no_mangle]
pub unsafe extern "C" fn retro_get_system_av_info(info: *mut SystemAvInfo) {
    let Some(info) = info.as_mut() else {
        log::warn!("retro_get_system_av_info: null info pointer");
        return;
    };

    let av = system::av_info();
    *info = SystemAvInfo {
        geometry: GameGeometry {
            base_width: av.geometry.base_width,
            base_height: av.geometry.base_height,
            max_width: av.geometry.max_width,
            max_height: av.geometry.max_height,
            aspect_ratio: av.geometry.aspect_ratio,
        },
        timing: SystemTiming {
            fps: av.timing.fps,
            sample_rate: av.timing.sample_rate,
        },
    };
}

#[no_mangle]
pub extern "C" fn retro_set_controller_port_device(port: c_uint, device: c_uint) {
    log::debug!("port {port} set to device {device}");
}

#[no_mangle]
pub extern "C" fn retro_reset() {
    let mut session = session();
    let Session { renderer, host, .. } = &mut *session;
    renderer.reset(host);
}

#[no_mangle]
pub extern "C" fn retro_run() {
    let mut session = session();
    let Session { renderer, host, .. } = &mut *session;
    // failures are logged by the renderer
    let _ = renderer.advance_and_render(host);
}

#[no_mangle]
pub extern "C" fn retro_serialize_size() -> usize {
    0
}

#[no_mangle]
pub extern "C" fn retro_serialize(_data: *mut c_void, _size: usize) -> bool {
    false
}

#[no_mangle]
pub extern "C" fn retro_unserialize(_data: *const c_void, _size: usize) -> bool {
    false
}

#[no_mangle]
pub extern "C" fn retro_cheat_reset() {}

#[no_mangle]
pub extern "C" fn retro_cheat_set(_index: c_uint, _enabled: bool, _code: *const c_char) {}

/// # Safety
///
/// `game` must be null or point to a `retro_game_info` whose `data` is null
/// or valid for `size` bytes.
#[no_mangle]
pub unsafe extern "C" fn retro_load_game(game: *const GameInfo) -> bool {
    let content = game
        .as_ref()
        .filter(|game| !game.data.is_null() && game.size > 0)
        .map(|game| slice::from_raw_parts(game.data.cast::<u8>(), game.size));

    let mut session = session();
    let Session { renderer, host, .. } = &mut *session;
    renderer.load_content(content, host)
}

#[no_mangle]
pub extern "C" fn retro_load_game_special(
    game_type: c_uint,
    _info: *const GameInfo,
    num_info: usize,
) -> bool {
    log::warn!("special content (type {game_type}, {num_info} items) is not supported");
    false
}

#[no_mangle]
pub extern "C" fn retro_unload_game() {
    let mut session = session();
    let Session { renderer, host, .. } = &mut *session;
    renderer.unload_content(host);
}

#[no_mangle]
pub extern "C" fn retro_get_region() -> c_uint {
    match system::region() {
        Region::Ntsc => RetroRegion::NTSC as c_uint,
    }
}

#[no_mangle]
pub extern "C" fn retro_get_memory_data(_id: c_uint) -> *mut c_void {
    ptr::null_mut()
}

#[no_mangle]
pub extern "C" fn retro_get_memory_size(_id: c_uint) -> usize {
    0
}

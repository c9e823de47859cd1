//! Routes `log` records to the frontend's log interface when it hands one
//! out, and to an append-only `core.log` plus stderr when it doesn't.
//!
//! The file is opened lazily on the first fallback line. If that fails the
//! failure is reported once and every later line goes to stderr only.

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use libretro_sys::{LogLevel, LogPrintfFn};
use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;

pub const DEFAULT_LOG_FILE: &str = "core.log";

static FRONTEND: Mutex<Option<LogPrintfFn>> = Mutex::new(None);
static FILE_LOG: Lazy<Mutex<FileLog>> = Lazy::new(|| Mutex::new(FileLog::new(DEFAULT_LOG_FILE)));
static LOGGER: FrontendLogger = FrontendLogger;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Install the logger. Safe to call repeatedly; only the first call wins.
pub fn install(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}

/// Prefer the frontend's log interface from now on. `None` reverts to the file.
pub fn set_frontend(callback: Option<LogPrintfFn>) {
    *lock(&FRONTEND) = callback;
}

pub fn has_frontend() -> bool {
    lock(&FRONTEND).is_some()
}

pub fn set_file_path(path: impl Into<PathBuf>) {
    let path = path.into();
    let mut file_log = lock(&FILE_LOG);
    if file_log.path != path {
        *file_log = FileLog::new(path);
    }
}

/// Close the fallback file. It reopens on the next fallback line.
pub fn close_file() {
    lock(&FILE_LOG).close();
}

pub fn forget_frontend() {
    set_frontend(None);
}

fn retro_level(level: Level) -> LogLevel {
    match level {
        Level::Error => LogLevel::Error,
        Level::Warn => LogLevel::Warn,
        Level::Info => LogLevel::Info,
        Level::Debug | Level::Trace => LogLevel::Debug,
    }
}

fn emit(level: Level, message: &str) {
    let frontend = *lock(&FRONTEND);
    match frontend {
        Some(log_cb) => {
            let message = CString::new(message.replace('\0', " ")).unwrap_or_default();
            // message goes through %s so it is never parsed as a format string
            unsafe { log_cb(retro_level(level), c"%s\n".as_ptr(), message.as_ptr()) };
        }
        None => {
            lock(&FILE_LOG).append(level, message);
            eprintln!("[{level}] {message}");
        }
    }
}

struct FrontendLogger;

impl Log for FrontendLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            emit(record.level(), &record.args().to_string());
        }
    }

    fn flush(&self) {
        lock(&FILE_LOG).flush();
    }
}

#[derive(Debug)]
pub struct FileLog {
    path: PathBuf,
    file: Option<File>,
    open_failed: bool,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            open_failed: false,
        }
    }

    /// Write one `[LEVEL] message` line. Returns whether it reached the file.
    pub fn append(&mut self, level: Level, message: &str) -> bool {
        if self.file.is_none() && !self.open_failed {
            match OpenOptions::new().create(true).append(true).open(&self.path) {
                Ok(file) => self.file = Some(file),
                Err(err) => {
                    self.open_failed = true;
                    eprintln!("[ERROR] failed to open {}: {err}", self.path.display());
                }
            }
        }

        let Some(file) = &mut self.file else {
            return false;
        };
        let written = writeln!(file, "[{level}] {}", message.trim_end()).and_then(|()| file.flush());
        written.is_ok()
    }

    pub fn flush(&mut self) {
        if let Some(file) = &mut self.file {
            let _ = file.flush();
        }
    }

    pub fn close(&mut self) {
        self.flush();
        self.file = None;
        self.open_failed = false;
    }
}

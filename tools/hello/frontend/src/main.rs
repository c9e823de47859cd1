mod headless;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hello_core::{Button, CoreConfig, CursorMode, Renderer};
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::headless::{HeadlessEnv, HeadlessHost};

#[derive(Parser, Debug)]
#[command(name = "hello-run")]
#[command(version, about = "Run the Hello World core headlessly and save the last frame", long_about = None)]
struct Cli {
    /// Number of frames to run
    #[arg(short, long, default_value_t = 300)]
    frames: u64,

    /// Override the cursor mode from the config file
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// D-pad buttons held for the whole run (input mode)
    #[arg(long, value_enum, value_delimiter = ',')]
    hold: Vec<Dpad>,

    /// TOML file with renderer settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the last frame
    #[arg(short, long, default_value = "frame.png")]
    out: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Bounce,
    Input,
}

impl From<Mode> for CursorMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Bounce => CursorMode::Bounce,
            Mode::Input => CursorMode::Input,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Dpad {
    Up,
    Down,
    Left,
    Right,
}

impl From<Dpad> for Button {
    fn from(button: Dpad) -> Self {
        match button {
            Dpad::Up => Button::Up,
            Dpad::Down => Button::Down,
            Dpad::Left => Button::Left,
            Dpad::Right => Button::Right,
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .finish()
        .init();
}

fn load_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config: CoreConfig = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => CoreConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.cursor_mode = mode.into();
    }
    Ok(config)
}

/// Drive the renderer the way a libretro frontend would and return the host
/// holding the last frame.
fn run(cli: &Cli) -> Result<HeadlessHost> {
    let config = load_config(cli)?;
    let mut renderer = Renderer::new(config).context("invalid config")?;
    let mut host = HeadlessHost::holding(cli.hold.iter().copied().map(Button::from).collect());
    let mut env = HeadlessEnv::default();

    renderer.announce_capabilities(&mut env, &mut host);
    renderer
        .init(&mut env, &mut host)
        .context("core init failed")?;
    renderer.load_content(None, &mut host);

    for _ in 0..cli.frames {
        renderer.advance_and_render(&mut host)?;
    }

    let cursor = renderer.cursor();
    info!(
        frames = renderer.frame_count(),
        x = cursor.x,
        y = cursor.y,
        flips = cursor.flips,
        "run finished"
    );

    renderer.unload_content(&mut host);
    renderer.deinit(&mut host);
    Ok(host)
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let host = run(&cli)?;
    let frame = host.last_frame.context("no frame was rendered, try --frames 1 or more")?;
    frame
        .save(&cli.out)
        .with_context(|| format!("failed to write {}", cli.out.display()))?;
    info!("wrote {}", cli.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hello-run").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn bounce_run_renders_the_square_at_its_final_position() {
        let host = run(&cli(&["--frames", "10", "--mode", "bounce"])).unwrap();
        assert_eq!(host.presented, 10);
        assert_eq!(host.polls, 0);

        let frame = host.last_frame.unwrap();
        assert_eq!(frame.dimensions(), (320, 240));
        assert_eq!(frame.get_pixel(9, 0), &Rgb([0, 0, 0]));
        assert_eq!(frame.get_pixel(10, 0), &Rgb([255, 0, 0]));
        assert_eq!(frame.get_pixel(29, 19), &Rgb([255, 0, 0]));
    }

    #[test]
    fn held_buttons_steer_the_square() {
        let host = run(&cli(&["--frames", "5", "--hold", "down,right"])).unwrap();
        assert_eq!(host.polls, 5);

        let frame = host.last_frame.unwrap();
        assert_eq!(frame.get_pixel(5, 5), &Rgb([255, 0, 0]));
        assert_eq!(frame.get_pixel(4, 4), &Rgb([0, 0, 0]));
    }

    #[test]
    fn config_file_is_applied_and_mode_flag_overrides_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.toml");
        fs::write(&path, "cursor_mode = \"input\"\nstep = 4\nrect_color = 0x001F\n").unwrap();

        let host = run(&cli(&[
            "--frames",
            "2",
            "--mode",
            "bounce",
            "--config",
            path.to_str().unwrap(),
        ]))
        .unwrap();
        let frame = host.last_frame.unwrap();
        assert_eq!(frame.get_pixel(8, 0), &Rgb([0, 0, 255]));
        assert_eq!(frame.get_pixel(7, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.toml");
        fs::write(&path, "step = -1\n").unwrap();

        assert!(run(&cli(&["--config", path.to_str().unwrap()])).is_err());
    }

    #[test]
    fn zero_frames_leaves_nothing_to_save() {
        let host = run(&cli(&["--frames", "0"])).unwrap();
        assert!(host.last_frame.is_none());
    }
}

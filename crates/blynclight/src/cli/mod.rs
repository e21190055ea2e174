//! CLI subcommands — device listing, light and tone control, configuration.

mod config_cmd;
mod devices;
mod light;
mod music;
mod status;

use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};
use serde::Serialize;

use light::LightAction;

pub(super) use crate::RUNNING;
pub(super) use blynclight_lib::color::{self, Rgb};
pub(super) use blynclight_lib::config::Config;
pub(super) use blynclight_lib::control::{
    Brightness, Command as DeviceCommand, Flash, Music, Mute, RESET_SEQUENCE, Repeat,
};
pub(super) use blynclight_lib::error::Result;
pub(super) use blynclight_lib::models;
pub(super) use blynclight_lib::vendor::{self, PlatformSdk, VendorSdk};
pub(super) use blynclight_lib::{BlyncError, Controller};

const PADDING: usize = 2;

/// Global options shared by every subcommand.
pub struct Options {
    pub json: bool,
    pub light: Option<u8>,
    pub config_path: Option<PathBuf>,
}

impl Options {
    /// The light to address: `--light`, else the config default.
    pub(super) fn light_index(&self, config: &Config) -> u8 {
        self.light.unwrap_or(config.light)
    }
}

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load the config from `custom_path`, or the default location.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

/// [`load_config`] for commands that drive a light. Fields that fail
/// validation are logged and replaced by their defaults.
pub(super) fn load_device_config(custom_path: Option<&Path>) -> Config {
    let (config, problems) = load_config(custom_path).sanitized();
    for p in &problems {
        log::warn!("{p}; using the default");
    }
    config
}

/// Issue `commands` to the light at `index`, stopping at the first failure.
pub(super) fn send<S: VendorSdk>(
    ctl: &mut Controller<S>,
    index: u8,
    commands: &[DeviceCommand],
) -> Result<()> {
    for &command in commands {
        ctl.execute(index, command)?;
    }
    Ok(())
}

/// Enumerate lights, run `f`, then release every handle.
pub(super) fn with_controller<T>(
    f: impl FnOnce(&mut Controller<PlatformSdk>) -> Result<T>,
) -> Result<T> {
    let mut ctl = Controller::new(vendor::open_sdk())?;
    ctl.init()?;
    let result = f(&mut ctl);
    ctl.shutdown();
    result
}

pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| BlyncError::Config(format!("JSON serialization failed: {e}")))?;
    println!("{json_str}");
    Ok(())
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct DeviceJson {
    pub index: u8,
    pub device_type: u8,
    pub model: String,
    pub unique_id: u32,
    pub music: bool,
}

#[derive(Serialize)]
pub(super) struct DevicesOutput {
    pub count: usize,
    pub capacity: usize,
    pub devices: Vec<DeviceJson>,
}

#[derive(Serialize)]
pub(super) struct BackendJson {
    pub platform: String,
    pub polarity: String,
    pub capacity: usize,
}

#[derive(Serialize)]
pub(super) struct ConfigSummaryJson {
    pub light: u8,
    pub color: String,
    pub flash_speed: u8,
    pub volume: u8,
}

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub version: String,
    pub backend: BackendJson,
    pub devices: usize,
    pub config: ConfigSummaryJson,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub problems: Vec<String>,
}

// ── Arguments ──

#[derive(Clone, Copy, ValueEnum)]
pub enum StartStop {
    Start,
    Stop,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OnOff {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum MusicAction {
    /// Start playing the selected tone
    Play,
    /// Stop playing
    Stop,
    /// Turn tone repeat on or off
    Repeat { state: OnOff },
    /// Set the tone volume
    Volume {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=10))]
        level: u8,
    },
    /// Select the tone to play
    Select { track: u8 },
}

#[derive(Subcommand)]
pub enum Command {
    /// List connected Blynclight devices
    Devices,

    /// Show backend, device count and configured defaults
    Status,

    /// Turn the light on
    On {
        /// Color name or #RRGGBB (default: `color` from the config file)
        color: Option<String>,
        /// Dim the light
        #[arg(long)]
        dim: bool,
        /// Flash the light
        #[arg(long)]
        flash: bool,
        /// Flash speed, 1 (slow) to 7 (fast)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
        speed: Option<u8>,
        /// Keep the light on for this many seconds, then turn it off
        #[arg(long, value_name = "SECS")]
        duration: Option<u64>,
    },

    /// Turn the light off
    Off,

    /// Dim the light
    Dim,

    /// Return the light to full brightness
    Bright,

    /// Start or stop flashing
    Flash { state: StartStop },

    /// Set the flash speed
    Speed {
        /// 1 (slow) to 7 (fast)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=7))]
        speed: u8,
    },

    /// Control the built-in tone player
    Music {
        #[command(subcommand)]
        action: MusicAction,
    },

    /// Mute the tone player
    Mute,

    /// Unmute the tone player
    Unmute,

    /// Turn everything off: light, flashing and tones
    Reset,

    /// Show current configuration and file path
    Config {
        /// Write a default config file instead (never overwrites)
        #[arg(long)]
        init: bool,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
pub(super) fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, opts: &Options) -> Result<()> {
    match cmd {
        Command::Devices => devices::cmd_devices(opts),
        Command::Status => status::cmd_status(opts),
        Command::Config { init: false } => config_cmd::cmd_config(opts),
        Command::Config { init: true } => config_cmd::cmd_config_init(opts),
        Command::On {
            color,
            dim,
            flash,
            speed,
            duration,
        } => {
            if opts.json {
                warn_json_unsupported("on");
            }
            let request = light::OnRequest {
                color,
                dim,
                flash,
                speed,
                duration,
            };
            light::cmd_on(opts, request)
        }
        Command::Music { action } => {
            if opts.json {
                warn_json_unsupported("music");
            }
            music::cmd_music(opts, action)
        }
        Command::Off => light::cmd_light(opts, LightAction::Off),
        Command::Dim => light::cmd_light(opts, LightAction::Brightness(Brightness::Dim)),
        Command::Bright => light::cmd_light(opts, LightAction::Brightness(Brightness::Bright)),
        Command::Flash { state } => {
            let mode = match state {
                StartStop::Start => Flash::Start,
                StartStop::Stop => Flash::Stop,
            };
            light::cmd_light(opts, LightAction::Flash(mode))
        }
        Command::Speed { speed } => light::cmd_light(opts, LightAction::Speed(speed)),
        Command::Mute => light::cmd_light(opts, LightAction::Mute(Mute::Muted)),
        Command::Unmute => light::cmd_light(opts, LightAction::Mute(Mute::Unmuted)),
        Command::Reset => light::cmd_light(opts, LightAction::Reset),
    }
}

//! Light subcommands — `on`, `off`, `dim`, `bright`, `flash`, `speed`,
//! `mute`, `unmute` and `reset`.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use super::{
    Brightness, Config, DeviceCommand, Flash, Mute, Options, RESET_SEQUENCE, RUNNING, Result,
    Rgb, color, load_device_config, send, warn_json_unsupported, with_controller,
};

/// Polling interval while holding the light for `--duration`.
const HOLD_POLL: Duration = Duration::from_millis(100);

/// Arguments of `blync on`.
pub(super) struct OnRequest {
    pub color: Option<String>,
    pub dim: bool,
    pub flash: bool,
    pub speed: Option<u8>,
    pub duration: Option<u64>,
}

/// A single-command light subcommand.
#[derive(Debug, Clone, Copy)]
pub(super) enum LightAction {
    Off,
    Brightness(Brightness),
    Flash(Flash),
    Speed(u8),
    Mute(Mute),
    Reset,
}

impl LightAction {
    pub(super) fn name(self) -> &'static str {
        match self {
            LightAction::Off => "off",
            LightAction::Brightness(Brightness::Dim) => "dim",
            LightAction::Brightness(Brightness::Bright) => "bright",
            LightAction::Flash(_) => "flash",
            LightAction::Speed(_) => "speed",
            LightAction::Mute(Mute::Muted) => "mute",
            LightAction::Mute(Mute::Unmuted) => "unmute",
            LightAction::Reset => "reset",
        }
    }

    fn describe(self) -> String {
        match self {
            LightAction::Off => "off".into(),
            LightAction::Brightness(Brightness::Dim) => "dimmed".into(),
            LightAction::Brightness(Brightness::Bright) => "full brightness".into(),
            LightAction::Flash(Flash::Start) => "flashing".into(),
            LightAction::Flash(Flash::Stop) => "steady".into(),
            LightAction::Speed(speed) => format!("flash speed {speed}"),
            LightAction::Mute(Mute::Muted) => "tones muted".into(),
            LightAction::Mute(Mute::Unmuted) => "tones unmuted".into(),
            LightAction::Reset => "reset".into(),
        }
    }

    /// Device commands for this action.
    ///
    /// Each process starts a HID light from the quiescent word, where a lone
    /// state change goes out with the off bit set. Every state change
    /// therefore turns the light on with `color` first.
    fn commands(self, color: Rgb) -> Vec<DeviceCommand> {
        let change = match self {
            LightAction::Off => return vec![DeviceCommand::LightOff],
            LightAction::Reset => return RESET_SEQUENCE.to_vec(),
            LightAction::Brightness(mode) => DeviceCommand::Brightness(mode),
            LightAction::Flash(mode) => DeviceCommand::Flash(mode),
            LightAction::Speed(speed) => DeviceCommand::FlashSpeed(speed),
            LightAction::Mute(mode) => DeviceCommand::Mute(mode),
        };
        vec![DeviceCommand::LightOn(color), change]
    }
}

/// Resolve the color for `on`: the argument, else the configured default.
fn resolve_color(arg: Option<&str>, config: &Config) -> Result<Rgb> {
    match arg {
        Some(s) => color::parse_color(s),
        None => config.color(),
    }
}

/// Device commands for `blync on`; `default_speed` applies when `--flash`
/// is given without `--speed`.
fn on_commands(request: &OnRequest, rgb: Rgb, default_speed: u8) -> Vec<DeviceCommand> {
    let mut commands = vec![DeviceCommand::LightOn(rgb)];
    if request.dim {
        commands.push(DeviceCommand::Brightness(Brightness::Dim));
    }
    if request.flash || request.speed.is_some() {
        commands.push(DeviceCommand::FlashSpeed(request.speed.unwrap_or(default_speed)));
    }
    if request.flash {
        commands.push(DeviceCommand::Flash(Flash::Start));
    }
    commands
}

pub(super) fn cmd_on(opts: &Options, request: OnRequest) -> Result<()> {
    let config = load_device_config(opts.config_path.as_deref());
    let rgb = resolve_color(request.color.as_deref(), &config)?;
    let index = opts.light_index(&config);
    let commands = on_commands(&request, rgb, config.flash_speed);

    with_controller(|ctl| {
        send(ctl, index, &commands)?;

        let mut state = vec![color::format_color(rgb)];
        if request.dim {
            state.push("dimmed".into());
        }
        if request.flash {
            state.push("flashing".into());
        }
        println!("Light {index}: on ({})", state.join(", "));

        if let Some(secs) = request.duration {
            hold(Duration::from_secs(secs));
            ctl.light_off(index)?;
            println!("Light {index}: off");
        }
        Ok(())
    })
}

/// Block until `duration` has elapsed or Ctrl+C is pressed.
fn hold(duration: Duration) {
    let start = Instant::now();
    while RUNNING.load(Ordering::SeqCst) && start.elapsed() < duration {
        std::thread::sleep(HOLD_POLL.min(duration.saturating_sub(start.elapsed())));
    }
}

pub(super) fn cmd_light(opts: &Options, action: LightAction) -> Result<()> {
    if opts.json {
        warn_json_unsupported(action.name());
    }
    let config = load_device_config(opts.config_path.as_deref());
    let index = opts.light_index(&config);
    let commands = action.commands(config.color()?);

    with_controller(|ctl| {
        send(ctl, index, &commands)?;
        println!("Light {index}: {}", action.describe());
        Ok(())
    })
}

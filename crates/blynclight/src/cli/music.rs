//! `music` subcommand — the tone player on V30S-class lights.

use super::{
    Controller, DeviceCommand, MusicAction, Music, OnOff, Options, PlatformSdk, Repeat, Result,
    Rgb, load_device_config, models, send, with_controller,
};

/// Warn when the addressed light has no tone player. The command is still
/// sent; the light ignores it.
fn check_music_capable(ctl: &Controller<PlatformSdk>, index: u8) {
    let device_type = ctl.device_type(index);
    match models::DeviceModel::from_type(device_type) {
        Some(model) if !model.has_music() => {
            log::warn!("light {index} ({model}) has no tone player");
        }
        _ => {}
    }
}

/// Device commands for `action`. The tone player shares the command word
/// with the light, so the light is turned on with `color` first, as for
/// the other state changes.
fn music_commands(action: &MusicAction, color: Rgb, volume: u8) -> Vec<DeviceCommand> {
    let mut commands = vec![DeviceCommand::LightOn(color)];
    match action {
        MusicAction::Play => commands.extend([
            DeviceCommand::MusicVolume(volume),
            DeviceCommand::Music(Music::Play),
        ]),
        MusicAction::Stop => commands.push(DeviceCommand::Music(Music::Stop)),
        MusicAction::Repeat { state } => {
            let mode = match state {
                OnOff::On => Repeat::On,
                OnOff::Off => Repeat::Off,
            };
            commands.push(DeviceCommand::MusicRepeat(mode));
        }
        MusicAction::Volume { level } => commands.push(DeviceCommand::MusicVolume(*level)),
        MusicAction::Select { track } => commands.push(DeviceCommand::MusicSelect(*track)),
    }
    commands
}

fn describe(action: &MusicAction, volume: u8) -> String {
    match action {
        MusicAction::Play => format!("playing (volume {volume})"),
        MusicAction::Stop => "music stopped".into(),
        MusicAction::Repeat { state: OnOff::On } => "repeat on".into(),
        MusicAction::Repeat { state: OnOff::Off } => "repeat off".into(),
        MusicAction::Volume { level } => format!("volume {level}"),
        MusicAction::Select { track } => format!("track {track} selected"),
    }
}

pub(super) fn cmd_music(opts: &Options, action: MusicAction) -> Result<()> {
    let config = load_device_config(opts.config_path.as_deref());
    let index = opts.light_index(&config);
    let commands = music_commands(&action, config.color()?, config.volume);

    with_controller(|ctl| {
        check_music_capable(ctl, index);
        send(ctl, index, &commands)?;
        println!("Light {index}: {}", describe(&action, config.volume));
        Ok(())
    })
}

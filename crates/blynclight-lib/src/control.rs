//! Command normalizer — one logical command set over any [`VendorSdk`].
//!
//! Every command goes through the same pipeline:
//!
//! 1. the index is checked against the device table (`IndexOutOfRange`),
//! 2. the mode byte, if any, is checked against its enum (`InvalidArgument`),
//! 3. exactly one vendor primitive is invoked,
//! 4. its raw status is corrected with the SDK's [`Polarity`].
//!
//! Failures in 1 or 2 never reach the vendor layer. Vendor failures are
//! reported as-is: no retry, and no change to the device table; only
//! [`Controller::refresh`] updates device presence.
//!
//! [`Polarity`]: crate::vendor::Polarity

use std::fmt;

use crate::color::{Preset, Rgb};
use crate::table::{DeviceSlot, DeviceTable};
use crate::vendor::{self, DeviceError, RawStatus, VendorSdk};

/// Largest table the byte-wide device index can address.
pub const MAX_TABLE_CAPACITY: usize = 256;

// ── Errors ──

/// Why a command was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// `index` is outside `[0, count)` of the current epoch.
    IndexOutOfRange { index: u8, count: usize },
    /// A mode byte outside its recognized set.
    InvalidArgument { parameter: &'static str, value: u8 },
    /// The vendor primitive reported failure with its native `code`.
    VendorFailure { command: &'static str, code: RawStatus },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::IndexOutOfRange { index, count } => write!(
                f,
                "Light {index} is out of range ({count} device{} found)",
                if *count == 1 { "" } else { "s" }
            ),
            CommandError::InvalidArgument { parameter, value } => {
                write!(f, "Invalid {parameter} mode: {value} (expected 0 or 1)")
            }
            CommandError::VendorFailure { command, code } => {
                write!(f, "{command} failed (vendor status {code})")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Result of a device command.
pub type CommandResult = std::result::Result<(), CommandError>;

/// A command result collapsed to the three-valued public convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    InvalidArgument,
}

impl From<&CommandResult> for Outcome {
    fn from(result: &CommandResult) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(CommandError::VendorFailure { .. }) => Outcome::Failure,
            Err(CommandError::IndexOutOfRange { .. } | CommandError::InvalidArgument { .. }) => {
                Outcome::InvalidArgument
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
            Outcome::InvalidArgument => write!(f, "invalid argument"),
        }
    }
}

// ── Mode enums ──

/// Conversion into a two-valued mode, from the enum itself or a raw byte.
pub trait IntoMode<M> {
    fn into_mode(self) -> std::result::Result<M, CommandError>;
}

/// Declares a two-valued mode enum: `0` is the first variant, `1` the second.
macro_rules! two_state_mode {
    ($(#[$doc:meta])* $name:ident, $param:literal, $zero:ident, $one:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $zero = 0,
            $one = 1,
        }

        impl TryFrom<u8> for $name {
            type Error = CommandError;

            fn try_from(value: u8) -> std::result::Result<Self, CommandError> {
                match value {
                    0 => Ok($name::$zero),
                    1 => Ok($name::$one),
                    _ => Err(CommandError::InvalidArgument {
                        parameter: $param,
                        value,
                    }),
                }
            }
        }

        impl IntoMode<$name> for $name {
            fn into_mode(self) -> std::result::Result<$name, CommandError> {
                Ok(self)
            }
        }

        impl IntoMode<$name> for u8 {
            fn into_mode(self) -> std::result::Result<$name, CommandError> {
                $name::try_from(self)
            }
        }

        impl From<bool> for $name {
            fn from(on: bool) -> Self {
                if on { $name::$one } else { $name::$zero }
            }
        }
    };
}

two_state_mode!(
    /// Light brightness.
    Brightness, "brightness", Dim, Bright
);
two_state_mode!(
    /// Light flashing.
    Flash, "flash", Stop, Start
);
two_state_mode!(
    /// Tone playback.
    Music, "music", Stop, Play
);
two_state_mode!(
    /// Tone repeat.
    Repeat, "repeat", Off, On
);
two_state_mode!(
    /// Tone mute.
    Mute, "mute", Unmuted, Muted
);

// ── Commands ──

/// One logical device command with validated parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    LightOn(Rgb),
    LightOff,
    Brightness(Brightness),
    Flash(Flash),
    FlashSpeed(u8),
    Music(Music),
    MusicRepeat(Repeat),
    MusicVolume(u8),
    MusicSelect(u8),
    Mute(Mute),
}

impl Command {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::LightOn(_) => "light on",
            Command::LightOff => "light off",
            Command::Brightness(_) => "brightness",
            Command::Flash(_) => "flash",
            Command::FlashSpeed(_) => "flash speed",
            Command::Music(_) => "music",
            Command::MusicRepeat(_) => "music repeat",
            Command::MusicVolume(_) => "music volume",
            Command::MusicSelect(_) => "music select",
            Command::Mute(_) => "mute",
        }
    }

    /// Invoke the single vendor primitive for this command.
    fn dispatch(self, sdk: &mut impl VendorSdk, index: u8) -> RawStatus {
        match self {
            Command::LightOn(c) => sdk.light_on(index, c.red, c.green, c.blue),
            Command::LightOff => sdk.light_off(index),
            Command::Brightness(Brightness::Dim) => sdk.set_dim(index),
            Command::Brightness(Brightness::Bright) => sdk.clear_dim(index),
            Command::Flash(Flash::Stop) => sdk.stop_flash(index),
            Command::Flash(Flash::Start) => sdk.start_flash(index),
            Command::FlashSpeed(speed) => sdk.flash_speed(index, speed),
            Command::Music(Music::Stop) => sdk.stop_music(index),
            Command::Music(Music::Play) => sdk.start_music(index),
            Command::MusicRepeat(Repeat::Off) => sdk.clear_music_repeat(index),
            Command::MusicRepeat(Repeat::On) => sdk.set_music_repeat(index),
            Command::MusicVolume(volume) => sdk.music_volume(index, volume),
            Command::MusicSelect(track) => sdk.select_music(index, track),
            Command::Mute(Mute::Unmuted) => sdk.clear_mute(index),
            Command::Mute(Mute::Muted) => sdk.set_mute(index),
        }
    }
}

/// Flash speed written by [`Controller::reset`].
pub const RESET_FLASH_SPEED: u8 = 1;

/// Commands issued by [`Controller::reset`], in order.
pub const RESET_SEQUENCE: [Command; 7] = [
    Command::LightOff,
    Command::Flash(Flash::Stop),
    Command::FlashSpeed(RESET_FLASH_SPEED),
    Command::Music(Music::Stop),
    Command::MusicSelect(0),
    Command::MusicVolume(0),
    Command::Mute(Mute::Unmuted),
];

// ── Controller ──

/// The uniform control surface: owns the vendor SDK and the device table.
///
/// Every mutating call takes `&mut self`, so a `Controller` has exactly one
/// writer at a time. Share it across threads behind a `Mutex`.
pub struct Controller<S: VendorSdk> {
    sdk: S,
    table: DeviceTable,
}

impl<S: VendorSdk> Controller<S> {
    /// Wrap `sdk`, sizing the device table from its device ceiling.
    ///
    /// The ceiling is read once; the table never changes size afterwards.
    pub fn new(sdk: S) -> vendor::Result<Self> {
        let capacity = sdk.max_devices();
        if capacity == 0 || capacity > MAX_TABLE_CAPACITY {
            return Err(DeviceError::InvalidCapacity(capacity));
        }
        log::debug!(
            "controller: capacity {capacity}, polarity {}",
            sdk.polarity()
        );
        Ok(Controller {
            sdk,
            table: DeviceTable::with_capacity(capacity),
        })
    }

    /// Enumerate devices. Zero devices is a valid outcome.
    pub fn init(&mut self) -> vendor::Result<usize> {
        self.table.populate(&mut self.sdk)
    }

    /// Release every device handle and invalidate all indices.
    pub fn shutdown(&mut self) {
        self.table.release(&mut self.sdk);
    }

    /// Re-enumerate, e.g. after a hot-plug or a vendor failure.
    pub fn refresh(&mut self) -> vendor::Result<usize> {
        self.table.refresh(&mut self.sdk)
    }

    pub fn device_count(&self) -> usize {
        self.table.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Slots of the current enumeration epoch.
    pub fn slots(&self) -> &[DeviceSlot] {
        self.table.slots()
    }

    /// Device type at `index`, `0` for any invalid index. Never fails.
    pub fn device_type<I: TryInto<usize>>(&self, index: I) -> u8 {
        self.table.type_of(index)
    }

    /// Hardware identifier of the device at `index`, read from the vendor
    /// layer on every call.
    pub fn unique_id(&mut self, index: u8) -> std::result::Result<u32, CommandError> {
        self.check_index(index)?;
        Ok(self.sdk.unique_id(index))
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    pub fn sdk_mut(&mut self) -> &mut S {
        &mut self.sdk
    }

    fn check_index(&self, index: u8) -> CommandResult {
        if self.table.contains(usize::from(index)) {
            Ok(())
        } else {
            Err(CommandError::IndexOutOfRange {
                index,
                count: self.table.active_count(),
            })
        }
    }

    /// Issue `command` to the device at `index`.
    pub fn execute(&mut self, index: u8, command: Command) -> CommandResult {
        self.check_index(index)?;
        let code = command.dispatch(&mut self.sdk, index);
        let polarity = self.sdk.polarity();
        if polarity.is_success(code) {
            log::debug!("light {index}: {} ok (status {code})", command.name());
            Ok(())
        } else {
            log::debug!("light {index}: {} failed (status {code})", command.name());
            Err(CommandError::VendorFailure {
                command: command.name(),
                code,
            })
        }
    }

    /// Index first, then mode: both checked before any vendor call.
    fn execute_mode<M, T>(
        &mut self,
        index: u8,
        mode: T,
        command: impl FnOnce(M) -> Command,
    ) -> CommandResult
    where
        T: IntoMode<M>,
    {
        self.check_index(index)?;
        let mode = mode.into_mode()?;
        self.execute(index, command(mode))
    }

    /// Set the color and turn the light on in one step.
    pub fn light_on(&mut self, index: u8, color: Rgb) -> CommandResult {
        self.execute(index, Command::LightOn(color))
    }

    /// Turn on with one of the preset colors.
    pub fn preset_on(&mut self, index: u8, preset: Preset) -> CommandResult {
        self.light_on(index, preset.rgb())
    }

    pub fn light_off(&mut self, index: u8) -> CommandResult {
        self.execute(index, Command::LightOff)
    }

    pub fn brightness(&mut self, index: u8, mode: impl IntoMode<Brightness>) -> CommandResult {
        self.execute_mode(index, mode, Command::Brightness)
    }

    pub fn flash(&mut self, index: u8, mode: impl IntoMode<Flash>) -> CommandResult {
        self.execute_mode(index, mode, Command::Flash)
    }

    /// Passed through unchanged; the vendor layer clamps.
    pub fn flash_speed(&mut self, index: u8, speed: u8) -> CommandResult {
        self.execute(index, Command::FlashSpeed(speed))
    }

    pub fn music(&mut self, index: u8, mode: impl IntoMode<Music>) -> CommandResult {
        self.execute_mode(index, mode, Command::Music)
    }

    pub fn music_repeat(&mut self, index: u8, mode: impl IntoMode<Repeat>) -> CommandResult {
        self.execute_mode(index, mode, Command::MusicRepeat)
    }

    pub fn music_volume(&mut self, index: u8, volume: u8) -> CommandResult {
        self.execute(index, Command::MusicVolume(volume))
    }

    pub fn music_select(&mut self, index: u8, track: u8) -> CommandResult {
        self.execute(index, Command::MusicSelect(track))
    }

    pub fn mute(&mut self, index: u8, mode: impl IntoMode<Mute>) -> CommandResult {
        self.execute_mode(index, mode, Command::Mute)
    }

    /// Return the light to a quiescent state: off, not flashing, low flash
    /// speed, music stopped on track 0 at volume 0, unmuted.
    ///
    /// Stops at the first command that fails.
    pub fn reset(&mut self, index: u8) -> CommandResult {
        self.check_index(index)?;
        for command in RESET_SEQUENCE {
            self.execute(index, command)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendor::Polarity;
    use crate::vendor::mock::{MockSdk, VendorCall};

    const BOTH: [Polarity; 2] = [Polarity::NonZeroIsSuccess, Polarity::ZeroIsSuccess];

    fn controller(polarity: Polarity, types: &[u8]) -> Controller<MockSdk> {
        let sdk = MockSdk::new(polarity).with_devices(types);
        let mut ctl = Controller::new(sdk).unwrap();
        ctl.init().unwrap();
        ctl
    }

    // ── construction ──

    #[test]
    fn capacity_comes_from_sdk() {
        let sdk = MockSdk::new(Polarity::ZeroIsSuccess).with_capacity(32);
        let ctl = Controller::new(sdk).unwrap();
        assert_eq!(ctl.capacity(), 32);
        assert_eq!(ctl.device_count(), 0);
    }

    #[test]
    fn zero_capacity_rejected() {
        let sdk = MockSdk::new(Polarity::NonZeroIsSuccess).with_capacity(0);
        assert!(matches!(
            Controller::new(sdk),
            Err(DeviceError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn capacity_beyond_byte_index_rejected() {
        let sdk = MockSdk::new(Polarity::NonZeroIsSuccess).with_capacity(257);
        assert!(Controller::new(sdk).is_err());
        let sdk = MockSdk::new(Polarity::NonZeroIsSuccess).with_capacity(256);
        assert!(Controller::new(sdk).is_ok());
    }

    // ── index validation ──

    #[test]
    fn out_of_range_index_never_reaches_vendor() {
        for polarity in BOTH {
            let mut ctl = controller(polarity, &[3, 4]);
            for index in [2u8, 5, 9, 10, 255] {
                let results = [
                    ctl.light_on(index, Rgb::new(255, 0, 0)),
                    ctl.light_off(index),
                    ctl.brightness(index, Brightness::Dim),
                    ctl.flash(index, Flash::Start),
                    ctl.flash_speed(index, 2),
                    ctl.music(index, Music::Play),
                    ctl.music_repeat(index, Repeat::On),
                    ctl.music_volume(index, 5),
                    ctl.music_select(index, 3),
                    ctl.mute(index, Mute::Muted),
                    ctl.reset(index),
                ];
                for r in results {
                    assert_eq!(r, Err(CommandError::IndexOutOfRange { index, count: 2 }));
                }
            }
            assert_eq!(ctl.sdk().command_calls(), 0);
        }
    }

    #[test]
    fn index_checked_before_mode() {
        let mut ctl = controller(Polarity::NonZeroIsSuccess, &[3]);
        assert_eq!(
            ctl.brightness(4, 9u8),
            Err(CommandError::IndexOutOfRange { index: 4, count: 1 })
        );
    }

    #[test]
    fn unique_id_validates_index() {
        let sdk = MockSdk::new(Polarity::ZeroIsSuccess)
            .with_devices(&[3])
            .with_unique_ids(&[0xDEAD_BEEF]);
        let mut ctl = Controller::new(sdk).unwrap();
        ctl.init().unwrap();
        assert_eq!(ctl.unique_id(0), Ok(0xDEAD_BEEF));
        assert!(matches!(
            ctl.unique_id(1),
            Err(CommandError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn unique_id_is_not_cached() {
        let sdk = MockSdk::new(Polarity::ZeroIsSuccess)
            .with_devices(&[3])
            .with_unique_ids(&[1]);
        let mut ctl = Controller::new(sdk).unwrap();
        ctl.init().unwrap();
        assert_eq!(ctl.unique_id(0), Ok(1));
        ctl.sdk_mut().unique_ids = vec![2];
        assert_eq!(ctl.unique_id(0), Ok(2));
    }

    // ── mode validation ──

    #[test]
    fn raw_mode_bytes_accepted() {
        let mut ctl = controller(Polarity::NonZeroIsSuccess, &[3]);
        assert_eq!(ctl.brightness(0, 0u8), Ok(()));
        assert_eq!(ctl.flash(0, 1u8), Ok(()));
        assert_eq!(
            ctl.sdk().calls[1..],
            [VendorCall::SetDim(0), VendorCall::StartFlash(0)]
        );
    }

    #[test]
    fn invalid_mode_never_reaches_vendor() {
        for polarity in BOTH {
            let mut ctl = controller(polarity, &[3]);
            for mode in [2u8, 3, 0x7F, 0xFF] {
                assert!(matches!(
                    ctl.brightness(0, mode),
                    Err(CommandError::InvalidArgument { parameter: "brightness", value }) if value == mode
                ));
                assert!(matches!(
                    ctl.flash(0, mode),
                    Err(CommandError::InvalidArgument { parameter: "flash", .. })
                ));
                assert!(matches!(
                    ctl.music(0, mode),
                    Err(CommandError::InvalidArgument { parameter: "music", .. })
                ));
                assert!(matches!(
                    ctl.music_repeat(0, mode),
                    Err(CommandError::InvalidArgument { parameter: "repeat", .. })
                ));
                assert!(matches!(
                    ctl.mute(0, mode),
                    Err(CommandError::InvalidArgument { parameter: "mute", .. })
                ));
            }
            assert_eq!(ctl.sdk().command_calls(), 0);
        }
    }

    #[test]
    fn mode_try_from() {
        assert_eq!(Brightness::try_from(0), Ok(Brightness::Dim));
        assert_eq!(Brightness::try_from(1), Ok(Brightness::Bright));
        assert_eq!(Mute::try_from(1), Ok(Mute::Muted));
        assert!(Repeat::try_from(2).is_err());
    }

    #[test]
    fn mode_from_bool() {
        assert_eq!(Flash::from(true), Flash::Start);
        assert_eq!(Music::from(false), Music::Stop);
    }

    // ── dispatch ──

    #[test]
    fn each_command_invokes_its_primitive() {
        let cases: [(Command, VendorCall); 15] = [
            (
                Command::LightOn(Rgb::new(1, 2, 3)),
                VendorCall::LightOn {
                    index: 0,
                    red: 1,
                    green: 2,
                    blue: 3,
                },
            ),
            (Command::LightOff, VendorCall::LightOff(0)),
            (Command::Brightness(Brightness::Dim), VendorCall::SetDim(0)),
            (
                Command::Brightness(Brightness::Bright),
                VendorCall::ClearDim(0),
            ),
            (Command::Flash(Flash::Stop), VendorCall::StopFlash(0)),
            (Command::Flash(Flash::Start), VendorCall::StartFlash(0)),
            (Command::FlashSpeed(4), VendorCall::FlashSpeed(0, 4)),
            (Command::Music(Music::Stop), VendorCall::StopMusic(0)),
            (Command::Music(Music::Play), VendorCall::StartMusic(0)),
            (
                Command::MusicRepeat(Repeat::Off),
                VendorCall::ClearMusicRepeat(0),
            ),
            (
                Command::MusicRepeat(Repeat::On),
                VendorCall::SetMusicRepeat(0),
            ),
            (Command::MusicVolume(7), VendorCall::MusicVolume(0, 7)),
            (Command::MusicSelect(3), VendorCall::SelectMusic(0, 3)),
            (Command::Mute(Mute::Unmuted), VendorCall::ClearMute(0)),
            (Command::Mute(Mute::Muted), VendorCall::SetMute(0)),
        ];
        let mut ctl = controller(Polarity::NonZeroIsSuccess, &[3]);
        for (command, expected) in cases {
            let before = ctl.sdk().command_calls();
            assert_eq!(ctl.execute(0, command), Ok(()), "{}", command.name());
            assert_eq!(ctl.sdk().command_calls(), before + 1);
            assert_eq!(ctl.sdk().last_call(), Some(&expected));
        }
    }

    #[test]
    fn pass_through_values_are_not_validated() {
        let mut ctl = controller(Polarity::NonZeroIsSuccess, &[3]);
        assert_eq!(ctl.flash_speed(0, 200), Ok(()));
        assert_eq!(ctl.music_volume(0, 99), Ok(()));
        assert_eq!(ctl.music_select(0, 255), Ok(()));
        assert_eq!(ctl.sdk().last_call(), Some(&VendorCall::SelectMusic(0, 255)));
    }

    #[test]
    fn preset_is_plain_light_on() {
        let mut ctl = controller(Polarity::ZeroIsSuccess, &[3]);
        ctl.preset_on(0, Preset::Orange).unwrap();
        assert_eq!(
            ctl.sdk().last_call(),
            Some(&VendorCall::LightOn {
                index: 0,
                red: 255,
                green: 127,
                blue: 0
            })
        );
    }

    // ── polarity ──

    #[test]
    fn native_success_is_success_for_both_polarities() {
        for polarity in BOTH {
            let mut ctl = controller(polarity, &[3]);
            assert_eq!(ctl.light_on(0, Rgb::new(255, 0, 0)), Ok(()), "{polarity}");
            assert_eq!(ctl.mute(0, Mute::Muted), Ok(()), "{polarity}");
        }
    }

    #[test]
    fn native_failure_is_failure_for_both_polarities() {
        for polarity in BOTH {
            let mut ctl = controller(polarity, &[3]);
            ctl.sdk_mut().fail_commands = true;
            let result = ctl.light_on(0, Rgb::new(255, 0, 0));
            assert_eq!(
                result,
                Err(CommandError::VendorFailure {
                    command: "light on",
                    code: polarity.code(false)
                }),
                "{polarity}"
            );
            assert_eq!(Outcome::from(&result), Outcome::Failure);
        }
    }

    #[test]
    fn vendor_failure_does_not_touch_table() {
        let mut ctl = controller(Polarity::NonZeroIsSuccess, &[3, 4]);
        ctl.sdk_mut().fail_commands = true;
        assert!(ctl.light_off(1).is_err());
        assert_eq!(ctl.device_count(), 2);
        assert_eq!(ctl.device_type(1), 4);
    }

    #[test]
    fn stale_index_after_unplug_is_vendor_failure() {
        let mut ctl = controller(Polarity::ZeroIsSuccess, &[3, 4]);
        ctl.sdk_mut().device_types = vec![3];
        assert!(matches!(
            ctl.light_off(1),
            Err(CommandError::VendorFailure { .. })
        ));
        ctl.refresh().unwrap();
        assert!(matches!(
            ctl.light_off(1),
            Err(CommandError::IndexOutOfRange { index: 1, count: 1 })
        ));
    }

    // ── outcome ──

    #[test]
    fn outcome_mapping() {
        let ok: CommandResult = Ok(());
        assert_eq!(Outcome::from(&ok), Outcome::Success);
        let oor: CommandResult = Err(CommandError::IndexOutOfRange { index: 1, count: 0 });
        assert_eq!(Outcome::from(&oor), Outcome::InvalidArgument);
        let bad: CommandResult = Err(CommandError::InvalidArgument {
            parameter: "flash",
            value: 2,
        });
        assert_eq!(Outcome::from(&bad), Outcome::InvalidArgument);
    }

    // ── reset ──

    #[test]
    fn reset_sequence() {
        let mut ctl = controller(Polarity::NonZeroIsSuccess, &[4]);
        ctl.sdk_mut().calls.clear();
        ctl.reset(0).unwrap();
        assert_eq!(
            ctl.sdk().calls,
            vec![
                VendorCall::LightOff(0),
                VendorCall::StopFlash(0),
                VendorCall::FlashSpeed(0, RESET_FLASH_SPEED),
                VendorCall::StopMusic(0),
                VendorCall::SelectMusic(0, 0),
                VendorCall::MusicVolume(0, 0),
                VendorCall::ClearMute(0),
            ]
        );
    }

    #[test]
    fn reset_stops_at_first_failure() {
        let mut ctl = controller(Polarity::ZeroIsSuccess, &[4]);
        ctl.sdk_mut().fail_commands = true;
        assert!(matches!(
            ctl.reset(0),
            Err(CommandError::VendorFailure {
                command: "light off",
                ..
            })
        ));
        assert_eq!(ctl.sdk().command_calls(), 1);
    }

    // ── error display ──

    #[test]
    fn command_error_display() {
        assert_eq!(
            CommandError::IndexOutOfRange { index: 5, count: 2 }.to_string(),
            "Light 5 is out of range (2 devices found)"
        );
        assert_eq!(
            CommandError::IndexOutOfRange { index: 1, count: 1 }.to_string(),
            "Light 1 is out of range (1 device found)"
        );
        assert_eq!(
            CommandError::InvalidArgument {
                parameter: "brightness",
                value: 2
            }
            .to_string(),
            "Invalid brightness mode: 2 (expected 0 or 1)"
        );
        assert_eq!(
            CommandError::VendorFailure {
                command: "mute",
                code: 1
            }
            .to_string(),
            "mute failed (vendor status 1)"
        );
    }
}

//! Protocol constants for Embrava Blynclight HID devices.
//!
//! Every Blynclight model responds to the same 9-byte command word, written
//! as a HID output report. The device has no readable state, so the host
//! keeps the last word it wrote and re-sends the whole word on every change.
//!
//! ## Command word layout
//!
//! ```text
//! byte 0  report id (always 0)
//! byte 1  red
//! byte 2  blue
//! byte 3  green
//! byte 4  bit 0 off, bit 1 dim, bit 2 flash, bits 3..6 flash speed
//! byte 5  bits 0..4 music track, bit 4 play, bit 5 repeat
//! byte 6  bits 0..4 volume, bit 7 mute
//! byte 7  0xFF  ┐ end of command
//! byte 8  0x22  ┘
//! ```
//!
//! Note the blue/green ordering: the firmware takes red, blue, green.

use crate::control::{Brightness, Command, Flash, Music, Mute, Repeat};

// ── USB identifiers ──

/// Embrava Inc.
pub const EMBRAVA_VID: u16 = 0x2C0D;

/// Tenx Technology, OEM of the first generation Blynclight.
pub const TENX_VID: u16 = 0x0E53;

/// All vendor ids that ship Blynclight hardware.
pub const BLYNCLIGHT_VIDS: [u16; 2] = [EMBRAVA_VID, TENX_VID];

/// USB interface class for HID.
pub const USB_CLASS_HID: u8 = 0x03;

// ── HID transfer ──

/// HID class request: SET_REPORT.
pub const HID_SET_REPORT: u8 = 0x09;

/// `wValue` high byte for an output report.
pub const HID_REPORT_TYPE_OUTPUT: u16 = 0x02;

/// Timeout for a single command-word transfer.
pub const USB_TIMEOUT_MS: u64 = 500;

// ── Command word ──

/// Length of the command word including the leading report id.
pub const COMMAND_LENGTH: usize = 9;

/// End-of-command marker, sent big-endian in the last two bytes.
pub const END_OF_COMMAND: u16 = 0xFF22;

const SPEED_MASK: u8 = 0x07;
const NIBBLE_MASK: u8 = 0x0F;

/// Maximum volume step understood by the tone player.
pub const MAX_VOLUME: u8 = 10;

/// In-memory image of one device's command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandWord {
    pub red: u8,
    pub blue: u8,
    pub green: u8,
    pub off: bool,
    pub dim: bool,
    pub flash: bool,
    /// Flash speed, 3 bits (1 = low, 2 = medium, 4 = high).
    pub speed: u8,
    /// Built-in tune selection, 4 bits.
    pub music: u8,
    pub play: bool,
    pub repeat: bool,
    /// Volume step, 4 bits (0..=10).
    pub volume: u8,
    pub mute: bool,
}

impl Default for CommandWord {
    /// The quiescent word: light off, nothing flashing or playing.
    fn default() -> Self {
        CommandWord {
            red: 0,
            blue: 0,
            green: 0,
            off: true,
            dim: false,
            flash: false,
            speed: 0,
            music: 0,
            play: false,
            repeat: false,
            volume: 0,
            mute: false,
        }
    }
}

impl CommandWord {
    /// Encode as the 9-byte report, including the leading report id.
    ///
    /// Speed and track are masked to their bit widths; volume is clamped to
    /// [`MAX_VOLUME`]. Nothing is rejected.
    pub fn to_report(&self) -> [u8; COMMAND_LENGTH] {
        let flags = u8::from(self.off)
            | u8::from(self.dim) << 1
            | u8::from(self.flash) << 2
            | (self.speed & SPEED_MASK) << 3;
        let music =
            (self.music & NIBBLE_MASK) | u8::from(self.play) << 4 | u8::from(self.repeat) << 5;
        let volume = self.volume.min(MAX_VOLUME) | u8::from(self.mute) << 7;
        let [eoc_hi, eoc_lo] = END_OF_COMMAND.to_be_bytes();
        [
            0, self.red, self.blue, self.green, flags, music, volume, eoc_hi, eoc_lo,
        ]
    }

    /// Set the color from red/green/blue channels (stored in wire order).
    pub fn set_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.red = red;
        self.green = green;
        self.blue = blue;
    }

    /// Apply one logical command. `LightOff` returns to the quiescent word;
    /// every other command changes only its own field.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::LightOn(color) => {
                self.set_rgb(color.red, color.green, color.blue);
                self.off = false;
            }
            Command::LightOff => *self = CommandWord::default(),
            Command::Brightness(mode) => self.dim = mode == Brightness::Dim,
            Command::Flash(mode) => self.flash = mode == Flash::Start,
            Command::FlashSpeed(speed) => self.speed = speed,
            Command::Music(mode) => self.play = mode == Music::Play,
            Command::MusicRepeat(mode) => self.repeat = mode == Repeat::On,
            Command::MusicVolume(volume) => self.volume = volume,
            Command::MusicSelect(track) => self.music = track,
            Command::Mute(mode) => self.mute = mode == Mute::Muted,
        }
    }
}

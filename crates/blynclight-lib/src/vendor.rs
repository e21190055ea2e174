//! Vendor layer — the primitive set both Blynclight SDKs expose, plus the
//! platform backends behind it.
//!
//! The two SDKs disagree on names, argument shapes, device ceilings and on
//! which return value means success. Each backend reports its own
//! [`Polarity`] and capacity; nothing above this module interprets a raw
//! return code directly.

use std::fmt;

// ── Return codes ──

/// Unmodified return value of a vendor primitive.
pub type RawStatus = i32;

/// How a vendor SDK encodes success in its return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Non-zero means success (HID SDK).
    NonZeroIsSuccess,
    /// Zero means success (framework SDK).
    ZeroIsSuccess,
}

impl Polarity {
    /// The one polarity-correction rule: `true` if `raw` reports success.
    pub fn is_success(self, raw: RawStatus) -> bool {
        match self {
            Polarity::NonZeroIsSuccess => raw != 0,
            Polarity::ZeroIsSuccess => raw == 0,
        }
    }

    /// The native code a backend with this polarity returns for `ok`.
    pub fn code(self, ok: bool) -> RawStatus {
        match (self, ok) {
            (Polarity::NonZeroIsSuccess, true) | (Polarity::ZeroIsSuccess, false) => 1,
            (Polarity::NonZeroIsSuccess, false) | (Polarity::ZeroIsSuccess, true) => 0,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::NonZeroIsSuccess => write!(f, "non-zero is success"),
            Polarity::ZeroIsSuccess => write!(f, "zero is success"),
        }
    }
}

// ── Error type ──

/// Vendor-layer lifecycle errors (enumeration and setup, never commands).
///
/// String payloads follow the convention **"context: details"**.
#[derive(Debug)]
pub enum DeviceError {
    EnumerationFailed(String),
    OpenFailed(String),
    InvalidCapacity(usize),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::EnumerationFailed(e) => write!(f, "Device enumeration failed: {e}"),
            DeviceError::OpenFailed(e) => write!(f, "Failed to open device: {e}"),
            DeviceError::InvalidCapacity(n) => {
                write!(f, "Invalid device table capacity: {n} (must be 1..=256)")
            }
        }
    }
}

impl std::error::Error for DeviceError {}

pub type Result<T> = std::result::Result<T, DeviceError>;

// ── Trait ──

/// The capability set of a Blynclight vendor SDK.
///
/// Command primitives return the SDK's native status code; interpret it only
/// through [`VendorSdk::polarity`]. Index arguments are passed through
/// unchecked, callers validate against the device table first.
pub trait VendorSdk {
    /// Success encoding of every command primitive.
    fn polarity(&self) -> Polarity;

    /// Device ceiling of this SDK.
    fn max_devices(&self) -> usize;

    /// Discover attached devices.
    ///
    /// Writes up to `types.len()` device-type bytes and returns the number of
    /// devices the platform reported, which may exceed `types.len()`.
    fn enumerate(&mut self, types: &mut [u8]) -> Result<usize>;

    /// Release every handle acquired by [`VendorSdk::enumerate`].
    fn release(&mut self);

    /// Stable hardware identifier of the device at `index`.
    fn unique_id(&mut self, index: u8) -> u32;

    fn light_on(&mut self, index: u8, red: u8, green: u8, blue: u8) -> RawStatus;
    fn light_off(&mut self, index: u8) -> RawStatus;
    fn set_dim(&mut self, index: u8) -> RawStatus;
    fn clear_dim(&mut self, index: u8) -> RawStatus;
    fn start_flash(&mut self, index: u8) -> RawStatus;
    fn stop_flash(&mut self, index: u8) -> RawStatus;
    fn flash_speed(&mut self, index: u8, speed: u8) -> RawStatus;
    fn start_music(&mut self, index: u8) -> RawStatus;
    fn stop_music(&mut self, index: u8) -> RawStatus;
    fn set_music_repeat(&mut self, index: u8) -> RawStatus;
    fn clear_music_repeat(&mut self, index: u8) -> RawStatus;
    fn music_volume(&mut self, index: u8, volume: u8) -> RawStatus;
    fn select_music(&mut self, index: u8, track: u8) -> RawStatus;
    fn set_mute(&mut self, index: u8) -> RawStatus;
    fn clear_mute(&mut self, index: u8) -> RawStatus;
}

/// 32-bit FNV-1a, used to fold non-numeric hardware identifiers.
pub(crate) fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811C_9DC5u32, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(0x0100_0193)
    })
}

// ── Linux implementation (HID SDK conventions) ──

#[cfg(target_os = "linux")]
mod linux_impl {
    use super::*;
    use std::time::Duration;

    use nusb::transfer::{Control, ControlType, Recipient};

    use crate::color::Rgb;
    use crate::control::{Brightness, Command, Flash, Music, Mute, Repeat};
    use crate::models;
    use crate::protocol::{
        BLYNCLIGHT_VIDS, COMMAND_LENGTH, CommandWord, HID_REPORT_TYPE_OUTPUT, HID_SET_REPORT,
        USB_CLASS_HID, USB_TIMEOUT_MS,
    };

    /// Device ceiling of the HID SDK.
    pub const MAX_DEVICES: usize = 10;

    const POLARITY: Polarity = Polarity::NonZeroIsSuccess;

    struct HidLight {
        interface: nusb::Interface,
        interface_number: u16,
        /// Last command word successfully written to the device.
        word: CommandWord,
        unique_id: u32,
    }

    /// Blynclight devices driven directly over USB HID.
    ///
    /// Follows the HID SDK's conventions: 1 for success, 0 for failure, a
    /// ten-device ceiling, and a "reset" primitive standing in for light-off.
    #[derive(Default)]
    pub struct HidSdk {
        lights: Vec<HidLight>,
    }

    impl HidSdk {
        pub fn new() -> Self {
            Self::default()
        }

        fn open_light(info: &nusb::DeviceInfo) -> Result<HidLight> {
            let location = format!("usb:{:03}/{:03}", info.bus_number(), info.device_address());
            let iface_num = info
                .interfaces()
                .find(|iface| iface.class() == USB_CLASS_HID)
                .map(|iface| iface.interface_number())
                .ok_or_else(|| DeviceError::OpenFailed(format!("{location}: no HID interface")))?;

            let device = info
                .open()
                .map_err(|e| DeviceError::OpenFailed(format!("{location}: {e}")))?;

            // The kernel's usbhid driver owns the interface until detached.
            let interface = device.detach_and_claim_interface(iface_num).map_err(|e| {
                DeviceError::OpenFailed(format!("{location}: claim interface {iface_num}: {e}"))
            })?;

            Ok(HidLight {
                interface,
                interface_number: u16::from(iface_num),
                word: CommandWord::default(),
                unique_id: unique_id_for(info),
            })
        }

        /// Send the light's command word as a HID output report.
        fn write(light: &HidLight) -> std::result::Result<(), String> {
            let report = light.word.to_report();
            let control = Control {
                control_type: ControlType::Class,
                recipient: Recipient::Interface,
                request: HID_SET_REPORT,
                value: HID_REPORT_TYPE_OUTPUT << 8,
                index: light.interface_number,
            };
            // Report id 0 is implied by wValue and not sent on the wire.
            let payload = &report[1..];
            let n = light
                .interface
                .control_out_blocking(control, payload, Duration::from_millis(USB_TIMEOUT_MS))
                .map_err(|e| format!("SET_REPORT: {e}"))?;
            if n != COMMAND_LENGTH - 1 {
                return Err(format!("short write: {n} of {} bytes", COMMAND_LENGTH - 1));
            }
            Ok(())
        }

        /// Apply `command` to the light's command word and write it out.
        /// The cached word is rolled back if the write fails.
        fn update(&mut self, index: u8, command: Command) -> RawStatus {
            let Some(light) = self.lights.get_mut(usize::from(index)) else {
                log::debug!("light {index}: no open device");
                return POLARITY.code(false);
            };
            let previous = light.word;
            light.word.apply(command);
            match Self::write(light) {
                Ok(()) => POLARITY.code(true),
                Err(e) => {
                    log::debug!("light {index}: {e}");
                    light.word = previous;
                    POLARITY.code(false)
                }
            }
        }
    }

    /// Serial number as hex when possible, otherwise a hash of whatever
    /// identifies the device.
    fn unique_id_for(info: &nusb::DeviceInfo) -> u32 {
        match info.serial_number() {
            Some(serial) => u32::from_str_radix(serial.trim(), 16)
                .unwrap_or_else(|_| fnv1a(serial.as_bytes())),
            None => {
                let location = format!(
                    "usb:{:03}/{:03} [{:04x}:{:04x}]",
                    info.bus_number(),
                    info.device_address(),
                    info.vendor_id(),
                    info.product_id(),
                );
                fnv1a(location.as_bytes())
            }
        }
    }

    impl VendorSdk for HidSdk {
        fn polarity(&self) -> Polarity {
            POLARITY
        }

        fn max_devices(&self) -> usize {
            MAX_DEVICES
        }

        fn enumerate(&mut self, types: &mut [u8]) -> Result<usize> {
            self.lights.clear();

            let devices = match nusb::list_devices() {
                Ok(devices) => devices,
                Err(e) => {
                    log::warn!("USB enumeration: {e}");
                    return Ok(0);
                }
            };

            let mut reported = 0;
            for info in devices.filter(|dev| BLYNCLIGHT_VIDS.contains(&dev.vendor_id())) {
                let slot = self.lights.len();
                if slot >= types.len() {
                    // Reported but not retained.
                    reported += 1;
                    continue;
                }
                match Self::open_light(&info) {
                    Ok(light) => {
                        types[slot] = models::device_type_for(info.vendor_id(), info.product_id());
                        self.lights.push(light);
                        reported += 1;
                    }
                    Err(e) => log::warn!("skipping Blynclight: {e}"),
                }
            }
            Ok(reported)
        }

        fn release(&mut self) {
            self.lights.clear();
        }

        fn unique_id(&mut self, index: u8) -> u32 {
            self.lights
                .get(usize::from(index))
                .map(|light| light.unique_id)
                .unwrap_or(0)
        }

        fn light_on(&mut self, index: u8, red: u8, green: u8, blue: u8) -> RawStatus {
            self.update(index, Command::LightOn(Rgb::new(red, green, blue)))
        }

        fn light_off(&mut self, index: u8) -> RawStatus {
            // ResetLight: back to the quiescent word.
            self.update(index, Command::LightOff)
        }

        fn set_dim(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::Brightness(Brightness::Dim))
        }

        fn clear_dim(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::Brightness(Brightness::Bright))
        }

        fn start_flash(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::Flash(Flash::Start))
        }

        fn stop_flash(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::Flash(Flash::Stop))
        }

        fn flash_speed(&mut self, index: u8, speed: u8) -> RawStatus {
            self.update(index, Command::FlashSpeed(speed))
        }

        fn start_music(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::Music(Music::Play))
        }

        fn stop_music(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::Music(Music::Stop))
        }

        fn set_music_repeat(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::MusicRepeat(Repeat::On))
        }

        fn clear_music_repeat(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::MusicRepeat(Repeat::Off))
        }

        fn music_volume(&mut self, index: u8, volume: u8) -> RawStatus {
            self.update(index, Command::MusicVolume(volume))
        }

        fn select_music(&mut self, index: u8, track: u8) -> RawStatus {
            self.update(index, Command::MusicSelect(track))
        }

        fn set_mute(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::Mute(Mute::Muted))
        }

        fn clear_mute(&mut self, index: u8) -> RawStatus {
            self.update(index, Command::Mute(Mute::Unmuted))
        }
    }
}

#[cfg(target_os = "linux")]
pub use linux_impl::HidSdk;

// ── macOS implementation (framework SDK conventions) ──

#[cfg(all(target_os = "macos", feature = "framework"))]
mod framework_impl {
    use super::*;
    use std::os::raw::{c_int, c_uchar, c_uint};

    /// Device ceiling of the framework SDK.
    pub const MAX_DEVICES: usize = 32;

    /// `FindDevices` is the one framework call that returns 1 on success.
    const FIND_DEVICES_OK: c_int = 1;

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct DeviceInfo {
        by_device_type: c_uchar,
    }

    #[allow(non_snake_case, non_upper_case_globals)]
    #[link(name = "BlyncLightControl", kind = "framework")]
    unsafe extern "C" {
        static asDeviceInfo: [DeviceInfo; MAX_DEVICES];

        fn FindDevices(count: *mut c_int) -> c_int;
        fn ReleaseDevices();
        fn GetDeviceUniqueId(index: c_uchar, id: *mut c_uint) -> c_int;
        fn TurnOnRGBLights(index: c_uchar, red: c_uchar, green: c_uchar, blue: c_uchar) -> c_int;
        fn TurnOffLight(index: c_uchar) -> c_int;
        fn SetLightDim(index: c_uchar) -> c_int;
        fn ClearLightDim(index: c_uchar) -> c_int;
        fn StartLightFlash(index: c_uchar) -> c_int;
        fn StopLightFlash(index: c_uchar) -> c_int;
        fn SelectLightFlashSpeed(index: c_uchar, speed: c_uchar) -> c_int;
        fn StartMusicPlay(index: c_uchar) -> c_int;
        fn StopMusicPlay(index: c_uchar) -> c_int;
        fn SetMusicRepeat(index: c_uchar) -> c_int;
        fn ClearMusicRepeat(index: c_uchar) -> c_int;
        fn SetMusicVolume(index: c_uchar, volume: c_uchar) -> c_int;
        fn SelectMusicToPlay(index: c_uchar, music: c_uchar) -> c_int;
        fn SetVolumeMute(index: c_uchar) -> c_int;
        fn ClearVolumeMute(index: c_uchar) -> c_int;
    }

    /// Blynclight devices driven through the vendor BlyncLightControl
    /// framework. Zero means success; 32-device ceiling.
    #[derive(Default)]
    pub struct FrameworkSdk {
        _private: (),
    }

    impl FrameworkSdk {
        pub fn new() -> Self {
            Self::default()
        }
    }

    // SAFETY (all primitive calls below): every argument is passed by value,
    // and the framework range-checks the device index itself.
    impl VendorSdk for FrameworkSdk {
        fn polarity(&self) -> Polarity {
            Polarity::ZeroIsSuccess
        }

        fn max_devices(&self) -> usize {
            MAX_DEVICES
        }

        fn enumerate(&mut self, types: &mut [u8]) -> Result<usize> {
            let mut count: c_int = 0;
            // SAFETY: `count` is a valid, writable c_int for the call's duration.
            let rc = unsafe { FindDevices(&mut count) };
            if rc != FIND_DEVICES_OK {
                return Err(DeviceError::EnumerationFailed(format!(
                    "FindDevices: returned {rc}"
                )));
            }
            let reported = usize::try_from(count).unwrap_or(0);
            // SAFETY: the framework fills asDeviceInfo during FindDevices and
            // does not touch it again until the next FindDevices call.
            let table = unsafe { asDeviceInfo };
            for (slot, info) in types.iter_mut().zip(table.iter()).take(reported) {
                *slot = info.by_device_type;
            }
            Ok(reported)
        }

        fn release(&mut self) {
            // SAFETY: no arguments; safe to call with zero open devices.
            unsafe { ReleaseDevices() }
        }

        fn unique_id(&mut self, index: u8) -> u32 {
            let mut id: c_uint = 0;
            // SAFETY: `id` is a valid, writable c_uint for the call's duration.
            let rc = unsafe { GetDeviceUniqueId(index, &mut id) };
            if !Polarity::ZeroIsSuccess.is_success(rc) {
                log::debug!("GetDeviceUniqueId({index}) returned {rc}");
                return 0;
            }
            id
        }

        fn light_on(&mut self, index: u8, red: u8, green: u8, blue: u8) -> RawStatus {
            unsafe { TurnOnRGBLights(index, red, green, blue) }
        }

        fn light_off(&mut self, index: u8) -> RawStatus {
            unsafe { TurnOffLight(index) }
        }

        fn set_dim(&mut self, index: u8) -> RawStatus {
            unsafe { SetLightDim(index) }
        }

        fn clear_dim(&mut self, index: u8) -> RawStatus {
            unsafe { ClearLightDim(index) }
        }

        fn start_flash(&mut self, index: u8) -> RawStatus {
            unsafe { StartLightFlash(index) }
        }

        fn stop_flash(&mut self, index: u8) -> RawStatus {
            unsafe { StopLightFlash(index) }
        }

        fn flash_speed(&mut self, index: u8, speed: u8) -> RawStatus {
            unsafe { SelectLightFlashSpeed(index, speed) }
        }

        fn start_music(&mut self, index: u8) -> RawStatus {
            unsafe { StartMusicPlay(index) }
        }

        fn stop_music(&mut self, index: u8) -> RawStatus {
            unsafe { StopMusicPlay(index) }
        }

        fn set_music_repeat(&mut self, index: u8) -> RawStatus {
            unsafe { SetMusicRepeat(index) }
        }

        fn clear_music_repeat(&mut self, index: u8) -> RawStatus {
            unsafe { ClearMusicRepeat(index) }
        }

        fn music_volume(&mut self, index: u8, volume: u8) -> RawStatus {
            unsafe { SetMusicVolume(index, volume) }
        }

        fn select_music(&mut self, index: u8, track: u8) -> RawStatus {
            unsafe { SelectMusicToPlay(index, track) }
        }

        fn set_mute(&mut self, index: u8) -> RawStatus {
            unsafe { SetVolumeMute(index) }
        }

        fn clear_mute(&mut self, index: u8) -> RawStatus {
            unsafe { ClearVolumeMute(index) }
        }
    }
}

#[cfg(all(target_os = "macos", feature = "framework"))]
pub use framework_impl::FrameworkSdk;

// ── Stub SDK for unsupported platforms ──

/// Placeholder SDK that never finds a device.
/// Enables compilation and `cargo test` on hosts without a vendor backend.
#[cfg(not(any(target_os = "linux", all(target_os = "macos", feature = "framework"))))]
#[derive(Debug, Default)]
pub struct StubSdk;

#[cfg(not(any(target_os = "linux", all(target_os = "macos", feature = "framework"))))]
impl StubSdk {
    pub fn new() -> Self {
        StubSdk
    }
}

#[cfg(not(any(target_os = "linux", all(target_os = "macos", feature = "framework"))))]
impl VendorSdk for StubSdk {
    fn polarity(&self) -> Polarity {
        Polarity::NonZeroIsSuccess
    }
    fn max_devices(&self) -> usize {
        1
    }
    fn enumerate(&mut self, _types: &mut [u8]) -> Result<usize> {
        log::debug!("no Blynclight backend for this platform");
        Ok(0)
    }
    fn release(&mut self) {}
    fn unique_id(&mut self, _index: u8) -> u32 {
        0
    }
    fn light_on(&mut self, _index: u8, _red: u8, _green: u8, _blue: u8) -> RawStatus {
        0
    }
    fn light_off(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn set_dim(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn clear_dim(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn start_flash(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn stop_flash(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn flash_speed(&mut self, _index: u8, _speed: u8) -> RawStatus {
        0
    }
    fn start_music(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn stop_music(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn set_music_repeat(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn clear_music_repeat(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn music_volume(&mut self, _index: u8, _volume: u8) -> RawStatus {
        0
    }
    fn select_music(&mut self, _index: u8, _track: u8) -> RawStatus {
        0
    }
    fn set_mute(&mut self, _index: u8) -> RawStatus {
        0
    }
    fn clear_mute(&mut self, _index: u8) -> RawStatus {
        0
    }
}

/// Concrete SDK type for the current platform.
#[cfg(target_os = "linux")]
pub type PlatformSdk = HidSdk;
#[cfg(all(target_os = "macos", feature = "framework"))]
pub type PlatformSdk = FrameworkSdk;
#[cfg(not(any(target_os = "linux", all(target_os = "macos", feature = "framework"))))]
pub type PlatformSdk = StubSdk;

/// The vendor SDK for the current platform.
pub fn open_sdk() -> PlatformSdk {
    PlatformSdk::new()
}

// ── Mock SDK for testing ──

/// In-memory vendor double for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;

    /// One recorded vendor primitive invocation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum VendorCall {
        Enumerate,
        Release,
        UniqueId(u8),
        LightOn { index: u8, red: u8, green: u8, blue: u8 },
        LightOff(u8),
        SetDim(u8),
        ClearDim(u8),
        StartFlash(u8),
        StopFlash(u8),
        FlashSpeed(u8, u8),
        StartMusic(u8),
        StopMusic(u8),
        SetMusicRepeat(u8),
        ClearMusicRepeat(u8),
        MusicVolume(u8, u8),
        SelectMusic(u8, u8),
        SetMute(u8),
        ClearMute(u8),
    }

    impl VendorCall {
        /// `true` for device commands, `false` for lifecycle and id queries.
        pub fn is_command(&self) -> bool {
            !matches!(
                self,
                VendorCall::Enumerate | VendorCall::Release | VendorCall::UniqueId(_)
            )
        }
    }

    /// Scriptable vendor SDK. `device_types` is what the next enumeration
    /// reports; commands against an index it doesn't cover fail natively,
    /// like a real SDK after a hot-unplug.
    pub struct MockSdk {
        polarity: Polarity,
        capacity: usize,
        /// Device types reported by the next `enumerate`.
        pub device_types: Vec<u8>,
        /// Unique ids by index; missing entries read as 0.
        pub unique_ids: Vec<u32>,
        /// If true, every command primitive returns the native failure code.
        pub fail_commands: bool,
        /// If set, `enumerate` fails with this message.
        pub fail_enumerate: Option<String>,
        /// Recorded primitive invocations, in order.
        pub calls: Vec<VendorCall>,
    }

    impl MockSdk {
        pub fn new(polarity: Polarity) -> Self {
            MockSdk {
                polarity,
                capacity: 10,
                device_types: Vec::new(),
                unique_ids: Vec::new(),
                fail_commands: false,
                fail_enumerate: None,
                calls: Vec::new(),
            }
        }

        pub fn with_capacity(mut self, capacity: usize) -> Self {
            self.capacity = capacity;
            self
        }

        pub fn with_devices(mut self, device_types: &[u8]) -> Self {
            self.device_types = device_types.to_vec();
            self
        }

        pub fn with_unique_ids(mut self, ids: &[u32]) -> Self {
            self.unique_ids = ids.to_vec();
            self
        }

        /// Number of device commands that reached the vendor layer.
        pub fn command_calls(&self) -> usize {
            self.calls.iter().filter(|c| c.is_command()).count()
        }

        pub fn last_call(&self) -> Option<&VendorCall> {
            self.calls.last()
        }

        fn respond(&mut self, call: VendorCall, index: u8) -> RawStatus {
            self.calls.push(call);
            let present = usize::from(index) < self.device_types.len();
            self.polarity.code(present && !self.fail_commands)
        }
    }

    impl VendorSdk for MockSdk {
        fn polarity(&self) -> Polarity {
            self.polarity
        }

        fn max_devices(&self) -> usize {
            self.capacity
        }

        fn enumerate(&mut self, types: &mut [u8]) -> Result<usize> {
            self.calls.push(VendorCall::Enumerate);
            if let Some(msg) = &self.fail_enumerate {
                return Err(DeviceError::EnumerationFailed(format!("mock: {msg}")));
            }
            for (slot, &t) in types.iter_mut().zip(&self.device_types) {
                *slot = t;
            }
            Ok(self.device_types.len())
        }

        fn release(&mut self) {
            self.calls.push(VendorCall::Release);
        }

        fn unique_id(&mut self, index: u8) -> u32 {
            self.calls.push(VendorCall::UniqueId(index));
            self.unique_ids
                .get(usize::from(index))
                .copied()
                .unwrap_or(0)
        }

        fn light_on(&mut self, index: u8, red: u8, green: u8, blue: u8) -> RawStatus {
            let call = VendorCall::LightOn {
                index,
                red,
                green,
                blue,
            };
            self.respond(call, index)
        }

        fn light_off(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::LightOff(index), index)
        }

        fn set_dim(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::SetDim(index), index)
        }

        fn clear_dim(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::ClearDim(index), index)
        }

        fn start_flash(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::StartFlash(index), index)
        }

        fn stop_flash(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::StopFlash(index), index)
        }

        fn flash_speed(&mut self, index: u8, speed: u8) -> RawStatus {
            self.respond(VendorCall::FlashSpeed(index, speed), index)
        }

        fn start_music(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::StartMusic(index), index)
        }

        fn stop_music(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::StopMusic(index), index)
        }

        fn set_music_repeat(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::SetMusicRepeat(index), index)
        }

        fn clear_music_repeat(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::ClearMusicRepeat(index), index)
        }

        fn music_volume(&mut self, index: u8, volume: u8) -> RawStatus {
            self.respond(VendorCall::MusicVolume(index, volume), index)
        }

        fn select_music(&mut self, index: u8, track: u8) -> RawStatus {
            self.respond(VendorCall::SelectMusic(index, track), index)
        }

        fn set_mute(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::SetMute(index), index)
        }

        fn clear_mute(&mut self, index: u8) -> RawStatus {
            self.respond(VendorCall::ClearMute(index), index)
        }
    }
}

//! Device models — the vendor's device-type byte and what it means.
//!
//! Both vendor SDKs report a one-byte device type per enumerated light.
//! `0` is reserved for "unknown / no device"; the table below covers the
//! families the SDKs know about.

use serde::Serialize;

use crate::protocol::{EMBRAVA_VID, TENX_VID};

/// Device-type byte meaning "unknown or uninitialized".
pub const INVALID_DEVICE_TYPE: u8 = 0;

/// Blynclight device family, keyed by the vendor device-type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceModel {
    TenX10,
    TenX20,
    V30,
    V30S,
    V30Lumena110,
    WirelessV30S,
    MiniV30S,
    V30Lumena120,
    V30Lumena,
    V30Lumena210,
    V30Lumena220,
    EmbeddedV30,
}

impl DeviceModel {
    /// Map a device-type byte to a model. Returns `None` for `0` and for
    /// bytes newer than this table.
    pub fn from_type(device_type: u8) -> Option<Self> {
        let model = match device_type {
            1 => DeviceModel::TenX10,
            2 => DeviceModel::TenX20,
            3 => DeviceModel::V30,
            4 => DeviceModel::V30S,
            5 => DeviceModel::V30Lumena110,
            6 => DeviceModel::WirelessV30S,
            7 => DeviceModel::MiniV30S,
            8 => DeviceModel::V30Lumena120,
            9 => DeviceModel::V30Lumena,
            10 => DeviceModel::V30Lumena210,
            11 => DeviceModel::V30Lumena220,
            12 => DeviceModel::EmbeddedV30,
            _ => return None,
        };
        Some(model)
    }

    /// The vendor device-type byte.
    pub fn device_type(self) -> u8 {
        match self {
            DeviceModel::TenX10 => 1,
            DeviceModel::TenX20 => 2,
            DeviceModel::V30 => 3,
            DeviceModel::V30S => 4,
            DeviceModel::V30Lumena110 => 5,
            DeviceModel::WirelessV30S => 6,
            DeviceModel::MiniV30S => 7,
            DeviceModel::V30Lumena120 => 8,
            DeviceModel::V30Lumena => 9,
            DeviceModel::V30Lumena210 => 10,
            DeviceModel::V30Lumena220 => 11,
            DeviceModel::EmbeddedV30 => 12,
        }
    }

    /// Marketing name.
    pub fn name(self) -> &'static str {
        match self {
            DeviceModel::TenX10 => "Blynclight TenX 10",
            DeviceModel::TenX20 => "Blynclight TenX 20",
            DeviceModel::V30 => "Blynclight Standard",
            DeviceModel::V30S => "Blynclight Plus",
            DeviceModel::V30Lumena110 => "Lumena Headset 110",
            DeviceModel::WirelessV30S => "Blynclight Wireless",
            DeviceModel::MiniV30S => "Blynclight Mini",
            DeviceModel::V30Lumena120 => "Lumena Headset 120",
            DeviceModel::V30Lumena => "Lumena",
            DeviceModel::V30Lumena210 => "Lumena 210",
            DeviceModel::V30Lumena220 => "Lumena 220",
            DeviceModel::EmbeddedV30 => "Embrava Embedded",
        }
    }

    /// Whether the model carries the built-in tone player.
    pub fn has_music(self) -> bool {
        matches!(
            self,
            DeviceModel::V30S | DeviceModel::WirelessV30S | DeviceModel::MiniV30S
        )
    }
}

impl std::fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Human-readable label for a raw device-type byte.
pub fn describe_type(device_type: u8) -> String {
    match DeviceModel::from_type(device_type) {
        Some(model) => model.name().to_string(),
        None if device_type == INVALID_DEVICE_TYPE => "Unknown".to_string(),
        None => format!("Unknown (type {device_type})"),
    }
}

/// Device-type byte for a USB vendor/product id pair.
///
/// Embrava product ids not listed here are treated as a Standard light, the
/// lowest common denominator that every command-word field works on.
pub fn device_type_for(vendor_id: u16, product_id: u16) -> u8 {
    let model = match (vendor_id, product_id) {
        (TENX_VID, 0x2516) => DeviceModel::TenX20,
        (TENX_VID, 0x2517) => DeviceModel::TenX10,
        (EMBRAVA_VID, 0x0001) | (EMBRAVA_VID, 0x000C) => DeviceModel::V30,
        (EMBRAVA_VID, 0x000A) => DeviceModel::MiniV30S,
        (EMBRAVA_VID, 0x0010) => DeviceModel::V30S,
        (EMBRAVA_VID, _) => DeviceModel::V30,
        _ => return INVALID_DEVICE_TYPE,
    };
    model.device_type()
}

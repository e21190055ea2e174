//! Device table — index → device metadata for the current enumeration epoch.
//!
//! Slot indices are only meaningful between one `populate` and the next
//! `release`; they are not a persistent device identity.

use serde::Serialize;

use crate::models::INVALID_DEVICE_TYPE;
use crate::vendor::{self, VendorSdk};

/// One enumerated light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeviceSlot {
    /// Vendor device-type byte; `0` means unknown.
    pub device_type: u8,
}

/// Fixed-capacity table of device slots.
///
/// Invariant: `active <= slots.len()`. Slots at or beyond `active` keep
/// whatever the last epoch left there and are never reported.
#[derive(Debug)]
pub struct DeviceTable {
    slots: Vec<DeviceSlot>,
    active: usize,
}

impl DeviceTable {
    pub fn with_capacity(capacity: usize) -> Self {
        DeviceTable {
            slots: vec![DeviceSlot::default(); capacity],
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    /// `true` if `index` names a device of the current epoch.
    pub fn contains(&self, index: usize) -> bool {
        index < self.active
    }

    /// Slots of the current epoch.
    pub fn slots(&self) -> &[DeviceSlot] {
        &self.slots[..self.active]
    }

    /// Enumerate through `sdk` and fill slots `[0, count)`.
    ///
    /// A platform that reports more devices than the table holds keeps only
    /// the first `capacity`. On enumeration failure the table stays empty.
    pub fn populate(&mut self, sdk: &mut impl VendorSdk) -> vendor::Result<usize> {
        self.active = 0;

        let mut types = vec![INVALID_DEVICE_TYPE; self.capacity()];
        let reported = sdk.enumerate(&mut types)?;

        let count = reported.min(self.capacity());
        if reported > count {
            log::warn!(
                "{reported} devices reported, table holds {}; dropping {}",
                self.capacity(),
                reported - count
            );
        }
        for (slot, &device_type) in self.slots.iter_mut().zip(&types).take(count) {
            slot.device_type = device_type;
        }
        self.active = count;
        log::info!("device table populated: {count} device(s)");
        Ok(count)
    }

    /// Invalidate every slot and let the vendor layer drop its handles.
    pub fn release(&mut self, sdk: &mut impl VendorSdk) {
        self.active = 0;
        sdk.release();
        log::info!("device table released");
    }

    /// `release` then `populate`. Callers never see a mix of epochs: the
    /// table is empty from the release until the new count is in place.
    pub fn refresh(&mut self, sdk: &mut impl VendorSdk) -> vendor::Result<usize> {
        self.release(sdk);
        self.populate(sdk)
    }

    /// Device type at `index`, or `0` for any index that is negative, past
    /// capacity, or past the active count. Never fails.
    pub fn type_of<I: TryInto<usize>>(&self, index: I) -> u8 {
        match index.try_into() {
            Ok(i) if self.contains(i) => self.slots[i].device_type,
            _ => INVALID_DEVICE_TYPE,
        }
    }
}

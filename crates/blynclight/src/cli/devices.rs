//! `devices` subcommand — list connected Blynclight devices.

use super::{
    Controller, DeviceJson, DevicesOutput, Options, Result, VendorSdk, models, print_json,
    vendor::DeviceError, with_controller,
};

/// Describe every light of the current enumeration.
fn list_devices<S: VendorSdk>(ctl: &mut Controller<S>) -> Result<DevicesOutput> {
    let count = ctl.device_count();
    let mut devices = Vec::with_capacity(count);
    for (i, slot) in ctl.slots().to_vec().into_iter().enumerate() {
        let index = u8::try_from(i).map_err(|_| DeviceError::InvalidCapacity(ctl.capacity()))?;
        devices.push(DeviceJson {
            index,
            device_type: slot.device_type,
            model: models::describe_type(slot.device_type),
            unique_id: ctl.unique_id(index)?,
            music: models::DeviceModel::from_type(slot.device_type).is_some_and(|m| m.has_music()),
        });
    }
    Ok(DevicesOutput {
        count,
        capacity: ctl.capacity(),
        devices,
    })
}

pub(super) fn cmd_devices(opts: &Options) -> Result<()> {
    let output = with_controller(list_devices)?;

    if opts.json {
        return print_json(&output);
    }

    if output.devices.is_empty() {
        println!("No Blynclight devices found.");
        return Ok(());
    }

    println!(
        "Found {} Blynclight device{}:",
        output.count,
        if output.count == 1 { "" } else { "s" }
    );
    println!();

    for dev in &output.devices {
        println!("  [{}] {}", dev.index, dev.model);
        println!("      Unique id: {:08X}", dev.unique_id);
        if dev.music {
            println!("      Tone player: yes");
        }
    }

    Ok(())
}

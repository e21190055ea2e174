//! `status` subcommand — show backend, device count and configured defaults.

use super::{
    BackendJson, ConfigSummaryJson, Options, Result, StatusOutput, VendorSdk, color, kv,
    kv_indent, kv_width, load_config, print_json, with_controller,
};

/// Name of the vendor backend compiled into this build.
fn backend_name() -> &'static str {
    if cfg!(target_os = "linux") {
        "hid (usb)"
    } else if cfg!(all(target_os = "macos", feature = "framework")) {
        "BlyncLightControl framework"
    } else {
        "none (unsupported platform)"
    }
}

pub(super) fn cmd_status(opts: &Options) -> Result<()> {
    let config = load_config(opts.config_path.as_deref());

    let (backend, devices) = with_controller(|ctl| {
        let backend = BackendJson {
            platform: backend_name().to_string(),
            polarity: ctl.sdk().polarity().to_string(),
            capacity: ctl.capacity(),
        };
        Ok((backend, ctl.device_count()))
    })?;

    let color_display = match color::parse_color(&config.color) {
        Ok(rgb) => color::format_color(rgb),
        Err(_) => format!("{} (invalid)", config.color),
    };

    if opts.json {
        let output = StatusOutput {
            version: env!("CARGO_PKG_VERSION").to_string(),
            backend,
            devices,
            config: ConfigSummaryJson {
                light: config.light,
                color: color_display,
                flash_speed: config.flash_speed,
                volume: config.volume,
            },
        };
        return print_json(&output);
    }

    // Human-readable output
    let w = kv_width(
        &["Version:", "Backend:", "Devices:", "Defaults:"],
        &["Polarity:", "Capacity:", "Light:", "Color:", "Flash speed:", "Volume:"],
    );

    kv("Version:", env!("CARGO_PKG_VERSION"), w);
    kv("Backend:", &backend.platform, w);
    kv_indent("Polarity:", &backend.polarity, w);
    kv_indent("Capacity:", backend.capacity, w);
    kv("Devices:", devices, w);
    println!();

    println!("Defaults:");
    kv_indent("Light:", config.light, w);
    kv_indent("Color:", &color_display, w);
    kv_indent("Flash speed:", config.flash_speed, w);
    kv_indent("Volume:", config.volume, w);
    Ok(())
}

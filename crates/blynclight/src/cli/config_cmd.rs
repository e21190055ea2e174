//! `config` subcommand — show current configuration and file path, or
//! write a starter file with `--init`.

use super::{
    BlyncError, Config, ConfigOutput, Options, Result, color, kv, kv_indent, kv_width,
    load_config, print_json, warn_json_unsupported,
};

/// Write the default config to `--config` or the platform path. An existing
/// file is never overwritten.
pub(super) fn cmd_config_init(opts: &Options) -> Result<()> {
    if opts.json {
        warn_json_unsupported("config --init");
    }
    let path = opts
        .config_path
        .clone()
        .or_else(Config::path)
        .ok_or_else(|| BlyncError::Config("No config directory".into()))?;
    if path.exists() {
        return Err(BlyncError::Config(format!(
            "{} already exists",
            path.display()
        )));
    }
    Config::default().save_to(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

pub(super) fn cmd_config(opts: &Options) -> Result<()> {
    let custom_path = opts.config_path.as_deref();
    let config = load_config(custom_path);
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);
    let config_exists = config_path.as_ref().map(|p| p.exists()).unwrap_or(false);
    let problems: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if opts.json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            problems,
        };
        return print_json(&output);
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &["light:", "color:", "flash_speed:", "volume:"],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("light:", config.light, w);
    let color_display = match color::parse_color(&config.color) {
        Ok(rgb) => format!("{} -> {}", config.color, color::format_color(rgb)),
        Err(_) => format!("{} (invalid)", config.color),
    };
    kv_indent("color:", &color_display, w);
    kv_indent("flash_speed:", config.flash_speed, w);
    kv_indent("volume:", config.volume, w);

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }
    Ok(())
}

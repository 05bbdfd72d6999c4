//! Build script for digitpad-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Parses and validates digitpad.toml at compile time
//! - Bakes the validated configuration into the image as a postcard blob

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use digitpad_core::{CaptureConfig, ConfigError};

fn main() {
    setup_linker();
    bake_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate digitpad.toml and write the encoded config to OUT_DIR
fn bake_config() {
    println!("cargo:rerun-if-changed=digitpad.toml");

    let config_path = Path::new("digitpad.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: digitpad.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware bakes its layout from digitpad.toml.               ║\n\
            ║  Please create one in the digitpad-firmware directory.           ║\n\
            ║  An empty file selects the built-in windowed layout.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read digitpad.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax first, so the user sees toml's line/column diagnostics
    if let Err(e) = toml::from_str::<toml::Table>(&config_content) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid TOML syntax in digitpad.toml                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║                                                                  ║\n\
            {}\n\
            ║                                                                  ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        );
    }

    let config = match CaptureConfig::from_toml(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid capture configuration                            ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║  • {:<62} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                describe(e)
            );
        }
    };

    let encoded = postcard::to_allocvec(&config).unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("capture_config.bin"), &encoded).unwrap();

    println!(
        "cargo:warning=digitpad.toml validated successfully ({} buttons, {} bytes baked)",
        config.buttons.len(),
        encoded.len()
    );
}

fn describe(e: ConfigError) -> &'static str {
    match e {
        ConfigError::TooManyTouchAreas => "too many buttons",
        ConfigError::OutsideCanvas => "drawing window or button lies outside the 320x240 canvas",
        ConfigError::EmptyArea => "drawing window or button has zero width or height",
        ConfigError::MarginTooLarge => "bounding_box_scaled margin exceeds 32608",
        ConfigError::InvalidBaudrate => "[link] baudrate must be non-zero",
        ConfigError::Parse => "unknown key or wrongly typed value",
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

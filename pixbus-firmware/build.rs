//! Build script for pixbus-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml and compiles it into `display_config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pixbus_core::config::{
    parse_pin_string, BusTiming, PinAssignment, PinConfig, Quirks, DATA_LINES,
};
use serde::Deserialize;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    generate_config(&out_dir);
}

/// Set up linker search paths and scripts
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// `[pins]` section as written in the file
#[derive(Deserialize)]
struct RawPins {
    data: Vec<String>,
    read_enable: String,
    write_enable: String,
    register_select: String,
    chip_select: String,
    reset: String,
}

#[derive(Deserialize)]
struct RawConfig {
    pins: RawPins,
    #[serde(default)]
    timing: BusTiming,
    #[serde(default)]
    quirks: Quirks,
}

/// Validate display.toml and write it out as Rust constants
fn generate_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware needs the panel wiring in display.toml next to     ║\n\
            ║  Cargo.toml in the pixbus-firmware directory.                    ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = fs::read_to_string(config_path)
        .unwrap_or_else(|e| fail(&format!("Failed to read display.toml: {}", e)));

    let raw: RawConfig = toml::from_str(&content)
        .unwrap_or_else(|e| fail(&format!("Invalid display.toml: {}", e)));

    let pins = parse_pins(&raw.pins);
    if let Err(e) = pins.validate() {
        fail(&format!("Invalid pin assignment in display.toml: {:?}", e));
    }

    if raw.timing.write_strobe_ns == 0 {
        fail("timing.write_strobe_ns must be greater than zero");
    }

    let source = render_config(&pins, &raw.timing, &raw.quirks);
    fs::write(out_dir.join("display_config.rs"), source).unwrap();

    println!("cargo:warning=display.toml validated successfully");
}

fn parse_pins(raw: &RawPins) -> PinAssignment {
    if raw.data.len() != DATA_LINES {
        fail(&format!(
            "pins.data must list exactly {} pins, found {}",
            DATA_LINES,
            raw.data.len()
        ));
    }

    let mut data = [0u8; DATA_LINES];
    for (bit, s) in raw.data.iter().enumerate() {
        let cfg = pin(&format!("pins.data[{}]", bit), s);
        if cfg.inverted {
            fail(&format!("pins.data[{}]: data lines cannot be inverted", bit));
        }
        data[bit] = cfg.pin;
    }

    PinAssignment {
        data,
        read_enable: pin("pins.read_enable", &raw.read_enable),
        write_enable: pin("pins.write_enable", &raw.write_enable),
        register_select: pin("pins.register_select", &raw.register_select),
        chip_select: pin("pins.chip_select", &raw.chip_select),
        reset: pin("pins.reset", &raw.reset),
    }
}

fn pin(key: &str, s: &str) -> PinConfig {
    parse_pin_string(s).unwrap_or_else(|e| fail(&format!("{} = {:?}: {:?}", key, s, e)))
}

fn render_pin(p: &PinConfig) -> String {
    format!("PinConfig {{ pin: {}, inverted: {} }}", p.pin, p.inverted)
}

fn render_config(pins: &PinAssignment, timing: &BusTiming, quirks: &Quirks) -> String {
    format!(
        "// Generated from display.toml by build.rs\n\
         pub const DISPLAY_CONFIG: DisplayConfig = DisplayConfig {{\n\
         \x20   pins: PinAssignment {{\n\
         \x20       data: {:?},\n\
         \x20       read_enable: {},\n\
         \x20       write_enable: {},\n\
         \x20       register_select: {},\n\
         \x20       chip_select: {},\n\
         \x20       reset: {},\n\
         \x20   }},\n\
         \x20   timing: BusTiming {{ write_strobe_ns: {} }},\n\
         \x20   quirks: Quirks {{ pixel_low_byte_ff: {}, skip_steep_lines: {} }},\n\
         }};\n",
        pins.data,
        render_pin(&pins.read_enable),
        render_pin(&pins.write_enable),
        render_pin(&pins.register_select),
        render_pin(&pins.chip_select),
        render_pin(&pins.reset),
        timing.write_strobe_ns,
        quirks.pixel_low_byte_ff,
        quirks.skip_steep_lines,
    )
}

/// Abort the build with a boxed error message
fn fail(msg: &str) -> ! {
    let lines = msg
        .lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: display.toml                                             ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        lines
    );
}

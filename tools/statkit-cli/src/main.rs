use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use serde::Serialize;
use statkit::device::{BatteryLabels, Device, DiskUnit};
use statkit::haptic::{Haptics, VibrationOutcome};
use statkit::screen::Screen;
use statkit::shell::Shell;

#[derive(Parser)]
#[command(name = "statkit")]
#[command(about = "Device telemetry and system actions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every reading at once
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// JSON file with battery state labels
        #[arg(long, value_name = "FILE")]
        labels: Option<PathBuf>,
    },
    /// Battery level and charging state
    Battery,
    /// RAM usage in MB
    Memory,
    /// CPU usage across all cores
    Cpu,
    /// Free space on the data volume
    Disk {
        /// Unit to print in
        #[arg(long, value_enum, default_value_t = Unit::Gb)]
        unit: Unit,
    },
    /// Device type and model
    Device,
    /// Display size in points
    Display,
    /// Whether the clock is in 24-hour mode
    Clock,
    /// Read or set the display brightness
    Brightness {
        /// New level in 0.0..=1.0
        level: Option<f32>,
    },
    /// Read or set low power mode
    LowPower {
        /// New state
        state: Option<Toggle>,
    },
    /// Save a screenshot
    Screenshot,
    /// Lock the device
    Lock,
    /// Open the app switcher
    Switcher,
    /// Open the voice assistant
    Assistant,
    /// Restart the graphical shell
    Respring,
    /// Reboot the device
    Reboot,
    /// Launch an application
    Open {
        /// Bundle identifier, e.g. com.apple.mobilesafari
        bundle_id: String,
    },
    /// Vibrate, honoring the vibrate-on-silent preference
    Vibrate {
        /// Duration in seconds
        #[arg(long)]
        seconds: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Unit {
    Bytes,
    Kb,
    Mb,
    Gb,
}

impl From<Unit> for DiskUnit {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Bytes => Self::Bytes,
            Unit::Kb => Self::Kilobytes,
            Unit::Mb => Self::Megabytes,
            Unit::Gb => Self::Gigabytes,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

/// One snapshot of every reading. Readings the platform cannot provide are `null`.
#[derive(Debug, Default, Serialize)]
struct Status {
    battery_percent: Option<u8>,
    battery_state: Option<String>,
    battery_state_code: Option<i32>,
    ram_free_mb: Option<u64>,
    ram_used_mb: Option<u64>,
    ram_available_mb: Option<u64>,
    cpu_usage: Option<f64>,
    free_disk_gb: Option<f64>,
    device_type: Option<String>,
    device_model: Option<String>,
    display_width: Option<u32>,
    display_height: Option<u32>,
    brightness: Option<f32>,
    uses_24_hour_clock: Option<bool>,
    low_power_mode: Option<bool>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Status { json, labels } => run_status(json, labels.as_deref()),
        Commands::Battery => run_battery(),
        Commands::Memory => run_memory(),
        Commands::Cpu => {
            let usage = Device::new().cpu_usage().context("Failed to sample CPU usage")?;
            println!("CPU: {usage:.1}%");
            Ok(())
        }
        Commands::Disk { unit } => {
            let unit = DiskUnit::from(unit);
            let free = Device::new()
                .free_disk_space(unit)
                .context("Failed to read free disk space")?;
            println!("Free disk: {free:.2} {}", unit.suffix());
            Ok(())
        }
        Commands::Device => run_device(),
        Commands::Display => {
            let size = Screen::new()
                .display_size()
                .context("Failed to read display size")?;
            println!("Display: {} x {} points", size.width, size.height);
            Ok(())
        }
        Commands::Clock => {
            let is_24 = Device::new()
                .is_24_hour_clock()
                .context("Failed to read clock preference")?;
            println!("Clock: {}", if is_24 { "24-hour" } else { "12-hour" });
            Ok(())
        }
        Commands::Brightness { level } => run_brightness(level),
        Commands::LowPower { state } => run_low_power(state),
        Commands::Screenshot => action("Screenshot saved", Screen::new().take_screenshot()),
        Commands::Lock => action("Locked", Shell::new().lock_device()),
        Commands::Switcher => action("Switcher opened", Shell::new().open_switcher()),
        Commands::Assistant => action("Assistant opened", Shell::new().open_assistant()),
        Commands::Respring => action("Restarting shell", Shell::new().respring()),
        Commands::Reboot => action("Rebooting", Shell::new().reboot()),
        Commands::Open { bundle_id } => action(
            &format!("Opened {bundle_id}"),
            Shell::new().open_application(&bundle_id),
        ),
        Commands::Vibrate { seconds } => run_vibrate(seconds),
    }
}

fn action<E>(done: &str, result: std::result::Result<(), E>) -> Result<()>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result?;
    println!("{}", format!("✅ {done}").green().bold());
    Ok(())
}

/// Keep a reading for the status table, logging why it is missing otherwise.
fn probe<T, E: Display>(what: &str, result: std::result::Result<T, E>) -> Option<T> {
    result
        .inspect_err(|e| log::warn!("{what} unavailable: {e}"))
        .ok()
}

fn load_labels(path: &Path) -> Result<BatteryLabels> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read labels from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse labels in {}", path.display()))
}

fn collect_status(device: &Device, screen: &Screen) -> Status {
    let memory = probe("memory", device.memory());
    let size = probe("display size", screen.display_size());

    Status {
        battery_percent: probe("battery level", device.battery_percent()),
        battery_state: probe("battery state", device.battery_state_label()),
        battery_state_code: probe("battery state", device.battery_state_code()),
        ram_free_mb: memory.map(|m| m.free_mb()),
        ram_used_mb: memory.map(|m| m.used_mb()),
        ram_available_mb: memory.map(|m| m.total_mb()),
        cpu_usage: probe("CPU usage", device.cpu_usage()),
        free_disk_gb: probe("disk space", device.free_disk_space(DiskUnit::Gigabytes)),
        device_type: probe("device type", device.device_type()),
        device_model: probe("device model", device.device_model()),
        display_width: size.map(|s| s.width),
        display_height: size.map(|s| s.height),
        brightness: probe("brightness", screen.brightness()).map(|b| b.value()),
        uses_24_hour_clock: probe("clock", device.is_24_hour_clock()),
        low_power_mode: probe("low power mode", device.low_power_mode()),
    }
}

fn show<T: Display>(name: &str, value: Option<T>) {
    match value {
        Some(value) => println!("{:>18}: {value}", name.bold()),
        None => println!("{:>18}: {}", name.bold(), "n/a".dimmed()),
    }
}

fn run_status(json: bool, labels: Option<&Path>) -> Result<()> {
    let mut device = Device::new();
    if let Some(path) = labels {
        device = device.with_labels(load_labels(path)?);
    }
    let status = collect_status(&device, &Screen::new());

    if json {
        let text = serde_json::to_string_pretty(&status).context("Failed to encode status")?;
        println!("{text}");
        return Ok(());
    }

    println!("{}", "📱 Device status".green().bold());
    show("Battery", status.battery_percent.map(|p| format!("{p}%")));
    show("State", status.battery_state);
    show("RAM free", status.ram_free_mb.map(|mb| format!("{mb} MB")));
    show("RAM used", status.ram_used_mb.map(|mb| format!("{mb} MB")));
    show("RAM total", status.ram_available_mb.map(|mb| format!("{mb} MB")));
    show("CPU", status.cpu_usage.map(|c| format!("{c:.1}%")));
    show("Free disk", status.free_disk_gb.map(|gb| format!("{gb:.2} GB")));
    show("Type", status.device_type);
    show("Model", status.device_model);
    show(
        "Display",
        status
            .display_width
            .zip(status.display_height)
            .map(|(w, h)| format!("{w} x {h}")),
    );
    show("Brightness", status.brightness.map(|b| format!("{b:.2}")));
    show("24-hour clock", status.uses_24_hour_clock);
    show("Low power", status.low_power_mode);
    Ok(())
}

fn run_battery() -> Result<()> {
    let device = Device::new();
    let percent = device
        .battery_percent()
        .context("Failed to read battery level")?;
    let state = device
        .battery_state()
        .context("Failed to read battery state")?;
    println!(
        "Battery: {percent}% ({}, code {})",
        device.battery_state_label()?,
        state.code()
    );
    Ok(())
}

fn run_memory() -> Result<()> {
    let memory = Device::new()
        .memory()
        .context("Failed to read memory statistics")?;
    println!(
        "RAM: {} MB free, {} MB used, {} MB total",
        memory.free_mb(),
        memory.used_mb(),
        memory.total_mb()
    );
    Ok(())
}

fn run_device() -> Result<()> {
    let device = Device::new();
    let kind = device.device_type().context("Failed to read device type")?;
    let model = device
        .device_model()
        .context("Failed to read device model")?;
    println!("Device: {kind} ({model}), {}", device.device_family()?);
    Ok(())
}

fn run_brightness(level: Option<f32>) -> Result<()> {
    let screen = Screen::new();
    if let Some(level) = level {
        screen
            .set_brightness(level)
            .context("Failed to set brightness")?;
    }
    let brightness = screen.brightness().context("Failed to read brightness")?;
    println!("Brightness: {:.2}", brightness.value());
    Ok(())
}

fn run_low_power(state: Option<Toggle>) -> Result<()> {
    let device = Device::new();
    if let Some(state) = state {
        device
            .set_low_power_mode(matches!(state, Toggle::On))
            .context("Failed to change low power mode")?;
    }
    let enabled = device
        .low_power_mode()
        .context("Failed to read low power mode")?;
    println!("Low power mode: {}", if enabled { "on" } else { "off" });
    Ok(())
}

fn run_vibrate(seconds: Option<f64>) -> Result<()> {
    let haptics = Haptics::new();
    let outcome = match seconds {
        Some(seconds) => haptics.vibrate_for(seconds),
        None => haptics.vibrate(),
    }
    .context("Failed to vibrate")?;

    match outcome {
        VibrationOutcome::Vibrated => println!("{}", "📳 Vibrated".green().bold()),
        VibrationOutcome::Suppressed => {
            println!("{}", "🔕 Vibrate on silent is off".yellow());
        }
        VibrationOutcome::Skipped => println!("{}", "Nothing to do".dimmed()),
    }
    Ok(())
}

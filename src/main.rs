//! NAS LCD - rotating system status pages on an I2C character display.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use nas_lcd::{
    lcd, ConsoleTransport, DisplayConfig, LcdTransport, PageScheduler, Stage, SystemCollector,
    DEFAULT_ADDRESS, DEFAULT_BUS, DEFAULT_COLUMNS, DEFAULT_INTERVAL_SECS, DEFAULT_ROWS,
    DEFAULT_SENSOR_PATTERN,
};
use serde::Serialize;
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "nas_lcd")]
#[command(about = "Rotating system status pages on an I2C character LCD")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "Cycles a small character LCD through host, memory, CPU, network, connectivity and disk pages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cycle the display through status pages until interrupted
    Display(DisplayArgs),

    /// Write the given lines to the display once and exit
    SetText(SetTextArgs),

    /// Switch the backlight on or off and exit
    Backlight(BacklightArgs),

    /// Render one rotation to stdout without touching the display
    Preview(PreviewArgs),
}

#[derive(Args)]
struct DeviceArgs {
    /// I2C bus number
    #[arg(long, default_value_t = DEFAULT_BUS)]
    bus: u8,

    /// I2C address of the display backpack, hex (0x20) or decimal
    #[arg(short, long, value_parser = parse_address, default_value_t = DEFAULT_ADDRESS)]
    address: u16,

    /// Characters per row
    #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
    columns: u8,

    /// Rows on the display
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    rows: u8,
}

#[derive(Args)]
struct DisplayArgs {
    #[command(flatten)]
    device: DeviceArgs,

    /// Seconds each page stays on screen
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL_SECS)]
    interval: u64,

    /// Block device to show, repeatable (default: every mounted partition)
    #[arg(long = "disk")]
    disks: Vec<String>,

    /// Network interface in order of preference, repeatable (default: eth0, wlan0)
    #[arg(long = "interface")]
    interfaces: Vec<String>,

    /// Label prefix of the temperature sensors to report as CPU cores
    #[arg(long, default_value = DEFAULT_SENSOR_PATTERN)]
    sensor: String,
}

#[derive(Args)]
struct SetTextArgs {
    #[command(flatten)]
    device: DeviceArgs,

    /// Lines to show, top row first
    #[arg(required = true)]
    lines: Vec<String>,
}

#[derive(Args)]
struct BacklightArgs {
    #[command(flatten)]
    device: DeviceArgs,

    /// Desired backlight state
    state: BacklightState,
}

#[derive(Args)]
struct PreviewArgs {
    #[command(flatten)]
    display: DisplayArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = PreviewFormat::Pretty)]
    format: PreviewFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BacklightState {
    On,
    Off,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PreviewFormat {
    Pretty,
    Json,
}

#[derive(Serialize)]
struct PreviewPage<'a> {
    stage: &'a Stage,
    lines: &'a [String],
}

impl DeviceArgs {
    fn config(&self) -> DisplayConfig {
        DisplayConfig::new(self.address, self.columns, self.rows).with_bus(self.bus)
    }
}

impl DisplayArgs {
    fn config(&self) -> DisplayConfig {
        self.device
            .config()
            .with_interval_secs(self.interval)
            .with_disks(self.disks.clone())
            .with_interfaces(self.interfaces.clone())
            .with_sensor_pattern(self.sensor.clone())
    }
}

/// Accept `0x20`-style hex or plain decimal.
fn parse_address(value: &str) -> Result<u16, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid I2C address {:?}: {}", value, e))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {:#}", err);
        std::process::exit(1);
    }

    if let Err(err) = run(cli).await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Display(args) => display_command(args).await,
        Commands::SetText(args) => set_text_command(args),
        Commands::Backlight(args) => backlight_command(args),
        Commands::Preview(args) => preview_command(args).await,
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    // RUST_LOG, when set, overrides the command line flags
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(log_level(cli)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

fn level_filter(level: Level) -> EnvFilter {
    EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
}

async fn display_command(args: &DisplayArgs) -> anyhow::Result<()> {
    let config = args.config();
    config.validate()?;

    let transport = lcd::open_default(&config).context("Failed to open display")?;
    let collector = SystemCollector::new().context("Failed to initialize metrics")?;
    let mut scheduler = PageScheduler::new(config, collector, transport)?;

    info!("Display configuration:");
    info!("  - Bus: {}", scheduler.config().bus);
    info!("  - Address: {:#04x}", scheduler.config().address);
    info!("  - Geometry: {}x{}", scheduler.config().columns, scheduler.config().rows);
    info!("  - Interfaces: {:?}", scheduler.config().interfaces);
    info!("  - Sensor pattern: {:?}", scheduler.config().sensor_pattern);

    tokio::select! {
        result = scheduler.run() => result.context("Display loop stopped")?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
    }

    scheduler
        .into_transport()
        .close()
        .context("Failed to close display")?;
    Ok(())
}

fn set_text_command(args: &SetTextArgs) -> anyhow::Result<()> {
    let config = args.device.config();
    config.validate()?;

    let mut transport = lcd::open_default(&config).context("Failed to open display")?;
    transport
        .write_lines(&args.lines)
        .context("Failed to write to display")?;
    transport.close().context("Failed to close display")?;
    Ok(())
}

fn backlight_command(args: &BacklightArgs) -> anyhow::Result<()> {
    let config = args.device.config();
    config.validate()?;

    let mut transport = lcd::open_default(&config).context("Failed to open display")?;
    transport
        .set_backlight(args.state == BacklightState::On)
        .context("Failed to switch backlight")?;
    transport.close().context("Failed to close display")?;
    Ok(())
}

async fn preview_command(args: &PreviewArgs) -> anyhow::Result<()> {
    let config = args.display.config();
    let (columns, rows) = (config.columns, config.rows);

    let collector = SystemCollector::new().context("Failed to initialize metrics")?;
    let console = ConsoleTransport::stdout(columns, rows);
    let mut scheduler = PageScheduler::new(config, collector, console)?;
    let stages = scheduler.stages();
    let rendered = scheduler.render_rotation().await;

    match args.format {
        PreviewFormat::Json => {
            let pages: Vec<PreviewPage> = stages
                .iter()
                .zip(&rendered)
                .map(|(stage, page)| PreviewPage {
                    stage,
                    lines: page.lines(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
        PreviewFormat::Pretty => {
            println!(
                "Status pages ({})",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            let mut console = scheduler.into_transport();
            for (stage, page) in stages.iter().zip(&rendered) {
                println!("{:?}", stage);
                console.write_lines(page.lines())?;
            }
        }
    }

    Ok(())
}

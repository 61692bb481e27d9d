use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use smartstack::ExportFormat;
use smartstack::core::config::{self, CliOverrides, StudyConfig};
use smartstack::tui;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartstack", about = "LIFO stacking usability study")]
struct Args {
    /// Participant identifier recorded in the export
    #[arg(short, long)]
    participant: Option<String>,

    /// Delay between meeting a level's goal and the success banner
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Move to the next level without waiting for Enter
    #[arg(long)]
    auto_advance: bool,

    /// Write the session log here on finish or quit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Diagnostic log file
    #[arg(long, default_value = "smartstack.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Smart Stack starting up");

    let study_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        StudyConfig::default()
    });
    let cli = CliOverrides {
        participant: args.participant,
        delay_ms: args.delay_ms,
        auto_advance: args.auto_advance,
        export: args.export,
        format: args.format,
    };
    let resolved = config::resolve(&study_config, &cli);
    log::info!("Resolved config: {:?}", resolved);

    tui::run(resolved)
}

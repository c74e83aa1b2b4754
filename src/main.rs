use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use tabib::Locale;
use tabib::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "tabib", about = "Daily chat with a virtual medical assistant")]
struct Args {
    /// Display language
    #[arg(short, long, value_enum)]
    locale: Option<Locale>,

    /// Gemini model name
    #[arg(short, long)]
    model: Option<String>,

    /// Directory holding the per-day conversation files
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to tabib.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("tabib.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tabib: {e}");
            return Err(std::io::Error::other(e));
        }
    };

    let overrides = CliOverrides {
        locale: args.locale,
        model: args.model,
        data_dir: args.data_dir,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!(
        "Tabib starting up: locale={:?}, model={}, data_dir={}",
        resolved.locale,
        resolved.model_name,
        resolved.data_dir.display()
    );

    tabib::tui::run(resolved)
}

use chrono::NaiveDate;
use clap::Parser;
use music_reports::{Client, ReportError, ReportRequest, ReportWriter, Settings, download_report};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "music-reports",
    version,
    about = "Get reports from the Apple Music analytics API"
)]
struct Cli {
    /// Get the in-review report for a date in YYYY-MM-DD format
    #[arg(long, value_name = "DATE", value_parser = music_reports::parse_date)]
    get_in_review: NaiveDate,

    /// Alternate config file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Override the default output file name
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ReportError> {
    let settings = Settings::load(&cli.config)?;
    let client = Client::from_settings(settings)?;

    let mut writer = ReportWriter::current_dir();
    if let Some(out) = cli.out {
        writer = writer.with_output(out);
    }

    let request = ReportRequest::in_review(cli.get_in_review);
    download_report(&client, &writer, &request).await?;
    Ok(())
}

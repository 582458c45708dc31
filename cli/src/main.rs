mod logging;
mod report;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use volunteer_hours_core::{
    Document, FileStorage, FormInput, StorageEntryRepository, SubmitOutcome, TrackerConfig, VolunteerHoursTracker,
};

const HTML_CONTAINER_ID: &str = "volunteer-hours-tracker";

#[derive(Parser)]
#[command(name = "volunteer-hours")]
#[command(about = "Log volunteer service hours and keep monthly and yearly totals", long_about = None)]
struct Cli {
    /// Directory holding saved entries and config.json (default: ~/.volunteer-hours)
    #[arg(long, global = true, env = "VOLUNTEER_HOURS_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add an entry (usage: add Camp cleanup date:2024-03-05 participants:10 hours:2)
    Add {
        /// Activity words followed by date:, participants: and hours: values
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List entries with running totals by month and year
    List,
    /// Delete every saved entry (no confirmation)
    Clear,
    /// Print the widget as HTML
    Html,
    /// Open the Terminal User Interface
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TrackerConfig::load(cli.data_dir)?;
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    logging::init_tracing(&config, interactive);

    let storage = FileStorage::new(Some(config.data_dir.clone()))?;
    let repo = StorageEntryRepository::with_key(storage, &config.storage_key);

    match cli.command {
        Some(Commands::Add { args }) => {
            if args.is_empty() {
                println!("Error: Activity is required.");
                return Ok(());
            }

            let input = FormInput::from_args(&args)?;
            let mut tracker = VolunteerHoursTracker::new(repo);
            let outcome = tracker.submit_input(input);
            let text = tracker.message().map(|m| m.text.as_str()).unwrap_or_default();
            match outcome {
                SubmitOutcome::Added { .. } => println!("{}", text),
                SubmitOutcome::Rejected(e) => println!("Error: {} ({})", text, e),
            }
        }
        Some(Commands::List) => {
            let tracker = VolunteerHoursTracker::new(repo);
            report::show_entries(tracker.view());
        }
        Some(Commands::Clear) => {
            let mut tracker = VolunteerHoursTracker::new(repo);
            let outcome = tracker.clear();
            if let Some(message) = tracker.message() {
                println!("{}", message.text);
            }
            if outcome.persisted {
                println!("Removed {} entries.", outcome.removed);
            }
        }
        Some(Commands::Html) => {
            let mut document = Document::with_containers([HTML_CONTAINER_ID]);
            document.init_volunteer_hours_tracker(HTML_CONTAINER_ID, repo);
            if let Some(markup) = document.container_markup(HTML_CONTAINER_ID) {
                println!("<div id=\"{}\">{}</div>", HTML_CONTAINER_ID, markup);
            }
        }
        Some(Commands::Tui) | None => {
            tui::run(repo)?;
        }
    }
    Ok(())
}

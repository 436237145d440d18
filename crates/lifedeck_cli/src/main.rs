//! Command-line front end for `lifedeck_core`.
//!
//! # Responsibility
//! - Open a SQLite-backed state store and exercise the facade.
//! - Keep output plain text and deterministic for local sanity checks.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use lifedeck_core::db::open_db;
use lifedeck_core::format::format_relative_date;
use lifedeck_core::{
    core_version, init_logging, parse_filter_date, search_preview, AppService, Clipboard,
    CoreConfig, Entry, EntryDraft, EntryLabel, PromptKind, SearchFilters, SqliteKeyValueStore,
    StateStore, DEFAULT_PREVIEW_LENGTH,
};
use log::info;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lifedeck", about = "Journal entries and prompt templates", version)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "log-level", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the core version
    Version,
    /// List categories with their subcategories
    Categories,
    /// List entries that have no subcategory
    Inbox,
    /// Capture a new entry
    Capture {
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "note")]
        label: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
    },
    /// Search entries by text and filters
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
        /// Inclusive lower bound (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        from: Option<String>,
        /// Inclusive upper bound (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        to: Option<String>,
    },
    /// Render a subcategory prompt
    Prompt {
        subcategory: String,
        /// evaluation, planning or synthesis
        #[arg(default_value = "evaluation")]
        kind: String,
        #[arg(long)]
        no_context: bool,
        /// Entry ids to include instead of the three most recent
        #[arg(long = "entry")]
        entries: Vec<String>,
    },
}

/// Writes copied text to stdout.
struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn copy(&self, text: &str) -> bool {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}").and_then(|()| stdout.flush()).is_ok()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if matches!(cli.command, Command::Version) {
        println!("lifedeck_core version={}", core_version());
        return Ok(());
    }

    let mut config = CoreConfig::load(cli.config.as_deref()).map_err(|err| err.to_string())?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    let config = config.validated().map_err(|err| err.to_string())?;

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).map_err(|err| err.to_string())?;
    }

    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let kv = SqliteKeyValueStore::try_new(&conn).map_err(|err| err.to_string())?;
    let mut service = AppService::open(StateStore::new(kv));
    info!(
        "event=cli_command module=cli status=start db_path={}",
        config.db_path.display()
    );

    match cli.command {
        Command::Version => {}
        Command::Categories => {
            for category in service.categories() {
                println!("{} {} [{}]", category.icon, category.name, category.id);
                for sub in &category.subcategories {
                    let count = service.entries_by_subcategory(&sub.id).len();
                    println!("    {} ({count}) [{}]", sub.name, sub.id);
                }
            }
        }
        Command::Inbox => print_entries(&service.inbox_entries(), ""),
        Command::Capture {
            title,
            content,
            label,
            category,
            subcategory,
        } => {
            let label: EntryLabel = label.parse().map_err(|err| format!("{err}"))?;
            let draft = EntryDraft {
                title,
                content,
                category_id: category,
                subcategory_id: subcategory,
                label,
            };
            let entry = service.add_entry(draft).map_err(|err| err.to_string())?;
            if !service.last_save_succeeded() {
                return Err("entry created but could not be persisted".to_string());
            }
            println!("{}", entry.id);
        }
        Command::Search {
            query,
            label,
            category,
            subcategory,
            from,
            to,
        } => {
            let label = label
                .map(|value| value.parse::<EntryLabel>())
                .transpose()
                .map_err(|err| err.to_string())?;
            let filters = SearchFilters {
                label,
                category_id: category,
                subcategory_id: subcategory,
                date_from: filter_date("--from", from.as_deref())?,
                date_to: filter_date("--to", to.as_deref())?,
            };
            print_entries(&service.search_entries(&query, Some(&filters)), &query);
        }
        Command::Prompt {
            subcategory,
            kind,
            no_context,
            entries,
        } => {
            let kind: PromptKind = kind.parse().map_err(|err| format!("{err}"))?;
            let selection = (!entries.is_empty()).then_some(entries.as_slice());
            let prompt = service
                .build_prompt(&subcategory, kind, !no_context, selection)
                .ok_or_else(|| format!("subcategory not found: {subcategory}"))?;
            if !service.copy_prompt(&StdoutClipboard, &prompt) {
                return Err("failed to write prompt".to_string());
            }
        }
    }

    Ok(())
}

/// Parses an optional date flag; a supplied but unreadable value is an error.
fn filter_date(flag: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, String> {
    match value {
        None => Ok(None),
        Some(raw) => parse_filter_date(raw).map(Some).ok_or_else(|| {
            format!("invalid {flag} value `{raw}`; expected YYYY-MM-DD or RFC 3339")
        }),
    }
}

fn print_entries(entries: &[Entry], query: &str) {
    let now = Utc::now();
    for entry in entries {
        println!(
            "[{}] {} ({}, {})",
            entry.id,
            entry.title,
            entry.label,
            format_relative_date(entry.updated_at, now)
        );
        let preview = search_preview(&entry.content, query, DEFAULT_PREVIEW_LENGTH);
        if !preview.is_empty() {
            println!("    {preview}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_date, Cli};
    use clap::Parser;

    #[test]
    fn unreadable_date_flag_is_an_error() {
        let err = filter_date("--from", Some("garbage")).unwrap_err();
        assert!(err.contains("--from"));
        assert_eq!(filter_date("--to", None).unwrap(), None);
        assert!(filter_date("--to", Some("2024-03-01")).unwrap().is_some());
    }

    #[test]
    fn capture_requires_content() {
        assert!(Cli::try_parse_from(["lifedeck", "capture", "Run"]).is_err());
        assert!(Cli::try_parse_from(["lifedeck", "capture", "Run", "--content", "5k"]).is_ok());
    }
}

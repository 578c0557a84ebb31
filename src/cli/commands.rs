use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use super::output::{format_history_item, format_history_line, format_millis, format_result};
use crate::client::{HttpBackend, ResearchClient};
use crate::config::{Config, ConfigOverrides, load_config};
use crate::controller::ResearchController;
use crate::error::{SearchError, SubmitError};
use crate::logging;
use crate::models::ResearchCategory;
use crate::storage::{FileStore, HistoryStore, KeyValueStore, MemoryStore};
use crate::tui::run_interactive;
use crate::utils::format_path_with_tilde;

#[derive(Parser)]
#[command(name = "tech-researcher")]
#[command(version)]
#[command(about = "Research AI papers, repositories and models from the terminal", long_about = None)]
pub struct Cli {
    /// Research backend URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Directory for history, preferences and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep history and preferences in memory only; no files are written
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single research query and print the result
    Search {
        /// Query text; multiple words are joined with spaces
        #[arg(required = true)]
        query: Vec<String>,

        /// Research category: arxiv, github, models or general
        #[arg(short, long, default_value = "general")]
        category: ResearchCategory,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or edit the search history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show statistics about the history
    Stats,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List entries, newest first
    List {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one entry in full
    Show { id: String },
    /// Remove one entry
    Remove { id: String },
    /// Remove every entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        let log_level = match self.verbose {
            0 => None,
            1 => Some("debug".to_string()),
            _ => Some("trace".to_string()),
        };

        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            data_dir: self.data_dir.clone(),
            timeout_secs: None,
            log_level,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), &cli.overrides())?;

    match cli.command {
        None => run_tui(&config, cli.ephemeral),
        Some(command) => {
            logging::init_stderr(&config.log_level);
            let store = open_store(&config, cli.ephemeral)?;
            match command {
                Commands::Search { query, category, json } => {
                    search(&config, store, &query.join(" "), category, json)
                }
                Commands::History { action } => history(store, action),
                Commands::Stats => show_stats(&config, store, cli.ephemeral),
            }
        }
    }
}

fn open_store(config: &Config, ephemeral: bool) -> Result<Arc<dyn KeyValueStore>> {
    if ephemeral {
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(FileStore::new(config.resolved_data_dir()?)))
}

fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn build_controller(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<ResearchController> {
    let backend = HttpBackend::new(&config.endpoint, config.timeout())?;
    let client = ResearchClient::new(Arc::new(backend));
    Ok(ResearchController::new(client, HistoryStore::open(store)))
}

/// Where the TUI writes its log files. Ephemeral sessions write nothing.
fn tui_log_dir(config: &Config, ephemeral: bool) -> Result<Option<PathBuf>> {
    if ephemeral {
        return Ok(None);
    }
    Ok(Some(config.resolved_data_dir()?))
}

fn run_tui(config: &Config, ephemeral: bool) -> Result<()> {
    // Logging is optional for the TUI; a read-only data dir should not block it
    let _guard = match tui_log_dir(config, ephemeral)? {
        Some(data_dir) => match logging::init_file(&data_dir, &config.log_level) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: file logging disabled: {:#}", e);
                None
            }
        },
        None => None,
    };

    let store = open_store(config, ephemeral)?;
    tracing::info!(endpoint = %config.endpoint, ephemeral, "Starting interactive session");

    let runtime = build_runtime()?;
    let controller = build_controller(config, store.clone())?;
    run_interactive(controller, store, runtime.handle().clone())
}

fn search(
    config: &Config,
    store: Arc<dyn KeyValueStore>,
    query: &str,
    category: ResearchCategory,
    json: bool,
) -> Result<()> {
    let runtime = build_runtime()?;
    let mut controller = build_controller(config, store)?;

    controller.set_query(query);
    match runtime.block_on(controller.submit(None, Some(category))) {
        Ok(()) => {}
        Err(SearchError::Rejected(SubmitError::EmptyQuery)) => bail!("Query must not be empty"),
        Err(SearchError::Rejected(e)) => bail!("Search was not started: {}", e),
        Err(SearchError::Failed(e)) => bail!("Search failed: {}", e),
    }

    if let Some(notice) = controller.take_notice() {
        eprintln!("Warning: {}", notice.text);
    }

    let Some(result) = controller.result() else {
        bail!("Search finished without a result");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(result).context("Failed to serialize result")?);
    } else {
        print!("{}", format_result(result));
    }

    Ok(())
}

fn history(store: Arc<dyn KeyValueStore>, action: HistoryAction) -> Result<()> {
    let mut history = HistoryStore::open(store);

    match action {
        HistoryAction::List { json } => {
            if json {
                let text = serde_json::to_string_pretty(history.items())
                    .context("Failed to serialize history")?;
                println!("{}", text);
            } else if history.is_empty() {
                println!("No history entries");
            } else {
                for item in history.items() {
                    println!("{}", format_history_line(item));
                }
            }
        }
        HistoryAction::Show { id } => {
            let Some(item) = history.get(&id) else {
                bail!("No history entry with id {}", id);
            };
            print!("{}", format_history_item(item));
        }
        HistoryAction::Remove { id } => {
            if !history.remove(&id)? {
                bail!("No history entry with id {}", id);
            }
            println!("Removed {}", id);
        }
        HistoryAction::Clear { yes } => {
            let count = history.len();
            if count == 0 {
                println!("History is already empty");
                return Ok(());
            }
            if !yes && !confirm_clear(count)? {
                println!("Aborted");
                return Ok(());
            }
            history.clear()?;
            println!("History cleared ({} entries)", count);
        }
    }

    Ok(())
}

/// Ask on the terminal. Without one, refuse rather than guess.
fn confirm_clear(count: usize) -> Result<bool> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        bail!("Refusing to clear history without --yes (stdin is not a terminal)");
    }

    print!("Delete all {} history entries? [y/N] ", count);
    io::stdout().flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer).context("Failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES" | "Yes"))
}

fn show_stats(config: &Config, store: Arc<dyn KeyValueStore>, ephemeral: bool) -> Result<()> {
    let history = HistoryStore::open(store);
    let items = history.items();

    println!("Research History Statistics");
    println!("===========================");
    println!("Total entries: {}", items.len());
    for category in ResearchCategory::ALL {
        let count = items.iter().filter(|item| item.category == category).count();
        println!("  {}: {}", category.label(), count);
    }
    println!();

    if ephemeral {
        println!("Data directory: (in-memory session)");
    } else {
        println!("Data directory: {}", format_path_with_tilde(&config.resolved_data_dir()?));
    }
    println!("Endpoint: {}", config.endpoint);

    if let Some(oldest) = items.last() {
        println!("Oldest entry: {}", format_millis(oldest.timestamp));
    }
    if let Some(newest) = items.first() {
        println!("Newest entry: {}", format_millis(newest.timestamp));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::try_parse_from([
            "tech-researcher",
            "search",
            "efficient",
            "LoRA",
            "--category",
            "github",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Search { query, category, json }) => {
                assert_eq!(query.join(" "), "efficient LoRA");
                assert_eq!(category, ResearchCategory::Github);
                assert!(json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_search_defaults_to_general() {
        let cli = Cli::try_parse_from(["tech-researcher", "search", "diffusion"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Search { category: ResearchCategory::General, json: false, .. })
        ));
    }

    #[test]
    fn test_search_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["tech-researcher", "search", "x", "-c", "papers"]).is_err());
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["tech-researcher", "search"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tech-researcher",
            "history",
            "list",
            "--ephemeral",
            "--endpoint",
            "http://127.0.0.1:9000/api/research",
        ])
        .unwrap();
        assert!(cli.ephemeral);
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9000/api/research"));
    }

    #[test]
    fn test_verbosity_maps_to_log_level() {
        let quiet = Cli::try_parse_from(["tech-researcher"]).unwrap();
        assert_eq!(quiet.overrides().log_level, None);

        let verbose = Cli::try_parse_from(["tech-researcher", "-v"]).unwrap();
        assert_eq!(verbose.overrides().log_level.as_deref(), Some("debug"));

        let very = Cli::try_parse_from(["tech-researcher", "-vvv"]).unwrap();
        assert_eq!(very.overrides().log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn test_tui_logs_only_outside_ephemeral_sessions() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/tech-researcher-data")),
            ..Config::default()
        };

        assert_eq!(
            tui_log_dir(&config, false).unwrap(),
            Some(PathBuf::from("/tmp/tech-researcher-data"))
        );
        assert_eq!(tui_log_dir(&config, true).unwrap(), None);
    }

    #[test]
    fn test_history_clear_flag() {
        let cli = Cli::try_parse_from(["tech-researcher", "history", "clear", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::History { action: HistoryAction::Clear { yes: true } })
        ));
    }
}

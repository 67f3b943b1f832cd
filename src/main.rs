mod catalog;
mod config;
mod logging;
mod storage;
mod store;
mod tui;

use anyhow::{Context, Result, bail};
use catalog::{Catalog, filter_items};
use clap::{Command, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{Generator, Shell, generate};
use config::{CONFIG_KEYS, Config, ConfigError};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::path::PathBuf;
use storage::{FileStore, KeyValueStore};
use store::CatalogStore;
use tui::{app::App, handlers::KeyEventHandler, ui};

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "A terminal catalog browser with search, categories and favorites")]
struct Cli {
    #[arg(
        long,
        global = true,
        value_hint = ValueHint::DirPath,
        help = "Directory holding saved search, category and favorites (overrides storage_path)"
    )]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Print the books matching the saved filter")]
    List {
        #[arg(long, help = "Search text to use instead of the saved one (not saved)")]
        search: Option<String>,
        #[arg(long, help = "Category to use instead of the saved one (not saved)")]
        category: Option<String>,
    },
    #[command(about = "Print the available categories")]
    Categories,
    #[command(about = "Manage favorites")]
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    #[command(about = "List favorites in the order they were added")]
    List,
    #[command(about = "Add a book to favorites, or remove it if already there")]
    Toggle {
        #[arg(help = "Book id")]
        id: u32,
    },
    #[command(about = "Remove all favorites")]
    Clear,
}

#[derive(Subcommand)]
enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key (storage_path or log_level)")]
        key: String,
        #[arg(help = "Configuration value")]
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        #[arg(help = "Configuration key")]
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Config { action }) => {
            handle_config_command(action).map_err(anyhow::Error::from)
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
            Ok(())
        }
        Some(Commands::List { search, category }) => list_items(cli.storage, search, category),
        Some(Commands::Categories) => list_categories(cli.storage),
        Some(Commands::Favorites { action }) => open_store(cli.storage)
            .and_then(|mut store| handle_favorites_command(&mut store, action)),
        None => run_main_app(cli.storage),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn handle_config_command(action: ConfigAction) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, value)?;
            config.save()?;
            println!("Configuration saved successfully.");
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
    }
    Ok(())
}

/// Loads config, starts file logging and restores the persisted store.
fn open_store(storage_override: Option<PathBuf>) -> Result<CatalogStore<FileStore>> {
    let config = Config::load().map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    if let Some(dir) = config::data_dir() {
        if let Err(e) = logging::init(&dir, &config.log_level) {
            eprintln!("Warning: logging disabled: {:#}", e);
        }
    }

    let storage_path = storage_override.unwrap_or_else(|| PathBuf::from(&config.storage_path));
    tracing::info!(storage = %storage_path.display(), "opening catalog store");

    Ok(CatalogStore::load(Catalog::builtin(), FileStore::new(storage_path)))
}

fn list_items(
    storage_override: Option<PathBuf>,
    search: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let store = open_store(storage_override)?;

    let mut filter = store.filter().clone();
    if let Some(search) = search {
        filter.search_text = search;
    }
    if let Some(category) = category {
        if !store.catalog().has_category(&category) {
            bail!("Unknown category '{}'", category);
        }
        filter.selected_category = category;
    }

    let visible = filter_items(&store.catalog().items, &filter);
    if visible.is_empty() {
        println!("No matching items.");
    }
    for item in visible {
        let marker = if store.is_favorite(item.id) { "*" } else { " " };
        println!(
            "{} {:>3}  {} by {} [{}]",
            marker, item.id, item.title, item.author, item.category
        );
    }
    Ok(())
}

fn list_categories(storage_override: Option<PathBuf>) -> Result<()> {
    let store = open_store(storage_override)?;
    for category in store.categories() {
        println!("{}", category);
    }
    Ok(())
}

fn handle_favorites_command<S: KeyValueStore>(
    store: &mut CatalogStore<S>,
    action: FavoritesAction,
) -> Result<()> {
    match action {
        FavoritesAction::List => {
            if store.favorites().is_empty() {
                println!("No favorites yet.");
            }
            for fav in store.favorites() {
                println!("{:>3}  {} by {}", fav.id, fav.title, fav.author);
            }
        }
        FavoritesAction::Toggle { id } => {
            let item = store
                .catalog()
                .find(id)
                .cloned()
                .with_context(|| format!("No book with id {}", id))?;
            if store.toggle_favorite(&item) {
                println!("Added '{}' to favorites.", item.title);
            } else {
                println!("Removed '{}' from favorites.", item.title);
            }
        }
        FavoritesAction::Clear => {
            store.clear_favorites();
            println!("Favorites cleared.");
        }
    }
    Ok(())
}

fn run_main_app(storage_override: Option<PathBuf>) -> Result<()> {
    let store = open_store(storage_override)?;
    let storage_label = store_label(&store);
    let mut app = App::new(store, storage_label);

    run_tui(&mut app)?;

    Ok(())
}

fn store_label(store: &CatalogStore<FileStore>) -> String {
    format!(
        "{} books - {}",
        store.catalog().total_items(),
        store.storage().root().display()
    )
}

fn run_tui<S: KeyValueStore>(app: &mut App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key)?;
            if app.should_quit {
                break;
            }
        }
    }
    tracing::info!("exiting");
    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

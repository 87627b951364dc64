use super::render::{
    line_width, print_messages, render_book_list, render_full_books, render_genres,
    render_stats,
};
use super::setup::{Cli, Commands};
use bookshelf::api::{self, CmdMessage, ConfigAction, LibraryApi, MessageLevel, ReadFilter, StatusChange};
use bookshelf::catalog::SearchField;
use bookshelf::config::LibraryConfig;
use bookshelf::error::{LibraryError, Result};
use bookshelf::index::DisplayBook;
use bookshelf::model::{current_year, Book, BookDraft, Genre};
use bookshelf::store::fs::FileStore;
use clap::Parser;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the platform data directory.
const HOME_ENV: &str = "BOOKSHELF_HOME";

struct AppContext {
    api: LibraryApi<FileStore>,
    config: LibraryConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = data_dir()?;

    // These do not need the library loaded
    match &cli.command {
        Some(Commands::Config { key, value }) => {
            return handle_config(&data_dir, key.clone(), value.clone())
        }
        Some(Commands::Genres) => {
            print!("{}", render_genres());
            return Ok(());
        }
        Some(Commands::Path) => {
            let config = LibraryConfig::load(&data_dir).unwrap_or_default();
            println!("{}", config.library_path(&data_dir).display());
            return Ok(());
        }
        _ => {}
    }

    let mut ctx = init_context(&data_dir, cli.verbose)?;

    match cli.command {
        Some(Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        }) => handle_add(&mut ctx, title, author, year, genre, read),
        Some(Commands::List { read, unread, json }) => {
            let filter = match (read, unread) {
                (true, _) => ReadFilter::Read,
                (_, true) => ReadFilter::Unread,
                _ => ReadFilter::All,
            };
            handle_list(&ctx, filter, json)
        }
        Some(Commands::View { books }) => handle_view(&ctx, books),
        Some(Commands::Remove { books }) => handle_remove(&mut ctx, books),
        Some(Commands::Read { books }) => handle_status(&mut ctx, books, StatusChange::Read),
        Some(Commands::Unread { books }) => handle_status(&mut ctx, books, StatusChange::Unread),
        Some(Commands::Toggle { books }) => handle_status(&mut ctx, books, StatusChange::Toggle),
        Some(Commands::Search { term, by, json }) => handle_search(&ctx, term.join(" "), by, json),
        Some(Commands::Stats { top, json }) => handle_stats(&ctx, top, json),
        Some(Commands::Genres) | Some(Commands::Path) | Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&ctx, ReadFilter::All, false),
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "bookshelf", "bookshelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| LibraryError::Api("Could not determine the data directory".to_string()))
}

fn init_context(data_dir: &Path, verbose: bool) -> Result<AppContext> {
    let config = LibraryConfig::load(data_dir).unwrap_or_default();
    let store =
        FileStore::new(config.library_path(data_dir)).with_backups(config.backup_corrupt);
    let (api, startup) = LibraryApi::open(store)?;

    // Load diagnostics are noise unless asked for; problems always show
    let shown: Vec<CmdMessage> = startup
        .messages
        .into_iter()
        .filter(|m| verbose || m.level != MessageLevel::Info)
        .collect();
    print_messages(&shown);

    Ok(AppContext { api, config })
}

fn handle_add(
    ctx: &mut AppContext,
    title: String,
    author: String,
    year: Option<i32>,
    genre: Genre,
    read: bool,
) -> Result<()> {
    let draft = BookDraft::new(title, author)
        .year(year.unwrap_or_else(current_year))
        .genre(genre)
        .read(read);
    let result = ctx.api.add_book(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, filter: ReadFilter, json: bool) -> Result<()> {
    let result = ctx.api.list_books(filter)?;
    if json {
        print_json_books(&result.listed_books)?;
    } else if ctx.api.catalog().is_empty() {
        print_messages(&[CmdMessage::warning(
            "Your library is empty. Add a book with `bookshelf add <title> <author>`.",
        )]);
    } else {
        print!("{}", render_book_list(&result.listed_books, line_width()));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, books: Vec<String>) -> Result<()> {
    let result = ctx.api.view_books(&books)?;
    print!("{}", render_full_books(&result.listed_books));
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, books: Vec<String>) -> Result<()> {
    let result = ctx.api.remove_books(&books)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &mut AppContext, books: Vec<String>, change: StatusChange) -> Result<()> {
    let result = ctx.api.set_read_status(&books, change)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: String, field: SearchField, json: bool) -> Result<()> {
    let result = ctx.api.search_books(&term, field)?;
    if json {
        print_json_books(&result.listed_books)?;
        return Ok(());
    }
    print_messages(&result.messages);
    if !result.listed_books.is_empty() {
        print!("{}", render_book_list(&result.listed_books, line_width()));
    }
    Ok(())
}

fn handle_stats(ctx: &AppContext, top: Option<usize>, json: bool) -> Result<()> {
    let result = ctx.api.stats()?;
    let Some(stats) = &result.stats else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }
    print_messages(&result.messages);
    if stats.total_books > 0 {
        let top = top.unwrap_or(ctx.config.top_authors);
        print!("{}", render_stats(stats, top));
    }
    Ok(())
}

fn handle_config(data_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = api::config(data_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in bookshelf::config::KEYS {
                if let Some(value) = config.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_json_books(listed: &[DisplayBook]) -> Result<()> {
    let books: Vec<&Book> = listed.iter().map(|db| &db.book).collect();
    println!("{}", serde_json::to_string_pretty(&books)?);
    Ok(())
}

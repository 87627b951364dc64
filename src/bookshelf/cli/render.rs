//! # Rendering
//!
//! Turns command results into terminal text. Every `render_*` function returns a
//! `String` so layout can be tested without capturing stdout; only
//! [`print_messages`] writes directly.
//!
//! Layout math (widths, truncation, padding) is Unicode-aware and done before
//! colors are applied, since escape codes have no display width.

use bookshelf::api::{CmdMessage, MessageLevel};
use bookshelf::index::DisplayBook;
use bookshelf::model::{AddedDate, Genre};
use bookshelf::stats::LibraryStats;
use chrono::Local;
use colored::Colorize;
use console::Term;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const GENRE_WIDTH: usize = 15;
const READ_MARKER: &str = "✓";
const UNREAD_MARKER: &str = "·";
const BAR_WIDTH: usize = 30;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Width to lay lines out in: the terminal width, capped at [`LINE_WIDTH`].
pub fn line_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(LINE_WIDTH)
        .min(LINE_WIDTH)
}

pub fn render_book_list(books: &[DisplayBook], width: usize) -> String {
    if books.is_empty() {
        return "No books found.\n".to_string();
    }

    let index_width = books
        .iter()
        .map(|db| db.index.to_string().len())
        .max()
        .unwrap_or(1);

    let mut output = String::new();
    for db in books {
        let book = &db.book;
        let idx_str = format!("{:>w$}. ", db.index, w = index_width);

        // "  1. " + title + padding + "  1965  Fiction          ✓"
        let right_width = 2 + 4 + 2 + GENRE_WIDTH + 2 + 1;
        let fixed_width = 2 + idx_str.width() + right_width;
        let available = width.saturating_sub(fixed_width).max(10);

        let title_author = format!("{} by {}", book.title, book.author);
        let title_display = truncate_to_width(&title_author, available);
        let padding = available.saturating_sub(title_display.width());

        let genre = pad_to_width(&truncate_to_width(&book.genre_label(), GENRE_WIDTH), GENRE_WIDTH);
        let marker = if book.read_status {
            READ_MARKER.green()
        } else {
            UNREAD_MARKER.dimmed()
        };

        output.push_str(&format!(
            "  {}{}{}  {:>4}  {}  {}\n",
            idx_str.yellow(),
            title_display,
            " ".repeat(padding),
            truncate_to_width(&book.year_text(), 4),
            genre.dimmed(),
            marker
        ));
    }
    output
}

pub fn render_full_books(books: &[DisplayBook]) -> String {
    let mut output = String::new();
    for (i, db) in books.iter().enumerate() {
        if i > 0 {
            output.push_str("\n================================\n\n");
        }
        let book = &db.book;
        output.push_str(&format!(
            "{} {} {}\n",
            format!("{}.", db.index).yellow(),
            book.title.bold(),
            format!("[{}]", book.short_id()).dimmed()
        ));
        output.push_str("--------------------------------\n");
        output.push_str(&field_line("Author", &book.author));
        output.push_str(&field_line("Publication year", &book.year_text()));
        output.push_str(&field_line("Genre", &book.genre_label()));
        let status = if book.read_status { "Read" } else { "Unread" };
        output.push_str(&field_line("Status", status));
        let added = match book.added_date {
            Some(date) => format!("{} ({})", date, format_time_ago(date)),
            None => book.added_text(),
        };
        output.push_str(&field_line("Added", &added));
        output.push_str(&field_line("Id", &book.id.to_string()));
    }
    output
}

pub fn render_stats(stats: &LibraryStats, top_authors: usize) -> String {
    let mut output = String::new();
    output.push_str(&field_line("Total books", &stats.total_books.to_string()));
    output.push_str(&field_line("Read books", &stats.read_books.to_string()));
    output.push_str(&field_line(
        "Percent read",
        &format!("{:.2}%", stats.percent_read),
    ));

    if !stats.genres.is_empty() {
        output.push_str(&format!("\n{}\n", "Books by genre".bold()));
        output.push_str(&render_bars(&stats.genres));
    }

    let top = stats.top_authors(top_authors);
    if !top.is_empty() {
        output.push_str(&format!("\n{}\n", "Top authors".bold()));
        for (author, count) in top {
            let noun = if *count == 1 { "book" } else { "books" };
            output.push_str(&format!("  {}: {} {}\n", author, count, noun));
        }
    }

    if !stats.decades.is_empty() {
        output.push_str(&format!("\n{}\n", "Books by decade".bold()));
        let decades: Vec<(String, usize)> = stats
            .decades
            .iter()
            .map(|(decade, count)| (format!("{}s", decade), *count))
            .collect();
        output.push_str(&render_bars(&decades));
    }

    output
}

pub fn render_genres() -> String {
    Genre::ALL
        .iter()
        .map(|g| format!("{}\n", g.label()))
        .collect()
}

fn render_bars(rows: &[(String, usize)]) -> String {
    let label_width = rows.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);

    let mut output = String::new();
    for (label, count) in rows {
        let bar_len = (count * BAR_WIDTH).div_ceil(max);
        output.push_str(&format!(
            "  {}  {:>3}  {}\n",
            pad_to_width(label, label_width),
            count,
            "█".repeat(bar_len).blue()
        ));
    }
    output
}

fn field_line(label: &str, value: &str) -> String {
    format!("{:<18}{}\n", format!("{}:", label), value)
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(added: AddedDate) -> String {
    let duration = Local::now()
        .naive_local()
        .signed_duration_since(added.as_naive());
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

use bookshelf::catalog::SearchField;
use bookshelf::model::Genre;
use clap::{Parser, Subcommand};
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "bookshelf", bin_name = "bookshelf", version)]
#[command(about = "Personal library catalog for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

fn parse_genre(s: &str) -> Result<Genre, String> {
    Genre::from_str(s)
}

fn parse_search_field(s: &str) -> Result<SearchField, String> {
    SearchField::from_str(s)
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the library
    #[command(alias = "a")]
    Add {
        /// Title of the book
        title: String,

        /// Author of the book
        author: String,

        /// Publication year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Genre (see `bookshelf genres`)
        #[arg(short, long, value_parser = parse_genre, default_value = "Fiction")]
        genre: Genre,

        /// Mark the book as already read
        #[arg(short, long)]
        read: bool,
    },

    /// List books
    #[command(alias = "ls")]
    List {
        /// Only show books that have been read
        #[arg(long, conflicts_with = "unread")]
        read: bool,

        /// Only show books that have not been read
        #[arg(long)]
        unread: bool,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the full record of one or more books
    #[command(alias = "v")]
    View {
        /// Books to show (e.g. 1 3-5 6f1c1f5e)
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        books: Vec<String>,
    },

    /// Remove one or more books
    #[command(alias = "rm")]
    Remove {
        /// Books to remove (e.g. 1 3-5 6f1c1f5e)
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        books: Vec<String>,
    },

    /// Mark books as read
    Read {
        /// Books to mark (e.g. 1 3-5)
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        books: Vec<String>,
    },

    /// Mark books as unread
    Unread {
        /// Books to mark (e.g. 1 3-5)
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        books: Vec<String>,
    },

    /// Flip the read status of books
    #[command(alias = "t")]
    Toggle {
        /// Books to flip (e.g. 1 3-5)
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        books: Vec<String>,
    },

    /// Search books by one field
    #[command(alias = "s")]
    Search {
        /// Search term (case-insensitive substring)
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,

        /// Field to search: title, author, genre or publication_year
        #[arg(short, long, value_parser = parse_search_field, default_value = "title")]
        by: SearchField,

        /// Print the matching records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show library statistics
    Stats {
        /// How many authors to list (defaults to the `top-authors` setting)
        #[arg(long)]
        top: Option<usize>,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the genres a book can have
    Genres,

    /// Print the path of the library file
    Path,

    /// Get or set configuration
    Config {
        /// Configuration key (library-file, top-authors, backup-corrupt)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_options() {
        let cli = Cli::try_parse_from([
            "bookshelf",
            "add",
            "Dune",
            "Frank Herbert",
            "--year",
            "1965",
            "--genre",
            "non-fiction",
            "--read",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add {
                title,
                author,
                year,
                genre,
                read,
            }) => {
                assert_eq!(title, "Dune");
                assert_eq!(author, "Frank Herbert");
                assert_eq!(year, Some(1965));
                assert_eq!(genre, Genre::NonFiction);
                assert!(read);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn add_defaults_to_fiction() {
        let cli = Cli::try_parse_from(["bookshelf", "a", "T", "A"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Add {
                genre: Genre::Fiction,
                year: None,
                read: false,
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_genre() {
        assert!(Cli::try_parse_from(["bookshelf", "add", "T", "A", "-g", "Cyberpunk"]).is_err());
    }

    #[test]
    fn remove_accepts_negative_numbers() {
        let cli = Cli::try_parse_from(["bookshelf", "rm", "-1"]).unwrap();
        match cli.command {
            Some(Commands::Remove { books }) => assert_eq!(books, vec!["-1"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn search_joins_words_and_parses_field() {
        let cli =
            Cli::try_parse_from(["bookshelf", "search", "frank", "herbert", "--by", "author"])
                .unwrap();
        match cli.command {
            Some(Commands::Search { term, by, json }) => {
                assert_eq!(term.join(" "), "frank herbert");
                assert_eq!(by, SearchField::Author);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn list_read_and_unread_conflict() {
        assert!(Cli::try_parse_from(["bookshelf", "list", "--read", "--unread"]).is_err());
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::try_parse_from(["bookshelf", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }
}

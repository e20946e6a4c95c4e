use crate::routes::Route;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{}", summarize(.0))]
    Invalid(#[from] clap::Error),
    #[error("Separate the {0} with '|'")]
    MissingSeparator(&'static str),
}

/// First line of a clap error, without the `error: ` prefix and the usage block.
fn summarize(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_owned()
}

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(
    name = "plaza",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    help_template = "commands:\n{subcommands}"
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Eq, PartialEq, Debug, Subcommand)]
pub enum Command {
    /// Show /users, /albums, /albums/<id>, /users/<id>/albums, /photos or /posts
    Go { route: Route },
    /// Log in as the user with exactly this name
    Login {
        /// Name words (joined with spaces)
        #[arg(trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Forget the logged in user
    Logout,
    /// Filter users by name, or photos with `search id <text>` / `search album <text>`
    Search(SearchArgs),
    /// Show page n of the album grid
    Page { page: usize },
    /// Open a user's albums, an album, a photo or a post's comments
    Open { id: u64 },
    /// Close the open photo or comment thread
    Close,
    /// Remove a user from the list
    Remove { id: u64 },
    /// Delete a post, or a comment while a thread is open
    Delete { id: u64 },
    /// Publish a post: post <title> | <body>
    Post(PairArgs),
    /// Reply in the open thread: comment <header> | <body>
    Comment(PairArgs),
    /// Wait for pending requests
    Wait,
    /// Show this list
    #[command(alias = "?")]
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Line::try_parse_from(s.split_whitespace())?.command)
    }
}

/// The command list, rendered from the command definitions.
#[must_use]
pub fn help() -> String {
    Line::command().render_help().to_string()
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum SearchField {
    Name,
    PhotoId,
    AlbumId,
}

#[derive(Clone, Eq, PartialEq, Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct SearchArgs {
    #[command(subcommand)]
    by: Option<SearchBy>,
    /// Text to look for in user names
    #[arg(trailing_var_arg = true)]
    words: Vec<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Subcommand)]
enum SearchBy {
    /// Filter photos by photo id
    Id {
        #[arg(trailing_var_arg = true)]
        words: Vec<String>,
    },
    /// Filter photos by album id
    Album {
        #[arg(trailing_var_arg = true)]
        words: Vec<String>,
    },
}

impl SearchArgs {
    #[must_use]
    pub fn field(&self) -> SearchField {
        match self.by {
            None => SearchField::Name,
            Some(SearchBy::Id { .. }) => SearchField::PhotoId,
            Some(SearchBy::Album { .. }) => SearchField::AlbumId,
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        let words = match &self.by {
            None => &self.words,
            Some(SearchBy::Id { words } | SearchBy::Album { words }) => words,
        };
        words.join(" ")
    }
}

/// Free text holding two parts separated by the first `|`.
#[derive(Clone, Eq, PartialEq, Debug, Args)]
pub struct PairArgs {
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "TEXT"
    )]
    words: Vec<String>,
}

impl PairArgs {
    pub fn split(&self, what: &'static str) -> Result<(String, String), CommandError> {
        let text = self.words.join(" ");
        let (first, second) = text
            .split_once('|')
            .ok_or(CommandError::MissingSeparator(what))?;
        Ok((first.trim().to_owned(), second.trim().to_owned()))
    }
}

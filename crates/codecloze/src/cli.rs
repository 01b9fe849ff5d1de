//! Command-line interface definition using clap.

use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

/// Highlight code for flashcards, keeping cloze markers intact.
///
/// Reads code from the clipboard (or --input), converts it to highlighted
/// HTML and copies the result back to the clipboard.
#[derive(Parser, Debug)]
#[command(name = "codecloze")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Language of the code (see `codecloze languages`)
    ///
    /// Config: format.default_language
    pub language: Option<String>,

    /// Write the HTML to a file as well
    ///
    /// Without a value the configured file is used.
    ///
    /// Config: output.file
    #[arg(
        short,
        long,
        num_args = 0..=1,
        value_name = "FILE",
        value_hint = ValueHint::FilePath
    )]
    pub output: Option<Option<PathBuf>>,

    /// Read code from a file instead of the clipboard ("-" for stdin)
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Print the HTML to stdout
    #[arg(short, long)]
    pub print: bool,

    /// Do not copy the HTML to the clipboard
    ///
    /// Config: clipboard.copy
    #[arg(long)]
    pub no_clipboard: bool,

    /// Path to configuration file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the supported languages
    Languages,
    /// Generate shell completion scripts
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Generate a default configuration file
    Init {
        /// Overwrite existing configuration file
        #[arg(long, short)]
        force: bool,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

impl Cli {
    /// Print shell completions to stdout.
    pub fn print_completions(shell: Shell) {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "codecloze", &mut io::stdout());
    }

    /// Generate shell completions as a string for testing.
    #[cfg(test)]
    fn generate_completions_string(shell: Shell) -> String {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        generate(shell, &mut cmd, "codecloze", &mut buf);
        String::from_utf8(buf).expect("Completions should be valid UTF-8")
    }
}

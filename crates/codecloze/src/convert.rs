//! The convert command: read code, format it, deliver the HTML.

use crate::cli::Cli;
use crate::clipboard;
use crate::config::Config;
use anyhow::{Context, Result};
use codecloze_core::{CardFormatter, Language};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Where the code comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Clipboard,
    Stdin,
    File(PathBuf),
}

/// A conversion with CLI flags and config already merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub language: Language,
    pub source: Source,
    pub output_file: Option<PathBuf>,
    pub copy_to_clipboard: bool,
    pub print: bool,
    pub echo_source: bool,
}

impl Conversion {
    /// Merge CLI flags over `config`.
    ///
    /// Fails on an unknown language before any input is read.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let tag = cli
            .language
            .as_deref()
            .unwrap_or(&config.format.default_language);
        let language: Language = tag.parse()?;

        let source = match &cli.input {
            None => Source::Clipboard,
            Some(path) if path.as_os_str() == "-" => Source::Stdin,
            Some(path) => Source::File(path.clone()),
        };
        let output_file = cli
            .output
            .as_ref()
            .map(|path| path.clone().unwrap_or_else(|| config.output.file.clone()));

        Ok(Conversion {
            language,
            source,
            output_file,
            copy_to_clipboard: config.clipboard.copy && !cli.no_clipboard,
            print: cli.print,
            echo_source: config.format.echo_source,
        })
    }

    /// Read, format and deliver.
    pub fn run(&self) -> Result<()> {
        let code = self.read_source()?;

        eprintln!("Converting {} to HTML", self.language);
        if self.echo_source {
            eprintln!("\n{}\n", code);
        }

        let html = CardFormatter::new().format(&code, self.language);
        log::debug!("Generated {} bytes of HTML", html.len());

        if let Some(path) = &self.output_file {
            write_output(path, &html)?;
            eprintln!("Outputted to {}", path.display());
        }
        if self.copy_to_clipboard {
            clipboard::write_text(&html)?;
            eprintln!("Copied to clipboard!");
        }
        if self.print {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("Failed to write to stdout")?;
        }
        Ok(())
    }

    fn read_source(&self) -> Result<String> {
        match &self.source {
            Source::Clipboard => clipboard::read_text(),
            Source::Stdin => {
                let mut code = String::new();
                io::stdin()
                    .read_to_string(&mut code)
                    .context("Failed to read stdin")?;
                Ok(code)
            }
            Source::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display())),
        }
    }
}

fn write_output(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write output file: {}", path.display()))
}

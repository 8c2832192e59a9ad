/*!
 * Configuration handling for codemerge
 */

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use clap_complete::Shell;
use strum::{Display, EnumIter, EnumString};

use crate::bail;
use crate::error::Result;

/// Source languages the merger understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    /// Go packages: one `package` line and a consolidated import block
    #[strum(to_string = "go", serialize = "golang")]
    Go,
    /// C# projects: hoisted `using` declarations and one unified namespace
    #[strum(to_string = "csharp", serialize = "cs", serialize = "c#")]
    CSharp,
}

impl Language {
    /// Canonical source file extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::CSharp => "cs",
        }
    }
}

/// Command-line arguments for codemerge
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codemerge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Merge the source files of a Go or C# project into one file",
    long_about = "Concatenates every source file of a single-language project into one combined file, hoisting and deduplicating imports and unifying the package or namespace, for pasting into code review, LLM prompts or archives."
)]
pub struct Args {
    /// Directory to scan for source files
    #[clap(short, long, default_value = ".")]
    pub dir: String,

    /// Source language of the project (go, csharp)
    #[clap(short, long, default_value = "go")]
    pub lang: String,

    /// Copy output to clipboard
    #[clap(short, long, alias = "clip", help = "Copy output to system clipboard")]
    pub clipboard: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory to merge
    pub target_dir: PathBuf,

    /// Selected source language
    pub language: Language,

    /// Copy output to clipboard
    pub clipboard: bool,

    /// Log verbosity requested on the command line
    pub verbosity: u8,
}

impl Config {
    /// Create configuration from command-line arguments
    ///
    /// Fails on an unsupported language before touching the filesystem.
    pub fn from_args(args: Args) -> Result<Self> {
        let language = match Language::from_str(args.lang.trim()) {
            Ok(language) => language,
            Err(_) => bail!(UnsupportedLanguage, "{}", args.lang),
        };

        Ok(Self {
            target_dir: PathBuf::from(args.dir),
            language,
            clipboard: args.clipboard,
            verbosity: args.verbose,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.is_dir() {
            bail!(
                PathNotFound,
                "Target directory not found: {}",
                self.target_dir.display()
            );
        }

        Ok(())
    }
}

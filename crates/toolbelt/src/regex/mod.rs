use crate::prelude::{println, *};
use toolbelt_core::pattern::PatternFlags;

pub mod find;
pub mod replace;

#[derive(Debug, clap::Parser)]
#[command(name = "regex")]
#[command(about = "Test regular expressions and preview replacements")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List matches with capture groups and a highlighted preview
    #[clap(name = "find")]
    Find(find::FindOptions),

    /// Replace matches using a template with $1 backreferences
    #[clap(name = "replace")]
    Replace(replace::ReplaceOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Find(options) => find::run(options, global).await,
        Commands::Replace(options) => replace::run(options, global).await,
    }
}

/// Matching flags shared by the regex subcommands.
#[derive(Debug, clap::Args, Clone)]
pub struct FlagOptions {
    /// Stop after the first match instead of finding all of them
    #[arg(long)]
    pub first: bool,

    /// Case-insensitive matching
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// ^ and $ match at line boundaries, not just the ends of the input
    #[arg(short = 'm', long)]
    pub multiline: bool,

    /// . also matches newlines
    #[arg(short = 's', long)]
    pub dot_all: bool,

    /// Restrict \w, \d, \s and \b to ASCII
    #[arg(long)]
    pub ascii: bool,

    /// Anchor every match to the current scan position
    #[arg(short = 'y', long)]
    pub sticky: bool,
}

impl FlagOptions {
    pub fn to_flags(&self) -> PatternFlags {
        PatternFlags {
            global: !self.first,
            ignore_case: self.ignore_case,
            multiline: self.multiline,
            dot_all: self.dot_all,
            unicode: !self.ascii,
            sticky: self.sticky,
        }
    }
}

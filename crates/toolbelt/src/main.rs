#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod calc;
mod case;
mod convert;
mod count;
mod encode;
mod error;
mod gen;
mod hash;
mod input;
mod merge;
mod prelude;
mod regex;
mod replace;
mod units;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "A toolbox of text and data utilities for the command line"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "TOOLBELT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Convert between CSV, JSON and XML
    Convert(crate::convert::ConvertOptions),

    /// Test regular expressions and preview replacements
    Regex(crate::regex::App),

    /// Convert text between case styles
    Case(crate::case::CaseOptions),

    /// Count words, characters, lines and paragraphs
    Count(crate::count::CountOptions),

    /// Find and replace text, literally or with a pattern
    Replace(crate::replace::ReplaceOptions),

    /// Transcode between text encodings
    Encode(crate::encode::EncodeOptions),

    /// Generate MD5, SHA-1 and SHA-256 digests
    Hash(crate::hash::HashOptions),

    /// Convert between measurement units
    Units(crate::units::UnitsOptions),

    /// Generate lorem ipsum or passwords
    Gen(crate::gen::App),

    /// Percentage and tip calculators
    Calc(crate::calc::App),

    /// Merge text files into one document
    Merge(crate::merge::MergeOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Convert(options) => crate::convert::run(options, app.global).await,
        SubCommands::Regex(sub_app) => crate::regex::run(sub_app, app.global).await,
        SubCommands::Case(options) => crate::case::run(options, app.global).await,
        SubCommands::Count(options) => crate::count::run(options, app.global).await,
        SubCommands::Replace(options) => crate::replace::run(options, app.global).await,
        SubCommands::Encode(options) => crate::encode::run(options, app.global).await,
        SubCommands::Hash(options) => crate::hash::run(options, app.global).await,
        SubCommands::Units(options) => crate::units::run(options, app.global).await,
        SubCommands::Gen(sub_app) => crate::gen::run(sub_app, app.global).await,
        SubCommands::Calc(sub_app) => crate::calc::run(sub_app, app.global).await,
        SubCommands::Merge(options) => crate::merge::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

use crate::prelude::{println, *};
use rand::rngs::StdRng;
use rand::SeedableRng;
use toolbelt_core::generate::{self, PasswordOptions as CorePasswordOptions};

#[derive(Debug, clap::Parser)]
#[command(name = "gen")]
#[command(about = "Generate lorem ipsum or passwords")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Generate lorem ipsum filler text
    #[clap(name = "lorem")]
    Lorem(LoremOptions),

    /// Generate a random password
    #[clap(name = "password")]
    Password(PasswordOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Lorem(options) => lorem(options, global).await,
        Commands::Password(options) => password(options, global).await,
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[derive(Debug, clap::Args, Clone)]
pub struct LoremOptions {
    /// Number of paragraphs
    #[arg(short, long, default_value = "3")]
    pub paragraphs: usize,

    /// Words per paragraph
    #[arg(short, long, default_value = "50")]
    pub words: usize,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct LoremOutput {
    pub paragraphs: usize,
    pub words_per_paragraph: usize,
    pub text: String,
}

pub async fn lorem(options: LoremOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Generating {} paragraph(s) of {} words...",
            options.paragraphs, options.words
        );
    }

    let text = generate::lorem_ipsum(options.paragraphs, options.words, &mut rng(options.seed));

    if options.json {
        let output = LoremOutput {
            paragraphs: options.paragraphs,
            words_per_paragraph: options.words,
            text,
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
    } else {
        println!("{}", text);
    }
    Ok(())
}

#[derive(Debug, clap::Args, Clone)]
pub struct PasswordOptions {
    /// Password length
    #[arg(short, long, default_value = "16")]
    pub length: usize,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lowercase: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_numbers: bool,

    /// Include punctuation symbols
    #[arg(short, long)]
    pub symbols: bool,

    /// Drop characters that look alike (il1Lo0O)
    #[arg(long)]
    pub exclude_similar: bool,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct PasswordOutput {
    pub length: usize,
    pub password: String,
}

pub async fn password(options: PasswordOptions, global: crate::Global) -> Result<()> {
    let core_options = CorePasswordOptions {
        length: options.length,
        uppercase: !options.no_uppercase,
        lowercase: !options.no_lowercase,
        numbers: !options.no_numbers,
        symbols: options.symbols,
        exclude_similar: options.exclude_similar,
    };

    let password = generate::generate_password(&core_options, &mut rng(options.seed))?;

    if options.json {
        let output = PasswordOutput {
            length: options.length,
            password,
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
    } else {
        println!("{}", password);
    }
    Ok(())
}

use crate::prelude::{println, *};
use toolbelt_core::calc::{self, TipSplit};

#[derive(Debug, clap::Parser)]
#[command(name = "calc")]
#[command(about = "Percentage and tip calculators")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// PCT percent of VALUE
    #[clap(name = "percent-of")]
    PercentOf {
        #[arg(value_name = "PCT")]
        pct: f64,
        #[arg(value_name = "VALUE")]
        value: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// What percent PART is of WHOLE
    #[clap(name = "what-percent")]
    WhatPercent {
        #[arg(value_name = "PART")]
        part: f64,
        #[arg(value_name = "WHOLE")]
        whole: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Percentage change from FROM to TO
    #[clap(name = "change")]
    Change {
        #[arg(value_name = "FROM")]
        from: f64,
        #[arg(value_name = "TO")]
        to: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a bill plus tip among a party
    #[clap(name = "tip")]
    Tip(TipOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct TipOptions {
    /// Bill amount
    #[arg(value_name = "BILL")]
    pub bill: f64,

    /// Tip percentage
    #[arg(short, long, default_value = "15")]
    pub tip: f64,

    /// Party size
    #[arg(short, long, default_value = "1")]
    pub people: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct CalcOutput {
    pub operation: &'static str,
    pub result: f64,
}

fn output_result(operation: &'static str, result: f64, json: bool, suffix: &str) -> Result<()> {
    if json {
        let output = CalcOutput { operation, result };
        let serialized = serde_json::to_string_pretty(&output)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", serialized);
    } else {
        println!("{}{}", result, suffix);
    }
    Ok(())
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::PercentOf { pct, value, json } => {
            output_result("percent-of", calc::percent_of(pct, value), json, "")
        }
        Commands::WhatPercent { part, whole, json } => {
            output_result("what-percent", calc::what_percent(part, whole)?, json, "%")
        }
        Commands::Change { from, to, json } => {
            output_result("change", calc::percent_change(from, to)?, json, "%")
        }
        Commands::Tip(options) => tip(options, global).await,
    }
}

pub async fn tip(options: TipOptions, global: crate::Global) -> Result<()> {
    let split = calc::split_tip(options.bill, options.tip, options.people);

    if options.json {
        let json = serde_json::to_string_pretty(&split)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
    } else {
        print!("{}", format_tip_text(&split, options.people.max(1)));
    }

    Ok(())
}

pub fn format_tip_text(split: &TipSplit, people: u32) -> String {
    let mut table = new_table();
    table.add_row(prettytable::row!["Tip", f!("{:.2}", split.tip)]);
    table.add_row(prettytable::row!["Total", f!("{:.2}", split.total)]);
    if people > 1 {
        table.add_row(prettytable::row![
            "Per person",
            f!("{:.2}", split.per_person)
        ]);
        table.add_row(prettytable::row![
            "Tip per person",
            f!("{:.2}", split.tip_per_person)
        ]);
    }
    table.to_string()
}

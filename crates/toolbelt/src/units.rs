use crate::prelude::{println, *};
use toolbelt_core::units::{convert_unit, UnitCategory};

#[derive(Debug, clap::Args, Clone)]
pub struct UnitsOptions {
    /// Value to convert
    #[arg(value_name = "VALUE")]
    pub value: f64,

    /// Source unit
    #[arg(value_name = "FROM")]
    pub from: String,

    /// Target unit
    #[arg(value_name = "TO")]
    pub to: String,

    /// Unit category: length, weight, temperature, area, volume
    #[arg(short, long, default_value = "length")]
    pub category: UnitCategory,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct UnitsOutput {
    pub category: UnitCategory,
    pub value: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
}

pub async fn run(options: UnitsOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!(
            "Converting {} {} to {} ({})...",
            options.value, options.from, options.to, options.category
        );
    }

    let result = convert_unit(options.value, &options.from, &options.to, options.category)?;
    let output = UnitsOutput {
        category: options.category,
        value: options.value,
        from: options.from,
        to: options.to,
        result,
    };

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|err| eyre!("JSON serialization failed: {}", err))?;
        println!("{}", json);
    } else {
        println!("{}", format_units_text(&output));
    }

    Ok(())
}

pub fn format_units_text(output: &UnitsOutput) -> String {
    f!(
        "{} {} = {} {}",
        output.value, output.from, output.result, output.to
    )
}

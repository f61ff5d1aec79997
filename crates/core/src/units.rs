//! Unit conversion over static factor tables.
//!
//! Every category converts through a base unit (millimetres, milligrams,
//! square millimetres, millilitres); temperature converts through Celsius.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
    Area,
    Volume,
}

impl UnitCategory {
    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Weight => "weight",
            UnitCategory::Temperature => "temperature",
            UnitCategory::Area => "area",
            UnitCategory::Volume => "volume",
        }
    }

    /// Units this category accepts, for error messages and listings.
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            UnitCategory::Length => &["mm", "cm", "m", "km", "in", "ft", "yd", "mi"],
            UnitCategory::Weight => &["mg", "g", "kg", "oz", "lb"],
            UnitCategory::Temperature => &["celsius", "fahrenheit", "kelvin"],
            UnitCategory::Area => &["mm2", "cm2", "m2", "km2", "in2", "ft2", "yd2", "mi2"],
            UnitCategory::Volume => &["ml", "l", "gal-us", "gal-uk", "qt", "pt", "cup", "floz"],
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "length" => Ok(UnitCategory::Length),
            "weight" => Ok(UnitCategory::Weight),
            "temperature" | "temp" => Ok(UnitCategory::Temperature),
            "area" => Ok(UnitCategory::Area),
            "volume" => Ok(UnitCategory::Volume),
            other => Err(format!(
                "unknown category: {other}. Valid categories: length, weight, temperature, area, volume"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("unknown {category} unit {unit:?}; valid units: {}", .category.units().join(", "))]
    UnknownUnit {
        category: UnitCategory,
        unit: String,
    },
}

/// Factor converting one of `category`'s units to its base unit.
fn factor(category: UnitCategory, unit: &str) -> Option<f64> {
    let factor = match (category, unit) {
        (UnitCategory::Length, "mm") => 1.0,
        (UnitCategory::Length, "cm") => 10.0,
        (UnitCategory::Length, "m") => 1_000.0,
        (UnitCategory::Length, "km") => 1_000_000.0,
        (UnitCategory::Length, "in") => 25.4,
        (UnitCategory::Length, "ft") => 304.8,
        (UnitCategory::Length, "yd") => 914.4,
        (UnitCategory::Length, "mi") => 1_609_344.0,

        (UnitCategory::Weight, "mg") => 1.0,
        (UnitCategory::Weight, "g") => 1_000.0,
        (UnitCategory::Weight, "kg") => 1_000_000.0,
        (UnitCategory::Weight, "oz") => 28_349.5,
        (UnitCategory::Weight, "lb") => 453_592.0,

        (UnitCategory::Area, "mm2") => 1.0,
        (UnitCategory::Area, "cm2") => 100.0,
        (UnitCategory::Area, "m2") => 1_000_000.0,
        (UnitCategory::Area, "km2") => 1_000_000_000_000.0,
        (UnitCategory::Area, "in2") => 645.16,
        (UnitCategory::Area, "ft2") => 92_903.04,
        (UnitCategory::Area, "yd2") => 836_127.36,
        (UnitCategory::Area, "mi2") => 2_589_988_110_336.0,

        (UnitCategory::Volume, "ml") => 1.0,
        (UnitCategory::Volume, "l") => 1_000.0,
        (UnitCategory::Volume, "gal-us") => 3_785.41,
        (UnitCategory::Volume, "gal-uk") => 4_546.09,
        (UnitCategory::Volume, "qt") => 946.353,
        (UnitCategory::Volume, "pt") => 473.176,
        (UnitCategory::Volume, "cup") => 236.588,
        (UnitCategory::Volume, "floz") => 29.5735,

        _ => return None,
    };
    Some(factor)
}

fn convert_temperature(value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
    let unknown = |unit: &str| UnitError::UnknownUnit {
        category: UnitCategory::Temperature,
        unit: unit.to_string(),
    };

    let celsius = match from {
        "celsius" | "c" => value,
        "fahrenheit" | "f" => (value - 32.0) * 5.0 / 9.0,
        "kelvin" | "k" => value - 273.15,
        other => return Err(unknown(other)),
    };
    match to {
        "celsius" | "c" => Ok(celsius),
        "fahrenheit" | "f" => Ok(celsius * 9.0 / 5.0 + 32.0),
        "kelvin" | "k" => Ok(celsius + 273.15),
        other => Err(unknown(other)),
    }
}

pub fn convert_unit(
    value: f64,
    from: &str,
    to: &str,
    category: UnitCategory,
) -> Result<f64, UnitError> {
    let from = from.to_ascii_lowercase();
    let to = to.to_ascii_lowercase();

    if category == UnitCategory::Temperature {
        return convert_temperature(value, &from, &to);
    }

    let from_factor = factor(category, &from).ok_or_else(|| UnitError::UnknownUnit {
        category,
        unit: from.clone(),
    })?;
    let to_factor = factor(category, &to).ok_or_else(|| UnitError::UnknownUnit {
        category,
        unit: to.clone(),
    })?;

    // Convert to the base unit, then to the target unit.
    Ok(value * from_factor / to_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_length() {
        close(convert_unit(1.0, "in", "cm", UnitCategory::Length).unwrap(), 2.54);
        close(convert_unit(1.0, "km", "m", UnitCategory::Length).unwrap(), 1000.0);
        close(
            convert_unit(1.0, "mi", "km", UnitCategory::Length).unwrap(),
            1.609344,
        );
    }

    #[test]
    fn test_weight() {
        close(convert_unit(1.0, "kg", "g", UnitCategory::Weight).unwrap(), 1000.0);
        close(
            convert_unit(1.0, "lb", "kg", UnitCategory::Weight).unwrap(),
            0.453592,
        );
    }

    #[test]
    fn test_area() {
        close(convert_unit(1.0, "m2", "cm2", UnitCategory::Area).unwrap(), 10_000.0);
    }

    #[test]
    fn test_volume() {
        close(convert_unit(2.0, "l", "ml", UnitCategory::Volume).unwrap(), 2000.0);
    }

    #[test]
    fn test_temperature() {
        close(
            convert_unit(212.0, "fahrenheit", "celsius", UnitCategory::Temperature).unwrap(),
            100.0,
        );
        close(
            convert_unit(0.0, "celsius", "kelvin", UnitCategory::Temperature).unwrap(),
            273.15,
        );
        close(
            convert_unit(100.0, "c", "f", UnitCategory::Temperature).unwrap(),
            212.0,
        );
    }

    #[test]
    fn test_same_unit_is_identity() {
        close(convert_unit(7.5, "m", "m", UnitCategory::Length).unwrap(), 7.5);
        close(
            convert_unit(7.5, "kelvin", "kelvin", UnitCategory::Temperature).unwrap(),
            7.5,
        );
    }

    #[test]
    fn test_unknown_unit_is_an_error() {
        let err = convert_unit(1.0, "furlong", "m", UnitCategory::Length).unwrap_err();
        assert_eq!(
            err,
            UnitError::UnknownUnit {
                category: UnitCategory::Length,
                unit: "furlong".to_string(),
            }
        );
        assert!(err.to_string().contains("mm, cm"));
    }
}

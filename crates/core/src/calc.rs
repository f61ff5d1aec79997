//! Percentage and tip arithmetic.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("cannot take a percentage of zero")]
    ZeroWhole,

    #[error("cannot compute a change from zero")]
    ZeroBase,
}

/// `pct`% of `value`.
pub fn percent_of(pct: f64, value: f64) -> f64 {
    value * pct / 100.0
}

/// What percent `part` is of `whole`.
pub fn what_percent(part: f64, whole: f64) -> Result<f64, CalcError> {
    if whole == 0.0 {
        return Err(CalcError::ZeroWhole);
    }
    Ok(part / whole * 100.0)
}

/// Percentage change going from `from` to `to`; positive for an increase.
pub fn percent_change(from: f64, to: f64) -> Result<f64, CalcError> {
    if from == 0.0 {
        return Err(CalcError::ZeroBase);
    }
    Ok((to - from) / from * 100.0)
}

/// A bill split including tip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TipSplit {
    pub tip: f64,
    pub total: f64,
    pub per_person: f64,
    pub tip_per_person: f64,
}

/// Split `bill` plus a `tip_percent` tip among `people`. A party of zero is
/// treated as one person.
pub fn split_tip(bill: f64, tip_percent: f64, people: u32) -> TipSplit {
    let people = people.max(1) as f64;
    let tip = bill * tip_percent / 100.0;
    let total = bill + tip;
    TipSplit {
        tip,
        total,
        per_person: total / people,
        tip_per_person: tip / people,
    }
}

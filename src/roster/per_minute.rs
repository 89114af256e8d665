use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

use super::models::{PlayerPerMinuteRecord, PlayerStatLine};

#[derive(Debug, Error, PartialEq)]
pub enum PerMinuteError {
    #[error("{field} per minute for '{player}' is not a finite number")]
    NonFinite { player: String, field: &'static str },
}

/// Denominator for rate stats. Players without recorded minutes fall back to
/// a one-minute denominator, so their rates equal their raw totals.
pub fn safe_minutes(mpg: f64) -> f64 {
    if mpg > 0.0 {
        mpg
    } else {
        1.0
    }
}

/// Round to two decimal places, ties away from zero.
///
/// Rounding happens on the shortest decimal representation of `value`, so
/// `1.005` becomes `1.01` rather than following the binary expansion down.
pub fn round2(value: f64) -> f64 {
    Decimal::from_str(&value.to_string())
        .ok()
        .and_then(|d| {
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .to_string()
                .parse::<f64>()
                .ok()
        })
        .unwrap_or_else(|| {
            // Outside Decimal's range: either already integral or far below a cent
            if value.abs() < 1.0 {
                (value * 100.0).round() / 100.0
            } else {
                value
            }
        })
}

fn rate(player: &str, field: &'static str, raw: f64, minutes: f64) -> Result<f64, PerMinuteError> {
    let value = round2(raw / minutes);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PerMinuteError::NonFinite {
            player: player.to_string(),
            field,
        })
    }
}

pub fn to_per_minute(line: PlayerStatLine) -> Result<PlayerPerMinuteRecord, PerMinuteError> {
    let minutes = safe_minutes(line.mpg);
    let name = line.name.as_str();

    Ok(PlayerPerMinuteRecord {
        ppm: rate(name, "ppm", line.pts, minutes)?,
        apm: rate(name, "apm", line.ast, minutes)?,
        rpm: rate(name, "rpm", line.reb, minutes)?,
        tpm: rate(name, "tpm", line.tpg, minutes)?,
        fpm: rate(name, "fpm", line.fpg, minutes)?,
        mpg: line.mpg,
        position: line.position,
        name: line.name,
    })
}

/// Transform a roster in backend order. Records are independent; the first
/// failing record aborts the whole batch.
pub fn per_minute_roster(
    lines: Vec<PlayerStatLine>,
) -> Result<Vec<PlayerPerMinuteRecord>, PerMinuteError> {
    lines.into_iter().map(to_per_minute).collect()
}

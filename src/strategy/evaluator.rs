//! Trade evaluator.
//!
//! Risk, reward and risk/reward ratio for a single setup, plus the
//! Premium/Discount classification of the entry against the user's zone.
//! All functions are total: no inputs produce an error or a NaN from
//! division by zero.

use crate::types::{Evaluation, RrTier, TradeInputs, ZoneSide};

// ---------------------------------------------------------------------------
// Tier thresholds
// ---------------------------------------------------------------------------

/// RR at or above this is graded strong.
pub const STRONG_RR: f64 = 3.0;
/// RR at or above this (and below `STRONG_RR`) is graded moderate.
pub const MODERATE_RR: f64 = 2.0;

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate one trade setup.
///
/// risk   = |entry - sl|
/// reward = |tp - entry|
/// rr     = reward / risk, or 0 when risk is 0
///
/// The entry is Premium when strictly above the zone midpoint; a tie
/// goes to Discount.
pub fn evaluate(entry: f64, sl: f64, tp: f64, zone_high: f64, zone_low: f64) -> Evaluation {
    let risk = (entry - sl).abs();
    let reward = (tp - entry).abs();
    let rr = if risk == 0.0 { 0.0 } else { reward / risk };

    Evaluation {
        risk,
        reward,
        rr,
        zone: classify_zone(entry, zone_high, zone_low),
    }
}

/// Evaluate the numbers from a filled-in trade form.
pub fn evaluate_inputs(inputs: &TradeInputs) -> Evaluation {
    evaluate(
        inputs.entry,
        inputs.stop_loss,
        inputs.take_profit,
        inputs.zone_high,
        inputs.zone_low,
    )
}

/// Premium if the entry sits in the upper half of the zone, else Discount.
pub fn classify_zone(entry: f64, zone_high: f64, zone_low: f64) -> ZoneSide {
    let mid = (zone_high + zone_low) / 2.0;
    if entry > mid {
        ZoneSide::Premium
    } else {
        ZoneSide::Discount
    }
}

/// Grade an RR: >= 3 strong, [2, 3) moderate, below 2 weak.
pub fn classify_rr(rr: f64) -> RrTier {
    if rr >= STRONG_RR {
        RrTier::Strong
    } else if rr >= MODERATE_RR {
        RrTier::Moderate
    } else {
        RrTier::Weak
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Shared types for the GOLDDESK assistant.
//!
//! Quotes, zone labels, trade inputs, evaluations and saved plans, plus the
//! error enums used across the price, session and dashboard modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

/// A live gold quote in USD per troy ounce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub fetched_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            fetched_at: Utc::now(),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} USD", self.price)
    }
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

/// The zone types offered by the zone selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneLabel {
    #[serde(rename = "Demand Zone")]
    Demand,
    #[serde(rename = "Supply Zone")]
    Supply,
    #[serde(rename = "Bullish Order Block")]
    BullishOrderBlock,
    #[serde(rename = "Bearish Order Block")]
    BearishOrderBlock,
    #[serde(rename = "Fair Value Gap")]
    FairValueGap,
    #[serde(rename = "Liquidity Pool")]
    LiquidityPool,
}

impl ZoneLabel {
    pub const ALL: [ZoneLabel; 6] = [
        ZoneLabel::Demand,
        ZoneLabel::Supply,
        ZoneLabel::BullishOrderBlock,
        ZoneLabel::BearishOrderBlock,
        ZoneLabel::FairValueGap,
        ZoneLabel::LiquidityPool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneLabel::Demand => "Demand Zone",
            ZoneLabel::Supply => "Supply Zone",
            ZoneLabel::BullishOrderBlock => "Bullish Order Block",
            ZoneLabel::BearishOrderBlock => "Bearish Order Block",
            ZoneLabel::FairValueGap => "Fair Value Gap",
            ZoneLabel::LiquidityPool => "Liquidity Pool",
        }
    }
}

impl fmt::Display for ZoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of the user's zone the entry sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneSide {
    Premium,
    Discount,
}

impl ZoneSide {
    /// Directional hint shown next to the classification.
    /// Premium favours selling, Discount favours buying.
    pub fn bias(&self) -> &'static str {
        match self {
            ZoneSide::Premium => "sell",
            ZoneSide::Discount => "buy",
        }
    }
}

impl fmt::Display for ZoneSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneSide::Premium => write!(f, "Premium"),
            ZoneSide::Discount => write!(f, "Discount"),
        }
    }
}

/// Qualitative grade of a risk/reward ratio. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RrTier {
    Strong,
    Moderate,
    Weak,
}

impl fmt::Display for RrTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RrTier::Strong => write!(f, "strong"),
            RrTier::Moderate => write!(f, "moderate"),
            RrTier::Weak => write!(f, "weak"),
        }
    }
}

// ---------------------------------------------------------------------------
// Trade inputs / evaluation
// ---------------------------------------------------------------------------

/// The numbers and zone label entered on the trade form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeInputs {
    pub zone: ZoneLabel,
    pub zone_high: f64,
    pub zone_low: f64,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// Result of running the evaluator over one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub risk: f64,
    pub reward: f64,
    /// Reward over risk; 0 when risk is 0.
    pub rr: f64,
    pub zone: ZoneSide,
}

// ---------------------------------------------------------------------------
// Trade plan
// ---------------------------------------------------------------------------

/// A saved snapshot of one evaluation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub zone_label: ZoneLabel,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub rr: f64,
    pub zone: ZoneSide,
    pub created_at: DateTime<Utc>,
}

impl TradePlan {
    pub fn from_evaluation(inputs: &TradeInputs, eval: &Evaluation) -> Self {
        Self {
            zone_label: inputs.zone,
            entry: inputs.entry,
            stop_loss: inputs.stop_loss,
            take_profit: inputs.take_profit,
            rr: eval.rr,
            zone: eval.zone,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for TradePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] entry {:.2} | SL {:.2} | TP {:.2} | RR {:.2} | {}",
            self.zone_label, self.entry, self.stop_loss, self.take_profit, self.rr, self.zone,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a price fetch did not produce a quote.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("No API key found in the secret store or environment")]
    NoApiKey,

    #[error("Request failed: {0}")]
    RequestException(String),

    #[error("Price API returned HTTP {0}")]
    HttpError(u16),

    #[error("Invalid price response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Message shown on the page when a fetch fails.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::NoApiKey => {
                "No GoldAPI key configured. Add GOLDAPI_KEY to secrets.toml or the environment."
                    .to_string()
            }
            FetchError::RequestException(_) => {
                "Could not reach the gold price API. Check the connection and try again."
                    .to_string()
            }
            FetchError::HttpError(status) => {
                format!("Gold price API error (HTTP {status}). Try again later.")
            }
            FetchError::InvalidResponse(_) => {
                "Gold price API answered without a usable price.".to_string()
            }
        }
    }
}

/// Errors surfaced by the desk server.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

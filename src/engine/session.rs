//! Per-session desk state.
//!
//! A `Session` is the explicit state object every handler works on: the
//! last fetched quote and the session's saved plans. Handlers receive the
//! session, apply one user action and leave the updated state behind.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::storage::{PlanStore, PlanSummary};
use crate::strategy::{classify_rr, evaluate_inputs};
use crate::types::{Evaluation, FetchError, Quote, RrTier, TradeInputs, TradePlan};

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Outcome of a fetch, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchNotice {
    pub ok: bool,
    pub message: String,
    /// The fetched price on success, `None` on failure.
    pub price: Option<f64>,
}

/// Starting values for the trade form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormDefaults {
    pub zone_high: f64,
    pub zone_low: f64,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// An evaluation plus its display-only grading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationView {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub tier: RrTier,
    pub bias: &'static str,
}

/// Everything the page needs for a full render.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub quote: Option<Quote>,
    pub defaults: FormDefaults,
    pub plans: Vec<TradePlan>,
    pub summary: PlanSummary,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Session {
    quote: Option<Quote>,
    plans: PlanStore,
    pub created_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            quote: None,
            plans: PlanStore::new(),
            created_at: Utc::now(),
        }
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn plans(&self) -> &PlanStore {
        &self.plans
    }

    /// Apply the result of a fetch attempt.
    ///
    /// Success replaces the quote. Failure leaves any earlier quote in place.
    pub fn record_fetch(&mut self, result: Result<f64, FetchError>) -> FetchNotice {
        match result {
            Ok(price) => {
                let quote = Quote::new(price);
                self.quote = Some(quote);
                info!(price, "Quote updated");
                FetchNotice {
                    ok: true,
                    message: format!("Latest price: {quote}"),
                    price: Some(price),
                }
            }
            Err(e) => {
                warn!(error = %e, kept_quote = self.quote.is_some(), "Gold price fetch failed");
                FetchNotice {
                    ok: false,
                    message: e.user_message(),
                    price: None,
                }
            }
        }
    }

    /// Every numeric field starts at the current price, or 0 without one.
    pub fn form_defaults(&self) -> FormDefaults {
        let p = self.quote.map(|q| q.price).unwrap_or(0.0);
        FormDefaults {
            zone_high: p,
            zone_low: p,
            entry: p,
            stop_loss: p,
            take_profit: p,
        }
    }

    pub fn evaluate(&self, inputs: &TradeInputs) -> EvaluationView {
        let evaluation = evaluate_inputs(inputs);
        EvaluationView {
            evaluation,
            tier: classify_rr(evaluation.rr),
            bias: evaluation.zone.bias(),
        }
    }

    /// Evaluate the inputs and append the result as a new plan.
    pub fn save_plan(&mut self, inputs: &TradeInputs) -> TradePlan {
        let evaluation = evaluate_inputs(inputs);
        let plan = TradePlan::from_evaluation(inputs, &evaluation);
        self.plans.append(plan.clone());
        info!(
            zone = %plan.zone_label,
            entry = plan.entry,
            rr = format!("{:.2}", plan.rr),
            side = %plan.zone,
            total = self.plans.len(),
            "Plan saved"
        );
        plan
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            quote: self.quote,
            defaults: self.form_defaults(),
            plans: self.plans.list_all().to_vec(),
            summary: self.plans.summary(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

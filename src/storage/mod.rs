//! Plan store.
//!
//! Append-only, insertion-ordered list of saved trade plans. Lives only as
//! long as the session that owns it; nothing is written to disk.

use serde::Serialize;

use crate::strategy::classify_rr;
use crate::types::{RrTier, TradePlan, ZoneSide};

#[derive(Debug, Clone, Default)]
pub struct PlanStore {
    plans: Vec<TradePlan>,
}

/// Aggregates over the saved plans, used for the page's chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub count: usize,
    pub average_rr: Option<f64>,
    pub best_rr: Option<f64>,
    pub strong: usize,
    pub moderate: usize,
    pub weak: usize,
    pub premium: usize,
    pub discount: usize,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plan at the end. Existing plans are never touched.
    pub fn append(&mut self, plan: TradePlan) {
        self.plans.push(plan);
    }

    /// All plans in the order they were saved.
    pub fn list_all(&self) -> &[TradePlan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn summary(&self) -> PlanSummary {
        let count = self.plans.len();
        let mut summary = PlanSummary {
            count,
            average_rr: None,
            best_rr: None,
            strong: 0,
            moderate: 0,
            weak: 0,
            premium: 0,
            discount: 0,
        };
        if count == 0 {
            return summary;
        }

        let mut total_rr = 0.0;
        let mut best = f64::MIN;
        for plan in &self.plans {
            total_rr += plan.rr;
            best = best.max(plan.rr);
            match classify_rr(plan.rr) {
                RrTier::Strong => summary.strong += 1,
                RrTier::Moderate => summary.moderate += 1,
                RrTier::Weak => summary.weak += 1,
            }
            match plan.zone {
                ZoneSide::Premium => summary.premium += 1,
                ZoneSide::Discount => summary.discount += 1,
            }
        }
        summary.average_rr = Some(total_rr / count as f64);
        summary.best_rr = Some(best);
        summary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

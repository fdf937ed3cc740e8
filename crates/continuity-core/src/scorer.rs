//! Scorer: turns derived signals into a score, a severity band and a report.
//!
//! The scoring policy is fixed:
//! 1. Sum the weights of every active signal
//! 2. If the page discloses easy cancellation, subtract 2 (floor 0)
//! 3. Band the result: >= 10 Critical, >= 7 High, >= 4 Moderate, else Low
//!
//! Weights and thresholds are compile-time constants, not configuration.

use crate::classifier::ScanState;
use crate::signals::DerivedSignals;
use crate::types::{CtaMetrics, PageType, Report, Severity, Signals, MAX_SCORE, PATTERN_NAME};

/// Reason appended when transparency mitigation applies.
pub const TRANSPARENCY_REASON: &str = "Cancellation transparency language detected";

/// The score after weighting and mitigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Sum of active signal weights before mitigation
    pub weighted: u32,

    /// Score after transparency mitigation
    pub raw: u32,

    /// Whether transparency mitigation applied
    pub mitigated: bool,
}

impl Score {
    pub fn severity(&self) -> Severity {
        Severity::from_score(self.raw)
    }

    /// Share of the maximum score, rounded to two decimals.
    pub fn percentage(&self) -> f64 {
        let pct = f64::from(self.raw) / f64::from(MAX_SCORE) * 100.0;
        (pct * 100.0).round() / 100.0
    }
}

/// Applies weights, mitigation and banding.
pub struct Scorer;

impl Scorer {
    /// Points removed when the page states cancellation is easy.
    pub const TRANSPARENCY_MITIGATION: u32 = 2;

    pub fn new() -> Self {
        Self
    }

    /// Score a signal set.
    pub fn score(&self, signals: &Signals, transparency_present: bool) -> Score {
        let weighted: u32 = signals.active().map(|kind| kind.weight()).sum();

        let raw = if transparency_present {
            weighted.saturating_sub(Self::TRANSPARENCY_MITIGATION)
        } else {
            weighted
        };

        Score {
            weighted,
            raw,
            mitigated: transparency_present,
        }
    }

    /// Build the final report.
    ///
    /// The transparency reason is appended after every signal reason, and
    /// applies whether or not any signal fired.
    pub fn synthesize(
        &self,
        state: &ScanState,
        page_type: PageType,
        derived: DerivedSignals,
    ) -> Report {
        let DerivedSignals {
            signals,
            mut reasons,
        } = derived;

        let score = self.score(&signals, state.transparency_present);
        if score.mitigated {
            reasons.push(TRANSPARENCY_REASON.to_string());
        }

        Report {
            pattern: PATTERN_NAME.to_string(),
            risk_score_raw: score.raw,
            risk_percentage: score.percentage(),
            severity: score.severity(),
            subscription_context: state.subscription_context,
            page_type,
            max_score: MAX_SCORE,
            signals,
            reasons,
            cta_metrics: CtaMetrics {
                subscription_cta_count: state.subscription_cta_count,
                cancel_cta_count: state.cancel_cta_count,
            },
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

//! Signal deriver: maps scan state and page context onto the six signals.

use crate::classifier::ScanState;
use crate::types::{PageType, SignalKind, Signals};

/// Subscription-to-cancel CTA ratio at which the asymmetry signal fires.
pub const CTA_ASYMMETRY_RATIO: f64 = 3.0;

/// Signals plus the reasons explaining them, in derivation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedSignals {
    pub signals: Signals,
    pub reasons: Vec<String>,
}

impl DerivedSignals {
    fn raise(&mut self, kind: SignalKind, reason: impl Into<String>) {
        self.signals.set(kind, true);
        self.reasons.push(reason.into());
    }
}

/// Derive signals from the accumulated scan state.
///
/// Without subscription context nothing fires: a page that never mentions
/// subscribing cannot trap anyone in a subscription.
pub fn derive_signals(state: &ScanState, page_type: PageType) -> DerivedSignals {
    let mut derived = DerivedSignals::default();

    if !state.subscription_context {
        return derived;
    }

    if state.subscribe_visible {
        derived.raise(SignalKind::SubscriptionVisible, "Subscription CTA visible");
    }

    // Mutually exclusive. A missing cancel on a non-account page raises neither.
    if !state.cancel_present && page_type == PageType::Account {
        derived.raise(
            SignalKind::CancelNotVisible,
            "No cancel option found on account page",
        );
    } else if state.cancel_present && !state.cancel_visible {
        derived.raise(SignalKind::CancelHidden, "Cancel option hidden");
    }

    if state.euphemism_present && !state.cancel_present {
        derived.raise(
            SignalKind::EuphemismUsed,
            "Euphemistic management options instead of cancel",
        );
    }

    if state.support_only_cancel {
        derived.raise(
            SignalKind::SupportOnlyCancel,
            "Cancellation requires contacting support",
        );
    }

    if has_cta_asymmetry(state.subscription_cta_count, state.cancel_cta_count) {
        derived.raise(
            SignalKind::CtaAsymmetry,
            format!(
                "High subscription-to-cancel ratio ({}:{})",
                state.subscription_cta_count, state.cancel_cta_count
            ),
        );
    }

    derived
}

/// The cancel count is floored at 1 so a page with no cancel CTA still
/// yields a finite ratio.
fn has_cta_asymmetry(subscription_ctas: u32, cancel_ctas: u32) -> bool {
    if subscription_ctas == 0 {
        return false;
    }

    let ratio = f64::from(subscription_ctas) / f64::from(cancel_ctas.max(1));
    ratio >= CTA_ASYMMETRY_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_context() -> ScanState {
        ScanState {
            subscription_context: true,
            ..ScanState::default()
        }
    }

    #[test]
    fn test_no_context_no_signals() {
        let state = ScanState {
            subscribe_visible: true,
            euphemism_present: true,
            support_only_cancel: true,
            subscription_cta_count: 9,
            ..ScanState::default()
        };

        let derived = derive_signals(&state, PageType::Account);
        assert_eq!(derived, DerivedSignals::default());
    }

    #[test]
    fn test_cancel_not_visible_only_on_account_pages() {
        let state = in_context();

        let account = derive_signals(&state, PageType::Account);
        assert!(account.signals.cancel_not_visible);
        assert_eq!(account.reasons, vec!["No cancel option found on account page"]);

        let marketing = derive_signals(&state, PageType::Marketing);
        assert!(!marketing.signals.cancel_not_visible);
        assert!(!marketing.signals.cancel_hidden);
        assert!(marketing.reasons.is_empty());
    }

    #[test]
    fn test_cancel_hidden() {
        let state = ScanState {
            cancel_present: true,
            ..in_context()
        };

        let derived = derive_signals(&state, PageType::Unknown);
        assert!(derived.signals.cancel_hidden);
        assert!(!derived.signals.cancel_not_visible);
    }

    #[test]
    fn test_visible_cancel_raises_neither() {
        let state = ScanState {
            cancel_present: true,
            cancel_visible: true,
            cancel_cta_count: 1,
            ..in_context()
        };

        let derived = derive_signals(&state, PageType::Account);
        assert!(!derived.signals.cancel_hidden);
        assert!(!derived.signals.cancel_not_visible);
    }

    #[test]
    fn test_euphemism_suppressed_by_cancel() {
        let state = ScanState {
            euphemism_present: true,
            ..in_context()
        };
        assert!(derive_signals(&state, PageType::Unknown).signals.euphemism_used);

        let state = ScanState {
            cancel_present: true,
            ..state
        };
        assert!(!derive_signals(&state, PageType::Unknown).signals.euphemism_used);
    }

    #[test]
    fn test_asymmetry_threshold() {
        assert!(!has_cta_asymmetry(0, 0));
        assert!(!has_cta_asymmetry(2, 0));
        assert!(has_cta_asymmetry(3, 0));
        assert!(has_cta_asymmetry(3, 1));
        assert!(!has_cta_asymmetry(5, 2));
        assert!(has_cta_asymmetry(6, 2));
    }

    #[test]
    fn test_asymmetry_reason_uses_literal_counts() {
        let state = ScanState {
            subscribe_visible: true,
            cancel_present: true,
            cancel_visible: true,
            subscription_cta_count: 4,
            cancel_cta_count: 0,
            ..in_context()
        };

        let derived = derive_signals(&state, PageType::Marketing);
        assert!(derived.signals.cta_asymmetry);
        assert_eq!(
            derived.reasons.last().map(String::as_str),
            Some("High subscription-to-cancel ratio (4:0)")
        );
    }

    #[test]
    fn test_reason_order_follows_derivation_order() {
        let state = ScanState {
            subscribe_visible: true,
            euphemism_present: true,
            support_only_cancel: true,
            subscription_cta_count: 3,
            ..in_context()
        };

        let derived = derive_signals(&state, PageType::Account);
        assert_eq!(
            derived.reasons,
            vec![
                "Subscription CTA visible",
                "No cancel option found on account page",
                "Euphemistic management options instead of cancel",
                "Cancellation requires contacting support",
                "High subscription-to-cancel ratio (3:0)",
            ]
        );
        assert_eq!(derived.signals.active().count(), 5);
    }
}

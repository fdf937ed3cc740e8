//! # continuity-core
//!
//! Deterministic detection of the forced continuity dark pattern.
//!
//! Given the UI elements extracted from one rendered page and the page URL,
//! this crate answers: is signing up made easy while cancelling is made
//! hard?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same inventory and URL always produce the same report
//! 2. **Rule-based**: Keyword taxonomy plus fixed weights, no ML
//! 3. **Total**: Never fails; malformed element fields normalize to empty
//! 4. **No shared state**: Every call owns its accumulator, so pages can be
//!    analyzed concurrently
//!
//! ## Pipeline
//!
//! ```text
//! elements → classifier::scan → signals::derive_signals → Scorer::synthesize → Report
//!                                        ↑
//! url ─────→ PageType::from_url ─────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use continuity_core::{detect, UiElement, Severity};
//!
//! let elements = vec![
//!     UiElement::button("start your free trial"),
//!     UiElement::link("cancel subscription").hidden(),
//! ];
//! let report = detect(&elements, "https://site.com/account");
//! assert_eq!(report.severity, Severity::Moderate);
//! ```

pub mod classifier;
pub mod fixtures;
pub mod inventory;
pub mod scorer;
pub mod signals;
pub mod taxonomy;
pub mod types;

// Re-export main types at crate root
pub use classifier::{scan, ScanState};
pub use inventory::InventoryError;
pub use scorer::{Score, Scorer, TRANSPARENCY_REASON};
pub use signals::{derive_signals, DerivedSignals};
pub use types::{
    CtaMetrics, ElementKind, PageType, Report, Severity, SignalKind, Signals, UiElement,
    MAX_SCORE, PATTERN_NAME,
};

use tracing::debug;

/// Analyze one page for forced continuity.
///
/// This is the main entry point. Element order matters: see
/// [`classifier`] for why the scan is sequential.
///
/// # Arguments
///
/// * `elements` - The page's UI elements in document order
/// * `url` - The page URL, used only to infer the [`PageType`]
pub fn detect(elements: &[UiElement], url: &str) -> Report {
    let page_type = PageType::from_url(url);
    let state = scan(elements);
    let derived = derive_signals(&state, page_type);
    let report = Scorer::new().synthesize(&state, page_type, derived);

    debug!(
        url,
        elements = elements.len(),
        page_type = %report.page_type,
        score = report.risk_score_raw,
        severity = %report.severity,
        "Forced continuity analysis complete"
    );

    report
}


/// Cross-component tests over the full pipeline.
#[cfg(test)]
mod pipeline_tests {
    use super::*;

    fn fixture(yaml: &str) -> Vec<UiElement> {
        inventory::from_yaml(yaml).unwrap()
    }

    fn percentage_of(raw: u32) -> f64 {
        ((f64::from(raw) / 12.0 * 100.0) * 100.0).round() / 100.0
    }

    /// A spread of inventories covering every signal.
    fn sample_pages() -> Vec<(Vec<UiElement>, &'static str)> {
        vec![
            (vec![], "https://site.com/"),
            (fixture(fixtures::HIDDEN_CANCEL_YAML), fixtures::HIDDEN_CANCEL_URL),
            (fixture(fixtures::TRANSPARENT_YAML), fixtures::HIDDEN_CANCEL_URL),
            (fixture(fixtures::NEUTRAL_YAML), fixtures::NEUTRAL_URL),
            (inventory::from_json(fixtures::TRAPPED_JSON).unwrap(), fixtures::TRAPPED_URL),
            (
                vec![
                    UiElement::button("subscribe"),
                    UiElement::button("buy now"),
                    UiElement::button("try free"),
                    UiElement::link("manage billing"),
                    UiElement::link("email support"),
                    UiElement::link("cancel membership").hidden(),
                ],
                "https://site.com/account",
            ),
            (
                vec![UiElement::text("no cancellation fee"), UiElement::text("hello")],
                "https://site.com/pricing",
            ),
        ]
    }

    #[test]
    fn test_score_bounds_and_percentage() {
        for (elements, url) in sample_pages() {
            let report = detect(&elements, url);
            assert_eq!(report.max_score, 12);
            assert!(report.risk_score_raw <= report.max_score);
            assert_eq!(report.risk_percentage, percentage_of(report.risk_score_raw));
            assert_eq!(report.severity, Severity::from_score(report.risk_score_raw));
        }
    }

    #[test]
    fn test_determinism_same_input_same_output() {
        for (elements, url) in sample_pages() {
            let first = detect(&elements, url);
            let second = detect(&elements, url);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_transparency_mitigation_is_monotonic() {
        // No "cancel" in the wording, so it cannot double as a weak cancel
        let disclosure = UiElement::text("no commitment");

        for (elements, url) in sample_pages() {
            let baseline = detect(&elements, url);
            if baseline.reasons.iter().any(|r| r == TRANSPARENCY_REASON) {
                continue;
            }

            for position in 0..=elements.len() {
                let mut with_disclosure = elements.clone();
                with_disclosure.insert(position, disclosure.clone());
                let mitigated = detect(&with_disclosure, url);

                assert!(mitigated.risk_score_raw <= baseline.risk_score_raw);
                assert_eq!(
                    mitigated.risk_score_raw,
                    baseline.risk_score_raw.saturating_sub(2)
                );
            }
        }
    }

    #[test]
    fn test_order_sensitivity_is_preserved() {
        let cancel = UiElement::button("cancel");
        let subscribe = UiElement::button("upgrade");
        let url = "https://site.com/account";

        let cancel_first = [cancel.clone(), subscribe.clone()];
        let subscribe_first = [subscribe, cancel];

        assert!(!scan(&cancel_first).cancel_present);
        assert!(scan(&subscribe_first).cancel_present);

        let a = detect(&cancel_first, url);
        let b = detect(&subscribe_first, url);
        assert!(a.signals.cancel_not_visible);
        assert!(!b.signals.cancel_not_visible);
        assert_ne!(a.signals, b.signals);
        assert_eq!(a.cta_metrics.cancel_cta_count, 0);
        assert_eq!(b.cta_metrics.cancel_cta_count, 1);
    }

    #[test]
    fn test_cookie_banner_cancel_not_counted() {
        let elements = vec![
            UiElement::button("start trial"),
            UiElement::button("cancel").with_attribute("class", "cookie-banner"),
        ];
        let report = detect(&elements, "https://site.com/pricing");
        assert_eq!(report.cta_metrics.cancel_cta_count, 0);
    }

    #[test]
    fn test_trapped_fixture_is_critical() {
        let elements = inventory::from_json(fixtures::TRAPPED_JSON).unwrap();
        let report = detect(&elements, fixtures::TRAPPED_URL);

        assert_eq!(report.risk_score_raw, 10);
        assert_eq!(report.severity.as_str(), fixtures::EXPECTED_TRAPPED_SEVERITY);
        assert_eq!(report.cta_metrics.subscription_cta_count, 3);
        assert_eq!(report.cta_metrics.cancel_cta_count, 0);
        assert!(report.signals.cta_asymmetry);
        assert!(!report.signals.cancel_hidden);
    }

    #[test]
    fn test_fixture_severities() {
        let cases = [
            (
                fixtures::HIDDEN_CANCEL_YAML,
                fixtures::HIDDEN_CANCEL_URL,
                fixtures::EXPECTED_HIDDEN_CANCEL_SEVERITY,
            ),
            (
                fixtures::TRANSPARENT_YAML,
                fixtures::HIDDEN_CANCEL_URL,
                fixtures::EXPECTED_TRANSPARENT_SEVERITY,
            ),
            (
                fixtures::NEUTRAL_YAML,
                fixtures::NEUTRAL_URL,
                fixtures::EXPECTED_NEUTRAL_SEVERITY,
            ),
        ];

        for (yaml, url, expected) in cases {
            let report = detect(&fixture(yaml), url);
            assert_eq!(report.severity.as_str(), expected);
        }
    }

    #[test]
    fn test_report_json_contract() {
        let report = detect(&fixture(fixtures::HIDDEN_CANCEL_YAML), fixtures::HIDDEN_CANCEL_URL);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["pattern"], "Forced Continuity");
        assert_eq!(json["risk_score_raw"], 4);
        assert_eq!(json["max_score"], 12);
        assert_eq!(json["risk_percentage"], 33.33);
        assert_eq!(json["severity"], "Moderate");
        assert_eq!(json["page_type"], "account");
        assert_eq!(json["subscription_context"], true);
        assert_eq!(json["signals"]["cancel_hidden"], true);
        assert_eq!(json["signals"]["cta_asymmetry"], false);
        assert_eq!(json["signals"].as_object().unwrap().len(), 6);
        assert_eq!(json["reasons"][0], "Subscription CTA visible");
        assert_eq!(json["reasons"][1], "Cancel option hidden");
        assert_eq!(json["cta_metrics"]["subscription_cta_count"], 1);
        assert_eq!(json["cta_metrics"]["cancel_cta_count"], 0);
        assert_eq!(json.as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_concurrent_detection_is_independent() {
        let pages = sample_pages();
        let expected: Vec<Report> = pages.iter().map(|(e, u)| detect(e, u)).collect();

        std::thread::scope(|s| {
            let handles: Vec<_> = pages
                .iter()
                .map(|(elements, url)| s.spawn(move || detect(elements, url)))
                .collect();

            for (handle, want) in handles.into_iter().zip(&expected) {
                assert_eq!(&handle.join().unwrap(), want);
            }
        });
    }
}

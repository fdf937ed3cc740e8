//! Element classifier: one ordered pass over the page inventory.
//!
//! ## Order Sensitivity
//!
//! The scan is a left fold, and it is path-dependent ON PURPOSE:
//!
//! - A weak "cancel" only counts if subscription context was already seen
//!   earlier in the list.
//! - A support link only marks a support-only flow if no cancel option has
//!   been seen yet.
//!
//! Two inventories holding the same elements in a different order can
//! therefore produce different state. Do not rewrite this as independent
//! per-element flags aggregated afterwards.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::taxonomy::{
    matches_any, MANAGE, NOISE_CLASS_FRAGMENTS, NOISE_ID_FRAGMENTS, PRICING, STRONG_CANCEL,
    SUBSCRIBE, SUPPORT, TRANSPARENCY, WEAK_CANCEL,
};
use crate::types::UiElement;

/// State accumulated while scanning one page.
///
/// Owned by a single scan; never shared between pages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanState {
    pub subscription_context: bool,
    pub subscribe_visible: bool,
    pub cancel_present: bool,
    pub cancel_visible: bool,
    pub euphemism_present: bool,
    pub support_only_cancel: bool,
    pub transparency_present: bool,
    pub subscription_cta_count: u32,
    pub cancel_cta_count: u32,
}

impl ScanState {
    /// Fold one element into the state.
    ///
    /// Steps run in a fixed order and later steps read what earlier steps
    /// (and earlier elements) wrote.
    pub fn observe(&mut self, element: &UiElement) {
        let text = element.text.as_str();
        let visible = element.visible;

        if matches_any(text, TRANSPARENCY) {
            self.transparency_present = true;
        }

        if matches_any(text, SUBSCRIBE) {
            self.subscription_context = true;
            if visible {
                self.subscribe_visible = true;
                self.subscription_cta_count += 1;
            }
        }

        if matches_any(text, PRICING) {
            self.subscription_context = true;
        }

        if matches_any(text, STRONG_CANCEL) {
            self.cancel_present = true;
            if visible {
                self.cancel_visible = true;
                self.cancel_cta_count += 1;
            }
        } else if matches_any(text, WEAK_CANCEL)
            && self.subscription_context
            && visible
            && !is_noise(element)
        {
            self.cancel_present = true;
            self.cancel_visible = true;
            self.cancel_cta_count += 1;
        }

        if matches_any(text, MANAGE) {
            self.euphemism_present = true;
        }

        // Reads cancel_present as of this element, not the final value.
        if matches_any(text, SUPPORT) && self.subscription_context && !self.cancel_present {
            self.support_only_cancel = true;
        }

        trace!(kind = ?element.kind, text, visible, state = ?self, "Classified element");
    }
}

/// Cookie banners, modal close buttons and filter chips.
fn is_noise(element: &UiElement) -> bool {
    let id = element.attribute("id").to_lowercase();
    let class = element.attribute("class").to_lowercase();

    NOISE_ID_FRAGMENTS.iter().any(|f| id.contains(f))
        || NOISE_CLASS_FRAGMENTS.iter().any(|f| class.contains(f))
}

/// Scan an inventory in order and return the accumulated state.
pub fn scan(elements: &[UiElement]) -> ScanState {
    elements.iter().fold(ScanState::default(), |mut state, element| {
        state.observe(element);
        state
    })
}

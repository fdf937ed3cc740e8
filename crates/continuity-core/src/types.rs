//! Core types for forced continuity detection.
//!
//! These are the element records consumed by the detector, the page context
//! inferred from the URL, and the report handed back to callers.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::taxonomy::{self, ACCOUNT_INDICATORS, MARKETING_INDICATORS};

/// Name of the dark pattern this crate detects.
pub const PATTERN_NAME: &str = "Forced Continuity";

/// The kind of UI element captured by the extractor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Button,
    Link,
    Input,
    Text,
}

/// One interactive or textual unit found on a page.
///
/// Produced once by an extractor and never rewritten by the detector.
/// Missing or `null` fields in serialized input normalize to empty values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiElement {
    /// Kind of element
    pub kind: ElementKind,

    /// Lowercase text content, empty if none
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    /// Visibility at capture time
    #[serde(default, deserialize_with = "null_as_default")]
    pub visible: bool,

    /// Attribute name to optional value (`id`, `class`, `href`, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: BTreeMap<String, Option<String>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UiElement {
    /// Create a visible element with no attributes.
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            visible: true,
            attributes: BTreeMap::new(),
        }
    }

    pub fn button(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Button, text)
    }

    pub fn link(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Link, text)
    }

    pub fn input(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Input, text)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Text, text)
    }

    /// Mark the element as not visible.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Attach an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), Some(value.into()));
        self
    }

    /// Read an attribute, treating missing and `null` values as empty.
    pub fn attribute(&self, name: &str) -> &str {
        self.attributes
            .get(name)
            .and_then(|v| v.as_deref())
            .unwrap_or("")
    }
}

/// Page context inferred from the URL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Account,
    Marketing,
    Unknown,
}

impl PageType {
    /// Infer the page type from a URL.
    ///
    /// Account indicators win over marketing indicators, so
    /// `/account/upgrade` is an account page.
    pub fn from_url(url: &str) -> Self {
        if taxonomy::matches_any(url, ACCOUNT_INDICATORS) {
            PageType::Account
        } else if taxonomy::matches_any(url, MARKETING_INDICATORS) {
            PageType::Marketing
        } else {
            PageType::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Account => "account",
            PageType::Marketing => "marketing",
            PageType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six risk signals.
///
/// Declaration order is the order signals are derived and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    SubscriptionVisible,
    CancelNotVisible,
    CancelHidden,
    SupportOnlyCancel,
    EuphemismUsed,
    CtaAsymmetry,
}

impl SignalKind {
    pub const ALL: [SignalKind; 6] = [
        SignalKind::SubscriptionVisible,
        SignalKind::CancelNotVisible,
        SignalKind::CancelHidden,
        SignalKind::SupportOnlyCancel,
        SignalKind::EuphemismUsed,
        SignalKind::CtaAsymmetry,
    ];

    /// Score contribution when the signal is active.
    pub const fn weight(&self) -> u32 {
        match self {
            SignalKind::SubscriptionVisible => 2,
            SignalKind::CancelNotVisible => 3,
            SignalKind::CancelHidden => 2,
            SignalKind::SupportOnlyCancel => 2,
            SignalKind::EuphemismUsed => 1,
            SignalKind::CtaAsymmetry => 2,
        }
    }

    /// Key used in the serialized signal map.
    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::SubscriptionVisible => "subscription_visible",
            SignalKind::CancelNotVisible => "cancel_not_visible",
            SignalKind::CancelHidden => "cancel_hidden",
            SignalKind::SupportOnlyCancel => "support_only_cancel",
            SignalKind::EuphemismUsed => "euphemism_used",
            SignalKind::CtaAsymmetry => "cta_asymmetry",
        }
    }
}

/// Sum of every signal weight.
pub const MAX_SCORE: u32 = {
    let mut total = 0;
    let mut i = 0;
    while i < SignalKind::ALL.len() {
        total += SignalKind::ALL[i].weight();
        i += 1;
    }
    total
};

/// Active flag for each signal. Always fully populated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Signals {
    pub subscription_visible: bool,
    pub cancel_not_visible: bool,
    pub cancel_hidden: bool,
    pub support_only_cancel: bool,
    pub euphemism_used: bool,
    pub cta_asymmetry: bool,
}

impl Signals {
    pub fn get(&self, kind: SignalKind) -> bool {
        match kind {
            SignalKind::SubscriptionVisible => self.subscription_visible,
            SignalKind::CancelNotVisible => self.cancel_not_visible,
            SignalKind::CancelHidden => self.cancel_hidden,
            SignalKind::SupportOnlyCancel => self.support_only_cancel,
            SignalKind::EuphemismUsed => self.euphemism_used,
            SignalKind::CtaAsymmetry => self.cta_asymmetry,
        }
    }

    pub fn set(&mut self, kind: SignalKind, active: bool) {
        let slot = match kind {
            SignalKind::SubscriptionVisible => &mut self.subscription_visible,
            SignalKind::CancelNotVisible => &mut self.cancel_not_visible,
            SignalKind::CancelHidden => &mut self.cancel_hidden,
            SignalKind::SupportOnlyCancel => &mut self.support_only_cancel,
            SignalKind::EuphemismUsed => &mut self.euphemism_used,
            SignalKind::CtaAsymmetry => &mut self.cta_asymmetry,
        };
        *slot = active;
    }

    /// Active signals in derivation order.
    pub fn active(&self) -> impl Iterator<Item = SignalKind> + '_ {
        SignalKind::ALL.into_iter().filter(|kind| self.get(*kind))
    }

    pub fn any(&self) -> bool {
        self.active().next().is_some()
    }
}

/// Ordinal risk band derived from the mitigated score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "moderate")]
    Moderate,
    #[serde(alias = "high")]
    High,
    #[serde(alias = "critical")]
    Critical,
}

impl Severity {
    /// Lower bound (inclusive) of the Critical band.
    pub const CRITICAL_THRESHOLD: u32 = 10;
    /// Lower bound (inclusive) of the High band.
    pub const HIGH_THRESHOLD: u32 = 7;
    /// Lower bound (inclusive) of the Moderate band.
    pub const MODERATE_THRESHOLD: u32 = 4;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::CRITICAL_THRESHOLD {
            Severity::Critical
        } else if score >= Self::HIGH_THRESHOLD {
            Severity::High
        } else if score >= Self::MODERATE_THRESHOLD {
            Severity::Moderate
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "moderate" => Ok(Severity::Moderate),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!(
                "unknown severity '{other}' (expected low, moderate, high or critical)"
            )),
        }
    }
}

/// Call-to-action counts gathered during the scan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CtaMetrics {
    pub subscription_cta_count: u32,
    pub cancel_cta_count: u32,
}

/// Result of analyzing one page.
///
/// Field names are the serialized contract consumed by report printers and
/// other tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Always [`PATTERN_NAME`]
    pub pattern: String,

    /// Weighted score after transparency mitigation
    pub risk_score_raw: u32,

    /// `risk_score_raw / max_score * 100`, two decimals
    pub risk_percentage: f64,

    pub severity: Severity,

    /// Whether any subscribe or pricing wording was seen
    pub subscription_context: bool,

    pub page_type: PageType,

    /// Always [`MAX_SCORE`]
    pub max_score: u32,

    pub signals: Signals,

    /// Human-readable reasons in detection order
    pub reasons: Vec<String>,

    pub cta_metrics: CtaMetrics,
}

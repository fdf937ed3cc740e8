//! Keyword taxonomy for element and URL classification.
//!
//! Every set here is a closed list of lowercase phrases. Matching is
//! case-insensitive substring containment: a text matches a set when it
//! contains ANY member. Extracted UI text arrives with arbitrary punctuation
//! ("Cancel subscription →", "Start trial!") so whole-word matching would
//! miss it.

/// Explicit, unambiguous cancel intent.
pub static STRONG_CANCEL: &[&str] = &[
    "cancel subscription",
    "cancel membership",
    "unsubscribe",
    "end subscription",
    "cancel premium",
];

/// Ambiguous cancel wording. Only counts when corroborated by context.
pub static WEAK_CANCEL: &[&str] = &["cancel"];

/// Calls to action that start or extend a subscription.
pub static SUBSCRIBE: &[&str] = &[
    "subscribe", "start", "trial", "buy", "upgrade", "premium", "get", "try", "join",
];

/// Euphemisms offered in place of an explicit cancel action.
pub static MANAGE: &[&str] = &["manage", "billing", "preferences", "settings"];

/// Routes that push cancellation to a human channel.
pub static SUPPORT: &[&str] = &["contact", "support", "help", "email", "call"];

/// Pricing vocabulary. Establishes subscription context without being a CTA.
pub static PRICING: &[&str] = &["pricing", "plan", "billing", "payment", "subscription"];

/// Disclosures that cancellation is easy.
pub static TRANSPARENCY: &[&str] = &[
    "cancel anytime",
    "cancel at any time",
    "no commitment",
    "no cancellation fee",
    "easy to cancel",
];

/// URL fragments marking an account-management page. Checked first.
pub static ACCOUNT_INDICATORS: &[&str] =
    &["account", "billing", "subscription", "settings", "dashboard"];

/// URL fragments marking a marketing page.
pub static MARKETING_INDICATORS: &[&str] = &["pricing", "plans", "premium", "upgrade"];

/// Attribute noise that disqualifies a weak cancel match.
///
/// Cookie banners, modal close buttons and filter chips all say "cancel"
/// without having anything to do with the subscription.
pub static NOISE_ID_FRAGMENTS: &[&str] = &["filter"];
pub static NOISE_CLASS_FRAGMENTS: &[&str] = &["cookie", "close"];

/// Check whether `text` contains any keyword of `set`.
///
/// `text` is lowercased before comparison; keywords are already lowercase.
///
/// # Examples
///
/// ```
/// use continuity_core::taxonomy::{matches_any, SUBSCRIBE};
///
/// assert!(matches_any("Start your FREE trial", SUBSCRIBE));
/// assert!(!matches_any("", SUBSCRIBE));
/// ```
pub fn matches_any(text: &str, set: &[&str]) -> bool {
    if text.is_empty() {
        return false;
    }

    let text = text.to_lowercase();
    set.iter().any(|kw| text.contains(kw))
}

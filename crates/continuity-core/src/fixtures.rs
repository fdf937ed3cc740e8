//! Reference inventories shared by tests across the workspace.
//!
//! Each fixture pairs an inventory with the URL it is analyzed under and
//! the severity it must produce.

/// Account page with a visible trial CTA and a hidden cancel link.
pub const HIDDEN_CANCEL_YAML: &str = r#"
- kind: button
  text: "start your free trial"
  visible: true
- kind: link
  text: "cancel subscription"
  visible: false
  attributes:
    href: "/account/cancel"
    class: "footer-link"
"#;

pub const HIDDEN_CANCEL_URL: &str = "https://site.com/account";

/// The same page with a transparency disclosure appended.
pub const TRANSPARENT_YAML: &str = r#"
- kind: button
  text: "start your free trial"
  visible: true
- kind: link
  text: "cancel subscription"
  visible: false
- kind: text
  text: "you can cancel anytime, no commitment"
  visible: true
"#;

/// A page with nothing subscription-related on it.
pub const NEUTRAL_YAML: &str = r#"
- kind: link
  text: "about us"
  visible: true
- kind: text
  text: "our story"
  visible: true
- kind: input
  text: ""
  visible: true
  attributes:
    type: "search"
"#;

pub const NEUTRAL_URL: &str = "https://site.com/about";

/// Account page that hides cancellation behind support and euphemisms.
///
/// Scores 2 (CTA) + 3 (no cancel) + 1 (euphemism) + 2 (support) + 2 (asymmetry) = 10.
pub const TRAPPED_JSON: &str = r#"[
  {"kind": "button", "text": "upgrade to premium", "visible": true},
  {"kind": "button", "text": "start plus", "visible": true},
  {"kind": "link", "text": "join family plan", "visible": true},
  {"kind": "link", "text": "manage preferences", "visible": true},
  {"kind": "link", "text": "contact us", "visible": true},
  {"kind": "button", "text": "cancel", "visible": true, "attributes": {"class": "cookie-accept"}}
]"#;

pub const TRAPPED_URL: &str = "https://streaming.example/account/settings";

/// Expected severity strings for the fixtures above.
pub const EXPECTED_HIDDEN_CANCEL_SEVERITY: &str = "Moderate";
pub const EXPECTED_TRANSPARENT_SEVERITY: &str = "Low";
pub const EXPECTED_NEUTRAL_SEVERITY: &str = "Low";
pub const EXPECTED_TRAPPED_SEVERITY: &str = "Critical";

//! Data types exchanged between the page scanner and the extraction core.

use serde::{Deserialize, Serialize};

/// Where a fragment's value was read from on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// Visible text content.
    #[default]
    Text,
    /// Hyperlink target (`href`), possibly a `mailto:` link.
    Href,
    /// `data-hovercard-id` attribute.
    HovercardId,
    /// `data-address` attribute.
    DataAddress,
    /// `email` attribute.
    Email,
    /// `aria-label` attribute.
    AriaLabel,
}

impl FragmentKind {
    /// True for every kind read from a markup attribute rather than text content.
    pub fn is_attribute(self) -> bool {
        !matches!(self, FragmentKind::Text)
    }
}

/// How narrowly a fragment was scoped when it was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentScope {
    /// Collected from a single message-list row.
    Item,
    /// Collected from the whole document.
    #[default]
    Page,
}

/// One raw string handed over by the page scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFragment {
    #[serde(default)]
    pub kind: FragmentKind,
    #[serde(default)]
    pub scope: FragmentScope,
    pub value: String,
}

impl RawFragment {
    pub fn new(kind: FragmentKind, scope: FragmentScope, value: impl Into<String>) -> Self {
        Self {
            kind,
            scope,
            value: value.into(),
        }
    }

    /// Page-wide text, the broadest kind of fragment.
    pub fn page_text(value: impl Into<String>) -> Self {
        Self::new(FragmentKind::Text, FragmentScope::Page, value)
    }

    /// A value read from a message-list row.
    pub fn item(kind: FragmentKind, value: impl Into<String>) -> Self {
        Self::new(kind, FragmentScope::Item, value)
    }
}

/// What the scanner saw of the page it ran on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub url: String,
    /// Whether any message-list rows were present.
    #[serde(default)]
    pub has_message_list: bool,
    /// Text of the "folder is empty" notice, when one is shown.
    #[serde(default)]
    pub empty_folder_notice: Option<String>,
}

/// Payload produced by the page scanner for a single extraction run.
///
/// Fragments are kept as loose JSON values so a single malformed entry can be
/// skipped without rejecting the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageScan {
    #[serde(default)]
    pub page: Option<PageContext>,
    #[serde(default)]
    pub fragments: Option<Vec<serde_json::Value>>,
}

/// Result of scanning a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ScanOutcome {
    /// Addresses found, sorted ascending. May be empty.
    Ok { addresses: Vec<String> },
    /// The scan did not come from the webmail site.
    WrongPage,
    /// The scan came from the webmail site but not from the spam folder.
    WrongFolder,
}

impl ScanOutcome {
    pub fn addresses(&self) -> &[String] {
        match self {
            ScanOutcome::Ok { addresses } => addresses,
            _ => &[],
        }
    }
}

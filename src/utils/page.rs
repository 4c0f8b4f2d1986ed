//! Checks that a scan came from the webmail spam folder.

use super::domain::get_host_from_url;
use crate::core::config::Config;
use crate::core::models::PageContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageVerdict {
    SpamFolder,
    OtherFolder,
    NotWebmail,
}

fn is_webmail_page(config: &Config, page: &PageContext) -> bool {
    match get_host_from_url(&page.url) {
        Ok(host) => host.contains(config.webmail_host.as_str()),
        Err(e) => {
            tracing::warn!(target: "sender_scan", "Could not read host of page '{}': {}", page.url, e);
            false
        }
    }
}

/// A folder view counts as spam when the URL says so, when message rows are
/// listed, or when the empty-folder notice mentions spam.
fn is_spam_folder(page: &PageContext) -> bool {
    if page.url.contains("#spam") || page.url.contains("label/spam") {
        return true;
    }
    if page.has_message_list {
        return true;
    }
    page.empty_folder_notice
        .as_deref()
        .is_some_and(|notice| notice.to_lowercase().contains("spam"))
}

pub(crate) fn classify_page(config: &Config, page: &PageContext) -> PageVerdict {
    if !is_webmail_page(config, page) {
        PageVerdict::NotWebmail
    } else if !is_spam_folder(page) {
        PageVerdict::OtherFolder
    } else {
        PageVerdict::SpamFolder
    }
}

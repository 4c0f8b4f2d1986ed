use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::{FragmentScope, PageScan, RawFragment, ScanOutcome};
use crate::utils::extract::extract_candidates;
use crate::utils::filter::should_include_email;
use crate::utils::normalize::normalize_candidate;
use crate::utils::page::{classify_page, PageVerdict};
use crate::utils::validate::is_valid_email;

use std::collections::BTreeSet;
use std::sync::Arc;

/// The two passes over a page's fragments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum ScanPhase {
    /// Values read from individual message rows.
    Structured,
    /// Text and attributes from the whole document.
    Broad,
}

impl ScanPhase {
    fn scope(self) -> FragmentScope {
        match self {
            ScanPhase::Structured => FragmentScope::Item,
            ScanPhase::Broad => FragmentScope::Page,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ScanPhase::Structured => "structured",
            ScanPhase::Broad => "broad",
        }
    }
}

/// Extracts sender addresses from scanned page fragments.
///
/// Holds only immutable configuration; every call works on its own
/// accumulator, so one instance can be shared freely.
#[derive(Debug, Clone)]
pub struct SenderSleuth {
    config: Arc<Config>,
}

impl SenderSleuth {
    pub fn new(config: Config) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    pub fn with_shared_config(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one candidate through normalization, validation and the inclusion
    /// filter. Returns the normalized address when it survives all three.
    pub fn process_candidate(&self, candidate: &str) -> Option<String> {
        let email = normalize_candidate(&self.config, candidate);
        if !is_valid_email(&email) {
            tracing::trace!(target: "sender_scan", "Rejected '{}' (normalized '{}'): invalid format", candidate, email);
            return None;
        }
        if !should_include_email(&self.config, &email) {
            return None;
        }
        Some(email)
    }

    /// Returns the distinct sender addresses found in `fragments`, sorted ascending.
    ///
    /// Item-scoped fragments are scanned first. Page-scoped fragments are only
    /// scanned when that pass found fewer addresses than the fallback threshold.
    pub fn extract(&self, fragments: &[RawFragment]) -> Vec<String> {
        let mut found = BTreeSet::new();

        self.run_phase(ScanPhase::Structured, fragments, &mut found);

        if self.needs_fallback(found.len()) {
            tracing::info!(target: "sender_scan",
                "Structured pass found {} addresses (threshold {}), falling back to broad page scan",
                found.len(), self.config.fallback_threshold
            );
            self.run_phase(ScanPhase::Broad, fragments, &mut found);
        }

        tracing::info!(target: "sender_scan", "Final sender count after filtering: {}", found.len());
        found.into_iter().collect()
    }

    fn needs_fallback(&self, distinct_found: usize) -> bool {
        distinct_found < self.config.fallback_threshold
    }

    fn run_phase(&self, phase: ScanPhase, fragments: &[RawFragment], found: &mut BTreeSet<String>) {
        let before = found.len();
        let mut fragment_count = 0usize;
        let mut candidate_count = 0usize;

        for fragment in fragments.iter().filter(|f| f.scope == phase.scope()) {
            fragment_count += 1;
            for candidate in extract_candidates(fragment) {
                candidate_count += 1;
                if let Some(email) = self.process_candidate(candidate) {
                    if found.insert(email) {
                        tracing::debug!(target: "sender_scan", "[{}] Found sender in {:?} fragment", phase.label(), fragment.kind);
                    }
                }
            }
        }

        tracing::debug!(target: "sender_scan",
            "[{}] Scanned {} fragments, {} candidates, {} new addresses",
            phase.label(), fragment_count, candidate_count, found.len() - before
        );
    }

    /// Handles a full payload from the page scanner.
    ///
    /// Fails only when the fragment list itself is missing. Fragments that do
    /// not have the expected shape are skipped individually.
    pub fn scan_page(&self, scan: &PageScan) -> Result<ScanOutcome> {
        let raw_fragments = scan.fragments.as_ref().ok_or_else(|| {
            AppError::InvalidInput("Page scan is missing its fragment list".to_string())
        })?;

        if let Some(ref page) = scan.page {
            match classify_page(&self.config, page) {
                PageVerdict::NotWebmail => {
                    tracing::warn!(target: "sender_scan", "Page '{}' is not on {}", page.url, self.config.webmail_host);
                    return Ok(ScanOutcome::WrongPage);
                }
                PageVerdict::OtherFolder => {
                    tracing::warn!(target: "sender_scan", "Page '{}' is not the spam folder", page.url);
                    return Ok(ScanOutcome::WrongFolder);
                }
                PageVerdict::SpamFolder => {}
            }
        }

        let fragments: Vec<RawFragment> = raw_fragments
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                match serde_json::from_value::<RawFragment>(value.clone()) {
                    Ok(fragment) => Some(fragment),
                    Err(e) => {
                        tracing::warn!(target: "sender_scan", "Skipping malformed fragment #{}: {}", index, e);
                        None
                    }
                }
            })
            .collect();

        Ok(ScanOutcome::Ok {
            addresses: self.extract(&fragments),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{FragmentKind, PageContext};
    use serde_json::json;

    fn sleuth() -> SenderSleuth {
        SenderSleuth::new(Config::default())
    }

    fn item_texts(values: &[&str]) -> Vec<RawFragment> {
        values
            .iter()
            .map(|v| RawFragment::item(FragmentKind::Text, *v))
            .collect()
    }

    #[test]
    fn test_documented_scenarios() {
        let sleuth = sleuth();
        assert_eq!(
            sleuth.extract(&[RawFragment::page_text("Contact us: SUPPORT@Example.COM!")]),
            vec!["support@example.com"]
        );
        assert!(sleuth
            .extract(&[RawFragment::item(
                FragmentKind::Href,
                "mailto:Sales@Shop.biz?subject=hi"
            )])
            .contains(&"sales@shop.biz".to_string()));
        assert_eq!(
            sleuth.extract(&[RawFragment::page_text("a1b2c3-.billing@vendor.co.harryinvoice")]),
            vec!["billing@vendor.com"]
        );
        assert_eq!(
            sleuth.extract(&[RawFragment::page_text("support@am.har")]),
            vec!["support@amazon.com"]
        );
        assert!(sleuth
            .extract(&[RawFragment::page_text("noreply@google.com")])
            .is_empty());
        assert!(sleuth.extract(&[]).is_empty());
    }

    #[test]
    fn test_noreply_passes_validation_but_is_filtered() {
        let sleuth = sleuth();
        assert!(is_valid_email("noreply@google.com"));
        assert_eq!(sleuth.process_candidate("noreply@google.com"), None);
    }

    #[test]
    fn test_output_sorted_unique_lowercase() {
        let fragments = item_texts(&[
            "Zed <ZED@zeta.org>",
            "amy@alpha.net, AMY@ALPHA.NET",
            "zed@zeta.org bob@beta.io",
        ]);
        let result = sleuth().extract(&fragments);
        assert_eq!(result, vec!["amy@alpha.net", "bob@beta.io", "zed@zeta.org"]);
        assert!(result.iter().all(|e| is_valid_email(e) && *e == e.to_lowercase()));
    }

    #[test]
    fn test_fallback_skipped_when_structured_pass_is_enough() {
        let mut fragments = item_texts(&[
            "one@a1.com",
            "two@a2.com",
            "three@a3.com",
            "four@a4.com",
            "five@a5.com",
        ]);
        fragments.push(RawFragment::page_text("six@a6.com"));

        let result = sleuth().extract(&fragments);
        assert_eq!(result.len(), 5);
        assert!(!result.contains(&"six@a6.com".to_string()));
    }

    #[test]
    fn test_fallback_runs_below_threshold() {
        let mut fragments = item_texts(&["one@a1.com", "one@a1.com", "two@a2.com"]);
        fragments.push(RawFragment::page_text("six@a6.com one@a1.com"));

        let result = sleuth().extract(&fragments);
        assert_eq!(result, vec!["one@a1.com", "six@a6.com", "two@a2.com"]);
    }

    #[test]
    fn test_fallback_threshold_is_configurable() {
        let sleuth = SenderSleuth::new(Config {
            fallback_threshold: 1,
            ..Config::default()
        });
        let fragments = vec![
            RawFragment::item(FragmentKind::DataAddress, "one@a1.com"),
            RawFragment::page_text("six@a6.com"),
        ];
        assert_eq!(sleuth.extract(&fragments), vec!["one@a1.com"]);
    }

    #[test]
    fn test_zero_threshold_disables_fallback() {
        let sleuth = SenderSleuth::new(Config {
            fallback_threshold: 0,
            ..Config::default()
        });
        let fragments = vec![RawFragment::page_text("six@a6.com")];
        assert!(sleuth.extract(&fragments).is_empty());
    }

    #[test]
    fn test_shared_config_is_used() {
        let config = Arc::new(Config {
            excluded_local_parts: ["bounce".to_string()].into_iter().collect(),
            ..Config::default()
        });
        let first = SenderSleuth::with_shared_config(Arc::clone(&config));
        let second = SenderSleuth::with_shared_config(Arc::clone(&config));
        assert!(first.config().excluded_local_parts.contains("bounce"));
        assert_eq!(first.process_candidate("bounce@shop.net"), None);
        assert_eq!(
            second.process_candidate("noreply@shop.net"),
            Some("noreply@shop.net".to_string())
        );
    }

    #[test]
    fn test_extract_is_idempotent() {
        let fragments = vec![
            RawFragment::item(FragmentKind::AriaLabel, "From: Urgent.Deals@Shop.sho!"),
            RawFragment::page_text("<span email=\"s.kim@studio.sit\">Kim</span> admin@corp.com"),
        ];
        let sleuth = sleuth();
        let first = sleuth.extract(&fragments);
        assert_eq!(first, vec!["deals@shop.shop", "kim@studio.site"]);
        assert_eq!(first, sleuth.extract(&fragments));
    }

    #[test]
    fn test_scan_page_requires_fragment_list() {
        let scan = PageScan {
            page: None,
            fragments: None,
        };
        assert!(matches!(
            sleuth().scan_page(&scan),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_scan_page_skips_malformed_fragments() {
        let scan: PageScan = serde_json::from_value(json!({
            "fragments": [
                { "kind": "href", "scope": "item", "value": "mailto:jane@shop.net" },
                { "kind": "not-a-kind", "value": "lost@nowhere.com" },
                42,
                { "value": "Reply to ceo@corp.org." }
            ]
        }))
        .unwrap();

        let outcome = sleuth().scan_page(&scan).unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::Ok {
                addresses: vec!["ceo@corp.org".to_string(), "jane@shop.net".to_string()]
            }
        );
    }

    #[test]
    fn test_scan_page_empty_list_is_ok() {
        let scan = PageScan {
            page: None,
            fragments: Some(Vec::new()),
        };
        assert_eq!(
            sleuth().scan_page(&scan).unwrap(),
            ScanOutcome::Ok { addresses: vec![] }
        );
    }

    #[test]
    fn test_scan_page_checks_context() {
        let sleuth = sleuth();
        let fragments = Some(vec![json!({ "value": "jane@shop.net" })]);

        let wrong_page = PageScan {
            page: Some(PageContext {
                url: "https://example.com/".to_string(),
                ..PageContext::default()
            }),
            fragments: fragments.clone(),
        };
        assert_eq!(sleuth.scan_page(&wrong_page).unwrap(), ScanOutcome::WrongPage);

        let wrong_folder = PageScan {
            page: Some(PageContext {
                url: "https://mail.google.com/mail/u/0/#inbox".to_string(),
                ..PageContext::default()
            }),
            fragments: fragments.clone(),
        };
        assert_eq!(sleuth.scan_page(&wrong_folder).unwrap(), ScanOutcome::WrongFolder);

        let spam = PageScan {
            page: Some(PageContext {
                url: "https://mail.google.com/mail/u/0/#spam".to_string(),
                ..PageContext::default()
            }),
            fragments,
        };
        assert_eq!(
            sleuth.scan_page(&spam).unwrap().addresses(),
            &["jane@shop.net".to_string()]
        );
    }
}

//! Pulls address-shaped substrings out of raw fragments.

use super::patterns::CANDIDATE_REGEX;
use crate::core::models::RawFragment;

const MAIL_SCHEME: &str = "mailto:";

/// Removes a leading `mailto:` marker, matched case-insensitively.
fn strip_mail_scheme(value: &str) -> &str {
    match value.get(..MAIL_SCHEME.len()) {
        Some(head) if head.eq_ignore_ascii_case(MAIL_SCHEME) => &value[MAIL_SCHEME.len()..],
        _ => value,
    }
}

/// Lazily yields every candidate in `fragment`, in order of appearance.
///
/// Attribute values have their `mailto:` marker removed first. Duplicates are
/// not collapsed here.
pub(crate) fn extract_candidates(fragment: &RawFragment) -> impl Iterator<Item = &str> + '_ {
    let haystack = if fragment.kind.is_attribute() {
        strip_mail_scheme(fragment.value.trim())
    } else {
        fragment.value.as_str()
    };
    CANDIDATE_REGEX.find_iter(haystack).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{FragmentKind, FragmentScope};

    fn collect(fragment: &RawFragment) -> Vec<String> {
        extract_candidates(fragment).map(str::to_string).collect()
    }

    #[test]
    fn test_extract_from_text() {
        let fragment = RawFragment::page_text("Contact us: SUPPORT@Example.COM!");
        assert_eq!(collect(&fragment), vec!["SUPPORT@Example.COM"]);
    }

    #[test]
    fn test_extract_from_mailto_href() {
        let fragment = RawFragment::item(FragmentKind::Href, "MAILTO:Sales@Shop.biz?subject=hi");
        assert_eq!(collect(&fragment), vec!["Sales@Shop.biz"]);
    }

    #[test]
    fn test_extract_keeps_duplicates_and_order() {
        let fragment = RawFragment::new(
            FragmentKind::AriaLabel,
            FragmentScope::Item,
            "Bob <bob@x.org> bob@x.org, amy@y.net",
        );
        assert_eq!(collect(&fragment), vec!["bob@x.org", "bob@x.org", "amy@y.net"]);
    }

    #[test]
    fn test_extract_no_match() {
        assert!(collect(&RawFragment::page_text("nothing to see here @ all")).is_empty());
        assert!(collect(&RawFragment::page_text("")).is_empty());
        assert!(collect(&RawFragment::page_text("user@localhost")).is_empty());
    }

    #[test]
    fn test_strip_mail_scheme() {
        assert_eq!(strip_mail_scheme("mailto:a@b.com"), "a@b.com");
        assert_eq!(strip_mail_scheme("MailTo:a@b.com"), "a@b.com");
        assert_eq!(strip_mail_scheme("a@b.com"), "a@b.com");
        assert_eq!(strip_mail_scheme("mail"), "mail");
        // Multi-byte input must not split a character.
        assert_eq!(strip_mail_scheme("ééééé"), "ééééé");
    }
}

//! Compiled phone/email patterns and the fallback extractor.

use factsift_core::ExtractOptions;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// Compiled once, reused by every worker.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\(?\d{1,4}\)?[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}").unwrap()
});
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

/// Fallback matches for one block of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FallbackMatches {
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

/// Run the requested patterns over `text`.
///
/// A pattern whose flag is off is never evaluated.
pub fn extract(text: &str, options: ExtractOptions) -> FallbackMatches {
    FallbackMatches {
        phones: if options.phones {
            extract_phones(text)
        } else {
            Vec::new()
        },
        emails: if options.emails {
            extract_emails(text)
        } else {
            Vec::new()
        },
    }
}

/// All phone-like matches, in text order, duplicates removed.
pub fn extract_phones(text: &str) -> Vec<String> {
    find_unique(&PHONE_RE, text)
}

/// All email matches, in text order, duplicates removed.
pub fn extract_emails(text: &str) -> Vec<String> {
    find_unique(&EMAIL_RE, text)
}

fn find_unique(regex: &Regex, text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in regex.find_iter(text) {
        let value = m.as_str().trim();
        if value.is_empty() || found.iter().any(|f| f == value) {
            continue;
        }
        found.push(value.to_string());
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTACT: &str = "Contact Jane at jane.doe@example.com or +1 (555) 123-4567";

    #[test]
    fn test_extract_phone_and_email() {
        let matches = extract(CONTACT, ExtractOptions::new(true, true));
        assert_eq!(matches.emails, vec!["jane.doe@example.com"]);
        assert_eq!(matches.phones, vec!["+1 (555) 123-4567"]);
    }

    #[test]
    fn test_flags_off_returns_empty() {
        for text in [CONTACT, "", "call 555-0100 or mail a@b.io"] {
            let matches = extract(text, ExtractOptions::new(false, false));
            assert!(matches.phones.is_empty());
            assert!(matches.emails.is_empty());
        }
    }

    #[test]
    fn test_only_requested_field_is_filled() {
        let phones_only = extract(CONTACT, ExtractOptions::new(true, false));
        assert!(!phones_only.phones.is_empty());
        assert!(phones_only.emails.is_empty());

        let emails_only = extract(CONTACT, ExtractOptions::new(false, true));
        assert!(emails_only.phones.is_empty());
        assert_eq!(emails_only.emails, vec!["jane.doe@example.com"]);
    }

    #[test]
    fn test_separator_variants() {
        let phones = extract_phones("Office 555.123.4567, fax 555-987-6543, cell 555 222 3333");
        assert_eq!(phones, vec!["555.123.4567", "555-987-6543", "555 222 3333"]);
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let emails = extract_emails("b@corp.com, a@corp.com and again b@corp.com");
        assert_eq!(emails, vec!["b@corp.com", "a@corp.com"]);
    }

    #[test]
    fn test_email_needs_two_letter_tld() {
        assert!(extract_emails("broken@host.c").is_empty());
        assert_eq!(extract_emails("ok@host.io"), vec!["ok@host.io"]);
    }

    #[test]
    fn test_no_digits_no_phones() {
        assert!(extract_phones("No numbers in this snippet at all.").is_empty());
    }
}

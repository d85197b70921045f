// Free-text query matching shared by every listing.
//
// Matching is plain case-insensitive substring containment: no operators, no
// ranking. The query is normalized once (trimmed, lowercased) and then tested
// against already-lowercased haystacks.

use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    needle: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// An empty query matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// `haystack` must already be lowercased.
    pub fn matches_text(&self, haystack: &str) -> bool {
        self.is_empty() || haystack.contains(&self.needle)
    }

    /// Banner rule: the code or the title contains the query.
    pub fn matches_item(&self, code: &str, title: &str) -> bool {
        self.is_empty()
            || code.to_lowercase().contains(&self.needle)
            || title.to_lowercase().contains(&self.needle)
    }
}

/// Locale-style string ordering for codes.
///
/// Characters compare by class first (whitespace, then punctuation, then
/// digits, then letters) and case-insensitively within a class, so
/// `"nfpc 101"` and `"NFPC 101"` sit next to each other. Case ties put the
/// lowercase form first; any remaining tie falls back to the raw text.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .map(collation_key)
        .cmp(b.chars().flat_map(char::to_lowercase).map(collation_key));
    primary
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphanumeric() {
        3
    } else {
        1
    };
    (class, c)
}

fn case_rank(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed_and_lowercased() {
        let q = Query::new("  NfPc  ");
        assert_eq!(q.as_str(), "nfpc");
        assert!(!q.is_empty());
        assert!(Query::new("   ").is_empty());
    }

    #[test]
    fn locale_cmp_groups_case_variants() {
        let mut codes = vec!["b-1", "A-2", "a-1", "B-0"];
        codes.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(codes, vec!["a-1", "A-2", "B-0", "b-1"]);
        assert_eq!(locale_cmp("X", "x"), Ordering::Greater);
        assert_eq!(locale_cmp("nfpc 102", "NFPC 102"), Ordering::Less);
    }

    #[test]
    fn locale_cmp_ranks_punctuation_before_digits_and_letters() {
        assert_eq!(locale_cmp("a_1", "a1"), Ordering::Less);
        assert_eq!(locale_cmp("a 1", "a-1"), Ordering::Less);
        assert_eq!(locale_cmp("a-1", "aa"), Ordering::Less);
        assert_eq!(locale_cmp("9", "a"), Ordering::Less);
    }
}

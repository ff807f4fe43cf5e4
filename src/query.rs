//! Ordered query-string model.
//!
//! Mutating one key must leave every other key present, unchanged and in its
//! original position, so pairs are kept as an ordered list rather than a map.
//! Reads follow standard query-string semantics: when a malformed URL carries
//! duplicate keys, the last occurrence wins.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters left bare when serializing; everything else is percent-encoded.
/// Matches the URL "unreserved" set.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a single query key or value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ENCODE_SET).to_string()
}

fn decode_component(raw: &str) -> String {
    // '+' is the legacy form encoding of a space.
    let unplused = raw.replace('+', " ");
    percent_decode_str(&unplused).decode_utf8_lossy().into_owned()
}

/// The key-value pairs carried in a page URL, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Parses a raw query string, with or without the leading `?`.
    pub fn parse(raw: &str) -> Self {
        let query = raw.trim_start_matches('?');
        if query.is_empty() {
            return Self::default();
        }

        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let mut kv = pair.splitn(2, '=');
                let key = decode_component(kv.next().unwrap_or(""));
                let value = decode_component(kv.next().unwrap_or(""));
                (key, value)
            })
            .collect();

        Self { pairs }
    }

    /// Returns the value for `key`; the last occurrence wins when the input
    /// carried duplicates.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrites `key` in place, appending it when absent.
    ///
    /// The first occurrence keeps its position; later duplicates of the same
    /// key are dropped. Every other pair is untouched.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut found = false;
        self.pairs.retain_mut(|(k, v)| {
            if k == key {
                if found {
                    return false;
                }
                found = true;
                *v = value.to_string();
            }
            true
        });

        if !found {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Whether no pairs are present.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes back to `key=value&...` with percent-encoded components.
    pub fn to_query(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryString, encode_component};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_pairs_in_order() {
        let q = QueryString::parse("?a=1&location=X&b=2");
        assert_eq!(q.get("a"), Some("1"));
        assert_eq!(q.get("location"), Some("X"));
        assert_eq!(q.get("b"), Some("2"));
    }

    #[test]
    fn set_preserves_unrelated_keys_and_order() {
        let mut q = QueryString::parse("a=1&location=X&b=2");
        q.set("location", "Y");
        assert_eq!(q.to_query(), "a=1&location=Y&b=2");
    }

    #[test]
    fn set_appends_when_key_is_absent() {
        let mut q = QueryString::parse("emotion=joy");
        q.set("location", "JBNU");
        assert_eq!(q.to_query(), "emotion=joy&location=JBNU");
    }

    #[test]
    fn duplicate_keys_read_last_and_collapse_on_set() {
        let q = QueryString::parse("location=A&location=B");
        assert_eq!(q.get("location"), Some("B"));

        let mut q = QueryString::parse("location=A&x=1&location=B");
        q.set("location", "C");
        assert_eq!(q.to_query(), "location=C&x=1");
    }

    #[test]
    fn round_trips_percent_encoded_values() {
        let original = "emotion=%ED%9D%AC&location=%EC%A0%84%EB%B6%81%EB%8C%80";
        let q = QueryString::parse(original);
        assert_eq!(q.get("emotion"), Some("희"));
        assert_eq!(q.get("location"), Some("전북대"));
        assert_eq!(q.to_query(), original);
    }

    #[test]
    fn plus_decodes_to_space() {
        let q = QueryString::parse("name=Cafe+A");
        assert_eq!(q.get("name"), Some("Cafe A"));
    }

    #[test]
    fn empty_query_is_empty() {
        assert!(QueryString::parse("").is_empty());
        assert!(QueryString::parse("?").is_empty());
        assert_eq!(QueryString::parse("").to_query(), "");
    }

    #[test]
    fn value_without_equals_parses_as_empty() {
        let q = QueryString::parse("flag&x=1");
        assert_eq!(q.get("flag"), Some(""));
        assert_eq!(q.get("x"), Some("1"));
    }

    #[test]
    fn encode_component_keeps_unreserved_characters() {
        assert_eq!(encode_component("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode_component("전북대"), "%EC%A0%84%EB%B6%81%EB%8C%80");
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
    }
}

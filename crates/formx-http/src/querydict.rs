//! Dictionary of urlencoded form values.
//!
//! [`QueryDict`] wraps [`MultiValueDict`] to hold the key/value pairs of an
//! `application/x-www-form-urlencoded` body or a URL query string. A key may
//! carry several values (multi-selects, checkbox groups).

use formx_core::utils::MultiValueDict;

/// A dictionary for query string and form data.
///
/// # Examples
///
/// ```
/// use formx_http::QueryDict;
///
/// let qd = QueryDict::parse("Name=Ann&Tags=a&Tags=b");
/// assert_eq!(qd.get("Name"), Some("Ann"));
/// assert_eq!(qd.get("Tags"), Some("a"));
/// assert_eq!(qd.get_list("Tags"), vec!["a".to_string(), "b".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryDict {
    data: MultiValueDict<String, String>,
}

impl QueryDict {
    /// Creates a new, empty `QueryDict`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a urlencoded string (e.g., `"key1=val1&key2=val2"`).
    ///
    /// `+` decodes to a space and percent sequences are decoded as UTF-8
    /// (invalid sequences are replaced). A pair without `=` yields an empty
    /// value.
    pub fn parse(query_string: &str) -> Self {
        let mut data = MultiValueDict::new();

        for pair in query_string.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (key, value) = pair
                .find('=')
                .map_or((pair, ""), |eq_pos| (&pair[..eq_pos], &pair[eq_pos + 1..]));

            data.append(percent_decode(key), percent_decode(value));
        }

        Self { data }
    }

    /// Builds a `QueryDict` from `(key, value)` pairs, in order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = MultiValueDict::new();
        for (k, v) in pairs {
            data.append(k.into(), v.into());
        }
        Self { data }
    }

    /// Returns the first value posted for the key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.first(&key.to_string()).map(String::as_str)
    }

    /// Returns every value posted for the key, or an empty list.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.data
            .get_list(&key.to_string())
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    /// Replaces all values for the key with a single value.
    pub fn set(&mut self, key: &str, value: &str) {
        self.data.set(key.to_string(), value.to_string());
    }

    /// Appends a value for the key.
    pub fn append(&mut self, key: &str, value: &str) {
        self.data.append(key.to_string(), value.to_string());
    }

    /// Encodes this `QueryDict` as a urlencoded string, keys in insertion order.
    pub fn urlencode(&self) -> String {
        self.data
            .iter()
            .flat_map(|(key, values)| {
                values
                    .iter()
                    .map(move |value| format!("{}={}", percent_encode(key), percent_encode(value)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the `QueryDict` contains no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the specified key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(&key.to_string())
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }
}

fn percent_decode(input: &str) -> String {
    let plus_decoded = input.replace('+', " ");
    percent_encoding::percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn percent_encode(input: &str) -> String {
    percent_encoding::utf8_percent_encode(input, percent_encoding::NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_string() {
        let qd = QueryDict::parse("");
        assert!(qd.is_empty());
    }

    #[test]
    fn test_parse_multiple_keys() {
        let qd = QueryDict::parse("a=1&b=2&c=3");
        assert_eq!(qd.get("a"), Some("1"));
        assert_eq!(qd.get("c"), Some("3"));
        assert_eq!(qd.len(), 3);
    }

    #[test]
    fn test_get_returns_first_value() {
        let qd = QueryDict::parse("color=red&color=blue");
        assert_eq!(qd.get("color"), Some("red"));
        assert_eq!(qd.get_list("color"), vec!["red", "blue"]);
    }

    #[test]
    fn test_parse_plus_and_percent() {
        let qd = QueryDict::parse("Name=Ann+Lee&Note=a%26b%3Dc");
        assert_eq!(qd.get("Name"), Some("Ann Lee"));
        assert_eq!(qd.get("Note"), Some("a&b=c"));
    }

    #[test]
    fn test_key_without_value() {
        let qd = QueryDict::parse("flag&x=");
        assert_eq!(qd.get("flag"), Some(""));
        assert_eq!(qd.get("x"), Some(""));
    }

    #[test]
    fn test_missing_key() {
        let qd = QueryDict::parse("a=1");
        assert_eq!(qd.get("b"), None);
        assert!(qd.get_list("b").is_empty());
    }

    #[test]
    fn test_set_and_append() {
        let mut qd = QueryDict::new();
        qd.append("k", "1");
        qd.append("k", "2");
        qd.set("k", "3");
        assert_eq!(qd.get_list("k"), vec!["3"]);
    }

    #[test]
    fn test_urlencode_keeps_order() {
        let qd = QueryDict::from_pairs([("b", "x y"), ("a", "1"), ("b", "&")]);
        assert_eq!(qd.urlencode(), "b=x%20y&b=%26&a=1");
    }
}

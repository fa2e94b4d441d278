//! Field tag micro-language.
//!
//! Each record field may carry one tag string of `;`-separated `key=value`
//! clauses, e.g. `label=Full name;required=true;placeholder=Jane Doe`.
//! Recognized keys are listed in [`keys`]. The bare clause `-` marks the
//! field as ignored.

use std::collections::HashMap;

/// Recognized tag keys and values.
pub mod keys {
    /// Overrides the displayed label (default: the field name).
    pub const LABEL: &str = "label";
    /// `"true"` marks the field as required.
    pub const REQUIRED: &str = "required";
    /// Placeholder text for the input.
    pub const PLACEHOLDER: &str = "placeholder";
    /// Selects a registered widget by name, bypassing kind defaults.
    pub const WIDGET: &str = "widget";
    /// Subtype hint: `"textarea"` or `"date"`.
    pub const TYPE: &str = "type";
    /// `|`-separated options for choice widgets.
    pub const CHOICES: &str = "choices";
    /// The ignored-field sentinel.
    pub const IGNORED: &str = "-";
    /// Value stored under [`IGNORED`].
    pub const IGNORED_VALUE: &str = "this field is ignored";
}

/// A parsed tag string.
///
/// A missing key means "no override".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    entries: HashMap<String, String>,
}

impl Tags {
    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns `true` if the tag string was the ignored-field sentinel.
    ///
    /// Rendering and binding do not consult this flag.
    pub fn is_ignored(&self) -> bool {
        self.entries.contains_key(keys::IGNORED)
    }

    /// Returns `true` when `required=true`.
    pub fn is_required(&self) -> bool {
        self.get(keys::REQUIRED) == Some("true")
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the underlying map.
    pub const fn as_map(&self) -> &HashMap<String, String> {
        &self.entries
    }

    /// Consumes the tags and returns the underlying map.
    pub fn into_map(self) -> HashMap<String, String> {
        self.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parses a raw tag string.
///
/// The string is trimmed; an empty string yields no tags. Clauses are split
/// on `;` and each on `=`. A clause without `=` is dropped, except the exact
/// clause `-`, which short-circuits to the ignored sentinel and discards
/// everything else. Keys and values are trimmed; a repeated key keeps its
/// last value. In `a=b=c` the value is `b`.
///
/// # Examples
///
/// ```
/// use formx_forms::tags::parse_tags;
///
/// let tags = parse_tags("label=Name; required=true");
/// assert_eq!(tags.get("label"), Some("Name"));
/// assert!(tags.is_required());
///
/// assert!(parse_tags("-").is_ignored());
/// assert!(parse_tags("badclause").is_empty());
/// ```
pub fn parse_tags(raw: &str) -> Tags {
    let raw = raw.trim();
    if raw.is_empty() {
        return Tags::default();
    }

    let mut entries = HashMap::new();
    for clause in raw.split(';') {
        let kv: Vec<&str> = clause.split('=').collect();
        if kv.len() < 2 {
            if kv[0] == keys::IGNORED {
                return std::iter::once((keys::IGNORED, keys::IGNORED_VALUE)).collect();
            }
            continue;
        }
        entries.insert(kv[0].trim().to_string(), kv[1].trim().to_string());
    }

    Tags { entries }
}

//! Sources of submitted form values.

use std::collections::HashMap;

use formx_http::{HttpRequest, QueryDict};

/// Read access to the values of a form submission.
pub trait SubmissionSource {
    /// Returns the first value posted under `name`.
    fn value(&self, name: &str) -> Option<String>;

    /// Returns every value posted under `name`, in submission order.
    fn values(&self, name: &str) -> Vec<String>;
}

impl SubmissionSource for QueryDict {
    fn value(&self, name: &str) -> Option<String> {
        self.get(name).map(String::from)
    }

    fn values(&self, name: &str) -> Vec<String> {
        self.get_list(name)
    }
}

/// POST body values take precedence over query-string values.
impl SubmissionSource for HttpRequest {
    fn value(&self, name: &str) -> Option<String> {
        self.form_value(name).map(String::from)
    }

    fn values(&self, name: &str) -> Vec<String> {
        self.form_values(name)
    }
}

impl SubmissionSource for HashMap<String, Vec<String>> {
    fn value(&self, name: &str) -> Option<String> {
        self.get(name).and_then(|v| v.first()).cloned()
    }

    fn values(&self, name: &str) -> Vec<String> {
        self.get(name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_dict_source() {
        let qd = QueryDict::parse("Tags=a&Tags=b&Name=Ann");
        assert_eq!(qd.value("Tags").as_deref(), Some("a"));
        assert_eq!(qd.values("Tags"), vec!["a", "b"]);
        assert_eq!(qd.value("Missing"), None);
        assert!(qd.values("Missing").is_empty());
    }

    #[test]
    fn test_request_source_prefers_post() {
        let req = HttpRequest::builder()
            .method(http::Method::POST)
            .query_string("Name=Query")
            .content_type("application/x-www-form-urlencoded")
            .body(b"Name=Body".to_vec())
            .build();
        assert_eq!(SubmissionSource::value(&req, "Name").as_deref(), Some("Body"));
        assert_eq!(SubmissionSource::values(&req, "Name"), vec!["Body", "Query"]);
    }

    #[test]
    fn test_map_source() {
        let mut map = HashMap::new();
        map.insert("k".to_string(), vec!["1".to_string(), "2".to_string()]);
        map.insert("empty".to_string(), Vec::new());
        assert_eq!(map.value("k").as_deref(), Some("1"));
        assert_eq!(map.value("empty"), None);
        assert_eq!(SubmissionSource::values(&map, "k").len(), 2);
    }
}

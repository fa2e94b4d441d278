//! Integration tests for decoding browser form submissions.

use formx_http::{HttpRequest, QueryDict};
use http::{Method, Request};

fn post(body: &str) -> HttpRequest {
    HttpRequest::from_http(
        Request::builder()
            .method(Method::POST)
            .uri("/form")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body.as_bytes().to_vec())
            .unwrap(),
    )
}

#[test]
fn test_checkbox_absent_when_unchecked() {
    let req = post("Name=Ann");
    assert_eq!(req.form_value("Agree"), None);
}

#[test]
fn test_checkbox_on_when_checked() {
    let req = post("Name=Ann&Agree=on");
    assert_eq!(req.form_value("Agree"), Some("on"));
}

#[test]
fn test_multi_select_values_in_order() {
    let req = post("Tags=rust&Tags=web&Tags=forms");
    assert_eq!(req.form_values("Tags"), vec!["rust", "web", "forms"]);
}

#[test]
fn test_empty_value_is_present_but_empty() {
    let req = post("Name=&Born=");
    assert_eq!(req.form_value("Name"), Some(""));
    assert_eq!(req.form_value("Born"), Some(""));
}

#[test]
fn test_urlencode_round_trips_through_parse() {
    let original = QueryDict::from_pairs([("Name", "Ann Lee"), ("Note", "a&b")]);
    let reparsed = QueryDict::parse(&original.urlencode());
    assert_eq!(reparsed.get("Name"), Some("Ann Lee"));
    assert_eq!(reparsed.get("Note"), Some("a&b"));
}

#[test]
fn test_get_request_reads_query_string() {
    let req = HttpRequest::from_http(
        Request::builder()
            .uri("/search?Name=Bob")
            .body(Vec::new())
            .unwrap(),
    );
    assert_eq!(req.form_value("Name"), Some("Bob"));
    assert!(req.post().is_empty());
}

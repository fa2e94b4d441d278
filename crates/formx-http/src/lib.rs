//! # formx-http
//!
//! The request side of form binding: [`QueryDict`] holds urlencoded form
//! data and [`HttpRequest`] carries the query string and POST body of a
//! submitted form.

pub mod querydict;
pub mod request;

pub use querydict::QueryDict;
pub use request::{HttpRequest, HttpRequestBuilder};

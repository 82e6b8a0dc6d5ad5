//! Minimal HTTP/1.x plumbing over `embedded-io` streams.

mod headers;
mod request;
mod response;

pub use headers::{ContentHeaders, ContentType, HttpMethod, ResponseHeaders, reason_phrase};
pub use request::{BODY_BUFFER_SIZE, HEADER_BUFFER_SIZE, PendingRequest, ReadProgress, Request};
pub use response::{RESPONSE_BODY_SIZE, Response};

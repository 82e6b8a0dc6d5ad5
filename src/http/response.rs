use embedded_io::{Write, WriteFmtError};
use heapless::{String, Vec};
use serde::Serialize;

use super::headers::{ContentHeaders, ContentType, ResponseHeaders};
use super::request::HEADER_BUFFER_SIZE;
use crate::error::{Error, StatusCode};

pub const RESPONSE_BODY_SIZE: usize = 1024;

const INTERNAL_ERROR_BODY: &[u8] = br#"{"error":"Internal","message":"internal error"}"#;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: &'static str,
}

#[derive(Debug, Clone)]
enum Body {
    Buffered(Vec<u8, RESPONSE_BODY_SIZE>),
    Static(&'static [u8]),
}

/// Complete response, written in one go once the request is handled
#[derive(Debug, Clone)]
pub struct Response {
    headers: ResponseHeaders,
    body: Body,
}

impl Response {
    /// Serialize `data` as a JSON body
    pub fn json<T: Serialize>(status: StatusCode, data: &T) -> Self {
        match serde_json_core::to_vec::<_, RESPONSE_BODY_SIZE>(data) {
            Ok(body) => Self::with_body(status, ContentType::Json, Body::Buffered(body)),
            Err(e) => {
                log::warn!("http: response serialization failed: {:?}", e);
                Self::with_body(500, ContentType::Json, Body::Static(INTERNAL_ERROR_BODY))
            }
        }
    }

    /// `200` with a JSON body
    pub fn ok<T: Serialize>(data: &T) -> Self {
        Self::json(200, data)
    }

    /// JSON error body with the status code of `error`
    pub fn error(error: Error) -> Self {
        Self::json(
            error.status_code(),
            &ErrorBody {
                error: error.kind(),
                message: error.message(),
            },
        )
    }

    pub fn html(page: &'static [u8]) -> Self {
        Self::with_body(200, ContentType::TextHtml, Body::Static(page))
    }

    fn with_body(status: StatusCode, content_type: ContentType, body: Body) -> Self {
        let len = match &body {
            Body::Buffered(bytes) => bytes.len(),
            Body::Static(bytes) => bytes.len(),
        };
        let mut content = ContentHeaders::new(content_type).with_length(len);
        if content_type != ContentType::Json {
            content = content.with_utf8();
        }
        Self {
            headers: ResponseHeaders::from_code(status).with_content(content),
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.headers.status()
    }

    pub fn body(&self) -> &[u8] {
        match &self.body {
            Body::Buffered(bytes) => bytes.as_slice(),
            Body::Static(bytes) => bytes,
        }
    }

    /// Write headers and body to the connection
    ///
    /// Headers that do not fit the header buffer fail with
    /// [`WriteFmtError::FmtError`] before anything is sent.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), WriteFmtError<W::Error>> {
        let mut head = String::<HEADER_BUFFER_SIZE>::new();
        self.headers
            .write_to(&mut head)
            .map_err(|_| WriteFmtError::FmtError)?;

        writer.write_all(head.as_bytes())?;
        writer.write_all(self.body())?;
        writer.flush()?;
        Ok(())
    }
}

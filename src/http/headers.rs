use core::fmt::Write;

use crate::error::{Error, StatusCode};

pub fn reason_phrase(code: StatusCode) -> &'static str {
    match code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        408 => "Request Timeout",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// HTTP Content Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    TextHtml,
}

impl ContentType {
    /// Convert the content type to a string.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::TextHtml => "text/html",
        }
    }
}

/// HTTP Content Headers.
#[derive(Debug, Clone, Copy)]
pub struct ContentHeaders {
    content_type: ContentType,
    content_length: Option<usize>,
    utf8: bool,
}

impl ContentHeaders {
    /// Create a new content headers with a content type.
    pub const fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            content_length: None,
            utf8: false,
        }
    }

    /// Set the content length.
    #[must_use]
    pub const fn with_length(mut self, length: usize) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Mark the body as UTF-8 text.
    #[must_use]
    pub const fn with_utf8(mut self) -> Self {
        self.utf8 = true;
        self
    }

    fn write_to(&self, writer: &mut impl Write) -> core::fmt::Result {
        write!(writer, "Content-Type: {}", self.content_type.as_str())?;
        if self.utf8 {
            writer.write_str("; charset=utf-8")?;
        }
        writer.write_str("\r\n")?;
        if let Some(content_length) = self.content_length {
            write!(writer, "Content-Length: {}\r\n", content_length)?;
        }
        Ok(())
    }
}

/// Response Headers.
///
/// Every response closes the connection.
#[derive(Debug, Clone, Copy)]
pub struct ResponseHeaders {
    status: StatusCode,
    content: Option<ContentHeaders>,
}

impl ResponseHeaders {
    /// Create response headers with a status code.
    pub const fn from_code(code: StatusCode) -> Self {
        Self {
            status: code,
            content: None,
        }
    }

    /// Set the content headers.
    #[must_use]
    pub const fn with_content(mut self, content: ContentHeaders) -> Self {
        self.content = Some(content);
        self
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Write the response headers to a writer.
    pub fn write_to(&self, writer: &mut impl Write) -> core::fmt::Result {
        let reason = reason_phrase(self.status);
        write!(writer, "HTTP/1.1 {} {}\r\n", self.status, reason)?;
        if let Some(content) = &self.content {
            content.write_to(writer)?;
        }

        writer.write_str("Connection: close\r\n")?;
        writer.write_str("\r\n")?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "OPTIONS" => HttpMethod::Options,
            "HEAD" => HttpMethod::Head,
            _ => return None,
        })
    }
}

/// Parse the request line from the header string.
///
/// Returns the method, request target, and rest of the header string.
pub(crate) fn parse_request_line(header_str: &str) -> Option<(HttpMethod, &str, &str)> {
    let line_end = header_str.find("\r\n").unwrap_or(header_str.len());
    let first_line = &header_str[..line_end];
    let mut parts = first_line.split_whitespace();
    let method = parts.next().and_then(HttpMethod::parse)?;
    let target = parts.next()?;
    if !parts.next().is_some_and(|version| version.starts_with("HTTP/1.")) {
        return None;
    }

    let rest = header_str.get(line_end + 2..).unwrap_or("");
    Some((method, target, rest))
}

/// Find the content length in the header string.
///
/// Returns `Ok(None)` when the header is absent and an error when it is
/// present but not a number.
pub(crate) fn find_content_length(header: &str) -> Result<Option<usize>, Error> {
    const TARGET: &str = "content-length:";
    for line in header.lines() {
        let Some(name) = line.get(..TARGET.len()) else {
            continue;
        };
        if name.eq_ignore_ascii_case(TARGET) {
            let value_str = line[TARGET.len()..].trim();
            let length = value_str
                .parse::<usize>()
                .map_err(|_| Error::MalformedRequest("invalid Content-Length"))?;
            log::trace!("http: found Content-Length: {}", length);
            return Ok(Some(length));
        }
    }
    Ok(None)
}

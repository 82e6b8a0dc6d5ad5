use embedded_io::{Error as _, Read, ReadReady};
use heapless::Vec;

use super::headers::{HttpMethod, find_content_length, parse_request_line};
use crate::error::Error;

pub const HEADER_BUFFER_SIZE: usize = 512;
pub const BODY_BUFFER_SIZE: usize = 1024;
const REQUEST_BUFFER_SIZE: usize = HEADER_BUFFER_SIZE + BODY_BUFFER_SIZE;
const RX_CHUNK_SIZE: usize = 256;

/// Parsed request, borrowing from the receive buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    pub method: HttpMethod,
    /// Path without the query string
    pub path: &'a str,
    /// Raw query string after `?`
    pub query: Option<&'a str>,
    pub body: &'a [u8],
}

impl<'a> Request<'a> {
    /// Get request method and path
    pub fn route(&self) -> (HttpMethod, &'a str) {
        (self.method, self.path)
    }
}

/// Outcome of one non-blocking read pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadProgress {
    /// More bytes are needed
    Pending,
    /// Headers and body are fully received
    Complete,
    /// Peer closed the connection or the socket failed
    Closed,
}

#[derive(Debug, Clone, Copy)]
struct Heading {
    method: HttpMethod,
    target_start: usize,
    target_end: usize,
    header_end: usize,
    content_length: usize,
}

/// Request being received
///
/// Bytes are accumulated into a bounded buffer as they arrive. The start
/// line and headers are parsed as soon as the blank line is seen, so an
/// oversized or malformed request is rejected before its body is read.
#[derive(Debug, Default)]
pub struct PendingRequest {
    buf: Vec<u8, REQUEST_BUFFER_SIZE>,
    heading: Option<Heading>,
}

impl PendingRequest {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            heading: None,
        }
    }

    /// Append received bytes; returns `true` once the request is complete
    pub fn feed(&mut self, bytes: &[u8]) -> Result<bool, Error> {
        self.buf
            .extend_from_slice(bytes)
            .map_err(|()| Error::MalformedRequest("request too large"))?;
        if self.heading.is_none() {
            self.parse_heading()?;
        }
        Ok(self.is_complete())
    }

    /// Read whatever the connection has ready without blocking
    pub fn poll_read<R: Read + ReadReady>(
        &mut self,
        reader: &mut R,
    ) -> Result<ReadProgress, Error> {
        let mut chunk = [0u8; RX_CHUNK_SIZE];
        loop {
            match reader.read_ready() {
                Ok(true) => {}
                Ok(false) => return Ok(ReadProgress::Pending),
                Err(e) => {
                    log::debug!("http: read_ready failed: {:?}", e.kind());
                    return Ok(ReadProgress::Closed);
                }
            }

            let n = match reader.read(&mut chunk) {
                Ok(0) => return Ok(ReadProgress::Closed),
                Ok(n) => n,
                Err(e) => {
                    log::debug!("http: read failed: {:?}", e.kind());
                    return Ok(ReadProgress::Closed);
                }
            };
            if self.feed(&chunk[..n])? {
                return Ok(ReadProgress::Complete);
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.heading
            .is_some_and(|h| self.buf.len() >= h.header_end + h.content_length)
    }

    /// Number of bytes received so far
    pub fn received(&self) -> usize {
        self.buf.len()
    }

    /// The parsed request, once complete
    pub fn request(&self) -> Option<Request<'_>> {
        let heading = self.heading.filter(|_| self.is_complete())?;
        let target =
            core::str::from_utf8(&self.buf[heading.target_start..heading.target_end]).ok()?;
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let body_end = heading.header_end + heading.content_length;

        Some(Request {
            method: heading.method,
            path,
            query,
            body: &self.buf[heading.header_end..body_end],
        })
    }

    fn parse_heading(&mut self) -> Result<(), Error> {
        let Some(pos) = self.buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            if self.buf.len() > HEADER_BUFFER_SIZE {
                return Err(Error::MalformedRequest("headers too large"));
            }
            return Ok(());
        };
        let header_end = pos + 4;
        if header_end > HEADER_BUFFER_SIZE {
            return Err(Error::MalformedRequest("headers too large"));
        }

        // Only parse the headers portion, the body may hold anything
        let header_str = core::str::from_utf8(&self.buf[..header_end])
            .map_err(|_| Error::MalformedRequest("headers are not utf-8"))?;
        let (method, target, rest) = parse_request_line(header_str)
            .ok_or(Error::MalformedRequest("invalid request line"))?;
        let content_length = find_content_length(rest)?.unwrap_or(0);
        if content_length > BODY_BUFFER_SIZE {
            return Err(Error::MalformedRequest("body too large"));
        }

        let target_start = target.as_ptr() as usize - header_str.as_ptr() as usize;
        log::debug!("http: {:?} {}", method, target);
        self.heading = Some(Heading {
            method,
            target_start,
            target_end: target_start + target.len(),
            header_end,
            content_length,
        });
        Ok(())
    }
}

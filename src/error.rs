//! Error kinds surfaced by the engine and the control API.

use core::fmt;

/// HTTP status code
pub type StatusCode = u16;

/// Errors produced while handling a control request or driving the strip.
///
/// Every variant is recovered locally: request errors become an HTTP status
/// with a JSON body, a hardware failure only skips the flush for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Requested show kind is not supported
    InvalidShow,
    /// A parameter is outside its valid range
    InvalidParameter(&'static str),
    /// Request could not be parsed
    MalformedRequest(&'static str),
    /// No handler for the requested method and path
    UnknownRoute,
    /// Semantic event name is not configured
    UnknownEvent,
    /// Request did not complete within the request budget
    RequestTimeout,
    /// LED driver rejected the frame
    HardwareWriteFailure,
    /// Response could not be produced
    Internal,
}

impl Error {
    /// Stable name used as the `error` field in JSON responses
    pub const fn kind(self) -> &'static str {
        match self {
            Self::InvalidShow => "InvalidShow",
            Self::InvalidParameter(_) => "InvalidParameter",
            Self::MalformedRequest(_) => "MalformedRequest",
            Self::UnknownRoute => "UnknownRoute",
            Self::UnknownEvent => "UnknownEvent",
            Self::RequestTimeout => "RequestTimeout",
            Self::HardwareWriteFailure => "HardwareWriteFailure",
            Self::Internal => "Internal",
        }
    }

    /// Human readable detail
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidShow => "unknown show kind",
            Self::InvalidParameter(reason) | Self::MalformedRequest(reason) => reason,
            Self::UnknownRoute => "unknown route",
            Self::UnknownEvent => "unknown event",
            Self::RequestTimeout => "request took too long",
            Self::HardwareWriteFailure => "led write failed",
            Self::Internal => "internal error",
        }
    }

    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidShow
            | Self::InvalidParameter(_)
            | Self::MalformedRequest(_)
            | Self::UnknownEvent => 400,
            Self::UnknownRoute => 404,
            Self::RequestTimeout => 408,
            Self::HardwareWriteFailure | Self::Internal => 500,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

/// Invalid engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Pixel count is zero or exceeds the buffer capacity
    PixelCount { requested: usize, capacity: usize },
    /// Tick interval must be at least one millisecond
    TickInterval,
    /// Idle show name is not a known show kind
    IdleShow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelCount {
                requested,
                capacity,
            } => write!(f, "pixel count {requested} must be within 1..={capacity}"),
            Self::TickInterval => f.write_str("tick interval must be at least 1 ms"),
            Self::IdleShow => f.write_str("unknown idle show"),
        }
    }
}

impl core::error::Error for Error {}

impl core::error::Error for ConfigError {}

//! URL query decoding for GET requests.

use core::str::FromStr;

use heapless::String;

use crate::error::Error;

/// Longest decoded query value
pub const MAX_QUERY_VALUE: usize = 64;

/// Parameters that can be filled from a URL query
pub trait FromQuery: Default {
    /// Store one decoded `key=value` pair; unknown keys are ignored
    fn assign(&mut self, key: &str, value: &str) -> Result<(), Error>;

    fn from_query(query: Option<&str>) -> Result<Self, Error> {
        let mut params = Self::default();
        for pair in query.unwrap_or("").split('&').filter(|p| !p.is_empty()) {
            let (key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(raw_value)?;
            params.assign(key, &value)?;
        }
        Ok(params)
    }
}

/// Decode `%XX` escapes and `+` as space
pub fn decode_component(raw: &str) -> Result<String<MAX_QUERY_VALUE>, Error> {
    const TOO_LONG: Error = Error::MalformedRequest("query value too long");

    let mut bytes = heapless::Vec::<u8, MAX_QUERY_VALUE>::new();
    let mut iter = raw.bytes();
    while let Some(b) = iter.next() {
        let decoded = match b {
            b'+' => b' ',
            b'%' => {
                let hi = iter.next().and_then(hex_digit);
                let lo = iter.next().and_then(hex_digit);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => (hi << 4) | lo,
                    _ => return Err(Error::MalformedRequest("invalid percent escape")),
                }
            }
            other => other,
        };
        bytes.push(decoded).map_err(|_| TOO_LONG)?;
    }

    String::from_utf8(bytes).map_err(|_| Error::MalformedRequest("query value is not utf-8"))
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

pub(crate) fn number<T: FromStr>(value: &str, reason: &'static str) -> Result<T, Error> {
    value.trim().parse().map_err(|_| Error::InvalidParameter(reason))
}

pub(crate) fn text<const N: usize>(value: &str) -> Result<String<N>, Error> {
    String::try_from(value).map_err(|()| Error::InvalidParameter("value too long"))
}

/// `1`, `true`, `yes` and `on` are true; anything else is false
pub(crate) fn flag(value: &str) -> bool {
    ["1", "true", "yes", "on"]
        .iter()
        .any(|v| value.eq_ignore_ascii_case(v))
}

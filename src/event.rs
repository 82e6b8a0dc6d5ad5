//! Semantic events
//!
//! Callers send what happened ("movie-start"), the device decides which
//! show to run and for how long. The table is static configuration, so an
//! event always resolves to the same show.

use crate::effect::ShowKind;

/// One entry of the event table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBinding {
    pub name: &'static str,
    pub show: ShowKind,
    /// Default duration of the timed show
    pub seconds: u32,
}

pub const EVENTS: &[EventBinding] = &[
    EventBinding {
        name: "movie-start",
        show: ShowKind::Wipe,
        seconds: 10,
    },
    EventBinding {
        name: "movie-pause",
        show: ShowKind::Double,
        seconds: 6,
    },
    EventBinding {
        name: "movie-stop",
        show: ShowKind::Wipe,
        seconds: 6,
    },
    EventBinding {
        name: "bulb-change",
        show: ShowKind::Marquee,
        seconds: 8,
    },
];

/// Names of every configured event
pub const EVENT_NAMES: &[&str] = &["movie-start", "movie-pause", "movie-stop", "bulb-change"];

/// Look up an event by name
///
/// `_` and `-` are interchangeable, so `movie_start` finds `movie-start`.
pub fn find_event(name: &str) -> Option<&'static EventBinding> {
    EVENTS.iter().find(|binding| same_event_name(binding.name, name))
}

fn same_event_name(configured: &str, requested: &str) -> bool {
    let normalize = |b: u8| if b == b'_' { b'-' } else { b.to_ascii_lowercase() };
    configured.len() == requested.len()
        && configured
            .bytes()
            .zip(requested.bytes())
            .all(|(a, b)| normalize(a) == normalize(b))
}

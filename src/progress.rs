//! Push-driven playback progress for the "now playing" progress bar.
//!
//! An external bridge pushes the playback fraction and state. The bar takes
//! over from the idle show while updates keep arriving and the playback is
//! not stopped.

use crate::error::Error;

const STATE_PLAYING: &str = "playing";
const STATE_PAUSED: &str = "paused";
const STATE_STOPPED: &str = "stopped";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

impl PlaybackState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playing => STATE_PLAYING,
            Self::Paused => STATE_PAUSED,
            Self::Stopped => STATE_STOPPED,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case(STATE_PLAYING) {
            Some(Self::Playing)
        } else if s.eq_ignore_ascii_case(STATE_PAUSED) {
            Some(Self::Paused)
        } else if s.eq_ignore_ascii_case(STATE_STOPPED) {
            Some(Self::Stopped)
        } else {
            None
        }
    }
}

/// Snapshot of the progress state handed to the progress effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressView {
    pub fraction: f32,
    pub state: PlaybackState,
    /// False during the "off" half of the paused blink
    pub head_visible: bool,
}

impl Default for ProgressView {
    fn default() -> Self {
        Self {
            fraction: 0.0,
            state: PlaybackState::Stopped,
            head_visible: true,
        }
    }
}

/// Tracks the most recent progress update
///
/// All times are engine ticks.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    fraction: f32,
    state: PlaybackState,
    last_update: Option<u64>,
    timeout_ticks: u64,
    blink_ticks: u64,
}

impl ProgressTracker {
    pub const fn new(timeout_ticks: u64, blink_ticks: u64) -> Self {
        Self {
            fraction: 0.0,
            state: PlaybackState::Stopped,
            last_update: None,
            timeout_ticks,
            blink_ticks,
        }
    }

    /// Validate and clamp a progress fraction.
    ///
    /// Values outside `0.0..=1.0` are clamped, non-finite values rejected.
    pub fn clamp_fraction(fraction: f32) -> Result<f32, Error> {
        if !fraction.is_finite() {
            return Err(Error::InvalidParameter("progress must be a finite number"));
        }
        Ok(fraction.clamp(0.0, 1.0))
    }

    /// Apply an update pushed at tick `now`
    ///
    /// A missing fraction keeps the previous one. `Stopped` resets the
    /// fraction to zero. Returns the stored fraction.
    pub fn update(
        &mut self,
        fraction: Option<f32>,
        state: PlaybackState,
        now: u64,
    ) -> Result<f32, Error> {
        let fraction = match (state, fraction) {
            (PlaybackState::Stopped, _) => 0.0,
            (_, Some(fraction)) => Self::clamp_fraction(fraction)?,
            (_, None) => self.fraction,
        };
        self.fraction = fraction;
        self.state = state;
        self.last_update = Some(now);
        Ok(fraction)
    }

    /// Set the fraction shown by a persistent progress show
    ///
    /// Does not refresh the update time, so it never makes the push-driven
    /// overlay active on its own.
    pub(crate) fn set_manual(&mut self, fraction: f32) {
        self.fraction = fraction;
        if self.state == PlaybackState::Stopped {
            self.state = PlaybackState::Playing;
        }
    }

    pub const fn fraction(&self) -> f32 {
        self.fraction
    }

    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Check if recent updates should override the idle show
    pub fn is_active(&self, now: u64) -> bool {
        if self.state == PlaybackState::Stopped {
            return false;
        }
        self.last_update
            .is_some_and(|at| now.saturating_sub(at) < self.timeout_ticks)
    }

    pub fn view(&self, now: u64) -> ProgressView {
        let head_visible = match (self.state, self.last_update) {
            (PlaybackState::Paused, Some(at)) if self.blink_ticks > 0 => {
                (now.saturating_sub(at) / self.blink_ticks) % 2 == 0
            }
            _ => true,
        };
        ProgressView {
            fraction: self.fraction,
            state: self.state,
            head_visible,
        }
    }
}

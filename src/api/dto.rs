//! Request parameters and reply bodies of the control API.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use super::query::{FromQuery, flag, number, text};
use crate::color::{MAX_PALETTE, Rgb, parse_hex_color};
use crate::error::Error;

pub type NameText = String<24>;
/// `#RRGGBB` or `RRGGBB`
pub type ColorText = String<8>;
pub type StateText = String<12>;

const STATUS_OK: &str = "ok";

/// `/api/show`
#[derive(Debug, Default, Deserialize)]
pub struct ShowParams {
    #[serde(alias = "name")]
    pub kind: Option<NameText>,
    pub color: Option<ColorText>,
    pub colors: Option<Vec<ColorText, MAX_PALETTE>>,
    pub speed: Option<f32>,
    pub seconds: Option<i32>,
    pub progress: Option<f32>,
}

impl ShowParams {
    /// Colors from `color` followed by `colors`
    pub fn palette(&self) -> Result<Vec<Rgb, MAX_PALETTE>, Error> {
        let mut palette = Vec::new();
        let requested = self.color.iter().chain(self.colors.iter().flatten());
        for hex in requested {
            let color = parse_hex_color(hex).ok_or(Error::InvalidParameter("invalid color"))?;
            palette
                .push(color)
                .map_err(|_| Error::InvalidParameter("too many colors"))?;
        }
        Ok(palette)
    }
}

impl FromQuery for ShowParams {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "kind" | "name" => self.kind = Some(text(value)?),
            "color" => self.color = Some(text(value)?),
            "colors" => {
                let mut colors = Vec::new();
                for hex in value.split(',').filter(|c| !c.is_empty()) {
                    colors
                        .push(text(hex)?)
                        .map_err(|_| Error::InvalidParameter("too many colors"))?;
                }
                self.colors = Some(colors);
            }
            "speed" => self.speed = Some(number(value, "speed must be a number")?),
            "seconds" => self.seconds = Some(number(value, "seconds must be an integer")?),
            "progress" => self.progress = Some(number(value, "progress must be a number")?),
            _ => {}
        }
        Ok(())
    }
}

/// `/api/event`
#[derive(Debug, Default, Deserialize)]
pub struct EventParams {
    pub name: Option<NameText>,
    pub seconds: Option<i32>,
}

impl FromQuery for EventParams {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "name" => self.name = Some(text(value)?),
            "seconds" => self.seconds = Some(number(value, "seconds must be an integer")?),
            _ => {}
        }
        Ok(())
    }
}

/// `/api/progress`
#[derive(Debug, Default, Deserialize)]
pub struct ProgressParams {
    #[serde(alias = "progress")]
    pub pct: Option<f32>,
    pub state: Option<StateText>,
}

impl FromQuery for ProgressParams {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "pct" | "progress" => self.pct = Some(number(value, "pct must be a number")?),
            "state" => self.state = Some(text(value)?),
            _ => {}
        }
        Ok(())
    }
}

/// `/api/mode`
#[derive(Debug, Default, Deserialize)]
pub struct ModeParams {
    #[serde(alias = "kind")]
    pub name: Option<NameText>,
}

impl FromQuery for ModeParams {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if matches!(key, "name" | "kind") {
            self.name = Some(text(value)?);
        }
        Ok(())
    }
}

/// `/api/config`
#[derive(Debug, Default, Deserialize)]
pub struct ConfigParams {
    pub brightness: Option<f32>,
    pub speed: Option<f32>,
}

impl FromQuery for ConfigParams {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "brightness" => {
                self.brightness = Some(number(value, "brightness must be a number")?);
            }
            "speed" => self.speed = Some(number(value, "speed must be a number")?),
            _ => {}
        }
        Ok(())
    }
}

/// `/api/power`
#[derive(Debug, Default, Deserialize)]
pub struct PowerParams {
    pub on: Option<bool>,
}

impl FromQuery for PowerParams {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if key == "on" {
            self.on = Some(flag(value));
        }
        Ok(())
    }
}

/// `/api/demo`
#[derive(Debug, Default, Deserialize)]
pub struct DemoParams {
    pub on: Option<bool>,
    pub interval: Option<i32>,
}

impl FromQuery for DemoParams {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "on" => self.on = Some(flag(value)),
            "interval" => self.interval = Some(number(value, "interval must be an integer")?),
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ShowReply {
    pub status: &'static str,
    pub show: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EventReply {
    pub status: &'static str,
    pub event: &'static str,
    pub show: &'static str,
    pub seconds: u32,
}

#[derive(Debug, Serialize)]
pub struct ProgressReply {
    pub status: &'static str,
    pub pct: f32,
    pub state: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModeReply {
    pub status: &'static str,
    pub idle: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ConfigReply {
    pub status: &'static str,
    pub brightness: f32,
    pub speed: f32,
}

#[derive(Debug, Serialize)]
pub struct PowerReply {
    pub status: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct DemoReply {
    pub status: &'static str,
    pub demo: bool,
    pub interval: u32,
}

impl ShowReply {
    pub fn new(show: &'static str, seconds: Option<u32>) -> Self {
        Self {
            status: STATUS_OK,
            show,
            seconds,
        }
    }
}

impl EventReply {
    pub fn new(event: &'static str, show: &'static str, seconds: u32) -> Self {
        Self {
            status: STATUS_OK,
            event,
            show,
            seconds,
        }
    }
}

impl ProgressReply {
    pub fn new(pct: f32, state: &'static str) -> Self {
        Self {
            status: STATUS_OK,
            pct,
            state,
        }
    }
}

impl ModeReply {
    pub fn new(idle: &'static str) -> Self {
        Self {
            status: STATUS_OK,
            idle,
        }
    }
}

impl ConfigReply {
    pub fn new(brightness: f32, speed: f32) -> Self {
        Self {
            status: STATUS_OK,
            brightness,
            speed,
        }
    }
}

impl PowerReply {
    pub fn new(enabled: bool) -> Self {
        Self {
            status: STATUS_OK,
            enabled,
        }
    }
}

impl DemoReply {
    pub fn new(demo: bool, interval: u32) -> Self {
        Self {
            status: STATUS_OK,
            demo,
            interval,
        }
    }
}

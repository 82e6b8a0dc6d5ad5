//! JSON control API
//!
//! Maps a parsed request onto engine operations. GET requests carry their
//! parameters in the URL query, POST requests in a JSON body.

pub mod dto;
pub mod query;

use serde::de::DeserializeOwned;

use crate::engine::Engine;
use crate::error::Error;
use crate::http::{HttpMethod, Request, Response};
use crate::progress::PlaybackState;
use crate::show::ShowSpec;
use dto::{
    ConfigParams, ConfigReply, DemoParams, DemoReply, EventParams, EventReply, ModeParams,
    ModeReply, PowerParams, PowerReply, ProgressParams, ProgressReply, ShowParams, ShowReply,
};
use query::FromQuery;

/// Single page UI served at `/`
pub const INDEX_HTML: &[u8] = include_bytes!("../../assets/index.html");

/// Handle one request against the engine
///
/// Never fails: errors are turned into JSON error responses.
pub fn handle<const MAX_LEDS: usize>(
    request: &Request<'_>,
    engine: &mut Engine<MAX_LEDS>,
) -> Response {
    match dispatch(request, engine) {
        Ok(response) => response,
        Err(error) => {
            log::info!(
                "api: {:?} {} rejected: {}",
                request.method,
                request.path,
                error
            );
            Response::error(error)
        }
    }
}

fn dispatch<const MAX_LEDS: usize>(
    request: &Request<'_>,
    engine: &mut Engine<MAX_LEDS>,
) -> Result<Response, Error> {
    match request.route() {
        (HttpMethod::Get, "/" | "/index.html") => Ok(Response::html(INDEX_HTML)),
        (HttpMethod::Get, "/api/status") => Ok(Response::ok(&engine.status())),
        (HttpMethod::Get | HttpMethod::Post, path) => match path {
            "/api/show" => handle_show(&params(request)?, engine),
            "/api/event" => handle_event(&params(request)?, engine),
            "/api/progress" => handle_progress(&params(request)?, engine),
            "/api/mode" => handle_mode(&params(request)?, engine),
            "/api/config" => handle_config(&params(request)?, engine),
            "/api/power" => handle_power(&params(request)?, engine),
            "/api/np_on" => handle_power(&PowerParams { on: Some(true) }, engine),
            "/api/np_off" => handle_power(&PowerParams { on: Some(false) }, engine),
            "/api/demo" => handle_demo(&params(request)?, engine),
            _ => Err(Error::UnknownRoute),
        },
        _ => Err(Error::UnknownRoute),
    }
}

/// Decode parameters from the JSON body, or the query when there is none
fn params<T: FromQuery + DeserializeOwned>(request: &Request<'_>) -> Result<T, Error> {
    if request.method == HttpMethod::Post && !request.body.is_empty() {
        let (params, _) = serde_json_core::from_slice(request.body).map_err(|e| {
            log::debug!("api: json parse error: {:?}", e);
            Error::MalformedRequest("invalid json body")
        })?;
        return Ok(params);
    }
    T::from_query(request.query)
}

fn handle_show<const MAX_LEDS: usize>(
    params: &ShowParams,
    engine: &mut Engine<MAX_LEDS>,
) -> Result<Response, Error> {
    let kind = params
        .kind
        .as_deref()
        .ok_or(Error::MalformedRequest("missing field: kind"))?;
    let palette = params.palette()?;
    let spec = ShowSpec {
        kind,
        colors: &palette,
        speed: params.speed,
        seconds: params.seconds,
        progress: params.progress,
    };
    let outcome = engine.set_show(&spec)?;
    Ok(Response::ok(&ShowReply::new(
        outcome.show.as_str(),
        outcome.seconds,
    )))
}

fn handle_event<const MAX_LEDS: usize>(
    params: &EventParams,
    engine: &mut Engine<MAX_LEDS>,
) -> Result<Response, Error> {
    let name = params
        .name
        .as_deref()
        .ok_or(Error::MalformedRequest("missing field: name"))?;
    let outcome = engine.trigger_event(name, params.seconds)?;
    Ok(Response::ok(&EventReply::new(
        outcome.event,
        outcome.show.as_str(),
        outcome.seconds,
    )))
}

fn handle_progress<const MAX_LEDS: usize>(
    params: &ProgressParams,
    engine: &mut Engine<MAX_LEDS>,
) -> Result<Response, Error> {
    let state = match params.state.as_deref() {
        Some(state) => PlaybackState::parse_from_str(state)
            .ok_or(Error::InvalidParameter("state must be playing, paused or stopped"))?,
        None => PlaybackState::Playing,
    };
    let pct = engine.update_progress(params.pct, state)?;
    Ok(Response::ok(&ProgressReply::new(pct, state.as_str())))
}

fn handle_mode<const MAX_LEDS: usize>(
    params: &ModeParams,
    engine: &mut Engine<MAX_LEDS>,
) -> Result<Response, Error> {
    let name = params
        .name
        .as_deref()
        .ok_or(Error::MalformedRequest("missing field: name"))?;
    let kind = engine.set_idle(name)?;
    Ok(Response::ok(&ModeReply::new(kind.as_str())))
}

fn handle_config<const MAX_LEDS: usize>(
    params: &ConfigParams,
    engine: &mut Engine<MAX_LEDS>,
) -> Result<Response, Error> {
    let settings = engine.configure(params.brightness, params.speed)?;
    Ok(Response::ok(&ConfigReply::new(
        settings.brightness,
        settings.speed,
    )))
}

fn handle_power<const MAX_LEDS: usize>(
    params: &PowerParams,
    engine: &mut Engine<MAX_LEDS>,
) -> Result<Response, Error> {
    let on = params.on.ok_or(Error::MalformedRequest("missing field: on"))?;
    engine.set_enabled(on);
    Ok(Response::ok(&PowerReply::new(on)))
}

fn handle_demo<const MAX_LEDS: usize>(
    params: &DemoParams,
    engine: &mut Engine<MAX_LEDS>,
) -> Result<Response, Error> {
    let on = params.on.unwrap_or(false);
    let interval = engine.set_demo(on, params.interval);
    Ok(Response::ok(&DemoReply::new(on, interval)))
}

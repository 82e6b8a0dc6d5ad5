//! Cooperative main loop
//!
//! One thread of control alternates between the network and the engine.
//! Each `turn` polls the listener or the connection being served without
//! blocking, then runs whatever engine ticks are due.

use embassy_time::{Duration, Instant};
use embedded_io::{Read, ReadReady, Write};

use crate::OutputDriver;
use crate::api;
use crate::config::ServerConfig;
use crate::engine::Engine;
use crate::error::Error;
use crate::http::{PendingRequest, ReadProgress, Response};
use crate::scheduler::TickScheduler;

/// Poll interval while a request is being received
const SERVING_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Source of client connections
pub trait Listener {
    type Connection: Read + Write + ReadReady;

    /// Accept a pending connection without blocking
    fn accept(&mut self) -> Option<Self::Connection>;
}

/// Observable loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Waiting for a connection
    IdlePoll,
    /// Receiving a request
    Serving,
}

struct Session<C> {
    conn: C,
    request: PendingRequest,
    started: Instant,
}

enum LoopState<C> {
    IdlePoll,
    Serving(Session<C>),
}

pub struct MainLoop<L: Listener, O: OutputDriver, const MAX_LEDS: usize> {
    listener: L,
    output: O,
    engine: Engine<MAX_LEDS>,
    scheduler: TickScheduler,
    config: ServerConfig,
    state: LoopState<L::Connection>,
}

impl<L: Listener, O: OutputDriver, const MAX_LEDS: usize> MainLoop<L, O, MAX_LEDS> {
    pub fn new(listener: L, output: O, engine: Engine<MAX_LEDS>, config: ServerConfig) -> Self {
        Self {
            scheduler: TickScheduler::new(engine.config().tick_interval),
            listener,
            output,
            engine,
            config,
            state: LoopState::IdlePoll,
        }
    }

    /// Run one loop iteration at `now`
    ///
    /// Returns how long the caller may sleep, never more than one tick.
    pub fn turn(&mut self, now: Instant) -> Duration {
        self.poll_network(now);

        let result = self.scheduler.poll(now);
        if result.elapsed_ticks > 0 {
            self.engine.advance(result.elapsed_ticks);
            // A failed write is logged by the engine; the next tick retries
            let _ = self.engine.flush(&mut self.output);
        }

        match self.state {
            LoopState::IdlePoll => result.sleep_duration,
            LoopState::Serving(_) => result.sleep_duration.min(SERVING_POLL_INTERVAL),
        }
    }

    fn poll_network(&mut self, now: Instant) {
        let session = match core::mem::replace(&mut self.state, LoopState::IdlePoll) {
            LoopState::Serving(session) => session,
            LoopState::IdlePoll => match self.listener.accept() {
                Some(conn) => {
                    log::debug!("server: connection accepted");
                    Session {
                        conn,
                        request: PendingRequest::new(),
                        started: now,
                    }
                }
                None => return,
            },
        };
        self.state = self.serve(session, now);
    }

    fn serve(
        &mut self,
        mut session: Session<L::Connection>,
        now: Instant,
    ) -> LoopState<L::Connection> {
        let response = match session.request.poll_read(&mut session.conn) {
            Ok(ReadProgress::Complete) => match session.request.request() {
                Some(request) => api::handle(&request, &mut self.engine),
                None => Response::error(Error::Internal),
            },
            Ok(ReadProgress::Closed) => {
                log::debug!(
                    "server: connection closed after {} bytes",
                    session.request.received()
                );
                return LoopState::IdlePoll;
            }
            Ok(ReadProgress::Pending) => {
                if now.saturating_duration_since(session.started) < self.config.request_budget {
                    return LoopState::Serving(session);
                }
                log::info!("server: request timed out");
                Response::error(Error::RequestTimeout)
            }
            Err(error) => {
                log::info!("server: bad request: {}", error);
                Response::error(error)
            }
        };

        if let Err(e) = response.write_to(&mut session.conn) {
            log::debug!("server: response write failed: {:?}", e);
        }
        LoopState::IdlePoll
    }

    pub fn phase(&self) -> LoopPhase {
        match self.state {
            LoopState::IdlePoll => LoopPhase::IdlePoll,
            LoopState::Serving(_) => LoopPhase::Serving,
        }
    }

    pub fn engine(&self) -> &Engine<MAX_LEDS> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<MAX_LEDS> {
        &mut self.engine
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}

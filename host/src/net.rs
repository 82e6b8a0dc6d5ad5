//! Non-blocking `std::net` sockets behind the loop's `Listener` seam

use std::io::{self, ErrorKind};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

use anyhow::Context as _;
use embedded_io::{ErrorType, Read, ReadReady, Write};
use marquee_lights::Listener;

/// Shortest write timeout; the socket rejects a zero timeout
const MIN_WRITE_TIMEOUT: Duration = Duration::from_millis(1);

/// Longest a response write may hold up the loop: one engine tick
fn write_timeout(tick_interval: Duration) -> Duration {
    tick_interval.max(MIN_WRITE_TIMEOUT)
}

pub struct TcpListenerSource {
    listener: TcpListener,
    write_timeout: Duration,
}

impl TcpListenerSource {
    pub fn bind(addr: SocketAddr, tick_interval: Duration) -> anyhow::Result<Self> {
        let listener =
            TcpListener::bind(addr).with_context(|| format!("failed to bind {addr}"))?;
        listener
            .set_nonblocking(true)
            .context("failed to make listener non-blocking")?;
        Ok(Self {
            listener,
            write_timeout: write_timeout(tick_interval),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Listener for TcpListenerSource {
    type Connection = TcpConnection;

    fn accept(&mut self) -> Option<TcpConnection> {
        match self.listener.accept() {
            Ok((stream, peer)) => {
                log::debug!("net: connection from {}", peer);
                TcpConnection::new(stream, self.write_timeout)
                    .inspect_err(|e| log::warn!("net: failed to set up connection: {}", e))
                    .ok()
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => None,
            Err(e) => {
                log::warn!("net: accept failed: {}", e);
                None
            }
        }
    }
}

/// Accepted client stream
///
/// Reads never block; the first write switches the socket to blocking mode
/// with a timeout of one tick, so a client that stops reading costs at most
/// one tick before the write fails and the connection is dropped.
pub struct TcpConnection {
    stream: TcpStream,
    write_timeout: Duration,
    writing: bool,
}

impl TcpConnection {
    fn new(stream: TcpStream, write_timeout: Duration) -> io::Result<Self> {
        stream.set_nonblocking(true)?;
        stream.set_nodelay(true)?;
        Ok(Self {
            stream,
            write_timeout,
            writing: false,
        })
    }
}

impl ErrorType for TcpConnection {
    type Error = io::Error;
}

impl Read for TcpConnection {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        io::Read::read(&mut self.stream, buf)
    }
}

impl ReadReady for TcpConnection {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        let mut probe = [0u8; 1];
        match self.stream.peek(&mut probe) {
            // A zero-length peek is end of stream, which `read` reports
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl Write for TcpConnection {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if !self.writing {
            self.stream.set_nonblocking(false)?;
            self.stream.set_write_timeout(Some(self.write_timeout))?;
            self.writing = true;
        }
        io::Write::write(&mut self.stream, buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        io::Write::flush(&mut self.stream)
    }
}

use super::request::parse_request;
use super::response::Response;
use crate::dispatcher::Dispatcher;
use anyhow::Context;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, Read, Write};
use std::net::{IpAddr, Shutdown, SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info};

/// Bytes read from a connection in a single recv; anything longer is truncated
pub const READ_BUFFER_SIZE: usize = 4096;

/// Pending connections the kernel queues before accept
const LISTEN_BACKLOG: i32 = 5;

/// Single-threaded connection server.
///
/// Owns the dispatcher and drives one connection at a time through
/// accept, read, parse, dispatch, serialize, write, and write-side shutdown.
/// There is no read timeout, so a client that connects and stays silent
/// blocks the whole server; fixing that is out of scope here.
pub struct HttpServer {
    dispatcher: Dispatcher,
}

impl HttpServer {
    /// Create a server over a dispatcher whose route table is already populated
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Bind `address:port` and serve until the process terminates.
    ///
    /// # Errors
    ///
    /// Returns an error when the address is invalid, the socket cannot be
    /// bound, or `accept` fails on the listening socket itself. Anything that
    /// goes wrong on an individual connection is logged and absorbed.
    pub fn run(self, address: &str, port: u16) -> anyhow::Result<()> {
        let listener = bind_listener(address, port)?;
        self.serve(listener)
    }

    /// Bind `address:port`, then serve on a spawned thread.
    ///
    /// Binding happens on the calling thread so the returned handle carries
    /// the actual local address (port 0 resolves to the assigned port).
    ///
    /// # Errors
    ///
    /// Returns an error when the address is invalid or the socket cannot be bound.
    pub fn start(self, address: &str, port: u16) -> anyhow::Result<ServerHandle> {
        let listener = bind_listener(address, port)?;
        let addr = listener.local_addr()?;
        let handle = thread::spawn(move || {
            if let Err(err) = self.serve(listener) {
                error!(error = ?err, "server loop exited");
            }
        });
        Ok(ServerHandle { addr, handle })
    }

    fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let addr = listener.local_addr()?;
        info!(address = %addr, "listening");
        // The listener is dropped (and the socket closed) however this loop
        // exits; per-connection failures never reach it.
        loop {
            let (mut stream, peer) = listener
                .accept()
                .context("accept failed on listening socket")?;
            self.handle_connection(&mut stream, peer);
        }
    }

    /// Drive one accepted connection through the full cycle.
    ///
    /// Parse failures become the fixed 500 response; the response is always
    /// written and the write half shut down before the stream drops.
    fn handle_connection(&self, stream: &mut TcpStream, peer: SocketAddr) {
        let mut buf = [0u8; READ_BUFFER_SIZE];
        let read = match stream.read(&mut buf) {
            Ok(n) => n,
            Err(err) => {
                error!(peer = %peer, error = %err, "connection read failed");
                return;
            }
        };
        let raw = String::from_utf8_lossy(&buf[..read]);

        let (response, method, path) = match parse_request(&raw) {
            Ok(request) => {
                let response = self.dispatcher.dispatch(&request);
                (response, request.method, request.path)
            }
            Err(err) => {
                error!(peer = %peer, error = %err, "request parse failed");
                (Response::server_error(), "-".to_string(), "-".to_string())
            }
        };

        info!(
            status = response.status_code,
            method = %method,
            path = %path,
            "request handled"
        );

        if let Err(err) = stream.write_all(&response.to_bytes()) {
            error!(peer = %peer, error = %err, "response write failed");
            return;
        }
        // Signal EOF to the client; the stream closes when it drops.
        if let Err(err) = stream.shutdown(Shutdown::Write) {
            error!(peer = %peer, error = %err, "write-side shutdown failed");
        }
    }
}

/// Handle to a server running on its own thread.
///
/// The serving loop has no cancellation mechanism; the handle exists so
/// callers (tests, mostly) can learn the bound address and wait until the
/// socket accepts connections.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// The address the server is bound to
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the server to accept connections.
    ///
    /// Polls the bound address by attempting TCP connections.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` when the server is not reachable within
    /// ~250ms (50 attempts, 5ms apart).
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Block until the server thread finishes, which only happens on a fatal
    /// listening-socket error.
    ///
    /// # Errors
    ///
    /// Returns an error if the server thread panicked.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// Build the listening socket: address reuse on, backlog of 5.
fn bind_listener(address: &str, port: u16) -> anyhow::Result<TcpListener> {
    let ip: IpAddr = address
        .parse()
        .with_context(|| format!("invalid bind address {address:?}"))?;
    let addr = SocketAddr::new(ip, port);
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))
        .context("failed to create socket")?;
    socket
        .set_reuse_address(true)
        .context("failed to set SO_REUSEADDR")?;
    socket
        .bind(&addr.into())
        .with_context(|| format!("failed to bind {addr}"))?;
    socket
        .listen(LISTEN_BACKLOG)
        .context("failed to listen")?;

    Ok(socket.into())
}

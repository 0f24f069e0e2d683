//! Live-image HTTP server.
//!
//! One listening port serves two resources. `GET /` returns a small HTML
//! page whose `<img>` points at [`page::STREAM_PATH`]; any other target
//! starts a `multipart/x-mixed-replace` stream in which every part is a
//! freshly rendered PNG. A stream ends only when a write to the client
//! fails (or a render fails); the server then moves on to the next
//! connection.
//!
//! In [`ConcurrencyMode::Sequential`] the accept loop serves one
//! connection to completion before accepting the next, so a second viewer
//! waits until the first disconnects. [`ConcurrencyMode::ThreadPerConnection`]
//! gives each connection a thread; renders are then serialized through a
//! lock around the shared [`FrameSource`], held only for the render call.

mod http;
pub mod multipart;
pub mod page;
mod source;
#[cfg(feature = "tls")]
mod tls;

use std::fmt;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

pub use self::source::{FrameSource, OffscreenScene};
use self::http::{Request, RequestError};
use crate::error::LiveError;
use crate::options::{ConcurrencyMode, ServerOptions};
use crate::util::frame_timing::FramePacer;
use crate::view::RenderError;

/// Frames between periodic stream statistics at debug level.
const STATS_INTERVAL: u64 = 300;
/// First pause after a failed `accept`; doubles per consecutive failure.
const ACCEPT_BACKOFF_BASE: Duration = Duration::from_millis(10);
/// Longest pause between `accept` retries.
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// Pause before retrying after `failures` consecutive `accept` errors.
fn accept_backoff(failures: u32) -> Duration {
    ACCEPT_BACKOFF_BASE
        .saturating_mul(1 << failures.min(7))
        .min(ACCEPT_BACKOFF_MAX)
}

/// Why a connection stopped.
#[derive(Debug)]
enum ConnectionError {
    /// The peer went away (broken pipe, reset, EOF).
    Disconnected(io::Error),
    /// Any other socket failure.
    Io(io::Error),
    /// The frame source failed; the stream is not retried.
    Render(RenderError),
}

impl From<io::Error> for ConnectionError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::WriteZero => Self::Disconnected(e),
            _ => Self::Io(e),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected(e) => write!(f, "client disconnected ({e})"),
            Self::Io(e) => write!(f, "socket error: {e}"),
            Self::Render(e) => write!(f, "render failed: {e}"),
        }
    }
}

/// How a connection that did not fail before its response ended.
enum Outcome {
    Bootstrap,
    Rejected(u16),
    Closed,
    Streamed { frames: u64, end: ConnectionError },
}

/// A client byte stream plus the TCP socket under it.
trait Connection: Read + Write {
    fn socket(&self) -> &TcpStream;
}

impl Connection for TcpStream {
    fn socket(&self) -> &TcpStream {
        self
    }
}

#[cfg(feature = "tls")]
impl Connection for tls::TlsStream {
    fn socket(&self) -> &TcpStream {
        &self.sock
    }
}

/// State shared by every connection.
struct Shared<S> {
    source: Mutex<S>,
    options: ServerOptions,
    #[cfg(feature = "tls")]
    tls: Option<Arc<rustls::ServerConfig>>,
}

/// HTTP server streaming frames from a [`FrameSource`].
pub struct StreamingServer<S> {
    listener: TcpListener,
    shared: Arc<Shared<S>>,
}

impl<S: FrameSource> StreamingServer<S> {
    /// Bind the listening socket and take ownership of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::Bind`] if the address cannot be bound and
    /// [`LiveError::Tls`] if TLS is configured but its material cannot be
    /// loaded (or the crate was built without the `tls` feature).
    pub fn bind(options: &ServerOptions, source: S) -> Result<Self, LiveError> {
        #[cfg(feature = "tls")]
        let tls = options.tls.as_ref().map(tls::load_config).transpose()?;
        #[cfg(not(feature = "tls"))]
        if options.tls.is_some() {
            return Err(LiveError::Tls(
                "TLS is configured but viso-live was built without the `tls` feature"
                    .to_owned(),
            ));
        }

        let addr = options.bind_addr();
        let listener = TcpListener::bind(&addr)
            .map_err(|source| LiveError::Bind { addr, source })?;
        let (width, height) = source.size();
        log::info!(
            "serving {width}x{height} frames on {} ({:?})",
            listener.local_addr()?,
            options.concurrency
        );

        Ok(Self {
            listener,
            shared: Arc::new(Shared {
                source: Mutex::new(source),
                options: options.clone(),
                #[cfg(feature = "tls")]
                tls,
            }),
        })
    }

    /// Address the listener is bound to.
    ///
    /// # Errors
    ///
    /// Returns the socket error if the address cannot be queried.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept one connection and serve it to completion on this thread.
    ///
    /// Failures of the connection itself are logged, not returned.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::Io`] if `accept` fails.
    pub fn handle_next(&self) -> Result<(), LiveError> {
        let (stream, peer) = self.listener.accept()?;
        serve_connection(&self.shared, stream, peer);
        Ok(())
    }
}

impl<S: FrameSource + Send + 'static> StreamingServer<S> {
    /// Run the accept loop forever, dispatching per the configured
    /// [`ConcurrencyMode`].
    pub fn serve_forever(&self) -> ! {
        let mut failures = 0u32;
        loop {
            let (stream, peer) = match self.listener.accept() {
                Ok(accepted) => {
                    failures = 0;
                    accepted
                }
                Err(e) => {
                    failures = failures.saturating_add(1);
                    let delay = accept_backoff(failures);
                    log::warn!("accept failed ({failures} in a row), retrying in {delay:?}: {e}");
                    thread::sleep(delay);
                    continue;
                }
            };
            match self.shared.options.concurrency {
                ConcurrencyMode::Sequential => {
                    serve_connection(&self.shared, stream, peer);
                }
                ConcurrencyMode::ThreadPerConnection => {
                    let shared = Arc::clone(&self.shared);
                    let spawned = thread::Builder::new()
                        .name(format!("conn-{peer}"))
                        .spawn(move || serve_connection(&shared, stream, peer));
                    if let Err(e) = spawned {
                        log::error!("could not spawn thread for {peer}: {e}");
                    }
                }
            }
        }
    }
}

fn serve_connection<S: FrameSource>(
    shared: &Shared<S>,
    stream: TcpStream,
    peer: SocketAddr,
) {
    log::info!("accepted connection from {peer}");
    let timeout = Duration::from_millis(shared.options.request_timeout_ms);
    if let Err(e) = stream
        .set_read_timeout((!timeout.is_zero()).then_some(timeout))
        .and_then(|()| stream.set_nodelay(true))
    {
        log::warn!("{peer}: could not configure socket: {e}");
    }

    #[cfg(feature = "tls")]
    let stream = match &shared.tls {
        Some(config) => {
            match tls::accept(config, stream) {
                Ok(mut tls_stream) => report(peer, handle(shared, &mut tls_stream, peer)),
                Err(e) => log::warn!("{peer}: TLS session failed: {e}"),
            }
            return;
        }
        None => stream,
    };

    let mut stream = stream;
    report(peer, handle(shared, &mut stream, peer));
}

fn report(peer: SocketAddr, result: Result<Outcome, ConnectionError>) {
    match result {
        Ok(Outcome::Bootstrap) => log::debug!("{peer}: served bootstrap page"),
        Ok(Outcome::Rejected(status)) => log::info!("{peer}: rejected with {status}"),
        Ok(Outcome::Closed) => log::debug!("{peer}: closed without a request"),
        Ok(Outcome::Streamed { frames, end }) => match end {
            ConnectionError::Disconnected(_) => {
                log::info!("{peer}: disconnected after {frames} frames");
            }
            ConnectionError::Io(_) => {
                log::warn!("{peer}: stream ended after {frames} frames: {end}");
            }
            ConnectionError::Render(_) => {
                log::error!("{peer}: stream ended after {frames} frames: {end}");
            }
        },
        Err(e @ ConnectionError::Disconnected(_)) => log::info!("{peer}: {e}"),
        Err(e) => log::warn!("{peer}: {e}"),
    }
}

fn handle<S: FrameSource, T: Connection>(
    shared: &Shared<S>,
    io: &mut T,
    peer: SocketAddr,
) -> Result<Outcome, ConnectionError> {
    let request = match http::read_request(io) {
        Ok(request) => request,
        Err(RequestError::Closed) => return Ok(Outcome::Closed),
        Err(RequestError::Io(e)) => return Err(e.into()),
        Err(e @ RequestError::TooLarge) => {
            log::debug!("{peer}: {e}");
            http::write_error(io, 431, "Request Header Fields Too Large")?;
            return Ok(Outcome::Rejected(431));
        }
        Err(e @ RequestError::Malformed(_)) => {
            log::debug!("{peer}: {e}");
            http::write_error(io, 400, "Bad Request")?;
            return Ok(Outcome::Rejected(400));
        }
    };
    // The timeout guards the request head only; streaming never reads.
    if let Err(e) = io.socket().set_read_timeout(None) {
        log::debug!("{peer}: could not clear read timeout: {e}");
    }

    if request.method != "GET" {
        http::write_error(io, 501, "Not Implemented")?;
        return Ok(Outcome::Rejected(501));
    }
    log_request(peer, &request);

    if request.is_bootstrap() {
        page::write_bootstrap(io, &shared.options.page_title)?;
        return Ok(Outcome::Bootstrap);
    }

    multipart::write_stream_head(io)?;
    let (frames, end) = stream_frames(shared, io, peer);
    Ok(Outcome::Streamed { frames, end })
}

fn log_request(peer: SocketAddr, request: &Request) {
    let mode = if request.is_bootstrap() { "bootstrap" } else { "stream" };
    log::info!("{peer}: GET {} ({mode})", request.path);
    if !request.query.is_empty() {
        log::debug!("{peer}: query parameters {:?}", request.query);
    }
    if let Some((_, agent)) = request
        .headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
    {
        log::debug!("{peer}: user agent {agent}");
    }
}

/// Render, encode and send parts until something fails.
fn stream_frames<S: FrameSource, W: Write>(
    shared: &Shared<S>,
    writer: &mut W,
    peer: SocketAddr,
) -> (u64, ConnectionError) {
    let compression = shared.options.png_compression;
    let mut pacer = FramePacer::new(shared.options.max_fps);

    loop {
        pacer.wait();
        // The lock guard is a temporary: released before encoding.
        let frame = match shared.source.lock().render_frame() {
            Ok(frame) => frame,
            Err(e) => return (pacer.frames(), ConnectionError::Render(e)),
        };
        let png = match frame.encode_png(compression) {
            Ok(png) => png,
            Err(e) => return (pacer.frames(), ConnectionError::Render(e)),
        };
        if let Err(e) = multipart::write_part(writer, &png) {
            return (pacer.frames(), e.into());
        }
        pacer.end_frame();

        if pacer.frames() % STATS_INTERVAL == 0 {
            log::debug!(
                "{peer}: {} frames, {:.1} fps, last part {} bytes",
                pacer.frames(),
                pacer.fps(),
                png.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::frame::Frame;

    const WIDTH: u32 = 16;
    const HEIGHT: u32 = 12;

    struct SolidSource {
        renders: Arc<AtomicUsize>,
    }

    impl FrameSource for SolidSource {
        fn size(&self) -> (u32, u32) {
            (WIDTH, HEIGHT)
        }

        fn render_frame(&mut self) -> Result<Frame, RenderError> {
            let n = self.renders.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Frame::solid(WIDTH, HEIGHT, [n as u8, 64, 128, 255]))
        }
    }

    struct FailingSource;

    impl FrameSource for FailingSource {
        fn size(&self) -> (u32, u32) {
            (WIDTH, HEIGHT)
        }

        fn render_frame(&mut self) -> Result<Frame, RenderError> {
            Err(RenderError::ReadbackDropped)
        }
    }

    fn local_options(concurrency: ConcurrencyMode) -> ServerOptions {
        ServerOptions {
            address: "127.0.0.1".to_owned(),
            port: Some(0),
            concurrency,
            ..ServerOptions::default()
        }
    }

    /// Start a server on an ephemeral port; returns its address and render
    /// counter.
    fn spawn_server(concurrency: ConcurrencyMode) -> (SocketAddr, Arc<AtomicUsize>) {
        spawn_with(&local_options(concurrency))
    }

    fn spawn_with(options: &ServerOptions) -> (SocketAddr, Arc<AtomicUsize>) {
        let renders = Arc::new(AtomicUsize::new(0));
        let source = SolidSource {
            renders: Arc::clone(&renders),
        };
        let server = StreamingServer::bind(options, source).unwrap();
        let addr = server.local_addr().unwrap();
        let _ = thread::spawn(move || {
            server.serve_forever();
        });
        (addr, renders)
    }

    struct Client<T = TcpStream> {
        reader: BufReader<T>,
    }

    impl Client {
        fn get(addr: SocketAddr, request: &str) -> Self {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream
                .set_read_timeout(Some(Duration::from_secs(10)))
                .unwrap();
            stream.write_all(request.as_bytes()).unwrap();
            Self {
                reader: BufReader::new(stream),
            }
        }
    }

    impl<T: Read> Client<T> {
        fn line(&mut self) -> String {
            let mut line = String::new();
            let _ = self.reader.read_line(&mut line).unwrap();
            line
        }

        /// Status line and header lines, without terminators.
        fn head(&mut self) -> (String, Vec<String>) {
            let status = self.line().trim_end().to_owned();
            let mut headers = Vec::new();
            loop {
                let line = self.line();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                headers.push(line.to_owned());
            }
            (status, headers)
        }

        fn body(&mut self) -> Vec<u8> {
            let mut body = Vec::new();
            let _ = self.reader.read_to_end(&mut body).unwrap();
            body
        }

        fn part(&mut self) -> Vec<u8> {
            assert_eq!(self.line(), "--BoundaryString\r\n");
            assert_eq!(self.line(), "Content-type: image/png\r\n");
            let length_line = self.line();
            let length: usize = length_line
                .strip_prefix("Content-Length: ")
                .unwrap()
                .trim_end()
                .parse()
                .unwrap();
            assert_eq!(self.line(), "\r\n");
            let mut png = vec![0; length];
            self.reader.read_exact(&mut png).unwrap();
            png
        }
    }

    fn red_channel(png: &[u8]) -> u8 {
        image::load_from_memory(png).unwrap().to_rgba8().get_pixel(0, 0)[0]
    }

    fn decoded_size(png: &[u8]) -> (u32, u32) {
        let image = image::load_from_memory_with_format(png, image::ImageFormat::Png).unwrap();
        (image.width(), image.height())
    }

    #[test]
    fn root_serves_page_without_rendering() {
        let (addr, renders) = spawn_server(ConcurrencyMode::Sequential);
        let mut client = Client::get(addr, "GET / HTTP/1.1\r\nHost: test\r\n\r\n");
        let (status, headers) = client.head();
        assert_eq!(status, "HTTP/1.0 200 OK");
        assert!(headers.contains(&"Content-Type: text/html".to_owned()));
        let body = String::from_utf8(client.body()).unwrap();
        assert!(body.contains("<img src='/live.png'>"));
        assert_eq!(renders.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stream_sends_exact_headers_then_boundary() {
        let (addr, _) = spawn_server(ConcurrencyMode::Sequential);
        let mut client = Client::get(addr, "GET /anything?x=1 HTTP/1.1\r\n\r\n");
        let (status, headers) = client.head();
        assert_eq!(status, "HTTP/1.0 200 OK");
        let expected: Vec<String> = multipart::STREAM_HEADERS
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        assert_eq!(headers, expected);

        let mut start = [0u8; 16];
        client.reader.read_exact(&mut start).unwrap();
        assert_eq!(&start, b"--BoundaryString");
    }

    #[test]
    fn every_part_decodes_to_frame_size() {
        let (addr, renders) = spawn_server(ConcurrencyMode::Sequential);
        let mut client = Client::get(addr, "GET /live.png HTTP/1.0\r\n\r\n");
        let _ = client.head();
        for _ in 0..3 {
            let png = client.part();
            assert_eq!(decoded_size(&png), (WIDTH, HEIGHT));
        }
        assert!(renders.load(Ordering::SeqCst) >= 3);
    }

    #[test]
    fn parts_arrive_in_render_order() {
        let (addr, _) = spawn_server(ConcurrencyMode::Sequential);
        let mut client = Client::get(addr, "GET /live.png HTTP/1.0\r\n\r\n");
        let _ = client.head();
        let reds: Vec<u8> = (0..4).map(|_| red_channel(&client.part())).collect();
        assert_eq!(reds, vec![1, 2, 3, 4]);
    }

    #[test]
    fn capped_stream_keeps_framing_and_order() {
        let options = ServerOptions {
            max_fps: 50,
            ..local_options(ConcurrencyMode::Sequential)
        };
        let (addr, _) = spawn_with(&options);
        let mut client = Client::get(addr, "GET /live.png HTTP/1.0\r\n\r\n");
        let (status, _) = client.head();
        assert_eq!(status, "HTTP/1.0 200 OK");
        let reds: Vec<u8> = (0..4)
            .map(|_| {
                let png = client.part();
                assert_eq!(decoded_size(&png), (WIDTH, HEIGHT));
                red_channel(&png)
            })
            .collect();
        assert_eq!(reds, vec![1, 2, 3, 4]);
    }

    #[test]
    fn read_timeout_is_cleared_after_request() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        client.write_all(b"GET / HTTP/1.0\r\n\r\n").unwrap();
        let (mut stream, peer) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();

        let shared = Shared {
            source: Mutex::new(FailingSource),
            options: local_options(ConcurrencyMode::Sequential),
            #[cfg(feature = "tls")]
            tls: None,
        };
        let outcome = handle(&shared, &mut stream, peer).unwrap();
        assert!(matches!(outcome, Outcome::Bootstrap));
        assert_eq!(stream.read_timeout().unwrap(), None);
    }

    #[test]
    fn accept_backoff_grows_then_caps() {
        assert_eq!(accept_backoff(1), Duration::from_millis(20));
        assert!(accept_backoff(2) > accept_backoff(1));
        assert_eq!(accept_backoff(7), ACCEPT_BACKOFF_MAX);
        assert_eq!(accept_backoff(u32::MAX), ACCEPT_BACKOFF_MAX);
    }

    #[cfg(feature = "tls")]
    #[test]
    fn tls_stream_delivers_framed_parts() {
        let certified =
            rcgen::generate_simple_self_signed(vec!["localhost".to_owned()]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let cert_chain = dir.path().join("cert.pem");
        let private_key = dir.path().join("key.pem");
        std::fs::write(&cert_chain, certified.cert.pem()).unwrap();
        std::fs::write(&private_key, certified.key_pair.serialize_pem()).unwrap();
        let options = ServerOptions {
            tls: Some(crate::options::TlsOptions {
                cert_chain,
                private_key,
            }),
            ..local_options(ConcurrencyMode::Sequential)
        };
        let (addr, renders) = spawn_with(&options);

        let mut roots = rustls::RootCertStore::empty();
        roots.add(certified.cert.der().clone()).unwrap();
        let config = rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();
        let server_name = rustls::pki_types::ServerName::try_from("localhost").unwrap();
        let connection = rustls::ClientConnection::new(Arc::new(config), server_name).unwrap();
        let socket = TcpStream::connect(addr).unwrap();
        socket
            .set_read_timeout(Some(Duration::from_secs(10)))
            .unwrap();
        let mut stream = rustls::StreamOwned::new(connection, socket);
        stream
            .write_all(b"GET /live.png HTTP/1.0\r\n\r\n")
            .unwrap();

        let mut client = Client {
            reader: BufReader::new(stream),
        };
        let (status, headers) = client.head();
        assert_eq!(status, "HTTP/1.0 200 OK");
        assert!(headers.contains(
            &"Content-Type: multipart/x-mixed-replace; boundary=--BoundaryString".to_owned()
        ));
        let png = client.part();
        assert_eq!(decoded_size(&png), (WIDTH, HEIGHT));
        assert_eq!(red_channel(&png), 1);
        assert!(renders.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn disconnect_leaves_server_serving() {
        let (addr, _) = spawn_server(ConcurrencyMode::Sequential);
        {
            let mut first = Client::get(addr, "GET /live.png HTTP/1.0\r\n\r\n");
            let _ = first.head();
            let _ = first.part();
        }

        let mut second = Client::get(addr, "GET /again HTTP/1.0\r\n\r\n");
        let (status, _) = second.head();
        assert_eq!(status, "HTTP/1.0 200 OK");
        assert_eq!(decoded_size(&second.part()), (WIDTH, HEIGHT));
    }

    #[test]
    fn threaded_mode_streams_to_concurrent_clients() {
        let (addr, _) = spawn_server(ConcurrencyMode::ThreadPerConnection);
        let mut first = Client::get(addr, "GET /a HTTP/1.0\r\n\r\n");
        let mut second = Client::get(addr, "GET /b HTTP/1.0\r\n\r\n");
        let _ = first.head();
        let _ = second.head();
        for _ in 0..2 {
            assert_eq!(decoded_size(&first.part()), (WIDTH, HEIGHT));
            assert_eq!(decoded_size(&second.part()), (WIDTH, HEIGHT));
        }
    }

    #[test]
    fn unsupported_and_malformed_requests_never_render() {
        let (addr, renders) = spawn_server(ConcurrencyMode::Sequential);

        let mut post = Client::get(addr, "POST /live.png HTTP/1.0\r\n\r\n");
        assert_eq!(post.head().0, "HTTP/1.0 501 Not Implemented");
        let _ = post.body();

        let mut garbage = Client::get(addr, "HELLO\r\n\r\n");
        assert_eq!(garbage.head().0, "HTTP/1.0 400 Bad Request");
        let _ = garbage.body();

        assert_eq!(renders.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn render_failure_ends_only_that_connection() {
        let server =
            StreamingServer::bind(&local_options(ConcurrencyMode::Sequential), FailingSource)
                .unwrap();
        let addr = server.local_addr().unwrap();
        let client = thread::spawn(move || {
            let mut client = Client::get(addr, "GET /live.png HTTP/1.0\r\n\r\n");
            let _ = client.head();
            client.body()
        });
        server.handle_next().unwrap();
        assert!(client.join().unwrap().is_empty());

        let page = thread::spawn(move || Client::get(addr, "GET / HTTP/1.0\r\n\r\n").head());
        server.handle_next().unwrap();
        assert_eq!(page.join().unwrap().0, "HTTP/1.0 200 OK");
    }

    #[test]
    fn bind_conflict_is_a_bind_error() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let options = ServerOptions {
            address: "127.0.0.1".to_owned(),
            port: Some(taken.local_addr().unwrap().port()),
            ..ServerOptions::default()
        };
        let renders = Arc::new(AtomicUsize::new(0));
        let result = StreamingServer::bind(&options, SolidSource { renders });
        assert!(matches!(result, Err(LiveError::Bind { .. })));
    }
}

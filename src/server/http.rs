//! Minimal HTTP/1.x request-head reader and response-head writer.

use std::fmt;
use std::io::{self, Read, Write};

/// Upper bound on the request line plus headers.
pub(crate) const MAX_HEAD_BYTES: usize = 8 * 1024;

/// A parsed request head. Request bodies are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Request {
    pub(crate) method: String,
    /// Raw request target, e.g. `/live.png?x=1`.
    pub(crate) target: String,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: Vec<(String, String)>,
}

impl Request {
    /// Whether this request asks for the bootstrap page.
    pub(crate) fn is_bootstrap(&self) -> bool {
        self.target == "/"
    }
}

#[derive(Debug)]
pub(crate) enum RequestError {
    /// The peer closed the connection before sending anything.
    Closed,
    /// The head exceeded [`MAX_HEAD_BYTES`].
    TooLarge,
    /// The head is not valid HTTP.
    Malformed(&'static str),
    Io(io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "connection closed before request"),
            Self::TooLarge => {
                write!(f, "request head exceeds {MAX_HEAD_BYTES} bytes")
            }
            Self::Malformed(why) => write!(f, "malformed request: {why}"),
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .or_else(|| buf.windows(2).position(|w| w == b"\n\n"))
}

/// Read bytes until the blank line that ends the request head.
pub(crate) fn read_request<R: Read>(reader: &mut R) -> Result<Request, RequestError> {
    let mut head = Vec::with_capacity(512);
    let mut chunk = [0u8; 1024];

    loop {
        if let Some(end) = head_end(&head) {
            head.truncate(end);
            break;
        }
        if head.len() > MAX_HEAD_BYTES {
            return Err(RequestError::TooLarge);
        }
        match reader.read(&mut chunk) {
            Ok(0) if head.is_empty() => return Err(RequestError::Closed),
            Ok(0) => return Err(RequestError::Malformed("truncated head")),
            Ok(n) => head.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(RequestError::Io(e)),
        }
    }

    parse_head(&head)
}

fn parse_head(head: &[u8]) -> Result<Request, RequestError> {
    let text = std::str::from_utf8(head)
        .map_err(|_| RequestError::Malformed("head is not UTF-8"))?;
    let mut lines = text.lines();

    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(RequestError::Malformed("bad request line"));
    };
    if !version.starts_with("HTTP/") {
        return Err(RequestError::Malformed("bad protocol version"));
    }

    let mut headers = Vec::new();
    for line in lines {
        let (name, value) = line
            .split_once(':')
            .ok_or(RequestError::Malformed("bad header line"))?;
        headers.push((name.trim().to_owned(), value.trim().to_owned()));
    }

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (
            path,
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        ),
        None => (target, Vec::new()),
    };

    Ok(Request {
        method: method.to_owned(),
        target: target.to_owned(),
        path: path.to_owned(),
        query,
        headers,
    })
}

/// Write a status line and headers, ending with the blank line.
pub(crate) fn write_head<W: Write>(
    writer: &mut W,
    status: u16,
    reason: &str,
    headers: &[(&str, &str)],
) -> io::Result<()> {
    let mut head = format!("HTTP/1.0 {status} {reason}\r\n");
    for (name, value) in headers {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    writer.write_all(head.as_bytes())
}

/// Write a short plain-text error response.
pub(crate) fn write_error<W: Write>(
    writer: &mut W,
    status: u16,
    reason: &str,
) -> io::Result<()> {
    let body = format!("{status} {reason}\n");
    write_head(
        writer,
        status,
        reason,
        &[
            ("Content-Type", "text/plain"),
            ("Content-Length", &body.len().to_string()),
            ("Connection", "close"),
        ],
    )?;
    writer.write_all(body.as_bytes())?;
    writer.flush()
}

//! `multipart/x-mixed-replace` framing of the live image stream.

use std::io::{self, Write};

use super::http;

/// Delimiter written before every part.
pub const BOUNDARY: &str = "--BoundaryString";

/// Response headers of a stream request, in the order they are sent.
pub const STREAM_HEADERS: [(&str, &str); 6] = [
    ("Connection", "close"),
    ("Max-Age", "0"),
    ("Expires", "0"),
    ("Cache-Control", "no-cache, private"),
    ("Pragma", "no-cache"),
    (
        "Content-Type",
        "multipart/x-mixed-replace; boundary=--BoundaryString",
    ),
];

/// Send the `200 OK` status line and [`STREAM_HEADERS`].
///
/// # Errors
///
/// Returns the socket error if the write fails.
pub fn write_stream_head<W: Write>(writer: &mut W) -> io::Result<()> {
    http::write_head(writer, 200, "OK", &STREAM_HEADERS)?;
    writer.flush()
}

/// Boundary and part headers announcing `len` bytes of PNG data.
#[must_use]
pub fn part_prefix(len: usize) -> String {
    format!("{BOUNDARY}\r\nContent-type: image/png\r\nContent-Length: {len}\r\n\r\n")
}

/// Write one part (prefix then image bytes) and flush it to the peer.
///
/// # Errors
///
/// Returns the socket error if the peer has gone away.
pub fn write_part<W: Write>(writer: &mut W, png: &[u8]) -> io::Result<()> {
    writer.write_all(part_prefix(png.len()).as_bytes())?;
    writer.write_all(png)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_is_prefix_then_payload() {
        let mut out = Vec::new();
        write_part(&mut out, b"abc").unwrap();
        assert_eq!(
            out,
            b"--BoundaryString\r\nContent-type: image/png\r\nContent-Length: 3\r\n\r\nabc"
        );
    }

    #[test]
    fn head_lists_every_stream_header() {
        let mut out = Vec::new();
        write_stream_head(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
        for (name, value) in STREAM_HEADERS {
            assert!(text.contains(&format!("{name}: {value}\r\n")));
        }
        assert!(text.ends_with("\r\n\r\n"));
    }
}

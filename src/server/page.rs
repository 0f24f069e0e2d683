//! Bootstrap page served at `/`.

use std::io::{self, Write};

use super::http;

/// Path the bootstrap page points its `<img>` at. Any non-root path
/// streams, this is just the one the page uses.
pub const STREAM_PATH: &str = "/live.png";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML of the bootstrap page.
#[must_use]
pub fn bootstrap_html(title: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body><img src='{STREAM_PATH}'></body></html>",
        escape_html(title)
    )
}

/// Send the complete bootstrap response.
///
/// # Errors
///
/// Returns the socket error if the write fails.
pub fn write_bootstrap<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    let body = bootstrap_html(title);
    http::write_head(
        writer,
        200,
        "OK",
        &[
            ("Content-Type", "text/html"),
            ("Content-Length", &body.len().to_string()),
            ("Connection", "close"),
        ],
    )?;
    writer.write_all(body.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_references_stream_path() {
        let html = bootstrap_html("2tgt <live>");
        assert!(html.contains("<img src='/live.png'>"));
        assert!(html.contains("<title>2tgt &lt;live&gt;</title>"));
    }
}

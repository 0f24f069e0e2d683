use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::frame::PngCompression;

/// Port used when none is configured and TLS is off.
pub const DEFAULT_PORT: u16 = 8000;
/// Port used when none is configured and TLS is on.
pub const DEFAULT_TLS_PORT: u16 = 443;

/// How the server schedules accepted connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// Serve each connection to completion before accepting the next.
    #[default]
    Sequential,
    /// One thread per connection; renders are serialized by a lock.
    ThreadPerConnection,
}

/// Certificate material for wrapping accepted sockets in TLS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsOptions {
    /// PEM file holding the certificate chain, leaf first.
    pub cert_chain: PathBuf,
    /// PEM file holding the private key.
    pub private_key: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Listening socket, stream and bootstrap page settings.
pub struct ServerOptions {
    /// Interface to bind.
    pub address: String,
    /// Port to bind. Absent means 8000, or 443 with TLS.
    pub port: Option<u16>,
    /// Connection scheduling.
    pub concurrency: ConcurrencyMode,
    /// Frame-rate cap per connection. 0 streams as fast as frames render.
    pub max_fps: u32,
    /// PNG compression level for streamed frames.
    pub png_compression: PngCompression,
    /// `<title>` of the bootstrap page.
    pub page_title: String,
    /// Read timeout for the request head, in milliseconds.
    pub request_timeout_ms: u64,
    /// TLS certificate material. Absent serves plain TCP.
    pub tls: Option<TlsOptions>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_owned(),
            port: None,
            concurrency: ConcurrencyMode::Sequential,
            max_fps: 0,
            png_compression: PngCompression::Fast,
            page_title: "viso-live".to_owned(),
            request_timeout_ms: 5000,
            tls: None,
        }
    }
}

impl ServerOptions {
    /// The port to bind after applying the TLS-dependent default.
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(if self.tls.is_some() {
            DEFAULT_TLS_PORT
        } else {
            DEFAULT_PORT
        })
    }

    /// `address:port` as passed to the socket bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.effective_port())
    }
}

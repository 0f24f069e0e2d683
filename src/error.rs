//! Crate-level error types.

use std::{fmt, io};

use crate::gpu::context::ContextError;
use crate::structure::StructureError;
use crate::view::RenderError;

/// Errors produced by the viso-live crate.
///
/// Startup failures (`Gpu`, `StructureLoad`, `Bind`, `Options`, `Tls`)
/// abort the process before anything is served. Per-connection failures
/// never surface here; the server logs and drops them.
#[derive(Debug)]
pub enum LiveError {
    /// GPU context initialization failure.
    Gpu(ContextError),
    /// The native window handle could not be turned into a surface.
    Surface(wgpu::CreateSurfaceError),
    /// The structure bytes could not be parsed.
    StructureLoad(StructureError),
    /// The listening socket could not be bound.
    Bind {
        /// Address as configured (`host:port`).
        addr: String,
        /// Underlying socket error.
        source: io::Error,
    },
    /// Generic I/O failure.
    Io(io::Error),
    /// A render call failed outside of a connection loop.
    Render(RenderError),
    /// A view was requested with a zero dimension.
    InvalidSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// TOML options parsing/serialization failure.
    Options(String),
    /// TLS certificate or key material could not be loaded.
    Tls(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for LiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Surface(e) => write!(f, "invalid window surface: {e}"),
            Self::StructureLoad(e) => write!(f, "structure load error: {e}"),
            Self::Bind { addr, source } => {
                write!(f, "failed to bind {addr}: {source}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Render(e) => write!(f, "render error: {e}"),
            Self::InvalidSize { width, height } => {
                write!(f, "invalid view size {width}x{height}")
            }
            Self::Options(msg) => write!(f, "options parse error: {msg}"),
            Self::Tls(msg) => write!(f, "TLS setup error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for LiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::StructureLoad(e) => Some(e),
            Self::Bind { source, .. } | Self::Io(source) => Some(source),
            Self::Render(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for LiveError {
    fn from(e: ContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<StructureError> for LiveError {
    fn from(e: StructureError) -> Self {
        Self::StructureLoad(e)
    }
}

impl From<RenderError> for LiveError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

impl From<io::Error> for LiveError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

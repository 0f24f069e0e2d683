//! Process configuration with TOML file support.
//!
//! Every section uses `#[serde(default)]`, so a partial file (e.g. only
//! overriding `[server] port`) fills the rest from defaults. Command-line
//! flags are applied on top of the loaded values by the binary.

mod server;
mod view;
mod window;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
pub use server::{
    ConcurrencyMode, ServerOptions, TlsOptions, DEFAULT_PORT, DEFAULT_TLS_PORT,
};
pub use view::ViewOptions;
pub use window::WindowOptions;

use crate::error::LiveError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Structure file (PDB or mmCIF) to load.
    pub structure: Option<PathBuf>,
    /// HTTP streaming server.
    pub server: ServerOptions,
    /// Streamed view size and appearance.
    pub view: ViewOptions,
    /// Native window mode.
    pub window: WindowOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::Io`] if the file cannot be read and
    /// [`LiveError::Options`] if it is not valid TOML for these options.
    pub fn load(path: &Path) -> Result<Self, LiveError> {
        let content = std::fs::read_to_string(path).map_err(LiveError::Io)?;
        toml::from_str(&content).map_err(|e| LiveError::Options(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::Options`] on serialization failure and
    /// [`LiveError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), LiveError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LiveError::Options(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(LiveError::Io)?;
        }
        std::fs::write(path, content).map_err(LiveError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PngCompression;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
structure = "molecules/2tgt.cif"

[server]
port = 9000
concurrency = "thread_per_connection"
png_compression = "best"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.structure, Some(PathBuf::from("molecules/2tgt.cif")));
        assert_eq!(opts.server.effective_port(), 9000);
        assert_eq!(opts.server.concurrency, ConcurrencyMode::ThreadPerConnection);
        assert_eq!(opts.server.png_compression, PngCompression::Best);
        // Everything else should be default
        assert_eq!(opts.server.address, "0.0.0.0");
        assert_eq!(opts.server.max_fps, 0);
        assert_eq!(opts.view, ViewOptions::default());
        assert_eq!(opts.window.title, "viso-live");
    }

    #[test]
    fn tls_changes_default_port() {
        let toml_str = r#"
[server.tls]
cert_chain = "cert.pem"
private_key = "key.pem"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.server.effective_port(), DEFAULT_TLS_PORT);
        assert_eq!(Options::default().server.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("viso-live.toml");
        let mut opts = Options::default();
        opts.view.width = 640;
        opts.server.max_fps = 30;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }

    #[test]
    fn malformed_file_is_an_options_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(matches!(Options::load(&path), Err(LiveError::Options(_))));
    }
}

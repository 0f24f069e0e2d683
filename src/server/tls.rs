//! TLS wrapping of accepted sockets.

use std::net::TcpStream;
use std::sync::Arc;

use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};

use crate::error::LiveError;
use crate::options::TlsOptions;

/// An accepted connection after TLS wrapping. The handshake runs on first
/// read.
pub(crate) type TlsStream = rustls::StreamOwned<rustls::ServerConnection, TcpStream>;

/// Load the PEM certificate chain and key named by `options`.
pub(crate) fn load_config(
    options: &TlsOptions,
) -> Result<Arc<rustls::ServerConfig>, LiveError> {
    let certs = CertificateDer::pem_file_iter(&options.cert_chain)
        .and_then(|certs| certs.collect::<Result<Vec<_>, _>>())
        .map_err(|e| {
            LiveError::Tls(format!("{}: {e}", options.cert_chain.display()))
        })?;
    if certs.is_empty() {
        return Err(LiveError::Tls(format!(
            "{}: no certificates found",
            options.cert_chain.display()
        )));
    }
    let key = PrivateKeyDer::from_pem_file(&options.private_key).map_err(|e| {
        LiveError::Tls(format!("{}: {e}", options.private_key.display()))
    })?;

    let config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| LiveError::Tls(e.to_string()))?;
    log::info!(
        "TLS enabled with certificate chain {}",
        options.cert_chain.display()
    );
    Ok(Arc::new(config))
}

/// Start a server-side TLS session on `stream`.
pub(crate) fn accept(
    config: &Arc<rustls::ServerConfig>,
    stream: TcpStream,
) -> Result<TlsStream, rustls::Error> {
    let connection = rustls::ServerConnection::new(Arc::clone(config))?;
    Ok(rustls::StreamOwned::new(connection, stream))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_tls_errors() {
        let dir = tempfile::tempdir().unwrap();
        let options = TlsOptions {
            cert_chain: dir.path().join("cert.pem"),
            private_key: dir.path().join("key.pem"),
        };
        assert!(matches!(load_config(&options), Err(LiveError::Tls(_))));
    }

    #[test]
    fn empty_chain_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cert_chain = dir.path().join("cert.pem");
        std::fs::write(&cert_chain, "not pem\n").unwrap();
        let options = TlsOptions {
            cert_chain,
            private_key: dir.path().join("key.pem"),
        };
        assert!(matches!(load_config(&options), Err(LiveError::Tls(_))));
    }
}

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::TlsPaths;
use crate::error::TlsError;

fn open(path: &Path) -> Result<BufReader<File>, TlsError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TlsError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Checks that the certificate chain and private key parse, so the server can decide between
/// HTTPS/WSS and plain HTTP/WS before binding.
pub fn check_tls_files(paths: &TlsPaths) -> Result<(), TlsError> {
    let mut cert_reader = open(&paths.cert_path)?;
    let certs = rustls_pemfile::certs(&mut cert_reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Io {
            path: paths.cert_path.clone(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificates(paths.cert_path.clone()));
    }

    let mut key_reader = open(&paths.key_path)?;
    match rustls_pemfile::private_key(&mut key_reader) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(TlsError::NoPrivateKey(paths.key_path.clone())),
        Err(source) => Err(TlsError::Io {
            path: paths.key_path.clone(),
            source,
        }),
    }
}

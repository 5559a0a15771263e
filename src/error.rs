use std::path::PathBuf;
use thiserror::Error;

use crate::registry::ConnectionId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Room {0} does not exist")]
    RoomNotFound(String),
    #[error("Name {0:?} rejected by name policy")]
    InvalidName(String),
    #[error("Unknown connection {0}")]
    UnknownConnection(ConnectionId),
}

#[derive(Error, Debug)]
pub enum TlsError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("No certificates found in {0}")]
    NoCertificates(PathBuf),
    #[error("No private key found in {0}")]
    NoPrivateKey(PathBuf),
}

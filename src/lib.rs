pub mod config;
pub mod directory;
pub mod error;
pub mod messages;
pub mod registry;
pub mod relay;
pub mod room;
pub mod server;
pub mod tls;

pub use config::{NamePolicy, RelayConfig};
pub use error::RelayError;
pub use messages::{ClientEvent, ServerEvent};
pub use relay::Relay;
pub use server::Server;

pub mod config;
pub mod error;
pub mod handler;
pub mod prompts;
pub mod protocol;
pub mod schema;
pub mod session;
pub mod tools;
pub mod transports;
pub mod upstream;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use handler::{CoreHandler, create_server_details};
pub use protocol::*;
pub use session::SessionRegistry;
pub use transports::{run_sse_server, run_stdio_server};

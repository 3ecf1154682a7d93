pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod external;
pub mod projection;
pub mod server;
pub mod session;

pub mod command;
pub mod runtime;
pub mod server;
pub mod state;

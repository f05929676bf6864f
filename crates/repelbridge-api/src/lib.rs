// repelbridge-api: Async Rust client for the RepelBridge controller REST API

pub mod client;
pub mod discovery;
pub mod error;
pub mod models;
pub mod transport;

mod bus;
mod cartridge;
mod settings;
mod system;

pub use client::BridgeClient;
pub use error::Error;

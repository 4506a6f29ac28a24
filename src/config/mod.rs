#[cfg(feature = "cli")]
pub mod cli;
pub mod client;

pub use client::ClientConfig;

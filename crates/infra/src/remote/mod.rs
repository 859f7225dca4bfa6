//! Remote source adapters

pub mod gateway;

pub use gateway::HttpRemoteSource;

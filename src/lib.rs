//! Storebot - a streaming terminal client for the SmartStore FAQ chatbot
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod answer;
pub mod cli;
pub mod codec;
pub mod models;
pub mod session;
pub mod traits;

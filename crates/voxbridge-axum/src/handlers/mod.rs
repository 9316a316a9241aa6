//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin: they validate input, call the synthesizer port and
//! shape the response.

pub mod health;
pub mod tts;

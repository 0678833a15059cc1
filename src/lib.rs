//! `truthwire`: two-player lie detector game engine.
//!
//! The core is a small phase state machine (Disclaimer → Selection →
//! Answering → Measuring → Results) driven by an external real-time feed
//! of pulse readings and button presses, plus operator controls. This
//! library provides the engine, the bounded activity log, and the feed
//! adapter boundary; rendering is left to the host.

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod game;
pub mod observability;
pub mod session;

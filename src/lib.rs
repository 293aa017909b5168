//! Cognitive score estimation from lifestyle and performance inputs.
//!
//! [`scoring::compute`] is the pure core; everything else collects inputs
//! (CLI flags, config defaults, the interactive form) or presents the result.

pub mod stderr_buffer;

pub mod config;
pub mod inputs;
pub mod output;
pub mod sample;
pub mod scoring;
pub mod tui;

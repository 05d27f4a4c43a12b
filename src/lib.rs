//! Entry screen of an application-creation tool.
//!
//! Collects a natural-language prompt, gates submission behind an
//! authenticated session, and hands the prompt to a creation pipeline.

pub mod config;
pub mod gate;
pub mod identity;
pub mod logging;
pub mod pipeline;
pub mod ui;

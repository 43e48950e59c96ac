//! Terminal front-end for the external `h2mm-cli` mod manager.
//!
//! Every real operation (install, uninstall, list, update, enable,
//! disable) is delegated to the external tool; this crate presents pages
//! and forms, streams the tool's output through a pseudo-terminal relay,
//! and persists a handful of user preferences.

pub mod cli;
pub mod config;
pub mod logging;
pub mod mods;
pub mod relay;
pub mod ui;

//! Mod-manager operations: command construction policy for the external
//! `h2mm-cli` tool and parsing of its `list` output. No mod-format
//! knowledge lives here; every real operation is delegated to the tool.

mod action;
mod catalog;
mod policy;

pub use action::ModAction;
pub use catalog::{parse_mod_list, spawn_list_worker, ModEntry};
pub use policy::{CommandPolicy, LaunchError, DEFAULT_CLI};

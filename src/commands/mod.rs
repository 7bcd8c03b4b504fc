//! One module per CLI command. Each exposes a `run` (or named) function
//! taking a `&Repository` plus whatever operands the command needs, and
//! returns `anyhow::Result<()>` — `GitletError` variants propagate through
//! `?` to the dispatcher in `main`, which prints their `Display` text.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod global_log;
pub mod init;
pub mod log;
pub mod merge;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;

//! One module per `cpass` subcommand.  Each exposes an `execute` function.

pub mod find;
pub mod init;
pub mod list;
pub mod open;
pub mod remove;
pub mod save;

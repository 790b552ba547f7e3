//! One module per subcommand.  Each exposes an async `execute`.

pub mod add;
pub mod delete;
pub mod get;
pub mod init;
pub mod list;
pub mod verify;

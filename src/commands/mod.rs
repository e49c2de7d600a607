pub mod hook;
pub mod init;

/// Command results carry their payload plus the process exit code.
pub type CmdResult<T> = groundwork::Result<(T, i32)>;

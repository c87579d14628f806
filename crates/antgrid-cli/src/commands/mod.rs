pub mod init;
pub mod solve;

pub mod init;
pub mod play;

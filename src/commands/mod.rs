pub mod init;
pub mod list;
pub mod members;
pub mod view;

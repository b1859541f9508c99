pub mod available;
pub mod doctor;
pub mod init;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod use_version;

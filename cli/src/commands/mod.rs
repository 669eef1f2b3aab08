pub mod completions;
pub mod config;
pub mod dashboard;
pub mod init;
pub mod session;
pub mod task;
pub mod theme;

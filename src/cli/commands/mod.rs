pub mod config;
pub mod dashboard;
pub mod history;
pub mod init;
pub mod login;
pub mod logout;
pub mod start;
pub mod status;
pub mod stop;
pub mod whoami;

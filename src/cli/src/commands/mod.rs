pub mod check;
pub mod config;
pub mod permissions;
pub mod roles;
pub mod whoami;

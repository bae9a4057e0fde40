pub mod commands;
pub mod config;
pub mod main_lib;
pub mod scenario;

pub use commands::{execute, render, Cli, Command};
pub use config::{Config, OutputStyle};
pub use scenario::Scenario;

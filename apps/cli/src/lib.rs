pub mod config;
mod main_lib;

pub use main_lib::{init_tracing, run};

// Terminal event loop and the headless runner

pub mod loop_handler;

pub use loop_handler::{run, run_headless};

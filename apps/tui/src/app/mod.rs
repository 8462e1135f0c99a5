// Application state, key/mouse handling and map navigation

pub mod input;
pub mod navigation;
pub mod search;
pub mod state;

pub use input::{handle_key, handle_mouse};
pub use state::App;

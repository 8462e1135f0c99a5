pub mod popup;
pub mod state_map;
pub mod tiles;

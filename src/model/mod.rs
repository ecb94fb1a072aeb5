pub mod chat;
pub mod delta;
pub mod event;
pub mod game_state;
pub mod options;
pub mod save;

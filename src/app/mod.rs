pub mod events;
pub mod host;
pub mod settings;
pub mod state;

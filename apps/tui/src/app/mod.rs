// App module for nwi_dashboard
// Holds application state, input handling and background requests

pub mod actions;
pub mod input;
pub mod state;

pub use input::{handle_input, handle_mouse};
pub use state::{App, Focus};

//! Console adapters for the terminal front end.

mod renderer;

pub use renderer::ConsoleRenderer;

//! Domain models for the AgriCure system.

mod field;
mod history;
mod profile;
mod recommendation;
mod soil;

pub use field::*;
pub use history::*;
pub use profile::*;
pub use recommendation::*;
pub use soil::*;

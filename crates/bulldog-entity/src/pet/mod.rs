//! Pet domain entities.

pub mod model;

pub use model::{Pet, PetInput};

pub mod document;
pub mod validation;
pub mod wire;

pub use document::*;
pub use validation::*;

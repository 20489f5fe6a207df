pub mod entities;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod parser;
pub mod ports;
pub mod prompt;
pub mod schema;
pub mod services;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;

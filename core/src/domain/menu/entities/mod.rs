pub mod analysis_result;
pub mod dish;

pub use analysis_result::*;
pub use dish::*;

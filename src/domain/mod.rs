pub mod errors;
pub mod preprocess;
pub mod model;
pub mod prediction;

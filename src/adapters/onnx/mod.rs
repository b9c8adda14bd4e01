pub mod classifier;
pub mod model_catalog;

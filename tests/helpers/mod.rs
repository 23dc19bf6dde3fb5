pub mod model_assertions;
pub mod source_fixtures;

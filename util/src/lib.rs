pub mod languages;
pub mod paths;
pub mod problem;
pub mod test_helpers;

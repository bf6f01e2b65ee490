pub mod config;
pub mod marking_config;
pub mod paths;
pub mod test_helpers;

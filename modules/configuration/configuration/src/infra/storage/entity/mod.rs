pub mod client_config;
pub mod global_config;

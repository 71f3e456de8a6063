pub mod http_api;
pub mod persistence;
pub mod sound;

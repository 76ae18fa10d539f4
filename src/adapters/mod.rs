pub mod http;
pub mod persistence;
pub mod rest_store;

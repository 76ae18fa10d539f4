pub mod app_error_impl;
pub mod app_state;
pub mod export_file_impl;
pub mod lang;
pub mod middleware;
pub mod routes;

pub mod api_base;
pub mod constants;

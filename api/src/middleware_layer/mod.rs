pub mod error_page_layer;
pub mod session_layer;

pub mod console_handler;
pub mod health_handler;
pub mod http_transport;
pub mod proxy_handler;
pub mod ui_handler;

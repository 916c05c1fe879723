// Adapters layer: concrete implementations for external systems (http, page DOM, browser host).

pub mod browser;
pub mod dom;
pub mod http;

//! HTTP surface of the widget

pub mod http;
pub mod widget;

pub use http::*;

//! Transport layer for the Vercel client.

pub mod http;

pub use http::HttpTransport;

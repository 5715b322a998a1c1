//! Client-side resource identity for HTTP services.
//!
//! A [`Service`] normalizes its base URL once, resolves paths below it into
//! [`CanonicalUrl`]s, and hands out one shared [`Resource`] per canonical URL.
//! Request execution is left to the caller.

pub mod config;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod service;
pub mod url_model;

pub use error::ResolveError;
pub use service::{Resource, Service};
pub use url_model::{BaseUrl, CanonicalUrl};

//! Request extractors whose rejections render as [`ErrorResponse`] bodies.
//!
//! - [`Json`]: JSON bodies, also used for JSON responses
//! - [`ValidateJson`]: JSON bodies checked with `validator`
//! - [`Path`]: path parameters
//! - [`Multipart`]: multipart uploads
//!
//! [`ErrorResponse`]: crate::handler::response::ErrorResponse

pub mod reject;

pub use crate::extract::reject::{Json, Multipart, Path, ValidateJson};

//! xtsttopng - pixel trace renderer
//!
//! Decodes run-length encoded pixel traces and writes one image per frame,
//! giving every distinct pixel value its own color.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

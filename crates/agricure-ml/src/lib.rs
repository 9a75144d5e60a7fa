//! Prediction endpoint client for AgriCure.
//!
//! The endpoint is an opaque classifier: it receives the eight soil/crop
//! features and answers with a fertilizer label and a confidence score.
//! [`HttpPredictor`] (feature `http`) calls it over HTTP; [`MockPredictor`]
//! stands in for it in tests.

pub mod mock;
pub mod parse;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::*;
pub use mock::*;
pub use parse::*;

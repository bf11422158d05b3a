//! Ride route generation for the chat assistant.
//!
//! This crate turns a free-form chat message into a structured ride request,
//! synthesizes a deterministic closed-loop GPS track with a plausible
//! elevation profile and timing, and serializes it as a GPX 1.1 document.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use routes::prelude::*;
//!
//! if let Some(request) = parse("/route from Lyon; 60 km; 800 m D+; gravel") {
//!     let summary = compose(&request);
//!     let points = synthesize(&request);
//!     let document = build_gpx(&request, &points);
//!     let filename = gpx_filename(&request);
//! }
//! ```
//!
//! The chat UI, HTTP routing, and the upstream completion call are external
//! collaborators: this crate only consumes text and produces text.

pub mod errors;
pub mod generator;
pub mod gpx;
pub mod models;
pub mod parser;
pub mod profiles;
pub mod query;
pub mod reply;
pub mod rng;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::errors::QueryError;
    pub use crate::generator::synthesize;
    pub use crate::gpx::{build_gpx, build_gpx_at, gpx_filename};
    pub use crate::models::{RideRequest, TrackPoint};
    pub use crate::parser::parse;
    pub use crate::profiles::PracticeProfile;
    pub use crate::query::{from_query_string, to_query_string};
    pub use crate::reply::{compose, format_duration};
    pub use crate::rng::SeededRng;
}

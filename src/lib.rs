//! geo-quiz: Location-Based Trivia
//!
//! A library and CLI tool for a walking quiz: places with questions are
//! loaded from a GeoJSON feed, ranked by distance from the player, and
//! solved by answering their question.
//!
//! ## Features
//!
//! - Haversine distance and stable nearest-first ranking
//! - Quiz state machine with case-insensitive answer checking
//! - Session tying a location fix to quiz progress
//! - GeoJSON feed loading from files or http(s)
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_quiz::{AnswerOutcome, Coordinates, PlaceId, PointOfInterest, Session};
//!
//! let palace = PointOfInterest::new(
//!     PlaceId::new("palace").unwrap(),
//!     Coordinates::new(48.7784, 9.1800),
//!     "New Palace",
//!     "Which duke commissioned the New Palace?",
//! )
//! .with_answer("Karl Eugen");
//!
//! let mut session = Session::with_points(vec![palace]).unwrap();
//! session.update_position(Coordinates::new(48.7758, 9.1829)).unwrap();
//!
//! for ranked in session.ranked() {
//!     println!("{} - {:.0} meters", ranked.point.name, ranked.distance_meters);
//! }
//!
//! let outcome = session.submit_answer("palace", "karl eugen").unwrap();
//! assert_eq!(outcome, AnswerOutcome::Correct);
//! assert!(session.is_complete());
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod location;
pub mod poi;
pub mod quiz;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use poi::{PlaceId, PointOfInterest};
pub use quiz::{AnswerOutcome, Quiz};
pub use session::Session;

//! Client library for the ClassCharts parent and student APIs

/// Errors returned by every client operation
pub mod error;

/// Lenient parsing of raw `Set-Cookie` headers
pub mod cookies;

/// Session state and the single gateway for authenticated requests
pub mod session;

/// Login strategies and the accessors shared by both account kinds
pub mod clients;

/// Response shapes of every endpoint, and how each one is requested
pub mod interfaces;

/// Command line harness: config file, logging and pretty printing
#[cfg(feature = "cli")]
pub mod demo;

pub use clients::parent::ParentClient;
pub use clients::student::StudentClient;
pub use clients::traits::{ClassChartsClient, Login};
pub use error::{AuthFailure, Error, Result};
pub use session::{ApiRequest, ClientConfig, Role, Session};

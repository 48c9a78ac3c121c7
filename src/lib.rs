//! Client for the Apple Music analytics reporting API.
//! Signs short-lived ES256 tokens, fetches dated reports and writes them
//! to disk untouched.

pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod output;
pub mod report;
pub mod token;

pub use client::Client;
pub use config::{ConfigLoader, Credentials, Settings};
pub use download::download_report;
pub use error::{ApiError, ReportError};
pub use output::ReportWriter;
pub use report::{ReportKind, ReportRequest, parse_date};
pub use token::SignedToken;

//! KAMAR Notices - Read the daily notices of a KAMAR school portal.
//!
//! This crate sends the `GetNotices` command to a portal's API for a given
//! date and parses the XML answer into general and meeting notices.
//!
//! # Example
//!
//! ```
//! use kamar_notices::parser::parse_response;
//! use kamar_notices::types::Level;
//!
//! let xml = r#"<NoticesResults><Notices>
//!     <General index="0">
//!         <Level>ALL</Level><Subject>Test 1</Subject><Body></Body><Teacher>SD</Teacher>
//!     </General>
//! </Notices></NoticesResults>"#;
//!
//! let notices = parse_response(xml, "01/01/2020").unwrap();
//! assert!(notices.is_success());
//! assert_eq!(notices.notices().unwrap()[0].level(), Level::All);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Protocol constants, endpoint construction and [`ClientConfig`]
//! - [`types`]: Notice data types ([`Notice`], [`Level`], ...)
//! - [`notices`]: The per-request result container
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client and request encoding
//! - [`xml`]: XML utilities
//! - [`parser`]: Response parsing
//! - [`client`]: The [`NoticesClient`]
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod notices;
pub mod parser;
pub mod types;
pub mod xml;

pub use client::NoticesClient;
pub use config::{endpoint_url, validate_date, ClientConfig};
pub use error::{NoticesError, Result};
pub use notices::Notices;
pub use types::{GeneralNotice, Level, MeetingNotice, Notice};

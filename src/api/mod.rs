//! Client for the design service.
//!
//! Requests go through a [`Transport`] so the client stays synchronous and
//! testable; enable the `http` feature for a blocking `reqwest` transport.

mod client;
mod endpoints;
#[cfg(feature = "http")]
mod http;
mod load_state;
mod payloads;
mod session;
mod transport;

pub use client::{ApiClient, GeneratedDesign, LAYOUT_WARNING};
pub use endpoints::{join_url, layout_path, GENERATE_DESIGN_PATH, MY_DESIGNS_PATH, RECENT_DESIGNS_PATH};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use load_state::LoadState;
pub use payloads::{DesignListing, DesignSummary, GenerateDesignRequest, GenerateDesignResponse};
pub use session::{Clock, FixedClock, RouteDecision, Session, SessionStore, SystemClock};
pub use transport::{ApiRequest, ApiResponse, Method, Transport};

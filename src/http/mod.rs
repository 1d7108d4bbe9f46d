//! HTTP model and platform adapters.
//!
//! # Data Flow
//! ```text
//! Platform event JSON  ──▶ event.rs ──┐
//!                                      ├─▶ request.rs (EdgeRequest)
//! axum Request ──▶ middleware.rs ──────┘        │
//!                                               ▼
//!                                        edge handler
//!                                               │
//!     response.rs (EdgeResponse: 401 / 301) ◀───┴──▶ forwarded EdgeRequest
//! ```

pub mod event;
pub mod headers;
pub mod middleware;
pub mod request;
pub mod response;

pub use event::{EdgeEvent, EventError};
pub use headers::{EdgeHeaders, HeaderEntry};
pub use middleware::{access_gate_middleware, redirect_middleware};
pub use request::EdgeRequest;
pub use response::EdgeResponse;

//! Authentication and authorization
//!
//! Organizers authenticate with a Bearer API key obtained from `/login`.

pub mod api_key;

pub use api_key::{admin_middleware, auth_middleware, organizer_middleware};

//! CareAndCure practice backend.
//!
//! The session store, credential gateway and route guard live in
//! [`domain`]; [`inbound::http`] exposes them over actix-web and
//! [`outbound`] carries the bundled practice registry.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

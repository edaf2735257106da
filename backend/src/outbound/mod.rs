//! Outbound adapters implementing domain ports.
//!
//! - **practice_fixtures**: the bundled practice registry behind
//!   `PracticeRepository`.
//!
//! Adapters translate between domain types and their backing representation
//! and contain no business logic.

pub mod practice_fixtures;

//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_gateway;
mod practice_repository;
mod snapshot_storage;

pub use credential_gateway::{
    CredentialGateway, DEFAULT_GATEWAY_LATENCY, FixtureCredentialGateway, GatewayError,
};
pub use practice_repository::{PatientFile, PracticeRepository, PracticeRepositoryError};
pub use snapshot_storage::{InMemorySnapshotStorage, SnapshotStorage, SnapshotStorageError};

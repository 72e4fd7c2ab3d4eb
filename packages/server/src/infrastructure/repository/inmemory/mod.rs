//! In-memory implementations.

mod presence;

pub use presence::InMemoryPresenceRepository;

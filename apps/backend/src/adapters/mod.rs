//! Storage adapters implementing the `repos` traits.

pub mod games_memory;

pub use games_memory::InMemoryGameStore;

//! Vector retrieval over the embedding and store providers

mod search;

pub use search::VectorIndex;

//! Search sequencing and remote mutations

pub mod mutation;
pub mod search;

pub use mutation::{Confirmer, DeleteOutcome, MutationGateway};
pub use search::{SearchController, SearchRequest};

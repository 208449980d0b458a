//! Local mirror of the remote history and request sequencing

pub mod records;
pub mod sequence;

pub use records::{ListView, LoadStatus, RecordStore};
pub use sequence::{RequestSequencer, Ticket};

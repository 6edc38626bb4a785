//! Typed dashboard records, the field accessors the projector runs over, and the
//! snapshot/draft lifecycle records follow once fetched.

mod domain;
mod fields;
mod import;
mod snapshot;

pub use domain::{
    Candidate, Customer, EntityKind, Interview, Job, ParseEntityKindError, RecordId,
};
pub use fields::{parse_instant, FieldValue, Projectable};
pub use import::{load_records, read_records, RecordFormat, RecordImportError};
pub use snapshot::{Draft, RecordSnapshot};

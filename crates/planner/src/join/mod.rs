//! Resolution of join conditions and the physical facts derived from them.
mod interleave;
mod ordering;
mod predicate;

pub use {
    interleave::{interleaved_scans, InterleavedScans},
    ordering::compute_merge_join_ordering,
    predicate::{natural_join_columns, JoinConditionResolver, JoinPredicate, UsingColumn},
};

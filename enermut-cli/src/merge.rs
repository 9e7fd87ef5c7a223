//! Result File Merging
//!
//! Pure structural transforms for combining measurement campaigns run in
//! parts. Mutation files concatenate as-is; reference files re-index the
//! second file's mileage values to continue monotonically after the
//! first's maximum, preserving strict increase across the boundary.

use enermut_core::{MutationRecord, ReferenceRecord};

/// Concatenate two mutation files in order.
pub fn merge_mutations(
    first: Vec<MutationRecord>,
    second: Vec<MutationRecord>,
) -> Vec<MutationRecord> {
    first.into_iter().chain(second).collect()
}

/// Concatenate two reference files, offsetting every mileage in the
/// second by `first.last().mileage + 1`.
pub fn merge_references(
    first: Vec<ReferenceRecord>,
    mut second: Vec<ReferenceRecord>,
) -> Vec<ReferenceRecord> {
    if let Some(last) = first.last() {
        let offset = last.mileage + 1;
        for record in &mut second {
            record.mileage += offset;
        }
    }
    first.into_iter().chain(second).collect()
}

//! Baseline Matcher
//!
//! Aligns mutation execution order against reference measurement epochs.
//! Mutation index `i` is matched to the reference record with the largest
//! mileage `<= i`. Both sequences are consumed in a single forward pass
//! (an O(n) merge-join over the shared watermark, not a lookup table), and
//! the result is an explicit index-mapping array rather than a pair of
//! shared cursor variables.

use crate::{AnalysisError, ReferenceRecord};

/// Map each mutation index `0..mutation_count` to the index of its
/// baseline record in `references`.
///
/// Preconditions: `references` is non-empty and sorted by mileage
/// (the loaders validate strict increase). The reference pointer only ever
/// advances; it never resets or runs past the end. A mutation index beyond
/// the final mileage has no covering epoch and fails with
/// [`AnalysisError::BaselineOutOfRange`].
pub fn match_baselines(
    references: &[ReferenceRecord],
    mutation_count: usize,
) -> Result<Vec<usize>, AnalysisError> {
    let last = references.last().ok_or(AnalysisError::EmptyReference)?;

    let mut mapping = Vec::with_capacity(mutation_count);
    let mut ref_idx = 0usize;
    for i in 0..mutation_count {
        let epoch = i as u64;
        if last.mileage < epoch {
            return Err(AnalysisError::BaselineOutOfRange {
                mutation_index: i,
                last_mileage: last.mileage,
            });
        }
        while references[ref_idx + 1..]
            .first()
            .is_some_and(|next| next.mileage <= epoch)
        {
            ref_idx += 1;
        }
        mapping.push(ref_idx);
    }
    Ok(mapping)
}

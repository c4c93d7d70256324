use ndarray::ArrayView1;
use rand::{Rng, seq::SliceRandom};

use crate::{DataErr, Result};

pub const POSITIVE: i64 = 1;
pub const NEGATIVE: i64 = 0;

/// Split of the training rows into labelled (`known`) and unlabelled (`unknown`) indices.
///
/// Every training row index appears in exactly one of the two sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    known: Vec<usize>,
    unknown: Vec<usize>,
}

impl Partition {
    /// Picks the initial labelled set.
    ///
    /// One positive and one negative row are always chosen first, the remaining
    /// `n_start - 2` rows are drawn uniformly without replacement from the pooled
    /// leftovers of both classes. The leftovers not drawn become `unknown`, in the
    /// order the shuffle left them.
    ///
    /// # Arguments
    /// * `labels` - The training labels, already normalized to `{0, 1}`.
    /// * `n_start` - The size of the initial labelled set.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// An error if `n_start` is not in `[2, labels.len()]` or if one of the classes
    /// has no example.
    pub fn start<R: Rng + ?Sized>(
        labels: ArrayView1<i64>,
        n_start: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let n = labels.len();
        if n_start < 2 || n_start > n {
            return Err(DataErr::StartSizeOutOfRange { n_start, max: n });
        }

        let mut positives = class_indices(labels, POSITIVE);
        let mut negatives = class_indices(labels, NEGATIVE);
        positives.shuffle(rng);
        negatives.shuffle(rng);

        let (&first_pos, rest_pos) = positives
            .split_first()
            .ok_or(DataErr::MissingClass { label: POSITIVE })?;
        let (&first_neg, rest_neg) = negatives
            .split_first()
            .ok_or(DataErr::MissingClass { label: NEGATIVE })?;

        let mut rest: Vec<usize> = rest_pos.iter().chain(rest_neg).copied().collect();
        rest.shuffle(rng);

        let unknown = rest.split_off(n_start - 2);
        let mut known = Vec::with_capacity(n_start);
        known.push(first_pos);
        known.push(first_neg);
        known.append(&mut rest);

        Ok(Self { known, unknown })
    }

    #[inline]
    pub fn known(&self) -> &[usize] {
        &self.known
    }

    #[inline]
    pub fn unknown(&self) -> &[usize] {
        &self.unknown
    }

    pub fn is_known(&self, index: usize) -> bool {
        self.known.contains(&index)
    }

    /// Moves `unknown[position]` to the end of the labelled set.
    ///
    /// # Returns
    /// The revealed row index, or `None` if `position` is out of bounds.
    pub fn reveal(&mut self, position: usize) -> Option<usize> {
        if position >= self.unknown.len() {
            return None;
        }

        let index = self.unknown.remove(position);
        self.known.push(index);
        Some(index)
    }
}

fn class_indices(labels: ArrayView1<i64>, class: i64) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter_map(|(i, &y)| (y == class).then_some(i))
        .collect()
}

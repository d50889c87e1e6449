//! Neighborhood moves on sequences.

use rand::seq::index;
use rand::Rng;

use crate::models::Sequence;

/// Random swap: exchanges two distinct positions chosen uniformly at random.
///
/// Returns `None` when the sequence has fewer than two positions.
pub fn random_swap<R: Rng + ?Sized>(sequence: &Sequence, rng: &mut R) -> Option<Sequence> {
    let len = sequence.len();
    if len < 2 {
        return None;
    }
    let picked = index::sample(rng, len, 2);
    Some(sequence.swapped(picked.index(0), picked.index(1)))
}

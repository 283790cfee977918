//! Cyclic reordering of sequences.

/// Rotates `items` to the left by `n` positions, wrapping around.
///
/// # Examples
///
/// ```
/// # use scalegen::reorder;
/// assert_eq!(reorder::cyclic_shift(&[1, 2, 3, 4], 1), [2, 3, 4, 1]);
/// assert_eq!(reorder::cyclic_shift(&[1, 2, 3, 4], 3), [4, 1, 2, 3]);
/// assert_eq!(reorder::cyclic_shift(&[1, 2, 3, 4], 5), [2, 3, 4, 1]);
/// assert_eq!(reorder::cyclic_shift::<u16>(&[], 1), []);
/// ```
pub fn cyclic_shift<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    let mut shifted = items.to_vec();
    if !shifted.is_empty() {
        shifted.rotate_left(n % items.len());
    }
    shifted
}

/// Lists the distinct rotations of `items`, i.e. the modes of a scale.
///
/// The rotations are listed in order of increasing shift. Repeated rotations, like the ones of `[2, 2, 2, 2, 2, 2]`,
/// are reported only once. If `include_trivial` is `false`, the unshifted sequence is excluded even if it reappears
/// as a non-trivial rotation.
///
/// # Examples
///
/// ```
/// # use scalegen::reorder;
/// assert_eq!(
///     reorder::cyclic_permutations(&[1, 2, 3], true),
///     [vec![1, 2, 3], vec![2, 3, 1], vec![3, 1, 2]]
/// );
/// assert_eq!(reorder::cyclic_permutations(&[6, 6], true), [vec![6, 6]]);
/// assert!(reorder::cyclic_permutations(&[6, 6], false).is_empty());
/// ```
pub fn cyclic_permutations<T: Clone + PartialEq>(
    items: &[T],
    include_trivial: bool,
) -> Vec<Vec<T>> {
    let mut permutations: Vec<Vec<T>> = Vec::with_capacity(items.len());

    for shift in 0..items.len().max(1) {
        let permutation = cyclic_shift(items, shift);
        if !permutations.contains(&permutation) {
            permutations.push(permutation);
        }
    }

    if !include_trivial {
        permutations.retain(|permutation| permutation.as_slice() != items);
    }

    permutations
}

/// Tells whether `candidate` can be obtained by rotating `items`.
///
/// ```
/// # use scalegen::reorder;
/// assert!(reorder::is_rotation_of(&[2, 1, 2, 2, 2, 1, 2], &[2, 2, 1, 2, 2, 2, 1]));
/// assert!(!reorder::is_rotation_of(&[2, 2, 2, 2, 1, 2, 1], &[2, 2, 1, 2, 2, 2, 1]));
/// ```
pub fn is_rotation_of<T: PartialEq>(candidate: &[T], items: &[T]) -> bool {
    if candidate.len() != items.len() {
        return false;
    }
    if items.is_empty() {
        return true;
    }
    (0..items.len()).any(|shift| {
        let (head, tail) = items.split_at(shift);
        candidate[..tail.len()] == *tail && candidate[tail.len()..] == *head
    })
}

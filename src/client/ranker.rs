use std::cmp::Ordering;

use crate::policy::SelectionMode;
use crate::scanner::CandidateInterval;

/// Longer blocks first, then earlier starts.
pub fn compare(a: &CandidateInterval, b: &CandidateInterval) -> Ordering {
    b.length
        .cmp(&a.length)
        .then_with(|| a.start_index.cmp(&b.start_index))
}

pub fn rank(mut candidates: Vec<CandidateInterval>) -> Vec<CandidateInterval> {
    candidates.sort_by(compare);
    candidates
}

/// `None` means the court is fully booked.
pub fn select_best(candidates: Vec<CandidateInterval>) -> Option<CandidateInterval> {
    rank(candidates).into_iter().next()
}

pub fn select_exact(candidates: &[CandidateInterval], length: usize) -> Option<CandidateInterval> {
    candidates
        .iter()
        .filter(|c| c.length == length)
        .min_by_key(|c| c.start_index)
        .copied()
}

pub fn select(candidates: Vec<CandidateInterval>, mode: SelectionMode) -> Option<CandidateInterval> {
    match mode {
        SelectionMode::RankBest => select_best(candidates),
        SelectionMode::RequireExactLength(length) => select_exact(&candidates, length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn c(start_index: usize, length: usize) -> CandidateInterval {
        CandidateInterval { resource_index: 1, start_index, length }
    }

    #[test]
    fn earlier_start_wins_tie() {
        assert_eq!(select_best(vec![c(10, 3), c(5, 3)]), Some(c(5, 3)));
    }

    #[test]
    fn longest_wins_over_earlier() {
        assert_eq!(select_best(vec![c(0, 2), c(22, 4), c(14, 3)]), Some(c(22, 4)));
    }

    #[test]
    fn ranking_ignores_input_order() {
        let base = vec![c(3, 2), c(7, 4), c(1, 4), c(15, 3), c(20, 2)];
        let expected = vec![c(1, 4), c(7, 4), c(15, 3), c(3, 2), c(20, 2)];

        let mut reversed = base.clone();
        reversed.reverse();
        let mut rotated = base.clone();
        rotated.rotate_left(2);

        for input in [base, reversed, rotated] {
            assert_eq!(rank(input), expected);
        }
    }

    #[test]
    fn empty_means_fully_booked() {
        assert_eq!(select_best(Vec::new()), None);
        assert_eq!(select(Vec::new(), SelectionMode::RequireExactLength(4)), None);
    }

    #[test]
    fn exact_mode_skips_other_lengths() {
        let candidates = vec![c(0, 3), c(12, 4), c(6, 4), c(20, 2)];
        assert_eq!(
            select(candidates.clone(), SelectionMode::RequireExactLength(4)),
            Some(c(6, 4))
        );
        assert_eq!(select(candidates, SelectionMode::RequireExactLength(5)), None);
    }
}

//! Turns a day's grid into bookable candidate intervals.

use tracing::trace;

use crate::grid::{Grid, SlotStatus};
use crate::policy::ScanPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateInterval {
    /// 1-based court number.
    pub resource_index: usize,
    pub start_index: usize,
    pub length: usize,
}

impl CandidateInterval {
    pub fn end_index(&self) -> usize {
        self.start_index + self.length
    }
}

#[derive(Debug, Clone, Copy)]
struct Run {
    start: usize,
    len: usize,
}

struct Scan {
    candidates: Vec<CandidateInterval>,
    run: Option<Run>,
}

impl Scan {
    fn close(mut self, resource_index: usize, min_run_length: usize) -> Scan {
        if let Some(run) = self.run.take() {
            if run.len > min_run_length {
                self.candidates.push(CandidateInterval {
                    resource_index,
                    start_index: run.start,
                    length: run.len,
                });
            }
        }
        self
    }
}

/// Single pass over the grid from `start_offset`.
///
/// Runs of available slots grow up to `max_run_length`; the slot that hits a
/// full run is dropped and the next run starts after it. Ignored slots always
/// end a run. Only runs longer than `min_run_length` are kept.
pub fn scan(
    grid: &Grid,
    resource_index: usize,
    start_offset: usize,
    policy: &ScanPolicy,
) -> Vec<CandidateInterval> {
    let min = policy.min_run_length;
    let max = policy.max_run_length;

    let scan = grid.slots().iter().skip(start_offset).fold(
        Scan { candidates: Vec::new(), run: None },
        |acc, slot| {
            let current = acc.run.map_or(0, |r| r.len);
            match slot.status {
                SlotStatus::Available if current < max => {
                    let run = match acc.run {
                        Some(run) => Run { len: run.len + 1, ..run },
                        None => Run { start: slot.index, len: 1 },
                    };
                    Scan { run: Some(run), ..acc }
                }
                _ => acc.close(resource_index, min),
            }
        },
    );

    let candidates = scan.close(resource_index, min).candidates;
    trace!(resource_index, ?candidates, "scanned grid");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Preset;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::BTreeSet;

    fn policy(min: usize, max: usize, ignored: &[usize]) -> ScanPolicy {
        ScanPolicy {
            min_run_length: min,
            max_run_length: max,
            ignored_indices: ignored.iter().copied().collect(),
            ..Preset::WeeklyBest.policy()
        }
    }

    // '1' free, anything else taken.
    fn grid(pattern: &str, policy: &ScanPolicy) -> Grid {
        let raw: Vec<String> = pattern.chars().map(|c| c.to_string()).collect();
        Grid::from_statuses(&raw, raw.len(), "1", &policy.ignored_indices).unwrap()
    }

    fn spans(candidates: &[CandidateInterval]) -> Vec<(usize, usize)> {
        candidates.iter().map(|c| (c.start_index, c.length)).collect()
    }

    #[test]
    fn single_block_in_full_day() {
        let policy = policy(1, 4, &[]);
        let mut pattern = vec!['2'; 27];
        for slot in &mut pattern[3..=6] {
            *slot = '1';
        }
        let pattern: String = pattern.into_iter().collect();

        let found = scan(&grid(&pattern, &policy), 1, 0, &policy);
        assert_eq!(
            found,
            vec![CandidateInterval { resource_index: 1, start_index: 3, length: 4 }]
        );
    }

    #[rstest]
    #[case::all_taken("2222222222", vec![])]
    #[case::single_sliver_dropped("2122212222", vec![])]
    #[case::pair_kept("2112222222", vec![(1, 2)])]
    #[case::open_run_at_end("2222222111", vec![(7, 3)])]
    #[case::cap_drops_next_slot("1111111222", vec![(0, 4), (5, 2)])]
    #[case::two_runs("1122211122", vec![(0, 2), (5, 3)])]
    fn scans_runs(#[case] pattern: &str, #[case] expected: Vec<(usize, usize)>) {
        let policy = policy(1, 4, &[]);
        assert_eq!(spans(&scan(&grid(pattern, &policy), 1, 0, &policy)), expected);
    }

    #[test]
    fn ignored_slot_splits_run() {
        let policy = policy(1, 4, &[3]);
        let found = scan(&grid("1111111", &policy), 2, 0, &policy);
        assert_eq!(spans(&found), vec![(0, 3), (4, 3)]);
        assert!(found.iter().all(|c| c.resource_index == 2));
    }

    #[test]
    fn offset_skips_early_slots() {
        let policy = policy(1, 4, &[]);
        let found = scan(&grid("1111222111", &policy), 1, 2, &policy);
        assert_eq!(spans(&found), vec![(2, 2), (7, 3)]);
    }

    #[test]
    fn offset_past_end_finds_nothing() {
        let policy = policy(1, 4, &[]);
        assert!(scan(&grid("1111", &policy), 1, 10, &policy).is_empty());
    }

    #[test]
    fn run_equal_to_minimum_is_discarded() {
        let policy = policy(2, 4, &[]);
        let found = scan(&grid("1121112222", &policy), 1, 0, &policy);
        assert_eq!(spans(&found), vec![(3, 3)]);
    }

    // Every free, non-ignored slot is in exactly one candidate, is the slot
    // right after a full run, or belongs to a whole free stretch of at most
    // `min` slots that was discarded.
    #[rstest]
    #[case::lunch_break("111111121111111111112111111", 1, 4, &[8, 9, 10, 11, 12])]
    #[case::long_run_wraps("111111111111", 1, 4, &[])]
    #[case::slivers_between_taken("1212112111211112", 1, 4, &[])]
    #[case::higher_minimum("1121112111121111111", 2, 4, &[])]
    #[case::short_cap("1111111211", 1, 2, &[])]
    #[case::ignored_inside_run("11111111", 1, 4, &[2, 5])]
    fn every_free_slot_is_accounted_for(
        #[case] pattern: &str,
        #[case] min: usize,
        #[case] max: usize,
        #[case] ignored: &[usize],
    ) {
        let policy = policy(min, max, ignored);
        let found = scan(&grid(pattern, &policy), 1, 0, &policy);
        let free = |i: usize| &pattern[i..=i] == "1" && !policy.ignored_indices.contains(&i);

        let mut covered = BTreeSet::new();
        for c in &found {
            for i in c.start_index..c.end_index() {
                assert!(free(i), "slot {} booked but not free", i);
                assert!(covered.insert(i), "slot {} counted twice", i);
            }
        }

        let capped: BTreeSet<usize> = found
            .iter()
            .filter(|c| c.length == max)
            .map(|c| c.end_index())
            .filter(|&i| i < pattern.len() && free(i))
            .collect();
        assert!(capped.is_disjoint(&covered));

        let leftover: Vec<usize> = (0..pattern.len())
            .filter(|&i| free(i) && !covered.contains(&i) && !capped.contains(&i))
            .collect();

        // Group leftovers into consecutive stretches.
        let mut stretches: Vec<(usize, usize)> = Vec::new();
        for &i in &leftover {
            if let Some((start, len)) = stretches.last_mut() {
                if *start + *len == i {
                    *len += 1;
                    continue;
                }
            }
            stretches.push((i, 1));
        }

        for (start, len) in stretches {
            assert!(len <= min, "free stretch at {} of {} slots was dropped", start, len);
            let before_free = start > 0 && free(start - 1) && !capped.contains(&(start - 1));
            let after_free = start + len < pattern.len() && free(start + len);
            assert!(!before_free && !after_free, "stretch at {} cut out of a longer run", start);
        }
    }

    #[test]
    fn candidates_never_overlap_and_respect_limits() {
        let policy = policy(1, 4, &[8, 9, 10, 11, 12]);
        let pattern = "111111121111111111112111111";
        let found = scan(&grid(pattern, &policy), 1, 0, &policy);

        let mut covered = BTreeSet::new();
        for c in &found {
            assert!(c.length > policy.min_run_length);
            assert!(c.length <= policy.max_run_length);
            for i in c.start_index..c.end_index() {
                assert!(covered.insert(i), "slot {} counted twice", i);
                assert_eq!(&pattern[i..=i], "1");
                assert!(!policy.ignored_indices.contains(&i));
            }
        }
    }
}

use std::ops::Range;

use crate::{Error, Result};

/// Contiguous range of ion indices whose forces one worker computes.
///
/// The ranges of all workers are disjoint and cover `0..num_ions` exactly once.
/// Every worker but the last owns `N / P` ions; the last worker absorbs the
/// remainder and always ends at the last ion. No worker is empty when there
/// are at least as many ions as workers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    rank: usize,
    size: usize,
    num_ions: usize,
    range: Range<usize>,
}
impl Domain {
    pub fn new(num_ions: usize, size: usize, rank: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::NoWorkers);
        }
        if num_ions == 0 {
            return Err(Error::EmptySystem);
        }
        if rank >= size {
            return Err(Error::InvalidRank { rank, size });
        }

        let range = if size == 1 {
            0..num_ions
        } else {
            let per_worker = num_ions / size;
            let lower = rank * per_worker;
            let upper = if rank == size - 1 {
                num_ions
            } else {
                lower + per_worker
            };
            lower..upper
        };

        Ok(Self {
            rank,
            size,
            num_ions,
            range,
        })
    }
    /// The domains of every worker, in rank order
    pub fn all(num_ions: usize, size: usize) -> Result<Vec<Self>> {
        (0..size.max(1))
            .map(|rank| Domain::new(num_ions, size, rank))
            .collect()
    }

    pub fn rank(&self) -> usize {
        self.rank
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn num_ions(&self) -> usize {
        self.num_ions
    }
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
    pub fn len(&self) -> usize {
        self.range.len()
    }
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
    pub fn lower_bound(&self) -> usize {
        self.range.start
    }
    /// Last ion index of the domain, inclusive
    pub fn upper_bound(&self) -> Option<usize> {
        if self.range.is_empty() {
            None
        } else {
            Some(self.range.end - 1)
        }
    }
    pub fn contains(&self, idx: usize) -> bool {
        self.range.contains(&idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(num_ions: usize, size: usize) {
        let domains = Domain::all(num_ions, size).unwrap();
        let mut owner = vec![0usize; num_ions];
        let mut next = 0;
        for d in &domains {
            assert_eq!(d.lower_bound(), next, "N={} P={}", num_ions, size);
            for i in d.range() {
                owner[i] += 1;
            }
            next = d.range().end;
        }
        assert_eq!(next, num_ions);
        assert!(owner.iter().all(|&n| n == 1), "N={} P={}", num_ions, size);
        assert_eq!(domains.last().unwrap().upper_bound(), Some(num_ions - 1));
        if num_ions >= size {
            assert!(domains.iter().all(|d| !d.is_empty()), "N={} P={}", num_ions, size);
        }
    }

    #[test]
    fn partitions_cover_every_ion_once() {
        for num_ions in 1..60 {
            for size in 1..9 {
                assert_covers(num_ions, size);
            }
        }
        assert_covers(1000, 7);
    }

    #[test]
    fn single_worker_owns_everything() {
        let d = Domain::new(17, 1, 0).unwrap();
        assert_eq!(d.lower_bound(), 0);
        assert_eq!(d.upper_bound(), Some(16));
    }

    #[test]
    fn last_worker_absorbs_the_remainder() {
        let bounds = |n, p| -> Vec<_> {
            Domain::all(n, p)
                .unwrap()
                .iter()
                .map(|d| (d.lower_bound(), d.upper_bound()))
                .collect()
        };
        assert_eq!(
            bounds(10, 4),
            vec![(0, Some(1)), (2, Some(3)), (4, Some(5)), (6, Some(9))]
        );
        assert_eq!(
            bounds(5, 4),
            vec![(0, Some(0)), (1, Some(1)), (2, Some(2)), (3, Some(4))]
        );
        assert_eq!(bounds(9, 6).last(), Some(&(5, Some(8))));
    }

    #[test]
    fn more_workers_than_ions() {
        let domains = Domain::all(2, 4).unwrap();
        for d in &domains[..3] {
            assert!(d.is_empty());
            assert_eq!(d.upper_bound(), None);
        }
        assert_eq!(domains[3].range(), 0..2);
    }

    #[test]
    fn invalid_partitions() {
        assert!(matches!(Domain::new(0, 2, 0), Err(Error::EmptySystem)));
        assert!(matches!(Domain::new(5, 0, 0), Err(Error::NoWorkers)));
        assert!(matches!(
            Domain::new(5, 2, 2),
            Err(Error::InvalidRank { rank: 2, size: 2 })
        ));
    }
}

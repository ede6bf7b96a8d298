//! Splitting the output rows between workers.

/// Half-open range of output rows `[start, end)` owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Cut `rows` output rows into `workers` contiguous ranges.
///
/// Every worker gets `rows / workers` rows; the last one also takes the
/// remainder. The ranges are in order, don't overlap and cover `0..rows`
/// exactly. With fewer rows than workers all but the last range are empty.
///
/// ```
/// use imatmul::threaded::partition::{partition, RowRange};
///
/// let ranges = partition(10, 4);
/// assert_eq!(ranges[0], RowRange { start: 0, end: 2 });
/// assert_eq!(ranges[3], RowRange { start: 6, end: 10 });
/// ```
///
/// # Panics
///
/// Panics if `workers` is zero.
pub fn partition(rows: usize, workers: usize) -> Vec<RowRange> {
    assert!(workers > 0, "need at least one worker");

    let chunk = rows / workers;
    (0..workers)
        .map(|w| RowRange {
            start: w * chunk,
            end: if w == workers - 1 { rows } else { (w + 1) * chunk },
        })
        .collect()
}

//! Sliding-window input history buffers.
//!
//! All three buffers satisfy the same contract: `push` evicts the oldest
//! retained sample and inserts the new one as the newest, the length never
//! changes, and element 0 is always the most recent sample.
//!
//! **Not part of the public API.**

use ndarray::{Array2, ArrayView1};

/// Contiguous delay line, newest sample first.
///
/// `push` physically shifts every element one slot to the right, so the
/// buffer can be handed to linear-algebra routines as a plain slice.
#[derive(Clone, Debug)]
pub(crate) struct DelayLine {
    buf: Vec<f64>,
}

impl DelayLine {
    pub(crate) fn new(len: usize) -> Self {
        Self { buf: vec![0.0; len] }
    }

    /// Evicts the oldest sample and inserts `sample` at index 0.
    pub(crate) fn push(&mut self, sample: f64) {
        let len = self.buf.len();
        self.buf.copy_within(0..len - 1, 1);
        self.buf[0] = sample;
    }

    pub(crate) fn as_slice(&self) -> &[f64] {
        &self.buf
    }

    /// Sum of squared samples currently in the window.
    pub(crate) fn energy(&self) -> f64 {
        self.buf.iter().map(|x| x * x).sum()
    }

    pub(crate) fn reset(&mut self) {
        self.buf.fill(0.0);
    }
}

/// Ring-buffer delay line with a rotation index: O(1) push, wraparound read.
///
/// Suitable only where no matrix recursion depends on contiguous layout;
/// readers iterate logically from newest to oldest.
#[derive(Clone, Debug)]
pub(crate) struct RingDelayLine {
    buf: Vec<f64>,
    head: usize,
}

impl RingDelayLine {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            buf: vec![0.0; len],
            head: 0,
        }
    }

    /// Evicts the oldest sample and inserts `sample` as the newest.
    pub(crate) fn push(&mut self, sample: f64) {
        self.head = if self.head == 0 {
            self.buf.len() - 1
        } else {
            self.head - 1
        };
        self.buf[self.head] = sample;
    }

    /// Iterates from the newest sample to the oldest.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &f64> {
        self.buf[self.head..].iter().chain(self.buf[..self.head].iter())
    }

    pub(crate) fn reset(&mut self) {
        self.buf.fill(0.0);
        self.head = 0;
    }
}

/// N×M input-history matrix for the affine-projection engines.
///
/// Column `j` holds the input vector as it was `j` steps ago, so each push
/// is a double shift: every column moves one slot to the right, then the
/// new first column moves one slot down, and the fresh sample lands at the
/// top-left corner. Row `i` therefore holds the last M values of tap `i`.
#[derive(Clone, Debug)]
pub(crate) struct HistoryMatrix {
    data: Array2<f64>,
}

impl HistoryMatrix {
    pub(crate) fn new(n: usize, m: usize) -> Self {
        Self {
            data: Array2::zeros((n, m)),
        }
    }

    /// Evicts the oldest delayed copy and inserts `sample` at `[0, 0]`.
    pub(crate) fn push(&mut self, sample: f64) {
        let (n, m) = self.data.dim();
        // shift columns to the right
        for j in (1..m).rev() {
            for i in 0..n {
                self.data[[i, j]] = self.data[[i, j - 1]];
            }
        }
        // shift first column downwards
        for i in (1..n).rev() {
            self.data[[i, 0]] = self.data[[i - 1, 0]];
        }
        // push at top-left corner
        self.data[[0, 0]] = sample;
    }

    /// The current input vector (delay 0), length N.
    pub(crate) fn first_column(&self) -> ArrayView1<'_, f64> {
        self.data.column(0)
    }

    /// The M most recent samples, one per delayed copy; enters the Gram
    /// matrix on push.
    pub(crate) fn first_row(&self) -> ArrayView1<'_, f64> {
        self.data.row(0)
    }

    /// The M oldest samples; leaves the Gram matrix on the next push.
    pub(crate) fn last_row(&self) -> ArrayView1<'_, f64> {
        self.data.row(self.data.nrows() - 1)
    }

    pub(crate) fn matrix(&self) -> &Array2<f64> {
        &self.data
    }

    pub(crate) fn reset(&mut self) {
        self.data.fill(0.0);
    }
}

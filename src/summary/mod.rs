//! Streaming ε-approximate quantile summaries.
//!
//! The summary is an ordered sequence of retained samples over a stream of
//! observations. Each retained sample knows the least number of stream items
//! it stands in for (`g`) and the extra uncertainty in its rank (`delta`).
//! Inserts keep the sequence sorted, periodic compression merges adjacent
//! samples whose combined uncertainty still fits inside the allowable error
//! at their position, and queries walk the sequence to the first sample
//! whose rank window certifies the requested quantile.
//!
//! Two allowable-error functions are supported, selected once at
//! construction via [`ErrorPolicy`]:
//!
//!   * a single global ε applied uniformly to every quantile, after
//!     Greenwald and Khanna, "Space-efficient online computation of quantile
//!     summaries" in SIGMOD 2001;
//!   * per-target error bounds that stay tight near the quantiles a caller
//!     cares about and loose elsewhere, after Cormode, Korn, Muthukrishnan,
//!     and Srivastava, "Effective computation of biased quantiles over data
//!     streams" in ICDE 2005.
//!
//! # Examples
//!
//! ```
//! use streaming_quantiles::Summary;
//!
//! let mut summary = Summary::uniform(100, 0.01).unwrap();
//! for i in 1..1001u32 {
//!     summary.insert(i);
//! }
//!
//! // With ε = 0.01 over 1000 items the estimate is within 20 ranks.
//! let median = summary.query(0.5).unwrap();
//! assert!(median >= 480 && median <= 520);
//! assert_eq!(summary.query(1.0), Ok(1000));
//! ```

use log::debug;

mod entry;
mod policy;

pub use self::policy::{ErrorPolicy, QuantileTarget};

use self::entry::Entry;
use crate::error::{ConfigError, EmptySummary};

/// Locates the proper position of v in a sequence of samples such that when
/// v is inserted at position i, it is less than the sample at i+1 if any,
/// and greater than or equal to the sample at i-1 if any.
fn find_insert_pos<T>(samples: &[Entry<T>], v: T) -> usize
where
    T: PartialOrd + Copy,
{
    if samples.len() <= 10 {
        return find_insert_pos_linear(samples, v);
    }

    let middle = samples.len() / 2;
    let pivot = samples[middle].v;

    if v < pivot {
        find_insert_pos(&samples[..middle], v)
    } else {
        middle + find_insert_pos(&samples[middle..], v)
    }
}

/// Locates the proper position of v by scanning the samples from start to
/// end. Equal values insert after their duplicates.
fn find_insert_pos_linear<T>(samples: &[Entry<T>], v: T) -> usize
where
    T: PartialOrd + Copy,
{
    for (i, sample) in samples.iter().enumerate() {
        if v < sample.v {
            return i;
        }
    }

    samples.len()
}

/// A streaming approximate-quantile summary with bounded memory and bounded
/// rank error.
///
/// The summary never stores the full stream. It retains an ordered subset of
/// the observations, each annotated with rank-uncertainty bookkeeping, and
/// merges neighbors away whenever the configured [`ErrorPolicy`] permits.
/// Inserts are the fast path; every `compact_size`-th insert triggers a
/// compression pass, amortizing its cost.
///
/// All operations are synchronous and single-pass. The structure is
/// single-writer: concurrent callers must funnel `insert`, `compress` and
/// `query` through one owner or one lock around the whole summary.
///
/// # Examples
///
/// ```
/// use streaming_quantiles::{QuantileTarget, Summary};
///
/// let targets = vec![
///     QuantileTarget::new(0.50, 0.05).unwrap(),
///     QuantileTarget::new(0.99, 0.01).unwrap(),
/// ];
/// let mut summary = Summary::targeted(100, targets).unwrap();
/// for i in 0..1000u32 {
///     summary.insert(i);
/// }
///
/// let p99 = summary.query(0.99).unwrap();
/// assert!(p99 >= 960);
/// ```
#[derive(Debug, Clone)]
pub struct Summary<T>
where
    T: PartialOrd + Copy,
{
    // The retained samples, ordered by value at all times. The papers
    // describe a linked list; a Vec wins on cache locality at the cost of
    // shifting on insert.
    samples: Vec<Entry<T>>,

    // Observations ever inserted, not samples currently retained.
    n: usize,

    policy: ErrorPolicy,

    // Compression runs every compact_size-th insert.
    compact_size: usize,
    inserts: usize,
}

impl<T> Summary<T>
where
    T: PartialOrd + Copy,
{
    /// Create a summary with an explicit allowable-error policy.
    ///
    /// Compression is triggered every `compact_size`-th insert, so
    /// `compact_size` bounds how far the retained set may grow between
    /// compression passes. The policy is validated here: a zero compaction
    /// size, an ε outside (0, 1), an empty target set, or a target outside
    /// (0, 1) all fail fast rather than surfacing at the first insert.
    pub fn new(compact_size: usize, policy: ErrorPolicy) -> Result<Summary<T>, ConfigError> {
        if compact_size == 0 {
            return Err(ConfigError::ZeroCompactSize);
        }
        policy.validate()?;
        Ok(Summary {
            samples: Vec::new(),
            n: 0,
            policy,
            compact_size,
            inserts: 0,
        })
    }

    /// Create a Greenwald-Khanna summary with a single global error bound.
    ///
    /// For any quantile query the estimate's rank is within `2 * epsilon *
    /// n` of the true rank after `n` inserts.
    pub fn uniform(compact_size: usize, epsilon: f64) -> Result<Summary<T>, ConfigError> {
        Summary::new(compact_size, ErrorPolicy::UniformEpsilon(epsilon))
    }

    /// Create a CKMS summary with per-target error bounds.
    ///
    /// Quantiles near a configured target are answered within that target's
    /// error; elsewhere the summary merges aggressively and stays small.
    pub fn targeted(
        compact_size: usize,
        targets: Vec<QuantileTarget>,
    ) -> Result<Summary<T>, ConfigError> {
        Summary::new(compact_size, ErrorPolicy::TargetedQuantiles(targets))
    }

    /// Insert an observation from the stream.
    ///
    /// The sample lands in sorted position with `g = 1`. A new minimum or
    /// maximum has an exactly known rank and gets `delta = 0`; an interior
    /// sample gets the worst-case slack the policy allows at its position,
    /// evaluated against the pre-insertion state. Insertion is biased toward
    /// fast writes; storage grows between compression passes but remains
    /// bounded by the compaction period.
    pub fn insert(&mut self, v: T) {
        let idx = find_insert_pos(&self.samples, v);

        let delta = if idx == 0 || idx == self.samples.len() {
            0
        } else {
            let allowed = self.policy.allowable_error(idx, self.samples.len(), self.n);
            (allowed.floor() as usize).saturating_sub(1)
        };

        self.samples.insert(idx, Entry { v, g: 1, delta });
        self.n += 1;

        self.inserts = (self.inserts + 1) % self.compact_size;
        if self.inserts == 0 {
            self.compress();
        }
    }

    /// Merge away retained samples the error guarantee no longer needs.
    ///
    /// Scans adjacent pairs left to right and folds a sample into its right
    /// neighbor whenever their combined uncertainty fits the allowable error
    /// at that position. After a merge the scan steps back one pair, so the
    /// shifted sequence is re-examined and the pass reaches a fixed point:
    /// running `compress` twice in a row does no additional work. The first
    /// and last samples are never merged away, which keeps the stream
    /// minimum and maximum exact.
    ///
    /// This runs automatically on the compaction period; calling it by hand
    /// is harmless and sometimes useful before a burst of queries.
    pub fn compress(&mut self) {
        if self.samples.len() < 3 {
            return;
        }

        let mut removed = 0;
        let mut i = 1;
        while i + 1 < self.samples.len() {
            let cur_g = self.samples[i].g;
            let combined = cur_g + self.samples[i + 1].g + self.samples[i + 1].delta;
            let allowed = self.policy.allowable_error(i, self.samples.len(), self.n);

            if (combined as f64) <= allowed {
                self.samples[i + 1].g += cur_g;
                self.samples.remove(i);
                removed += 1;
                // The merged sample shifted into position i; its left
                // neighbor's pair has changed, so step back and re-examine.
                if i > 1 {
                    i -= 1;
                }
            } else {
                i += 1;
            }
        }

        if removed > 0 {
            debug!(
                "compress merged {} samples, {} retained of {} seen",
                removed,
                self.samples.len(),
                self.n
            );
        }
    }

    /// Query for an ε-approximate quantile, `0.0 <= q <= 1.0`.
    ///
    /// Walks the retained samples to the first one whose rank window can no
    /// longer contain the desired rank within the allowable error and
    /// returns its predecessor, the best certified estimate. Querying 1.0
    /// always returns the exact maximum.
    ///
    /// Fails with [`EmptySummary`] when nothing has been inserted; an empty
    /// summary has no value to report and no honest sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use streaming_quantiles::{EmptySummary, Summary};
    ///
    /// let mut summary = Summary::uniform(10, 0.1).unwrap();
    /// assert_eq!(summary.query(0.5), Err(EmptySummary));
    ///
    /// summary.insert(42u32);
    /// assert_eq!(summary.query(0.5), Ok(42));
    /// ```
    pub fn query(&self, q: f64) -> Result<T, EmptySummary> {
        if self.samples.is_empty() {
            return Err(EmptySummary);
        }

        let desired = (q * self.n as f64).floor() as usize;
        let mut rank_min = 0;

        for i in 1..self.samples.len() {
            let prev = &self.samples[i - 1];
            let cur = &self.samples[i];

            rank_min += prev.g;

            let allowed = self.policy.allowable_error(i, self.samples.len(), self.n);
            if ((rank_min + cur.g + cur.delta) as f64) > (desired as f64) + allowed {
                return Ok(prev.v);
            }
        }

        // Nothing disqualified the walk: the caller wants the maximum.
        Ok(self.samples[self.samples.len() - 1].v)
    }

    /// Total observations seen over the lifetime of the summary, not the
    /// number of samples currently retained.
    pub fn count(&self) -> usize {
        self.n
    }

    /// Samples currently retained. Fluctuates as compression happens.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True until the first insert.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

use crate::error::ConfigError;

/// A caller-specified quantile of interest with its tolerated rank error.
///
/// A target `(q, e)` asks that queries for the quantile `q` over a stream of
/// `n` items land within `e * n` ranks of the true answer. The targeted
/// policy keeps the summary dense near its targets and sparse elsewhere,
/// which is what makes tight bounds at extreme percentiles affordable.
///
/// # Examples
/// ```
/// use streaming_quantiles::QuantileTarget;
///
/// let p99 = QuantileTarget::new(0.99, 0.001).unwrap();
/// assert_eq!(p99.quantile(), 0.99);
///
/// assert!(QuantileTarget::new(1.2, 0.001).is_err());
/// assert!(QuantileTarget::new(0.99, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileTarget {
    quantile: f64,
    error: f64,
    // 2e/(1-q) and 2e/q, fixed per target so the allowable-error scan only
    // multiplies.
    coeff_below: f64,
    coeff_above: f64,
}

impl QuantileTarget {
    /// Create a target for `quantile` tolerating `error` relative rank error.
    ///
    /// Both arguments must lie strictly between 0 and 1.
    pub fn new(quantile: f64, error: f64) -> Result<QuantileTarget, ConfigError> {
        if !(quantile > 0.0 && quantile < 1.0) {
            return Err(ConfigError::QuantileOutOfRange(quantile));
        }
        if !(error > 0.0 && error < 1.0) {
            return Err(ConfigError::ErrorOutOfRange(error));
        }
        Ok(QuantileTarget {
            quantile,
            error,
            coeff_below: (2.0 * error) / (1.0 - quantile),
            coeff_above: (2.0 * error) / quantile,
        })
    }

    /// The rank fraction this target covers.
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    /// The tolerated relative rank error at this target.
    pub fn error(&self) -> f64 {
        self.error
    }
}

/// The allowable-error strategy, fixed at construction.
///
/// This is the f(r, n) function of the CKMS paper: how wide the rank
/// interval covered by the sample at position `r` may grow before the error
/// guarantee is at risk. It is the single point where the Greenwald-Khanna
/// and CKMS algorithms diverge, so it is an explicit tagged choice rather
/// than something inferred from which fields happen to be populated.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPolicy {
    /// Greenwald-Khanna: one global ε for every quantile. The allowable
    /// error is `floor(2εn)` regardless of position.
    UniformEpsilon(f64),
    /// CKMS targeted quantiles: the allowable error at a position is the
    /// tightest bound any configured target imposes there. Must be
    /// non-empty.
    TargetedQuantiles(Vec<QuantileTarget>),
}

impl ErrorPolicy {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ErrorPolicy::UniformEpsilon(epsilon) => {
                if !(*epsilon > 0.0 && *epsilon < 1.0) {
                    return Err(ConfigError::EpsilonOutOfRange(*epsilon));
                }
            }
            ErrorPolicy::TargetedQuantiles(targets) => {
                if targets.is_empty() {
                    return Err(ConfigError::EmptyTargets);
                }
            }
        }
        Ok(())
    }

    /// Maximum `g + delta` permissible for a sample at position `rank` of a
    /// summary currently retaining `size` samples out of `n` observations.
    ///
    /// The uniform variant is clamped to at least 1 so that a freshly
    /// inserted sample (`g = 1`, `delta = 0`) never violates the bound while
    /// `2εn` is still below one.
    pub(crate) fn allowable_error(&self, rank: usize, size: usize, n: usize) -> f64 {
        match self {
            ErrorPolicy::UniformEpsilon(epsilon) => {
                let bound = (2.0 * epsilon * (n as f64)).floor();
                if bound < 1.0 {
                    1.0
                } else {
                    bound
                }
            }
            ErrorPolicy::TargetedQuantiles(targets) => {
                let size = size as f64;
                let rank = rank as f64;
                let mut min_error = size + 1.0;
                for target in targets {
                    let candidate = if rank <= target.quantile * size {
                        target.coeff_below * (size - rank)
                    } else {
                        target.coeff_above * rank
                    };
                    if candidate < min_error {
                        min_error = candidate;
                    }
                }
                min_error
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniform_is_rank_independent() {
        let policy = ErrorPolicy::UniformEpsilon(0.01);

        let at_head = policy.allowable_error(0, 500, 10_000);
        let at_mid = policy.allowable_error(250, 500, 10_000);
        let at_tail = policy.allowable_error(499, 500, 10_000);

        assert_eq!(at_head, 200.0);
        assert_eq!(at_mid, at_head);
        assert_eq!(at_tail, at_head);
    }

    #[test]
    fn uniform_clamps_to_one_for_small_streams() {
        let policy = ErrorPolicy::UniformEpsilon(0.001);
        assert_eq!(policy.allowable_error(0, 3, 3), 1.0);
    }

    #[test]
    fn targeted_tightens_near_the_target() {
        let policy = ErrorPolicy::TargetedQuantiles(vec![
            QuantileTarget::new(0.99, 0.001).unwrap(),
        ]);

        // Near the 99th percentile of 1000 retained samples the bound is
        // roughly 2 * 0.001 * 990 / 0.99 = 2; far below it the bound is
        // governed by the below-target branch and is much looser.
        let near = policy.allowable_error(990, 1000, 1000);
        let far = policy.allowable_error(100, 1000, 1000);

        assert!(near < 3.0, "near-target bound too loose: {}", near);
        assert!(far > 1.0 && far > near, "far bound {} vs near {}", far, near);
    }

    #[test]
    fn targeted_takes_the_minimum_over_targets() {
        let loose = QuantileTarget::new(0.50, 0.05).unwrap();
        let tight = QuantileTarget::new(0.50, 0.001).unwrap();

        let only_loose = ErrorPolicy::TargetedQuantiles(vec![loose]);
        let both = ErrorPolicy::TargetedQuantiles(vec![loose, tight]);

        for rank in [10, 250, 490] {
            assert!(both.allowable_error(rank, 500, 500) <= only_loose.allowable_error(rank, 500, 500));
        }
    }

    #[test]
    fn validation_rejects_bad_configurations() {
        assert_eq!(
            ErrorPolicy::UniformEpsilon(0.0).validate(),
            Err(crate::error::ConfigError::EpsilonOutOfRange(0.0))
        );
        assert_eq!(
            ErrorPolicy::UniformEpsilon(1.0).validate(),
            Err(crate::error::ConfigError::EpsilonOutOfRange(1.0))
        );
        assert_eq!(
            ErrorPolicy::TargetedQuantiles(vec![]).validate(),
            Err(crate::error::ConfigError::EmptyTargets)
        );
        assert!(ErrorPolicy::UniformEpsilon(0.001).validate().is_ok());
    }
}

//! This crate provides approximate quantiles over data streams in a moderate
//! amount of memory.
//!
//! Order statistics is a rough business. Exact solutions are expensive in
//! terms of memory and computation. Approximate solutions trade a configurable
//! rank error for sublinear space. This crate implements the summary structure
//! shared by the Greenwald-Khanna and Cormode-Korn-Muthukrishnan-Srivastava
//! algorithms: an ordered sequence of retained samples, each carrying bounds
//! on the uncertainty of its rank, periodically compressed down to a small
//! set of samples that still honors the configured error guarantee.
//!
//! The two algorithms differ only in the allowable-error function applied to
//! a sample's position. See [`summary::ErrorPolicy`].
#![deny(
    missing_docs,
    missing_copy_implementations,
    missing_debug_implementations,
    unused_import_braces
)]

pub mod error;
pub mod summary;

pub use crate::error::{ConfigError, EmptySummary};
pub use crate::summary::{ErrorPolicy, QuantileTarget, Summary};

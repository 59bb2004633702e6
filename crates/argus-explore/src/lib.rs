//! Test-case generation over decorated type trees.
//!
//! Exhaustive generation enumerates every value a node's exhaustive domains
//! allow. Random generation draws one value per call from the random
//! domains, using a caller-supplied RNG; suites seed one stream per
//! parameter.

pub mod combinatorics;
pub mod generate;
pub mod rng;
pub mod suite;

pub use generate::{exhaustive_values, random_value};
pub use rng::{param_rng, param_rngs};
pub use suite::{exhaustive_suite, random_suite, RandomCases};

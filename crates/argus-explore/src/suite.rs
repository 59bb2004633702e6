//! Whole-signature test suites.
//!
//! A suite holds one `TestCase` per call of the function under test, one
//! argument per top-level parameter node.

use argus_ir::{Node, TestCase, Value};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::combinatorics::cartesian_product;
use crate::generate::{exhaustive_values, random_value};
use crate::rng::param_rngs;

/// Cartesian product of every parameter's exhaustive set, in parameter
/// order. No parameters gives a single empty case.
pub fn exhaustive_suite(params: &[Node]) -> Vec<TestCase> {
    let per_param: Vec<Vec<Value>> = params.par_iter().map(exhaustive_values).collect();
    let suite: Vec<TestCase> = cartesian_product(&per_param)
        .into_iter()
        .map(TestCase::new)
        .collect();
    debug!(
        params = params.len(),
        cases = suite.len(),
        "built exhaustive suite"
    );
    suite
}

/// `count` independent random cases under `seed`.
pub fn random_suite(params: &[Node], count: usize, seed: u64) -> Vec<TestCase> {
    let suite: Vec<TestCase> = RandomCases::new(params, seed).take(count).collect();
    debug!(params = params.len(), cases = suite.len(), seed, "built random suite");
    suite
}

/// Unbounded stream of random cases. Parameter `i` always draws from its
/// own stream `i`, so column `i` of the output is the same for any
/// signature that shares the first `i + 1` parameters.
pub struct RandomCases<'a> {
    params: &'a [Node],
    rngs: Vec<ChaCha8Rng>,
}

impl<'a> RandomCases<'a> {
    pub fn new(params: &'a [Node], seed: u64) -> Self {
        Self {
            params,
            rngs: param_rngs(seed, params.len()),
        }
    }
}

impl Iterator for RandomCases<'_> {
    type Item = TestCase;

    fn next(&mut self) -> Option<TestCase> {
        let args = self
            .params
            .iter()
            .zip(&mut self.rngs)
            .map(|(param, rng)| random_value(param, rng))
            .collect();
        Some(TestCase::new(args))
    }
}

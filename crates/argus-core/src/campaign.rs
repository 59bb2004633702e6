use std::fs;
use std::path::{Path, PathBuf};

use argus_compiler::{compile_json, CompileError, CompiledSpec};
use argus_explore::{exhaustive_suite, random_suite, RandomCases};
use argus_ir::{Node, TestCase};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("Failed to read spec file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Compilation error: {0}")]
    Compile(#[from] CompileError),
}

/// A compiled argument spec, ready to produce suites for one function.
#[derive(Debug, Clone)]
pub struct Campaign {
    compiled: CompiledSpec,
}

impl Campaign {
    pub fn from_json(json: &str) -> Result<Self, CampaignError> {
        let compiled = compile_json(json)?;
        info!(
            fname = %compiled.fname,
            params = compiled.params.len(),
            num_random = compiled.num_random,
            estimated_cases = estimate_exhaustive_cases(&compiled.params),
            "campaign ready"
        );
        Ok(Self { compiled })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CampaignError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CampaignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn fname(&self) -> &str {
        &self.compiled.fname
    }

    pub fn params(&self) -> &[Node] {
        &self.compiled.params
    }

    pub fn num_random(&self) -> usize {
        self.compiled.num_random
    }

    pub fn exhaustive_suite(&self) -> Vec<TestCase> {
        exhaustive_suite(&self.compiled.params)
    }

    /// `num random` cases drawn under `seed`.
    pub fn random_suite(&self, seed: u64) -> Vec<TestCase> {
        random_suite(&self.compiled.params, self.compiled.num_random, seed)
    }

    /// Unbounded random cases, for callers that stop on their own budget.
    /// The first `num random` of them are exactly `random_suite(seed)`.
    pub fn random_cases(&self, seed: u64) -> RandomCases<'_> {
        RandomCases::new(&self.compiled.params, seed)
    }

    /// Exhaustive suite size computed from the domains alone, saturating.
    pub fn estimated_exhaustive_cases(&self) -> u128 {
        estimate_exhaustive_cases(&self.compiled.params)
    }
}

fn estimate_exhaustive_cases(params: &[Node]) -> u128 {
    params
        .iter()
        .fold(1u128, |acc, node| acc.saturating_mul(exhaustive_count(node)))
}

/// Number of values exhaustive generation yields for `node`, given that
/// domain literals are already distinct.
fn exhaustive_count(node: &Node) -> u128 {
    match node {
        Node::Int(d) => d.exhaustive().len() as u128,
        Node::Bool(d) => d.exhaustive().len() as u128,
        Node::Float(d) => d.exhaustive().len() as u128,
        Node::Str { alphabet, lengths } => sum_over(lengths.exhaustive(), |len| {
            power(alphabet.len() as u128, len)
        }),
        Node::List { elem, sizes } | Node::Tuple { elem, sizes } => {
            let c = exhaustive_count(elem);
            sum_over(sizes.exhaustive(), |n| power(c, n))
        }
        Node::Set { elem, sizes } => {
            let c = exhaustive_count(elem);
            sum_over(sizes.exhaustive(), |k| binomial(c, k as u128))
        }
        Node::Dict { key, value, sizes } => {
            let keys = exhaustive_count(key);
            let values = exhaustive_count(value);
            sum_over(sizes.exhaustive(), |n| {
                binomial(keys, n as u128).saturating_mul(power(values, n))
            })
        }
    }
}

fn sum_over(sizes: &[usize], f: impl Fn(usize) -> u128) -> u128 {
    sizes.iter().fold(0u128, |acc, &n| acc.saturating_add(f(n)))
}

fn power(base: u128, exp: usize) -> u128 {
    (0..exp).fold(1u128, |acc, _| acc.saturating_mul(base))
}

fn binomial(n: u128, k: u128) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u128, |acc, i| acc.saturating_mul(n - i) / (i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(3, 0), 1);
        assert_eq!(binomial(2, 3), 0);
        assert_eq!(binomial(10, 10), 1);
    }

    #[test]
    fn test_power_saturates() {
        assert_eq!(power(3, 0), 1);
        assert_eq!(power(2, 200), u128::MAX);
    }
}

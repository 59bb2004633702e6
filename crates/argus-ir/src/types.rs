use serde::{Deserialize, Serialize};

/// The five keys every input spec must carry, in canonical order.
pub const SPEC_KEYS: [&str; 5] = [
    "fname",
    "types",
    "exhaustive domain",
    "random domain",
    "num random",
];

/// Input spec for one function under test.
///
/// `types`, `exhaustive_domain` and `random_domain` are parallel arrays: the
/// i-th entry of each describes the i-th parameter. The descriptor strings
/// are left as text here and compiled by `argus-compiler`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgSpec {
    pub fname: String,
    pub types: Vec<String>,
    #[serde(rename = "exhaustive domain")]
    pub exhaustive_domain: Vec<String>,
    #[serde(rename = "random domain")]
    pub random_domain: Vec<String>,
    /// Kept as a raw JSON number so that fractional and negative counts can be
    /// reported as schema violations instead of decode failures.
    #[serde(rename = "num random")]
    pub num_random: serde_json::Number,
}

impl ArgSpec {
    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.types.len()
    }
}

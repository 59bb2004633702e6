//! Value generation for a single decorated node.
//!
//! Container domains hold sizes, not values. Element values come from the
//! child node, recursively: exhaustive generation from the child's exhaustive
//! set, random generation from fresh child draws.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use argus_ir::{Domains, Node, Value};
use rand::Rng;
use tracing::warn;

use crate::combinatorics::{cartesian_power, combinations};

// ── Exhaustive ───────────────────────────────────────────────────────

/// Every value the node's exhaustive domains allow, deduplicated with the
/// first occurrence kept.
pub fn exhaustive_values(node: &Node) -> Vec<Value> {
    let values: Vec<Value> = match node {
        Node::Int(d) => d.exhaustive().iter().map(|&i| Value::Int(i)).collect(),
        Node::Bool(d) => d.exhaustive().iter().map(|&b| Value::Bool(b)).collect(),
        Node::Float(d) => d.exhaustive().iter().map(|&x| Value::float(x)).collect(),
        Node::Str { alphabet, lengths } => {
            let chars: Vec<char> = alphabet.iter().copied().collect();
            lengths
                .exhaustive()
                .iter()
                .flat_map(|&len| cartesian_power(&chars, len))
                .map(|cs| Value::Str(cs.into_iter().collect()))
                .collect()
        }
        Node::List { elem, sizes } | Node::Tuple { elem, sizes } => {
            let wrap: fn(Vec<Value>) -> Value = match node {
                Node::List { .. } => Value::List,
                _ => Value::Tuple,
            };
            let children = exhaustive_values(elem);
            sizes
                .exhaustive()
                .iter()
                .flat_map(|&n| cartesian_power(&children, n))
                .map(wrap)
                .collect()
        }
        Node::Set { elem, sizes } => {
            let children = exhaustive_values(elem);
            sizes
                .exhaustive()
                .iter()
                .flat_map(|&k| combinations(&children, k))
                .map(|items| Value::Set(items.into_iter().collect()))
                .collect()
        }
        Node::Dict { key, value, sizes } => {
            let keys = exhaustive_values(key);
            let vals = exhaustive_values(value);
            let mut out = Vec::new();
            for &n in sizes.exhaustive() {
                for chosen in combinations(&keys, n) {
                    for paired in cartesian_power(&vals, n) {
                        let entries: BTreeMap<Value, Value> =
                            chosen.iter().cloned().zip(paired).collect();
                        out.push(Value::Dict(entries));
                    }
                }
            }
            out
        }
    };
    dedup(values)
}

fn dedup(values: Vec<Value>) -> Vec<Value> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

// ── Random ───────────────────────────────────────────────────────────

fn draw<T: Copy, R: Rng + ?Sized>(domain: &Domains<T>, rng: &mut R) -> T {
    let random = domain.random();
    random[rng.gen_range(0..random.len())]
}

/// One value drawn from the node's random domains. Composite nodes draw a
/// size first, then fresh independent child values per element.
pub fn random_value<R: Rng + ?Sized>(node: &Node, rng: &mut R) -> Value {
    match node {
        Node::Int(d) => Value::Int(draw(d, rng)),
        Node::Bool(d) => Value::Bool(draw(d, rng)),
        Node::Float(d) => Value::float(draw(d, rng)),
        Node::Str { alphabet, lengths } => {
            let len = draw(lengths, rng);
            let chars: Vec<char> = alphabet.iter().copied().collect();
            if chars.is_empty() {
                if len > 0 {
                    warn!(len, "empty alphabet, drawing the empty string");
                }
                return Value::str("");
            }
            Value::Str(
                (0..len)
                    .map(|_| chars[rng.gen_range(0..chars.len())])
                    .collect(),
            )
        }
        Node::List { elem, sizes } => {
            let n = draw(sizes, rng);
            Value::List((0..n).map(|_| random_value(elem, rng)).collect())
        }
        Node::Tuple { elem, sizes } => {
            let n = draw(sizes, rng);
            Value::Tuple((0..n).map(|_| random_value(elem, rng)).collect())
        }
        Node::Set { elem, sizes } => {
            let n = draw(sizes, rng);
            let items: BTreeSet<Value> = (0..n).map(|_| random_value(elem, rng)).collect();
            Value::Set(items)
        }
        Node::Dict { key, value, sizes } => {
            let n = draw(sizes, rng);
            let entries: BTreeMap<Value, Value> = (0..n)
                .map(|_| (random_value(key, rng), random_value(value, rng)))
                .collect();
            Value::Dict(entries)
        }
    }
}

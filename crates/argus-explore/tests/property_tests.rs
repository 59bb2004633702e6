use std::collections::BTreeSet;
use std::fmt::Display;

use argus_compiler::compile_param;
use argus_explore::{exhaustive_suite, exhaustive_values, param_rng, random_suite, random_value};
use argus_ir::Value;
use proptest::prelude::*;

const EXHAUSTIVE: usize = 0;
const RANDOM: usize = 1;

const FLOATS: [f64; 4] = [0.5, -1.25, 2.0, 1e-5];

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

fn list_text<T: Display>(values: &[T]) -> String {
    let parts: Vec<String> = values.iter().map(T::to_string).collect();
    format!("[{}]", parts.join(", "))
}

// ── Generated parameters ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Container {
    List,
    Tuple,
    Set,
}

impl Container {
    fn name(self) -> &'static str {
        match self {
            Container::List => "list",
            Container::Tuple => "tuple",
            Container::Set => "set",
        }
    }
}

/// What a parameter's domains allow, indexed by role.
#[derive(Debug, Clone)]
enum Shape {
    Int([Vec<i64>; 2]),
    Bool([Vec<bool>; 2]),
    Float([Vec<f64>; 2]),
    Str(Vec<char>, [Vec<usize>; 2]),
    Container(Container, Box<Shape>, [Vec<usize>; 2]),
    Dict(Box<Shape>, Box<Shape>, [Vec<usize>; 2]),
}

/// A type descriptor, its two domain descriptors, and the values they allow.
#[derive(Debug, Clone)]
struct Param {
    ty: String,
    domains: [String; 2],
    shape: Shape,
}

/// Exhaustive sizes stay within {0, 1} so nested suites remain small.
fn exhaustive_sizes() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::btree_set(0usize..2, 1..3).prop_map(|s| s.into_iter().collect())
}

/// Random sizes as a `lo~hi` range.
fn random_sizes() -> impl Strategy<Value = (Vec<usize>, String)> {
    (0usize..3, 0usize..3).prop_map(|(lo, span)| {
        let hi = lo + span;
        ((lo..=hi).collect(), format!("{lo}~{hi}"))
    })
}

fn picks<T: Copy + std::fmt::Debug>(pool: &'static [T]) -> impl Strategy<Value = Vec<T>> {
    prop::collection::btree_set(0..pool.len(), 1..3)
        .prop_map(move |idx| idx.into_iter().map(|i| pool[i]).collect())
}

fn leaf() -> impl Strategy<Value = Param> {
    prop_oneof![
        (prop::collection::btree_set(-5i64..5, 1..3), -5i64..5, 0i64..4).prop_map(
            |(exhaustive, lo, span)| {
                let exhaustive: Vec<i64> = exhaustive.into_iter().collect();
                let hi = lo + span;
                Param {
                    ty: "int".into(),
                    domains: [list_text(&exhaustive), format!("{lo}~{hi}")],
                    shape: Shape::Int([exhaustive, (lo..=hi).collect()]),
                }
            }
        ),
        (picks(&[0u8, 1]), picks(&[0u8, 1])).prop_map(|(exhaustive, random)| {
            let bools = |bits: &[u8]| bits.iter().map(|&b| b == 1).collect::<Vec<_>>();
            Param {
                ty: "bool".into(),
                domains: [list_text(&exhaustive), list_text(&random)],
                shape: Shape::Bool([bools(&exhaustive), bools(&random)]),
            }
        }),
        (picks(&FLOATS), picks(&FLOATS)).prop_map(|(exhaustive, random)| Param {
            ty: "float".into(),
            domains: [list_text(&exhaustive), list_text(&random)],
            shape: Shape::Float([exhaustive, random]),
        }),
        (picks(&['a', 'b', 'c']), prop::collection::btree_set(0usize..3, 1..3), random_sizes())
            .prop_map(|(alphabet, lengths, (random, random_text))| {
                let lengths: Vec<usize> = lengths.into_iter().collect();
                Param {
                    ty: format!("str({})", alphabet.iter().collect::<String>()),
                    domains: [list_text(&lengths), random_text],
                    shape: Shape::Str(alphabet, [lengths, random]),
                }
            }),
    ]
}

fn param() -> impl Strategy<Value = Param> {
    leaf().prop_recursive(2, 8, 2, |inner| {
        let container = prop_oneof![
            Just(Container::List),
            Just(Container::Tuple),
            Just(Container::Set)
        ];
        prop_oneof![
            (container, inner.clone(), exhaustive_sizes(), random_sizes()).prop_map(
                |(container, elem, sizes, (random, random_text))| Param {
                    ty: format!("{}({})", container.name(), elem.ty),
                    domains: [
                        format!("{}({})", list_text(&sizes), elem.domains[EXHAUSTIVE]),
                        format!("{random_text}({})", elem.domains[RANDOM]),
                    ],
                    shape: Shape::Container(container, Box::new(elem.shape), [sizes, random]),
                }
            ),
            (inner.clone(), inner, exhaustive_sizes(), random_sizes()).prop_map(
                |(key, value, sizes, (random, random_text))| Param {
                    ty: format!("dict({}:{})", key.ty, value.ty),
                    domains: [
                        format!(
                            "{}({}:{})",
                            list_text(&sizes),
                            key.domains[EXHAUSTIVE],
                            value.domains[EXHAUSTIVE]
                        ),
                        format!(
                            "{random_text}({}:{})",
                            key.domains[RANDOM], value.domains[RANDOM]
                        ),
                    ],
                    shape: Shape::Dict(Box::new(key.shape), Box::new(value.shape), [sizes, random]),
                }
            ),
        ]
    })
}

/// Sets and dicts drawn at random may shrink when elements or keys
/// collide, but a positive size never yields an empty one.
fn collection_size_ok(allowed: &[usize], len: usize, role: usize) -> bool {
    if role == EXHAUSTIVE {
        allowed.contains(&len)
    } else {
        allowed.iter().any(|&n| len <= n && (len > 0 || n == 0))
    }
}

fn conforms(shape: &Shape, value: &Value, role: usize) -> bool {
    match (shape, value) {
        (Shape::Int(d), Value::Int(i)) => d[role].contains(i),
        (Shape::Bool(d), Value::Bool(b)) => d[role].contains(b),
        (Shape::Float(d), Value::Float(x)) => d[role].iter().any(|v| v.to_bits() == x.0.to_bits()),
        (Shape::Str(alphabet, lengths), Value::Str(s)) => {
            lengths[role].contains(&s.chars().count()) && s.chars().all(|c| alphabet.contains(&c))
        }
        (Shape::Container(Container::List, elem, sizes), Value::List(items))
        | (Shape::Container(Container::Tuple, elem, sizes), Value::Tuple(items)) => {
            sizes[role].contains(&items.len()) && items.iter().all(|v| conforms(elem, v, role))
        }
        (Shape::Container(Container::Set, elem, sizes), Value::Set(items)) => {
            collection_size_ok(&sizes[role], items.len(), role)
                && items.iter().all(|v| conforms(elem, v, role))
        }
        (Shape::Dict(key, val, sizes), Value::Dict(entries)) => {
            collection_size_ok(&sizes[role], entries.len(), role)
                && entries
                    .iter()
                    .all(|(k, v)| conforms(key, k, role) && conforms(val, v, role))
        }
        _ => false,
    }
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_generated_values_conform_to_declared_domains(p in param(), seed in any::<u64>()) {
        let node = compile_param(&p.ty, &p.domains[EXHAUSTIVE], &p.domains[RANDOM])
            .map_err(|e| TestCaseError::fail(format!("{} {:?} rejected: {e}", p.ty, p.domains)))?;

        let values = exhaustive_values(&node);
        let distinct: BTreeSet<&Value> = values.iter().collect();
        prop_assert_eq!(distinct.len(), values.len());
        for value in &values {
            prop_assert!(conforms(&p.shape, value, EXHAUSTIVE), "{} outside {:?}", value, p);
        }

        let mut rng = param_rng(seed, 0);
        for _ in 0..10 {
            let value = random_value(&node, &mut rng);
            prop_assert!(conforms(&p.shape, &value, RANDOM), "{} outside {:?}", value, p);
        }
    }

    #[test]
    fn prop_list_count_is_one_plus_square(children in prop::collection::btree_set(-20i64..20, 1..6)) {
        let children: Vec<i64> = children.into_iter().collect();
        let exhaustive = format!("[0, 2]({})", list_text(&children));
        let node = compile_param("list(int)", &exhaustive, "[0]([0])").unwrap();
        let c = children.len();
        prop_assert_eq!(exhaustive_values(&node).len(), 1 + c * c);
    }

    #[test]
    fn prop_set_count_is_binomial(
        children in prop::collection::btree_set(-20i64..20, 1..7),
        k in 0usize..8,
    ) {
        let children: Vec<i64> = children.into_iter().collect();
        let exhaustive = format!("[{k}]({})", list_text(&children));
        let node = compile_param("set(int)", &exhaustive, "[0]([0])").unwrap();
        let values = exhaustive_values(&node);
        prop_assert_eq!(values.len(), binomial(children.len(), k));
        prop_assert!(values.iter().all(|v| v.len() == Some(k)));
    }

    #[test]
    fn prop_exhaustive_suite_size_is_product(a in 1i64..5, b in 1i64..5) {
        let first = compile_param("int", &format!("1~{a}"), "[0]").unwrap();
        let second = compile_param("str(xyz)", &format!("0~{b}"), "[0]").unwrap();
        let expected = a as usize * (0..=b as u32).map(|l| 3usize.pow(l)).sum::<usize>();
        prop_assert_eq!(exhaustive_suite(&[first, second]).len(), expected);
    }

    #[test]
    fn prop_random_suite_has_requested_count(n in 0usize..30, seed in any::<u64>()) {
        let node = compile_param("tuple(bool)", "[1]([1])", "0~2([0, 1])").unwrap();
        let suite = random_suite(std::slice::from_ref(&node), n, seed);
        prop_assert_eq!(suite.len(), n);
        prop_assert!(suite.iter().all(|case| case.args.len() == 1));
    }
}

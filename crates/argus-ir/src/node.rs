//! Node tree for parameter types.
//!
//! A tree moves through three stages:
//!
//! - **Unbuilt**: descriptor text, not yet parsed.
//! - **Typed**: a [`TypeNode`] produced by the type grammar. Every node owns
//!   two write-once domain slots that the domain grammar fills, one per
//!   [`Role`].
//! - **Decorated**: a [`Node`] produced by [`TypeNode::seal`] once every slot
//!   in the tree is filled. Only decorated nodes can generate values.
//!
//! Scalars read domain entries as literal candidate values. `Str` reads them
//! as string lengths and containers read them as element counts.

use std::collections::BTreeSet;
use std::fmt;

// ── Roles and slots ──────────────────────────────────────────────────

/// Which of the two independent domains a descriptor decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Exhaustive,
    Random,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Exhaustive => write!(f, "exhaustive"),
            Role::Random => write!(f, "random"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("{role} domain already assigned")]
    AlreadyAssigned { role: Role },

    #[error("{role} domain must not be empty")]
    Empty { role: Role },
}

/// Two write-once domain slots of a typed node.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSlots<T> {
    exhaustive: Option<Vec<T>>,
    random: Option<Vec<T>>,
}

impl<T> DomainSlots<T> {
    pub fn new() -> Self {
        Self {
            exhaustive: None,
            random: None,
        }
    }

    pub fn get(&self, role: Role) -> Option<&[T]> {
        match role {
            Role::Exhaustive => self.exhaustive.as_deref(),
            Role::Random => self.random.as_deref(),
        }
    }

    /// Fill the slot for `role`. A slot accepts exactly one assignment.
    pub fn assign(&mut self, role: Role, values: Vec<T>) -> Result<(), SlotError> {
        if values.is_empty() {
            return Err(SlotError::Empty { role });
        }
        let slot = match role {
            Role::Exhaustive => &mut self.exhaustive,
            Role::Random => &mut self.random,
        };
        if slot.is_some() {
            return Err(SlotError::AlreadyAssigned { role });
        }
        *slot = Some(values);
        Ok(())
    }

    fn seal(self, kind: NodeKind) -> Result<Domains<T>, SealError> {
        match (self.exhaustive, self.random) {
            (Some(exhaustive), Some(random)) => Ok(Domains { exhaustive, random }),
            (None, _) => Err(SealError {
                kind,
                role: Role::Exhaustive,
            }),
            (_, None) => Err(SealError {
                kind,
                role: Role::Random,
            }),
        }
    }
}

impl<T> Default for DomainSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Both domains of a decorated node. Neither domain is ever empty, so a
/// random draw can always index into `random`.
#[derive(Debug, Clone, PartialEq)]
pub struct Domains<T> {
    exhaustive: Vec<T>,
    random: Vec<T>,
}

impl<T> Domains<T> {
    pub fn new(exhaustive: Vec<T>, random: Vec<T>) -> Result<Self, SlotError> {
        if exhaustive.is_empty() {
            return Err(SlotError::Empty {
                role: Role::Exhaustive,
            });
        }
        if random.is_empty() {
            return Err(SlotError::Empty { role: Role::Random });
        }
        Ok(Self { exhaustive, random })
    }

    pub fn exhaustive(&self) -> &[T] {
        &self.exhaustive
    }

    pub fn random(&self) -> &[T] {
        &self.random
    }
}

// ── Node kinds ───────────────────────────────────────────────────────

/// Variant tag shared by both stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Int,
    Bool,
    Float,
    Str,
    List,
    Tuple,
    Set,
    Dict,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Int => "int",
            NodeKind::Bool => "bool",
            NodeKind::Float => "float",
            NodeKind::Str => "str",
            NodeKind::List => "list",
            NodeKind::Tuple => "tuple",
            NodeKind::Set => "set",
            NodeKind::Dict => "dict",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} node has no {role} domain")]
pub struct SealError {
    pub kind: NodeKind,
    pub role: Role,
}

// ── Typed stage ──────────────────────────────────────────────────────

/// A parsed type tree whose domains may still be missing.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Int(DomainSlots<i64>),
    Bool(DomainSlots<bool>),
    Float(DomainSlots<f64>),
    Str {
        alphabet: BTreeSet<char>,
        lengths: DomainSlots<usize>,
    },
    List {
        elem: Box<TypeNode>,
        sizes: DomainSlots<usize>,
    },
    Tuple {
        elem: Box<TypeNode>,
        sizes: DomainSlots<usize>,
    },
    Set {
        elem: Box<TypeNode>,
        sizes: DomainSlots<usize>,
    },
    Dict {
        key: Box<TypeNode>,
        value: Box<TypeNode>,
        sizes: DomainSlots<usize>,
    },
}

impl TypeNode {
    pub fn int() -> Self {
        TypeNode::Int(DomainSlots::new())
    }

    pub fn bool() -> Self {
        TypeNode::Bool(DomainSlots::new())
    }

    pub fn float() -> Self {
        TypeNode::Float(DomainSlots::new())
    }

    pub fn str(alphabet: impl IntoIterator<Item = char>) -> Self {
        TypeNode::Str {
            alphabet: alphabet.into_iter().collect(),
            lengths: DomainSlots::new(),
        }
    }

    pub fn list(elem: TypeNode) -> Self {
        TypeNode::List {
            elem: Box::new(elem),
            sizes: DomainSlots::new(),
        }
    }

    pub fn tuple(elem: TypeNode) -> Self {
        TypeNode::Tuple {
            elem: Box::new(elem),
            sizes: DomainSlots::new(),
        }
    }

    pub fn set(elem: TypeNode) -> Self {
        TypeNode::Set {
            elem: Box::new(elem),
            sizes: DomainSlots::new(),
        }
    }

    pub fn dict(key: TypeNode, value: TypeNode) -> Self {
        TypeNode::Dict {
            key: Box::new(key),
            value: Box::new(value),
            sizes: DomainSlots::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            TypeNode::Int(_) => NodeKind::Int,
            TypeNode::Bool(_) => NodeKind::Bool,
            TypeNode::Float(_) => NodeKind::Float,
            TypeNode::Str { .. } => NodeKind::Str,
            TypeNode::List { .. } => NodeKind::List,
            TypeNode::Tuple { .. } => NodeKind::Tuple,
            TypeNode::Set { .. } => NodeKind::Set,
            TypeNode::Dict { .. } => NodeKind::Dict,
        }
    }

    /// Move into the decorated stage. Fails on the first node (in pre-order)
    /// missing either domain.
    pub fn seal(self) -> Result<Node, SealError> {
        let kind = self.kind();
        Ok(match self {
            TypeNode::Int(slots) => Node::Int(slots.seal(kind)?),
            TypeNode::Bool(slots) => Node::Bool(slots.seal(kind)?),
            TypeNode::Float(slots) => Node::Float(slots.seal(kind)?),
            TypeNode::Str { alphabet, lengths } => Node::Str {
                alphabet,
                lengths: lengths.seal(kind)?,
            },
            TypeNode::List { elem, sizes } => {
                let sizes = sizes.seal(kind)?;
                Node::List {
                    elem: Box::new((*elem).seal()?),
                    sizes,
                }
            }
            TypeNode::Tuple { elem, sizes } => {
                let sizes = sizes.seal(kind)?;
                Node::Tuple {
                    elem: Box::new((*elem).seal()?),
                    sizes,
                }
            }
            TypeNode::Set { elem, sizes } => {
                let sizes = sizes.seal(kind)?;
                Node::Set {
                    elem: Box::new((*elem).seal()?),
                    sizes,
                }
            }
            TypeNode::Dict { key, value, sizes } => {
                let sizes = sizes.seal(kind)?;
                Node::Dict {
                    key: Box::new((*key).seal()?),
                    value: Box::new((*value).seal()?),
                    sizes,
                }
            }
        })
    }
}

// ── Decorated stage ──────────────────────────────────────────────────

/// A fully decorated type tree, ready for generation.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Int(Domains<i64>),
    Bool(Domains<bool>),
    Float(Domains<f64>),
    Str {
        alphabet: BTreeSet<char>,
        lengths: Domains<usize>,
    },
    List {
        elem: Box<Node>,
        sizes: Domains<usize>,
    },
    Tuple {
        elem: Box<Node>,
        sizes: Domains<usize>,
    },
    Set {
        elem: Box<Node>,
        sizes: Domains<usize>,
    },
    Dict {
        key: Box<Node>,
        value: Box<Node>,
        sizes: Domains<usize>,
    },
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Int(_) => NodeKind::Int,
            Node::Bool(_) => NodeKind::Bool,
            Node::Float(_) => NodeKind::Float,
            Node::Str { .. } => NodeKind::Str,
            Node::List { .. } => NodeKind::List,
            Node::Tuple { .. } => NodeKind::Tuple,
            Node::Set { .. } => NodeKind::Set,
            Node::Dict { .. } => NodeKind::Dict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_is_write_once() {
        let mut slots = DomainSlots::new();
        slots.assign(Role::Exhaustive, vec![1i64, 2]).unwrap();
        let err = slots.assign(Role::Exhaustive, vec![3]).unwrap_err();
        assert_eq!(
            err,
            SlotError::AlreadyAssigned {
                role: Role::Exhaustive
            }
        );
        assert_eq!(slots.get(Role::Exhaustive), Some(&[1i64, 2][..]));
        assert_eq!(slots.get(Role::Random), None);
    }

    #[test]
    fn test_domains_reject_empty_roles() {
        assert_eq!(
            Domains::<i64>::new(vec![], vec![1]),
            Err(SlotError::Empty {
                role: Role::Exhaustive
            })
        );
        assert_eq!(
            Domains::<i64>::new(vec![1], vec![]),
            Err(SlotError::Empty { role: Role::Random })
        );
    }

    #[test]
    fn test_slot_rejects_empty_domain() {
        let mut slots: DomainSlots<usize> = DomainSlots::new();
        assert_eq!(
            slots.assign(Role::Random, vec![]),
            Err(SlotError::Empty { role: Role::Random })
        );
    }

    #[test]
    fn test_seal_requires_every_slot() {
        let mut node = TypeNode::list(TypeNode::int());
        if let TypeNode::List { sizes, .. } = &mut node {
            sizes.assign(Role::Exhaustive, vec![0, 1]).unwrap();
            sizes.assign(Role::Random, vec![2]).unwrap();
        }
        let err = node.seal().unwrap_err();
        assert_eq!(err.kind, NodeKind::Int);
        assert_eq!(err.role, Role::Exhaustive);
    }

    #[test]
    fn test_seal_keeps_dict_children_apart() {
        let mut key = TypeNode::int();
        let mut value = TypeNode::bool();
        if let TypeNode::Int(slots) = &mut key {
            slots.assign(Role::Exhaustive, vec![2, 3]).unwrap();
            slots.assign(Role::Random, vec![7]).unwrap();
        }
        if let TypeNode::Bool(slots) = &mut value {
            slots.assign(Role::Exhaustive, vec![false, true]).unwrap();
            slots.assign(Role::Random, vec![true]).unwrap();
        }
        let mut dict = TypeNode::dict(key, value);
        if let TypeNode::Dict { sizes, .. } = &mut dict {
            sizes.assign(Role::Exhaustive, vec![1]).unwrap();
            sizes.assign(Role::Random, vec![1]).unwrap();
        }
        match dict.seal().unwrap() {
            Node::Dict { key, value, sizes } => {
                assert_eq!(*key, Node::Int(Domains::new(vec![2, 3], vec![7]).unwrap()));
                assert_eq!(
                    *value,
                    Node::Bool(Domains::new(vec![false, true], vec![true]).unwrap())
                );
                assert_eq!(sizes.random(), &[1]);
            }
            other => panic!("expected dict, got {}", other.kind()),
        }
    }
}

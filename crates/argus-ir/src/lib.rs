//! Shared data model: the input spec schema, the node tree in its typed and
//! decorated stages, and the Python values generated from it.

pub mod node;
pub mod parse;
pub mod types;
pub mod value;

pub use node::{DomainSlots, Domains, Node, NodeKind, Role, SealError, SlotError, TypeNode};
pub use value::{PyFloat, TestCase, Value};

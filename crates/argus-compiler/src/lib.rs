//! Compiles an input spec's descriptor text into decorated node trees.

pub mod compile;
pub mod domain_grammar;
pub mod type_grammar;
pub mod validate;

pub use compile::{compile, compile_json, compile_param, CompileError, CompiledSpec};

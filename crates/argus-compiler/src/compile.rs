use argus_ir::parse::{parse_spec, ParseError};
use argus_ir::types::ArgSpec;
use argus_ir::{Node, Role, SealError};
use tracing::debug;

use crate::domain_grammar::{apply_domain, DomainGrammarError};
use crate::type_grammar::{parse_type, TypeGrammarError};
use crate::validate::{validate_spec, ValidationError};

/// Every way a spec can fail to compile. Compilation is all-or-nothing: no
/// partially decorated tree is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Malformed spec: {0}")]
    Parse(#[from] ParseError),

    #[error("Schema violations: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Schema(Vec<ValidationError>),

    #[error("Type grammar error: {0}")]
    Type(#[from] TypeGrammarError),

    #[error("Domain grammar error: {0}")]
    Domain(#[from] DomainGrammarError),

    #[error("Incomplete decoration: {0}")]
    Seal(#[from] SealError),
}

/// A spec whose parameters are all decorated and ready for generation.
#[derive(Debug, Clone)]
pub struct CompiledSpec {
    pub fname: String,
    pub params: Vec<Node>,
    pub num_random: usize,
}

/// Compile one parameter from its type descriptor and both domain
/// descriptors.
pub fn compile_param(
    type_text: &str,
    exhaustive_text: &str,
    random_text: &str,
) -> Result<Node, CompileError> {
    let mut tree = parse_type(type_text)?;
    apply_domain(&mut tree, exhaustive_text, Role::Exhaustive)?;
    apply_domain(&mut tree, random_text, Role::Random)?;
    Ok(tree.seal()?)
}

pub fn compile(spec: &ArgSpec) -> Result<CompiledSpec, CompileError> {
    // 1. Validate shape before touching descriptor text
    validate_spec(spec).map_err(CompileError::Schema)?;
    let num_random = spec
        .num_random
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or_default();

    // 2. Parse every type descriptor
    let mut trees = spec
        .types
        .iter()
        .map(|text| parse_type(text))
        .collect::<Result<Vec<_>, _>>()?;

    // 3. Decorate with each role in turn
    for (role, texts) in [
        (Role::Exhaustive, &spec.exhaustive_domain),
        (Role::Random, &spec.random_domain),
    ] {
        for (tree, text) in trees.iter_mut().zip(texts) {
            apply_domain(tree, text, role)?;
        }
        debug!(fname = %spec.fname, %role, "decorated parameters");
    }

    // 4. Seal
    let params = trees
        .into_iter()
        .map(|tree| tree.seal())
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        fname = %spec.fname,
        kinds = ?params.iter().map(Node::kind).collect::<Vec<_>>(),
        num_random,
        "compiled spec"
    );
    Ok(CompiledSpec {
        fname: spec.fname.clone(),
        params,
        num_random,
    })
}

/// Parse and compile spec JSON in one step.
pub fn compile_json(json: &str) -> Result<CompiledSpec, CompileError> {
    let spec = parse_spec(json)?;
    compile(&spec)
}

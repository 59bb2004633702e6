use argus_ir::types::ArgSpec;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'num random' must be a non-negative integer, found {found}")]
    InvalidNumRandom { found: String },

    #[error("Array sizes mismatch: 'types' has {types} entries but '{field}' has {found}")]
    LengthMismatch {
        field: &'static str,
        types: usize,
        found: usize,
    },
}

/// Structural checks that must pass before any descriptor text is parsed.
pub fn validate_spec(spec: &ArgSpec) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    validate_num_random(spec, &mut errors);
    validate_lengths(spec, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `num random` must be a JSON integer that fits `usize`.
fn validate_num_random(spec: &ArgSpec, errors: &mut Vec<ValidationError>) {
    let fits = spec
        .num_random
        .as_u64()
        .is_some_and(|n| usize::try_from(n).is_ok());
    if !fits {
        errors.push(ValidationError::InvalidNumRandom {
            found: spec.num_random.to_string(),
        });
    }
}

/// Both domain arrays must run parallel to `types`.
fn validate_lengths(spec: &ArgSpec, errors: &mut Vec<ValidationError>) {
    let types = spec.types.len();
    for (field, found) in [
        ("exhaustive domain", spec.exhaustive_domain.len()),
        ("random domain", spec.random_domain.len()),
    ] {
        if found != types {
            errors.push(ValidationError::LengthMismatch {
                field,
                types,
                found,
            });
        }
    }
}

//! Domain descriptor grammar.
//!
//! A domain descriptor lists one domain clause per node of a type tree, in
//! pre-order, with the same `(` and `:` punctuation the type descriptor
//! uses. Clauses carry no type tags, so they are aligned to the tree purely
//! by position:
//!
//! ```text
//! type:    dict(int:list(bool))
//! domain:  [1, 2](0~9:[0, 3]([0, 1]))
//! ```
//!
//! A clause is either a list `[n1, n2, ...]` (duplicates dropped, first
//! occurrence kept) or an inclusive integer range `lo~hi`. Compilation runs
//! in two passes: a right-to-left scan that folds list and range forms into
//! value lists, then a pre-order walk of the tree that pops one clause per
//! node and checks the punctuation between them.

use argus_ir::{DomainSlots, Role, SlotError, TypeNode};

/// Largest number of values a single `lo~hi` range may expand to. Also the
/// largest string length or container size a domain may name.
pub const MAX_RANGE_LEN: u64 = 1 << 20;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainErrorKind {
    #[error("could not parse number")]
    MalformedNumber,

    #[error("expected ','")]
    ExpectedComma,

    #[error("trailing ',' in list")]
    TrailingComma,

    #[error("list is empty")]
    EmptyList,

    #[error("'[' has no matching ']'")]
    UnmatchedBracket,

    #[error("nested domain inside a list")]
    NestedList,

    #[error("range bounds must be integers")]
    NonIntegerRange,

    #[error("range {lo}~{hi} has lower bound above upper bound")]
    InvertedRange { lo: i64, hi: i64 },

    #[error("range {lo}~{hi} expands to more than {MAX_RANGE_LEN} values")]
    RangeTooLarge { lo: i64, hi: i64 },

    #[error("expected a domain for {kind}")]
    ExpectedDomain { kind: String },

    #[error("expected '{expected}'")]
    ExpectedDelimiter { expected: char },

    #[error("bool domain values must be 0 or 1, found {value}")]
    InvalidBool { value: f64 },

    #[error("{kind} domain values must be integers, found {value}")]
    NotIntegral { kind: String, value: f64 },

    #[error("{kind} sizes must be non-negative, found {value}")]
    NegativeSize { kind: String, value: f64 },

    #[error("{kind} sizes must be at most {MAX_RANGE_LEN}, found {value}")]
    SizeTooLarge { kind: String, value: f64 },

    #[error("not enough domain clauses for the type")]
    TooFewClauses,

    #[error("unattributed domain clauses or redundant delimiters")]
    TooManyClauses,

    #[error(transparent)]
    Slot(#[from] SlotError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid {role} domain '{text}': {kind} at '{token}'")]
pub struct DomainGrammarError {
    pub text: String,
    pub role: Role,
    pub token: String,
    pub kind: DomainErrorKind,
}

/// Scan-stack entry.
#[derive(Debug, Clone, PartialEq)]
enum Item {
    Delim(char),
    Number(String),
    Values(Vec<f64>),
}

impl Item {
    fn describe(&self) -> String {
        match self {
            Item::Delim(c) => c.to_string(),
            Item::Number(s) => s.clone(),
            Item::Values(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

const DELIMITERS: [char; 6] = ['(', ':', '[', ']', ',', '~'];

/// Split on `( : [ ] , ~` keeping each as a token; `)` is dropped. Tokens
/// are trimmed and blanks dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if DELIMITERS.contains(&c) || c == ')' {
            push_token(&mut tokens, &current);
            current.clear();
            if c != ')' {
                tokens.push(c.to_string());
            }
        } else {
            current.push(c);
        }
    }
    push_token(&mut tokens, &current);
    tokens
}

fn push_token(tokens: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
}

struct Scanner<'a> {
    text: &'a str,
    role: Role,
    stack: Vec<Item>,
}

impl<'a> Scanner<'a> {
    fn error(&self, token: &str, kind: DomainErrorKind) -> DomainGrammarError {
        DomainGrammarError {
            text: self.text.to_string(),
            role: self.role,
            token: token.to_string(),
            kind,
        }
    }

    fn step(&mut self, token: &str) -> Result<(), DomainGrammarError> {
        let mut chars = token.chars();
        let single = match (chars.next(), chars.next()) {
            (Some(c), None) if DELIMITERS.contains(&c) => Some(c),
            _ => None,
        };
        match single {
            Some('[') => {
                let values = self.close_list()?;
                self.stack.push(Item::Values(values));
            }
            Some(c) => self.stack.push(Item::Delim(c)),
            None if self.stack.last() == Some(&Item::Delim('~')) => {
                self.stack.pop();
                let values = self.close_range(token)?;
                self.stack.push(Item::Values(values));
            }
            None => self.stack.push(Item::Number(token.to_string())),
        }
        Ok(())
    }

    /// Pop the body of a list up to its `]`, alternating value and comma.
    fn close_list(&mut self) -> Result<Vec<f64>, DomainGrammarError> {
        let mut values: Vec<f64> = Vec::new();
        let mut expect_comma = false;
        loop {
            let item = self
                .stack
                .pop()
                .ok_or_else(|| self.error("[", DomainErrorKind::UnmatchedBracket))?;
            match item {
                Item::Delim(']') if values.is_empty() && !expect_comma => {
                    return Err(self.error("[]", DomainErrorKind::EmptyList));
                }
                Item::Delim(']') if !expect_comma => {
                    return Err(self.error(",]", DomainErrorKind::TrailingComma));
                }
                Item::Delim(']') => break,
                Item::Delim(',') if expect_comma => expect_comma = false,
                Item::Number(s) if !expect_comma => {
                    let value: f64 = s
                        .parse()
                        .map_err(|_| self.error(&s, DomainErrorKind::MalformedNumber))?;
                    // Exact duplicates only: `0` and `-0` stay distinct.
                    if !values.iter().any(|v| v.to_bits() == value.to_bits()) {
                        values.push(value);
                    }
                    expect_comma = true;
                }
                Item::Values(_) => {
                    return Err(self.error(&item.describe(), DomainErrorKind::NestedList));
                }
                other if expect_comma => {
                    return Err(self.error(&other.describe(), DomainErrorKind::ExpectedComma));
                }
                other => {
                    return Err(self.error(&other.describe(), DomainErrorKind::MalformedNumber));
                }
            }
        }
        Ok(values)
    }

    /// Combine `lo` with the `hi` operand below the already-popped `~`.
    fn close_range(&mut self, lo_token: &str) -> Result<Vec<f64>, DomainGrammarError> {
        let hi_token = match self.stack.pop() {
            Some(Item::Number(s)) => s,
            Some(other) => {
                return Err(self.error(
                    &format!("{lo_token}~{}", other.describe()),
                    DomainErrorKind::NonIntegerRange,
                ))
            }
            None => {
                return Err(self.error(
                    &format!("{lo_token}~"),
                    DomainErrorKind::TooFewClauses,
                ))
            }
        };
        let pair = format!("{lo_token}~{hi_token}");
        let (lo, hi) = match (lo_token.parse::<i64>(), hi_token.parse::<i64>()) {
            (Ok(lo), Ok(hi)) => (lo, hi),
            _ => return Err(self.error(&pair, DomainErrorKind::NonIntegerRange)),
        };
        if lo > hi {
            return Err(self.error(&pair, DomainErrorKind::InvertedRange { lo, hi }));
        }
        let len = (hi as i128 - lo as i128 + 1) as u128;
        if len > MAX_RANGE_LEN as u128 {
            return Err(self.error(&pair, DomainErrorKind::RangeTooLarge { lo, hi }));
        }
        Ok((lo..=hi).map(|v| v as f64).collect())
    }
}

/// `0` and `-0` are distinct list entries but convert to the same bool,
/// integer or size.
fn dedup_first<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// Traversal frame. A dict is visited twice: once for its size clause and
/// key subtree, and once more to consume `:` before its value subtree.
enum Frame<'t> {
    Visit(&'t mut TypeNode),
    DictValue(&'t mut TypeNode),
}

struct Aligner<'a> {
    text: &'a str,
    role: Role,
    stack: Vec<Item>,
}

impl<'a> Aligner<'a> {
    fn error(&self, token: &str, kind: DomainErrorKind) -> DomainGrammarError {
        DomainGrammarError {
            text: self.text.to_string(),
            role: self.role,
            token: token.to_string(),
            kind,
        }
    }

    fn pop(&mut self) -> Result<Item, DomainGrammarError> {
        self.stack
            .pop()
            .ok_or_else(|| self.error("", DomainErrorKind::TooFewClauses))
    }

    fn pop_values(&mut self, kind: &str) -> Result<Vec<f64>, DomainGrammarError> {
        match self.pop()? {
            Item::Values(values) => Ok(values),
            other => Err(self.error(
                &other.describe(),
                DomainErrorKind::ExpectedDomain {
                    kind: kind.to_string(),
                },
            )),
        }
    }

    fn expect_delim(&mut self, expected: char) -> Result<(), DomainGrammarError> {
        match self.pop()? {
            Item::Delim(c) if c == expected => Ok(()),
            other => Err(self.error(
                &other.describe(),
                DomainErrorKind::ExpectedDelimiter { expected },
            )),
        }
    }

    fn assign<T>(
        &self,
        slots: &mut DomainSlots<T>,
        values: Vec<T>,
        token: &str,
    ) -> Result<(), DomainGrammarError> {
        slots
            .assign(self.role, values)
            .map_err(|e| self.error(token, DomainErrorKind::Slot(e)))
    }

    fn sizes(&mut self, kind: &str) -> Result<(Vec<usize>, String), DomainGrammarError> {
        let raw = self.pop_values(kind)?;
        let token = Item::Values(raw.clone()).describe();
        let sizes = raw
            .iter()
            .map(|&v| {
                if v < 0.0 {
                    Err(self.error(
                        &token,
                        DomainErrorKind::NegativeSize {
                            kind: kind.to_string(),
                            value: v,
                        },
                    ))
                } else if v.fract() != 0.0 {
                    Err(self.error(
                        &token,
                        DomainErrorKind::NotIntegral {
                            kind: kind.to_string(),
                            value: v,
                        },
                    ))
                } else if v > MAX_RANGE_LEN as f64 {
                    Err(self.error(
                        &token,
                        DomainErrorKind::SizeTooLarge {
                            kind: kind.to_string(),
                            value: v,
                        },
                    ))
                } else {
                    Ok(v as usize)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((dedup_first(sizes), token))
    }

    fn visit<'t>(
        &mut self,
        node: &'t mut TypeNode,
        frames: &mut Vec<Frame<'t>>,
    ) -> Result<(), DomainGrammarError> {
        let kind = node.kind().to_string();
        match node {
            TypeNode::Bool(slots) => {
                let raw = self.pop_values(&kind)?;
                let token = Item::Values(raw.clone()).describe();
                let values = raw
                    .iter()
                    .map(|&v| match v {
                        v if v == 0.0 => Ok(false),
                        v if v == 1.0 => Ok(true),
                        value => Err(self.error(&token, DomainErrorKind::InvalidBool { value })),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                self.assign(slots, dedup_first(values), &token)?;
            }
            TypeNode::Int(slots) => {
                let raw = self.pop_values(&kind)?;
                let token = Item::Values(raw.clone()).describe();
                let values = raw
                    .iter()
                    .map(|&v| {
                        if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                            Ok(v as i64)
                        } else {
                            Err(self.error(
                                &token,
                                DomainErrorKind::NotIntegral {
                                    kind: kind.clone(),
                                    value: v,
                                },
                            ))
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                self.assign(slots, dedup_first(values), &token)?;
            }
            TypeNode::Float(slots) => {
                let values = self.pop_values(&kind)?;
                let token = Item::Values(values.clone()).describe();
                self.assign(slots, values, &token)?;
            }
            TypeNode::Str { lengths, .. } => {
                let (values, token) = self.sizes(&kind)?;
                self.assign(lengths, values, &token)?;
            }
            TypeNode::List { elem, sizes }
            | TypeNode::Tuple { elem, sizes }
            | TypeNode::Set { elem, sizes } => {
                let (values, token) = self.sizes(&kind)?;
                self.assign(sizes, values, &token)?;
                self.expect_delim('(')?;
                frames.push(Frame::Visit(&mut **elem));
            }
            TypeNode::Dict { key, value, sizes } => {
                let (values, token) = self.sizes(&kind)?;
                self.assign(sizes, values, &token)?;
                self.expect_delim('(')?;
                frames.push(Frame::DictValue(&mut **value));
                frames.push(Frame::Visit(&mut **key));
            }
        }
        Ok(())
    }

    fn align(&mut self, tree: &mut TypeNode) -> Result<(), DomainGrammarError> {
        let mut frames = vec![Frame::Visit(tree)];
        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Visit(node) => self.visit(node, &mut frames)?,
                Frame::DictValue(value) => {
                    self.expect_delim(':')?;
                    frames.push(Frame::Visit(value));
                }
            }
        }
        match self.stack.last() {
            None => Ok(()),
            Some(item) => Err(self.error(&item.describe(), DomainErrorKind::TooManyClauses)),
        }
    }
}

/// Decorate `tree` with the domain described by `text` for `role`.
///
/// On error the tree may hold a partial decoration for `role`; callers
/// discard it, since an undecorated tree can never be sealed.
pub fn apply_domain(tree: &mut TypeNode, text: &str, role: Role) -> Result<(), DomainGrammarError> {
    let mut scanner = Scanner {
        text,
        role,
        stack: Vec::new(),
    };
    for token in tokenize(text).iter().rev() {
        scanner.step(token)?;
    }

    let mut aligner = Aligner {
        text,
        role,
        stack: scanner.stack,
    };
    aligner.align(tree)
}

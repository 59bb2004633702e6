//! Type descriptor grammar.
//!
//! ```text
//! type      := scalar | str | container | dict
//! scalar    := "int" | "bool" | "float"
//! str       := "str" "(" charset [")"]
//! container := ("list" | "tuple" | "set") "(" type [")"]
//! dict      := "dict" "(" type ":" type [")"]
//! ```
//!
//! Closing parentheses are optional and carry no structure. Descriptors are
//! parsed by a single right-to-left scan over one operand stack: delimiters
//! and charset literals are pushed as they are seen, and each keyword pops
//! the operands that follow it in the text.

use argus_ir::TypeNode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeErrorKind {
    #[error("expected '{expected}'")]
    ExpectedDelimiter { expected: char },

    #[error("expected a type")]
    ExpectedType,

    #[error("expected a character set")]
    ExpectedCharset,

    #[error("missing operand")]
    MissingOperand,

    #[error("expected a single type, found {count} top-level entries")]
    TrailingTokens { count: usize },

    #[error("empty descriptor")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid type descriptor '{text}': {kind} at '{token}'")]
pub struct TypeGrammarError {
    pub text: String,
    pub token: String,
    pub kind: TypeErrorKind,
}

/// One entry on the operand stack.
#[derive(Debug)]
enum Operand {
    Delim(char),
    Literal(String),
    Type(TypeNode),
}

impl Operand {
    fn describe(&self) -> String {
        match self {
            Operand::Delim(c) => c.to_string(),
            Operand::Literal(s) => s.clone(),
            Operand::Type(node) => node.kind().to_string(),
        }
    }
}

/// Split on `(`, `:` and `)` keeping `(` and `:` as tokens. Tokens are
/// trimmed and blanks dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '(' | ':' | ')' => {
                push_token(&mut tokens, &current);
                current.clear();
                if c != ')' {
                    tokens.push(c.to_string());
                }
            }
            _ => current.push(c),
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

struct Parser<'a> {
    text: &'a str,
    stack: Vec<Operand>,
}

impl<'a> Parser<'a> {
    fn error(&self, token: &str, kind: TypeErrorKind) -> TypeGrammarError {
        TypeGrammarError {
            text: self.text.to_string(),
            token: token.to_string(),
            kind,
        }
    }

    fn pop(&mut self, keyword: &str) -> Result<Operand, TypeGrammarError> {
        self.stack
            .pop()
            .ok_or_else(|| self.error(keyword, TypeErrorKind::MissingOperand))
    }

    fn expect_delim(&mut self, keyword: &str, expected: char) -> Result<(), TypeGrammarError> {
        match self.pop(keyword)? {
            Operand::Delim(c) if c == expected => Ok(()),
            other => Err(self.error(
                &other.describe(),
                TypeErrorKind::ExpectedDelimiter { expected },
            )),
        }
    }

    fn expect_type(&mut self, keyword: &str) -> Result<TypeNode, TypeGrammarError> {
        match self.pop(keyword)? {
            Operand::Type(node) => Ok(node),
            other => Err(self.error(&other.describe(), TypeErrorKind::ExpectedType)),
        }
    }

    fn expect_charset(&mut self, keyword: &str) -> Result<String, TypeGrammarError> {
        match self.pop(keyword)? {
            Operand::Literal(s) => Ok(s),
            other => Err(self.error(&other.describe(), TypeErrorKind::ExpectedCharset)),
        }
    }

    fn step(&mut self, token: &str) -> Result<(), TypeGrammarError> {
        let operand = match token {
            "(" => Operand::Delim('('),
            ":" => Operand::Delim(':'),
            "int" => Operand::Type(TypeNode::int()),
            "bool" => Operand::Type(TypeNode::bool()),
            "float" => Operand::Type(TypeNode::float()),
            "list" | "tuple" | "set" => {
                self.expect_delim(token, '(')?;
                let elem = self.expect_type(token)?;
                Operand::Type(match token {
                    "list" => TypeNode::list(elem),
                    "tuple" => TypeNode::tuple(elem),
                    _ => TypeNode::set(elem),
                })
            }
            "dict" => {
                self.expect_delim(token, '(')?;
                let key = self.expect_type(token)?;
                self.expect_delim(token, ':')?;
                let value = self.expect_type(token)?;
                Operand::Type(TypeNode::dict(key, value))
            }
            "str" => {
                self.expect_delim(token, '(')?;
                let charset = self.expect_charset(token)?;
                Operand::Type(TypeNode::str(charset.chars()))
            }
            literal => Operand::Literal(literal.to_string()),
        };
        self.stack.push(operand);
        Ok(())
    }

    fn finish(mut self) -> Result<TypeNode, TypeGrammarError> {
        let count = self.stack.len();
        match self.stack.pop() {
            None => Err(self.error("", TypeErrorKind::Empty)),
            Some(Operand::Type(node)) if count == 1 => Ok(node),
            Some(Operand::Type(node)) => {
                Err(self.error(&node.kind().to_string(), TypeErrorKind::TrailingTokens { count }))
            }
            Some(other) if count == 1 => {
                Err(self.error(&other.describe(), TypeErrorKind::ExpectedType))
            }
            Some(other) => {
                Err(self.error(&other.describe(), TypeErrorKind::TrailingTokens { count }))
            }
        }
    }
}

/// Parse a type descriptor into a typed tree with empty domain slots.
pub fn parse_type(text: &str) -> Result<TypeNode, TypeGrammarError> {
    let mut parser = Parser {
        text,
        stack: Vec::new(),
    };
    for token in tokenize(text).iter().rev() {
        parser.step(token)?;
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_open_paren_and_colon() {
        assert_eq!(
            tokenize("dict(str(ab):list(int))"),
            vec!["dict", "(", "str", "(", "ab", ":", "list", "(", "int"]
        );
    }

    #[test]
    fn test_tokenize_trims_and_drops_blanks() {
        assert_eq!(tokenize("  list ( int  "), vec!["list", "(", "int"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_inner_spaces_of_charset() {
        assert_eq!(tokenize("str(a b)"), vec!["str", "(", "a b"]);
    }
}

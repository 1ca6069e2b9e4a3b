use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

/// Errors produced by [`LuaSyntaxChecker`].
///
/// These are failures of the checker itself, never syntax errors in the checked source.
#[derive(Debug, Error)]
pub enum TreeSitterError {
    /// Setting the Tree-sitter language failed (e.g. ABI version mismatch).
    #[error("tree-sitter language error: {0}")]
    Language(String),
    /// The parser returned no tree.
    #[error("tree-sitter produced no parse tree")]
    NoTree,
}

/// How the parser classified the first syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A token the grammar could not place (an `ERROR` node).
    Unexpected,
    /// A token the grammar required but did not find (a `MISSING` node).
    Missing,
}

/// The first syntax error in a source text, in Tree-sitter coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column, in bytes from the start of the row.
    pub byte_column: usize,
    /// Byte offset from the start of the source.
    pub byte_offset: usize,
    /// Error classification.
    pub kind: SyntaxErrorKind,
    /// Lua-style description (`unexpected symbol near '='`).
    pub message: String,
}

/// Result of a syntax check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The source parsed without error.
    Valid,
    /// The source failed to parse; only the first error is reported.
    Invalid(SyntaxError),
}

impl ParseOutcome {
    /// Returns `true` if the source parsed without error.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A stateless Lua syntax checker backed by Tree-sitter.
///
/// Each [`check`](Self::check) call builds a fresh parser, so a single checker can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct LuaSyntaxChecker {
    language: Language,
}

impl LuaSyntaxChecker {
    /// Create a checker for the bundled Lua grammar.
    pub fn new() -> Self {
        Self::with_language(tree_sitter_lua::LANGUAGE.into())
    }

    /// Create a checker for a different Lua-family grammar.
    pub fn with_language(language: Language) -> Self {
        Self { language }
    }

    /// Parse `source` in full and report the first syntax error, if any.
    pub fn check(&self, source: &str) -> Result<ParseOutcome, TreeSitterError> {
        let tree = self.parse(source)?;
        let root = tree.root_node();
        if !root.has_error() {
            return Ok(ParseOutcome::Valid);
        }

        let tokens = tokens(root);
        let node = first_error_node(root);
        let error = if node.is_missing() {
            missing_error(source, &tokens, node)
        } else {
            unexpected_error(&self.language, source, &tokens, node)
        };
        tracing::trace!(
            row = error.row,
            column = error.byte_column,
            message = %error.message,
            "lua syntax error"
        );
        Ok(ParseOutcome::Invalid(error))
    }

    fn parse(&self, source: &str) -> Result<Tree, TreeSitterError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| TreeSitterError::Language(e.to_string()))?;
        parser.parse(source, None).ok_or(TreeSitterError::NoTree)
    }
}

impl Default for LuaSyntaxChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Leftmost `ERROR`/`MISSING` node under `root` (pre-order).
fn first_error_node(root: Node<'_>) -> Node<'_> {
    let mut node = root;
    'descend: loop {
        if node.is_error() || node.is_missing() {
            return node;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.has_error() || child.is_missing() {
                node = child;
                continue 'descend;
            }
        }

        return node;
    }
}

/// Non-empty leaves under `root` in source order, skipping comments and other extras.
fn tokens(root: Node<'_>) -> Vec<Node<'_>> {
    let mut tokens = Vec::new();
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if !node.is_extra() {
            if node.child_count() > 0 {
                if cursor.goto_first_child() {
                    continue;
                }
            } else if !node.is_missing() && node.end_byte() > node.start_byte() {
                tokens.push(node);
            }
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return tokens;
            }
        }
    }
}

/// The token the parser could not shift, for an `ERROR` node.
///
/// Error recovery wraps already-parsed tokens into the `ERROR` node, so its start is usually
/// valid code. The rejected token is the first one, from the start of the node through the token
/// right after it, that the grammar has no action for in the state left by its predecessor.
/// Without such a token the parse broke on whatever follows the node; `None` means end of input.
fn rejected_token<'t>(language: &Language, tokens: &[Node<'t>], error: Node<'t>) -> Option<Node<'t>> {
    let first = tokens.partition_point(|token| token.start_byte() < error.start_byte());
    let after = tokens.partition_point(|token| token.start_byte() < error.end_byte());
    let last = (after + 1).min(tokens.len());

    (first..last)
        .find(|&i| {
            let state = match i.checked_sub(1) {
                Some(previous) => tokens[previous].next_parse_state(),
                None => tokens[i].parse_state(),
            };
            !accepts(language, state, tokens[i].grammar_id())
        })
        .or_else(|| (after < tokens.len()).then_some(after))
        .map(|i| tokens[i])
}

/// Returns `false` only when `state` is known and has no action for `symbol`.
///
/// State `0` is the error-recovery state and `u16::MAX` means no state was recorded.
fn accepts(language: &Language, state: u16, symbol: u16) -> bool {
    if state == 0 || state == u16::MAX {
        return true;
    }
    language
        .lookahead_iterator(state)
        .is_none_or(|mut lookahead| lookahead.any(|valid| valid == symbol))
}

fn unexpected_error(
    language: &Language,
    source: &str,
    tokens: &[Node<'_>],
    node: Node<'_>,
) -> SyntaxError {
    let (byte_offset, near) = match rejected_token(language, tokens, node) {
        Some(token) => (token.start_byte(), token_text(source, token)),
        None => (source.len(), EOF.to_string()),
    };
    syntax_error(
        source,
        byte_offset,
        SyntaxErrorKind::Unexpected,
        format!("unexpected symbol near '{near}'"),
    )
}

fn missing_error(source: &str, tokens: &[Node<'_>], node: Node<'_>) -> SyntaxError {
    let byte_offset = node.start_byte().min(source.len());
    let near = tokens
        .iter()
        .find(|token| token.start_byte() >= byte_offset)
        .map_or_else(|| EOF.to_string(), |token| token_text(source, *token));
    syntax_error(
        source,
        byte_offset,
        SyntaxErrorKind::Missing,
        format!("'{}' expected near '{near}'", node.kind()),
    )
}

fn syntax_error(source: &str, byte_offset: usize, kind: SyntaxErrorKind, message: String) -> SyntaxError {
    let (row, byte_column) = point_at(source, byte_offset);
    SyntaxError {
        row,
        byte_column,
        byte_offset,
        kind,
        message,
    }
}

const EOF: &str = "<eof>";
const NEAR_MAX_CHARS: usize = 20;

fn token_text(source: &str, token: Node<'_>) -> String {
    source
        .get(token.start_byte()..token.end_byte())
        .unwrap_or_default()
        .chars()
        .take(NEAR_MAX_CHARS)
        .collect()
}

/// Zero-based `(row, byte column)` of a byte offset. Only `\n` starts a row.
fn point_at(source: &str, byte_offset: usize) -> (usize, usize) {
    let before = source.get(..byte_offset).unwrap_or(source);
    let row = before.bytes().filter(|&b| b == b'\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (row, before.len() - line_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_texts(source: &str) -> Vec<String> {
        let tree = LuaSyntaxChecker::new().parse(source).unwrap();
        tokens(tree.root_node())
            .into_iter()
            .map(|token| token_text(source, token))
            .collect()
    }

    #[test]
    fn test_point_at() {
        assert_eq!(point_at("abc", 0), (0, 0));
        assert_eq!(point_at("abc", 3), (0, 3));
        assert_eq!(point_at("a\nbé\nc", 6), (2, 0));
        assert_eq!(point_at("a\nbé = 1", 5), (1, 3));
        assert_eq!(point_at("ab", 10), (0, 2));
    }

    #[test]
    fn test_tokens_skip_comments() {
        assert_eq!(token_texts("-- note\nx = 1 -- trailing"), vec!["x", "=", "1"]);
        assert!(token_texts("").is_empty());
    }

    #[test]
    fn test_token_text_is_capped() {
        let source = format!("local {} = 1", "y".repeat(50));
        let tree = LuaSyntaxChecker::new().parse(&source).unwrap();
        let name = tokens(tree.root_node())[1];
        assert_eq!(token_text(&source, name).len(), NEAR_MAX_CHARS);
    }

    #[test]
    fn test_unknown_states_accept_everything() {
        let language: Language = tree_sitter_lua::LANGUAGE.into();
        assert!(accepts(&language, 0, 1));
        assert!(accepts(&language, u16::MAX, 1));
    }

    #[test]
    fn test_outcome_is_valid() {
        assert!(ParseOutcome::Valid.is_valid());
        let invalid = ParseOutcome::Invalid(SyntaxError {
            row: 0,
            byte_column: 0,
            byte_offset: 0,
            kind: SyntaxErrorKind::Unexpected,
            message: "unexpected symbol near '<eof>'".to_string(),
        });
        assert!(!invalid.is_valid());
    }
}

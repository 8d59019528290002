//! Tree-sitter parsing and symbol extraction.
//!
//! Wraps the PHP grammar behind a small parse boundary and walks the
//! resulting syntax tree to discover the three declaration shapes the index
//! cares about: free function definitions, class declarations, and
//! `define()` calls introducing global constants. Everything the tree
//! contains beyond those shapes is ignored.
//!
//! The visitor appends into a [`SymbolIndex`] handed in by the caller; it
//! holds no state of its own.

use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::docblock::DocBlock;
use crate::index::SymbolIndex;
use crate::types::{ParameterInfo, Suggestion, SymbolKind};

/// The callee name that introduces a global constant. Matched
/// case-sensitively, like the runtime resolves it.
const DEFINE_BUILTIN: &str = "define";

// ---------------------------------------------------------------------------
// Parse boundary
// ---------------------------------------------------------------------------

/// A file could not be turned into a usable syntax tree.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The parser returned no tree at all.
    #[error("parser produced no syntax tree")]
    NoTree,

    /// The tree contains syntax errors.
    #[error("syntax error near line {line}")]
    Syntax { line: usize },
}

/// A structurally malformed declaration the visitor cannot safely
/// interpret. Fatal for the containing file only.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("define() at line {line} is missing its {which} argument")]
    MissingArgument { line: usize, which: &'static str },

    /// `define($name, ...)` with a computed name. The original indexer never
    /// guarded this either; the file is skipped rather than guessed at.
    #[error("define() at line {line} has a non-literal name")]
    DynamicName { line: usize },
}

/// Return the Tree-sitter grammar for PHP source files.
fn grammar() -> Language {
    tree_sitter_php::LANGUAGE_PHP.into()
}

/// Create a new [`Parser`] configured for PHP.
pub fn get_parser() -> Parser {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar())
        .expect("Error loading grammar: ABI version mismatch");
    parser
}

/// Parse PHP source text into a syntax tree.
///
/// A tree containing error nodes counts as a parse failure: a half-parsed
/// file would index an arbitrary subset of its declarations, so the whole
/// file is rejected instead.
pub fn parse_source(source: &str) -> Result<Tree, ParseError> {
    let mut parser = get_parser();
    let tree = parser.parse(source.as_bytes(), None).ok_or(ParseError::NoTree)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ParseError::Syntax {
            line: first_error_line(root),
        });
    }
    Ok(tree)
}

/// Locate the first error or missing node, for the diagnostic line number.
fn first_error_line(node: Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_position().row + 1;
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i as u32)
            && child.has_error()
        {
            return first_error_line(child);
        }
    }
    node.start_position().row + 1
}

// ---------------------------------------------------------------------------
// Symbol extraction
// ---------------------------------------------------------------------------

/// Walk a parsed tree and append a suggestion for every recognized
/// declaration to `index`.
///
/// Traversal is post-order, so the collections grow in tree-visitation
/// order. Declarations whose doc comment carries `@ignore` are dropped.
pub fn extract_symbols(
    tree: &Tree,
    source: &str,
    index: &mut SymbolIndex,
) -> Result<(), ExtractError> {
    walk_node(tree.root_node(), source.as_bytes(), index)
}

/// Decide whether a declaration should be indexed at all.
///
/// `@ignore` in the attached doc comment suppresses the record; everything
/// else, including the complete absence of a comment, is indexed.
pub fn should_index(doc: Option<&DocBlock>) -> bool {
    doc.map_or(true, |d| !d.has_tag("ignore"))
}

fn walk_node(node: Node, src: &[u8], index: &mut SymbolIndex) -> Result<(), ExtractError> {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i as u32) {
            walk_node(child, src, index)?;
        }
    }

    match node.kind() {
        "function_definition" => visit_function(node, src, index),
        "function_call_expression" if is_define_call(node, src) => {
            visit_define(node, src, index)
        }
        "class_declaration" => visit_class(node, src, index),
        _ => Ok(()),
    }
}

/// True when a call expression's callee is the bare name `define`.
fn is_define_call(node: Node, src: &[u8]) -> bool {
    node.child_by_field_name("function")
        .map_or(false, |f| f.kind() == "name" && node_text(f, src) == DEFINE_BUILTIN)
}

// ---------------------------------------------------------------------------
// Declaration visitors
// ---------------------------------------------------------------------------

fn visit_function(node: Node, src: &[u8], index: &mut SymbolIndex) -> Result<(), ExtractError> {
    let Some(name) = field_text(node, "name", src) else {
        return Ok(());
    };

    let doc = attached_doc(node, src);
    if !should_index(doc.as_ref()) {
        return Ok(());
    }

    let params = collect_parameters(node, src);
    let right_label = params
        .iter()
        .map(ParameterInfo::render)
        .collect::<Vec<_>>()
        .join(" ");

    let mut description = String::new();
    let mut left_label = String::new();
    if let Some(doc) = &doc {
        description = doc.short_description().to_string();
        left_label = doc.return_types().join("|");
        if let Some(since) = doc.since()
            && !since.is_empty()
        {
            description = format!("{description} Since v{since}");
        }
    }

    index.add_function(Suggestion {
        text: name.to_string(),
        kind: SymbolKind::Function,
        description,
        left_label,
        right_label,
    });
    Ok(())
}

fn visit_define(node: Node, src: &[u8], index: &mut SymbolIndex) -> Result<(), ExtractError> {
    let doc = attached_doc(node, src);
    if !should_index(doc.as_ref()) {
        return Ok(());
    }

    let line = node.start_position().row + 1;
    let args = node
        .child_by_field_name("arguments")
        .ok_or(ExtractError::MissingArgument { line, which: "name" })?;

    let name_node =
        argument_value(args, 0).ok_or(ExtractError::MissingArgument { line, which: "name" })?;
    let name =
        string_literal_content(name_node, src).ok_or(ExtractError::DynamicName { line })?;

    let value_node =
        argument_value(args, 1).ok_or(ExtractError::MissingArgument { line, which: "value" })?;

    index.add_constant(Suggestion {
        text: name,
        kind: SymbolKind::Constant,
        description: doc.map_or_else(String::new, |d| d.short_description().to_string()),
        left_label: literal_type(value_node).to_string(),
        right_label: literal_value(value_node, src),
    });
    Ok(())
}

fn visit_class(node: Node, src: &[u8], index: &mut SymbolIndex) -> Result<(), ExtractError> {
    let Some(name) = field_text(node, "name", src) else {
        return Ok(());
    };

    let doc = attached_doc(node, src);
    if !should_index(doc.as_ref()) {
        return Ok(());
    }

    index.add_class(Suggestion {
        text: name.to_string(),
        kind: SymbolKind::Class,
        description: doc.map_or_else(String::new, |d| d.short_description().to_string()),
        left_label: String::new(),
        right_label: base_class_name(node, src).unwrap_or_default(),
    });
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Get the text content of a node.
fn node_text<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Find a child by its field name and return its text.
fn field_text<'a>(node: Node, field: &str, src: &'a [u8]) -> Option<&'a str> {
    node.child_by_field_name(field).map(|n| node_text(n, src))
}

/// The doc comment attached to a declaration: the nearest preceding named
/// sibling when that sibling is a comment. Call expressions sit inside an
/// `expression_statement`, so the lookup climbs through one.
fn attached_doc(node: Node, src: &[u8]) -> Option<DocBlock> {
    let mut current = node;
    loop {
        if let Some(prev) = current.prev_named_sibling() {
            return (prev.kind() == "comment").then(|| DocBlock::parse(node_text(prev, src)));
        }
        let parent = current.parent()?;
        if parent.kind() != "expression_statement" {
            return None;
        }
        current = parent;
    }
}

/// Build [`ParameterInfo`] for every formal parameter of a function.
fn collect_parameters(node: Node, src: &[u8]) -> Vec<ParameterInfo> {
    let mut params = Vec::new();
    let Some(list) = node.child_by_field_name("parameters") else {
        return params;
    };
    for i in 0..list.named_child_count() {
        if let Some(param) = list.named_child(i as u32)
            && let Some(name_node) = param.child_by_field_name("name")
        {
            let name = node_text(name_node, src)
                .trim_start_matches('$')
                .to_string();
            let ty = param
                .child_by_field_name("type")
                .map(|t| {
                    let t = node_text(t, src);
                    t.strip_prefix('\\').unwrap_or(t).to_string()
                })
                .unwrap_or_default();
            params.push(ParameterInfo {
                name,
                has_default: param.child_by_field_name("default_value").is_some(),
                ty,
            });
        }
    }
    params
}

/// The i-th positional argument's expression node.
fn argument_value(args: Node, i: u32) -> Option<Node> {
    let mut seen = 0u32;
    for j in 0..args.named_child_count() {
        if let Some(child) = args.named_child(j as u32)
            && child.kind() == "argument"
        {
            if seen == i {
                return child.named_child(0);
            }
            seen += 1;
        }
    }
    None
}

/// The content of a string literal node, quotes removed. `None` for any
/// other node shape.
fn string_literal_content(node: Node, src: &[u8]) -> Option<String> {
    match node.kind() {
        "string" | "encapsed_string" => Some(strip_quotes(node_text(node, src)).to_string()),
        _ => None,
    }
}

fn strip_quotes(text: &str) -> &str {
    let inner = text
        .strip_prefix('\'')
        .or_else(|| text.strip_prefix('"'))
        .unwrap_or(text);
    inner
        .strip_suffix('\'')
        .or_else(|| inner.strip_suffix('"'))
        .unwrap_or(inner)
}

/// The inferred type label for a constant's defining value. Only boolean
/// and string literals are classified; everything else stays untyped.
fn literal_type(node: Node) -> &'static str {
    match node.kind() {
        "boolean" => "bool",
        "string" | "encapsed_string" => "string",
        _ => "",
    }
}

/// A display rendition of a constant's defining literal; empty when the
/// value is not a scalar literal.
fn literal_value(node: Node, src: &[u8]) -> String {
    match node.kind() {
        "string" | "encapsed_string" => strip_quotes(node_text(node, src)).to_string(),
        "boolean" | "integer" | "float" => node_text(node, src).to_string(),
        _ => String::new(),
    }
}

/// The short name of a class's first listed parent, without its namespace
/// prefix.
fn base_class_name(node: Node, src: &[u8]) -> Option<String> {
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i as u32)
            && child.kind() == "base_clause"
            && let Some(base) = child.named_child(0)
        {
            let full = node_text(base, src);
            return full.rsplit('\\').next().map(str::to_string);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

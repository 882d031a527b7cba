//! Read-only semantic model of a fully bound package.
//!
//! The host compiler owns the real syntax/semantic trees. What crosses the
//! plugin boundary is this flattened, immutable view: a node arena indexed
//! by [`NodeId`], a module-level constant table, and one [`CompiledUnit`]
//! per source file. Back-references in the host's tree (symbol-to-declaration
//! links) are pre-resolved into [`NodeKind::ConstRef`] entries, so the view
//! is a plain tree with no cycles.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A source position: file, 1-based line, 1-based column.
///
/// Spans order by (file, line, column); this is the collector's final
/// diagnostic sort key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Source file the span points into.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl SourceSpan {
    /// Create a span.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Index of a node in a model's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One argument of a bound call expression.
///
/// `name` is present for named arguments; positional arguments carry `None`
/// and are matched to declared parameters by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Declared parameter/field name, if the call used a named argument.
    pub name: Option<String>,
    /// The argument's expression node.
    pub value: NodeId,
}

impl Argument {
    /// A named argument (`field = expr`).
    pub fn named(name: impl Into<String>, value: NodeId) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    /// A positional argument.
    pub fn positional(value: NodeId) -> Self {
        Self { name: None, value }
    }
}

/// The kinds of bound expression this view distinguishes.
///
/// Anything the analysis has no use for arrives as [`NodeKind::Opaque`]:
/// binary expressions, function results, unresolved symbols. The engine
/// treats those as statically unknown rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// An integer literal.
    IntLiteral(i64),
    /// A decimal literal.
    DecimalLiteral(f64),
    /// A string literal.
    StringLiteral(String),
    /// A boolean literal.
    BooleanLiteral(bool),
    /// An identifier the binder resolved to a module-level constant.
    ConstRef(String),
    /// A reference to a host type, by fully-qualified name.
    TypeRef(String),
    /// A bound call expression with its fully-qualified callee symbol.
    Call {
        /// Fully-qualified symbol of the invoked constructor/function.
        symbol: String,
        /// Arguments in source order.
        args: Vec<Argument>,
    },
    /// Any expression shape this view does not model.
    Opaque,
}

/// One node of the flattened semantic tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticNode {
    /// What the node is.
    pub kind: NodeKind,
    /// Where the expression appears in source.
    pub span: SourceSpan,
}

/// One compiled source file of the package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledUnit {
    /// Source file name, relative to the package root.
    pub file: String,
    /// Top-level expression roots of the unit, in source order.
    pub roots: Vec<NodeId>,
}

/// The fully bound, read-only view of one package compilation.
///
/// Built once by [`ModelBuilder`], then shared immutably with analysis
/// passes. Node lookup is fallible so a malformed model surfaces as a
/// classifiable fault, not a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticModel {
    nodes: Vec<SemanticNode>,
    constants: HashMap<String, NodeId>,
    units: Vec<CompiledUnit>,
}

impl SemanticModel {
    /// Start building a model.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    /// Resolve a node id.
    pub fn node(&self, id: NodeId) -> Result<&SemanticNode> {
        self.nodes.get(id.index()).ok_or(Error::DanglingNode { id })
    }

    /// Look up the initializer of a module-level constant.
    pub fn constant(&self, name: &str) -> Option<NodeId> {
        self.constants.get(name).copied()
    }

    /// The package's compiled units.
    pub fn units(&self) -> &[CompiledUnit] {
        &self.units
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// One-shot builder for [`SemanticModel`].
///
/// Host adapters translate their bound tree into the flattened view through
/// this builder; tests use it to assemble fixture models directly.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    nodes: Vec<SemanticNode>,
    constants: HashMap<String, NodeId>,
    units: Vec<CompiledUnit>,
}

impl ModelBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the arena and return its id.
    pub fn node(&mut self, kind: NodeKind, span: SourceSpan) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SemanticNode { kind, span });
        id
    }

    /// Register a module-level constant with the given initializer node.
    ///
    /// Fails if the name is already defined; the binder never produces two
    /// constants with the same name in one module.
    pub fn define_constant(&mut self, name: impl Into<String>, init: NodeId) -> Result<()> {
        let name = name.into();
        if self.constants.contains_key(&name) {
            return Err(Error::DuplicateConstant { name });
        }
        self.constants.insert(name, init);
        Ok(())
    }

    /// Add a compiled unit with its top-level expression roots.
    pub fn unit(&mut self, file: impl Into<String>, roots: Vec<NodeId>) {
        self.units.push(CompiledUnit {
            file: file.into(),
            roots,
        });
    }

    /// Finish building; the model is immutable from here on.
    pub fn finish(self) -> SemanticModel {
        SemanticModel {
            nodes: self.nodes,
            constants: self.constants,
            units: self.units,
        }
    }
}

//! Symbolic expressions: identified, annotated wrappers around AST roots.
//!
//! A [`SymbolicExpression`] is the unit every instruction-semantics and
//! taint-propagation step produces: one definition event in the analysis
//! trace. It pairs a DAG root handle with a process-unique numeric id, a
//! classification (register definition, memory definition, or volatile
//! temporary), a taint flag, a free-form comment, and the origin
//! descriptors of the machine location it defines.
//!
//! Expression ids are allocated by the surrounding engine, never here; the
//! id is the cross-reference key other expressions and exported formulas
//! use (`ref!<id>` in solver mode, `ref_<id>` in script mode), which is
//! why it is immutable after construction.

use std::fmt;

use log::debug;

use crate::context::{AstContext, RepresentationMode};
use crate::error::{Error, Result};
use crate::operand::{MemoryAccess, Register};
use crate::reference::NodeId;

/// What a symbolic expression represents.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExpressionKind {
    /// A free-standing temporary value.
    Volatile,
    /// A CPU register definition.
    Register,
    /// A memory-cell definition.
    Memory,
}

/// A symbolic expression of the analysis trace.
///
/// Cloning an expression copies every field by value; the `ast` handle
/// still aliases the same node in the [`AstContext`] arena, so clones share
/// the subtree until one of them is mutated through [`set_ast`][Self::set_ast].
///
/// The default value is the null-formula state: no AST attached. Every
/// accessor that needs the formula fails on it with
/// [`Error::UndefinedExpression`]; only [`is_symbolized`][Self::is_symbolized]
/// treats it as plain "not symbolic".
#[derive(Debug, Clone)]
pub struct SymbolicExpression {
    ast: Option<NodeId>,
    id: u64,
    kind: ExpressionKind,
    tainted: bool,
    comment: String,
    origin_register: Register,
    origin_memory: MemoryAccess,
}

impl Default for SymbolicExpression {
    fn default() -> Self {
        Self {
            ast: None,
            id: 0,
            kind: ExpressionKind::Volatile,
            tainted: false,
            comment: String::new(),
            origin_register: Register::default(),
            origin_memory: MemoryAccess::default(),
        }
    }
}

impl SymbolicExpression {
    /// Wrap the AST rooted at `node` as expression `id`.
    ///
    /// Taint starts false and both origin descriptors start empty; callers
    /// that define a register or memory cell set the matching descriptor
    /// afterwards.
    pub fn new(node: NodeId, id: u64, kind: ExpressionKind, comment: impl Into<String>) -> Self {
        Self {
            ast: Some(node),
            id,
            kind,
            tainted: false,
            comment: comment.into(),
            origin_register: Register::default(),
            origin_memory: MemoryAccess::default(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ExpressionKind {
        self.kind
    }
    pub fn set_kind(&mut self, kind: ExpressionKind) {
        self.kind = kind;
    }

    pub fn is_register(&self) -> bool {
        self.kind == ExpressionKind::Register
    }
    pub fn is_memory(&self) -> bool {
        self.kind == ExpressionKind::Memory
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn is_tainted(&self) -> bool {
        self.tainted
    }
    /// The taint flag is computed by the taint engine; it is only stored
    /// here.
    pub fn set_tainted(&mut self, tainted: bool) {
        self.tainted = tainted;
    }

    /// Register this expression defines, meaningful when the kind is
    /// [`ExpressionKind::Register`]. Kind and origin are kept consistent by
    /// the caller; setting one does not validate the other.
    pub fn origin_register(&self) -> &Register {
        &self.origin_register
    }
    pub fn set_origin_register(&mut self, register: Register) {
        self.origin_register = register;
    }

    /// Memory cell this expression defines, meaningful when the kind is
    /// [`ExpressionKind::Memory`].
    pub fn origin_memory(&self) -> &MemoryAccess {
        &self.origin_memory
    }
    pub fn set_origin_memory(&mut self, memory: MemoryAccess) {
        self.origin_memory = memory;
    }

    /// The root of the attached formula.
    ///
    /// # Errors
    ///
    /// [`Error::UndefinedExpression`] if no formula is attached.
    pub fn ast(&self) -> Result<NodeId> {
        self.ast.ok_or(Error::UndefinedExpression("ast"))
    }

    /// A freshly duplicated copy of the formula: a deep structural clone,
    /// decoupled from all sharing with the original subtree.
    ///
    /// # Errors
    ///
    /// [`Error::UndefinedExpression`] if no formula is attached.
    pub fn new_ast(&self, ctx: &AstContext) -> Result<NodeId> {
        let node = self.ast.ok_or(Error::UndefinedExpression("new_ast"))?;
        Ok(ctx.duplicate(node))
    }

    /// Replace the formula in place.
    ///
    /// Every parent pointing at the old root is re-pointed at `node`, and
    /// `node` is re-initialized, so all structures that referenced the old
    /// subtree transparently observe the new one. The expression id does
    /// not change: consumers holding the id see the updated formula.
    ///
    /// # Errors
    ///
    /// [`Error::UndefinedExpression`] if no formula is attached: the
    /// parent set is read off the old root, so there is nothing to relink
    /// from.
    pub fn set_ast(&mut self, ctx: &AstContext, node: NodeId) -> Result<()> {
        let old = self.ast.ok_or(Error::UndefinedExpression("set_ast"))?;
        debug!("set_ast(id = {}, old = {}, new = {})", self.id, old, node);
        ctx.relink(old, node);
        self.ast = Some(node);
        Ok(())
    }

    /// Whether the formula contains a symbolic variable. A null formula is
    /// "not symbolic" by convention, not an error.
    pub fn is_symbolized(&self, ctx: &AstContext) -> bool {
        match self.ast {
            Some(node) => ctx.is_symbolized(node),
            None => false,
        }
    }

    /// The id rendered in the active dialect: `ref!<id>` in solver mode,
    /// `ref_<id>` in script mode.
    pub fn formatted_id(&self, ctx: &AstContext) -> Result<String> {
        if self.ast.is_none() {
            return Err(Error::UndefinedExpression("formatted_id"));
        }
        Ok(match ctx.mode()? {
            RepresentationMode::Smt => format!("ref!{}", self.id),
            RepresentationMode::Python => format!("ref_{}", self.id),
        })
    }

    /// The comment rendered in the active dialect (`; <comment>` or
    /// `# <comment>`), or the empty string if there is no comment.
    pub fn formatted_comment(&self, ctx: &AstContext) -> Result<String> {
        if self.ast.is_none() {
            return Err(Error::UndefinedExpression("formatted_comment"));
        }
        if self.comment.is_empty() {
            return Ok(String::new());
        }
        Ok(match ctx.mode()? {
            RepresentationMode::Smt => format!("; {}", self.comment),
            RepresentationMode::Python => format!("# {}", self.comment),
        })
    }

    /// The full definition line in the active dialect.
    ///
    /// Solver mode produces an SMT-LIB definition,
    /// `(define-fun ref!<id> () (_ BitVec <n>) <formula>)`; script mode an
    /// assignment, `ref_<id> = <formula>`. A non-empty comment is appended
    /// in either dialect.
    pub fn formatted_expression(&self, ctx: &AstContext) -> Result<String> {
        let node = self
            .ast
            .ok_or(Error::UndefinedExpression("formatted_expression"))?;
        let mut out = match ctx.mode()? {
            RepresentationMode::Smt => format!(
                "(define-fun {} () (_ BitVec {}) {})",
                self.formatted_id(ctx)?,
                ctx.size(node),
                ctx.render(node)?
            ),
            RepresentationMode::Python => {
                format!("{} = {}", self.formatted_id(ctx)?, ctx.render(node)?)
            }
        };
        if !self.comment.is_empty() {
            out.push(' ');
            out.push_str(&self.formatted_comment(ctx)?);
        }
        Ok(out)
    }

    /// `Display` adapter; formats exactly like
    /// [`formatted_expression`][Self::formatted_expression], surfacing
    /// failures as `fmt::Error`.
    pub fn display<'a>(&'a self, ctx: &'a AstContext) -> ExpressionDisplay<'a> {
        ExpressionDisplay { expr: self, ctx }
    }
}

/// See [`SymbolicExpression::display`].
pub struct ExpressionDisplay<'a> {
    expr: &'a SymbolicExpression,
    ctx: &'a AstContext,
}

impl fmt::Display for ExpressionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.expr.formatted_expression(self.ctx).map_err(|_| fmt::Error)?;
        write!(f, "{}", text)
    }
}

//! AST to text conversion.
//!
//! Every node renders in one of two dialects, selected by the context's
//! representation mode:
//!
//! - **solver mode**: SMT-LIB s-expressions, e.g. `(bvadd x (_ bv1 8))`,
//!   ready to be pasted into a solver script;
//! - **script mode**: scripting-style infix, e.g. `(x + 0x1)`, matching
//!   what a tracer emits for replay in a dynamic-analysis script.
//!
//! The dispatch on the mode is exhaustive; an unrecognized raw mode value
//! fails the rendering instead of falling back to either dialect. The
//! checked entry point is [`AstContext::render`]; [`AstContext::display`]
//! is the `Display`-adapter variant for `format!`-style call sites.

use std::fmt;

use num_bigint::BigUint;

use crate::context::{AstContext, RepresentationMode};
use crate::error::Result;
use crate::node::AstOp;
use crate::reference::NodeId;

impl AstContext {
    /// Render the subtree rooted at `id` in the active representation mode.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRepresentationMode`][crate::error::Error] if the
    /// stored mode value is unrecognized.
    pub fn render(&self, id: NodeId) -> Result<String> {
        let mode = self.mode()?;
        let mut out = String::new();
        self.write_node(&mut out, id, mode)
            .expect("writing to a String cannot fail");
        Ok(out)
    }

    /// `Display` adapter for a node; formats like [`AstContext::render`],
    /// surfacing an unrecognized mode as `fmt::Error`.
    pub fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { ctx: self, id }
    }

    fn write_node(
        &self,
        w: &mut impl fmt::Write,
        id: NodeId,
        mode: RepresentationMode,
    ) -> fmt::Result {
        let op = self.op(id);
        let children = self.children(id);
        match mode {
            RepresentationMode::Smt => self.write_smt(w, &op, &children),
            RepresentationMode::Python => self.write_python(w, &op, &children),
        }
    }

    fn write_smt(&self, w: &mut impl fmt::Write, op: &AstOp, children: &[NodeId]) -> fmt::Result {
        let mode = RepresentationMode::Smt;
        match op {
            AstOp::Bv(value, size) => write!(w, "(_ bv{} {})", value, size),
            AstOp::Variable(name, _) => write!(w, "{}", name),
            AstOp::Reference(id) => write!(w, "ref!{}", id),
            AstOp::Extract(hi, lo) => {
                write!(w, "((_ extract {} {}) ", hi, lo)?;
                self.write_node(w, children[0], mode)?;
                write!(w, ")")
            }
            _ => {
                let name = match op {
                    AstOp::BvAdd => "bvadd",
                    AstOp::BvSub => "bvsub",
                    AstOp::BvMul => "bvmul",
                    AstOp::BvAnd => "bvand",
                    AstOp::BvOr => "bvor",
                    AstOp::BvXor => "bvxor",
                    AstOp::BvNot => "bvnot",
                    AstOp::BvNeg => "bvneg",
                    AstOp::Concat => "concat",
                    AstOp::Ite => "ite",
                    AstOp::Equal => "=",
                    AstOp::Bvult => "bvult",
                    _ => unreachable!("leaf ops are handled above"),
                };
                write!(w, "({}", name)?;
                for &child in children {
                    write!(w, " ")?;
                    self.write_node(w, child, mode)?;
                }
                write!(w, ")")
            }
        }
    }

    fn write_python(
        &self,
        w: &mut impl fmt::Write,
        op: &AstOp,
        children: &[NodeId],
    ) -> fmt::Result {
        let mode = RepresentationMode::Python;
        match op {
            AstOp::Bv(value, _) => write!(w, "{:#x}", value),
            AstOp::Variable(name, _) => write!(w, "{}", name),
            AstOp::Reference(id) => write!(w, "ref_{}", id),
            AstOp::BvNot => {
                write!(w, "(~")?;
                self.write_node(w, children[0], mode)?;
                write!(w, ")")
            }
            AstOp::BvNeg => {
                write!(w, "(-")?;
                self.write_node(w, children[0], mode)?;
                write!(w, ")")
            }
            AstOp::Extract(hi, lo) => {
                // ((a >> lo) & mask), the scripting equivalent of a slice.
                let mask = (BigUint::from(1u32) << (hi - lo + 1)) - 1u32;
                write!(w, "((")?;
                self.write_node(w, children[0], mode)?;
                write!(w, " >> {}) & {:#x})", lo, mask)
            }
            AstOp::Concat => {
                write!(w, "((")?;
                self.write_node(w, children[0], mode)?;
                write!(w, " << {}) | ", self.size(children[1]))?;
                self.write_node(w, children[1], mode)?;
                write!(w, ")")
            }
            AstOp::Ite => {
                write!(w, "(")?;
                self.write_node(w, children[1], mode)?;
                write!(w, " if ")?;
                self.write_node(w, children[0], mode)?;
                write!(w, " else ")?;
                self.write_node(w, children[2], mode)?;
                write!(w, ")")
            }
            _ => {
                let symbol = match op {
                    AstOp::BvAdd => "+",
                    AstOp::BvSub => "-",
                    AstOp::BvMul => "*",
                    AstOp::BvAnd => "&",
                    AstOp::BvOr => "|",
                    AstOp::BvXor => "^",
                    AstOp::Equal => "==",
                    AstOp::Bvult => "<",
                    _ => unreachable!("non-infix ops are handled above"),
                };
                write!(w, "(")?;
                self.write_node(w, children[0], mode)?;
                write!(w, " {} ", symbol)?;
                self.write_node(w, children[1], mode)?;
                write!(w, ")")
            }
        }
    }
}

/// See [`AstContext::display`].
pub struct NodeDisplay<'a> {
    ctx: &'a AstContext,
    id: NodeId,
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = self.ctx.mode().map_err(|_| fmt::Error)?;
        self.ctx.write_node(f, self.id, mode)
    }
}

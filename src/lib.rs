//! # symdag-rs: Symbolic Expression DAGs in Rust
//!
//! **`symdag-rs`** is the symbolic-expression layer of a dynamic
//! binary-analysis engine: a manager-centric library for representing
//! symbolic values as nodes in a shared abstract-syntax DAG, together with
//! their identity, provenance, taint status, and dual textual renderings.
//!
//! ## What is a symbolic expression?
//!
//! Each instruction that writes a register or memory cell produces one
//! **symbolic expression**: an identified wrapper around a bit-vector
//! formula. Formulas are nodes in a directed acyclic graph --- shared
//! sub-expressions have multiple parents --- so replacing one expression's
//! formula in place (after constant folding, say) must transparently
//! update every structure that pointed at the old subtree.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All node construction and mutation
//!   go through the [`AstContext`][crate::context::AstContext] manager.
//!   Nodes are referenced by lightweight [`NodeId`][crate::reference::NodeId]
//!   handles; "parents" is a per-node set of handles, so in-place subtree
//!   replacement is a handle rewrite, never pointer surgery.
//! - **Stable Identity**: A [`SymbolicExpression`][crate::expression::SymbolicExpression]
//!   keeps its caller-assigned numeric id across every mutation, so traces
//!   and exported formulas can cross-reference it indefinitely.
//! - **Dual-Mode Formatting**: Every expression renders as an SMT-LIB
//!   definition (`(define-fun ref!7 () (_ BitVec 8) ...)`) or as a
//!   scripting-style assignment (`ref_7 = ...`), selected by the context's
//!   representation mode. Unrecognized modes fail loudly; there is no
//!   silent default.
//! - **Typed Errors**: The two failure kinds --- undefined expression and
//!   invalid representation mode --- are plain enum variants callers can
//!   match on.
//!
//! ## Basic Usage
//!
//! ```rust
//! use symdag_rs::context::AstContext;
//! use symdag_rs::expression::{ExpressionKind, SymbolicExpression};
//!
//! // 1. Initialize the manager
//! let ctx = AstContext::new();
//!
//! // 2. Build a formula: x + 1 over 8 bits
//! let x = ctx.variable("x", 8).unwrap();
//! let one = ctx.bv(1u32, 8).unwrap();
//! let sum = ctx.bvadd(x, one).unwrap();
//!
//! // 3. Wrap it as expression #7 (ids come from the caller)
//! let expr = SymbolicExpression::new(sum, 7, ExpressionKind::Volatile, "tmp");
//!
//! // 4. Export it
//! assert_eq!(
//!     expr.formatted_expression(&ctx).unwrap(),
//!     "(define-fun ref!7 () (_ BitVec 8) (bvadd x (_ bv1 8))) ; tmp"
//! );
//! ```
//!
//! ## Core Components
//!
//! - **[`context`]**: The heart of the library. Contains the
//!   [`AstContext`][crate::context::AstContext] manager, node
//!   constructors, parent tracking, and relinking.
//! - **[`expression`]**: The [`SymbolicExpression`][crate::expression::SymbolicExpression]
//!   wrapper: identity, kind, taint, origins, formatting.
//! - **[`print`]**: AST rendering in both dialects.

pub mod context;
pub mod error;
pub mod expression;
pub mod node;
pub mod operand;
pub mod print;
pub mod reference;

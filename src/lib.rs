//! # Introduction
//!
//! gck is a compiler front end for a small imperative language with more than
//! one surface syntax. Every syntax compiles to the same AST, so the stages
//! after it never need to know which one a program was written in.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Driver → (evaluator, code generator, TUI)
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds the AST with precedence
//!    climbing; [`parser::Syntax`] picks the surface rules.
//! 2. [`frontend`]: the [`frontend::Frontend`] contract: compile text, read the
//!    tree and its source lines back, one compile at a time per driver.
//! 3. [`rational`]: exact values for decimal literals.
//! 4. [`errors`]: lexical, syntax and driver errors, rendered as
//!    `line L,S-E: message`.
//! 5. [`ui`]: ratatui-based AST viewer; not part of the stable library API.
//!
//! ## Language
//!
//! Statements: assignment, `while`, `if`/`else`, braced blocks, bare
//! expressions. Myrmidon ends a statement at the line break, sml with `;`.
//! Expressions: `+ - * /`, unary minus,
//! parentheses, integer and decimal literals, identifiers. Conditions compare
//! two expressions with `< > <= >= == !=`.

pub mod errors;
pub mod frontend;
pub mod parser;
pub mod rational;
pub mod ui;

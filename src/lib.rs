#![no_std]
#![forbid(unsafe_code)]

//! Term representation and reduction engine for
//! the lambda-Pi calculus modulo rewriting.
//!
//! The crate implements the core of a logical framework:
//! terms with name-capturing binders,
//! higher-order pattern matching of user rewrite rules,
//! weak-head, head and strong normalisation on
//! a reference-sharing abstract machine, and
//! conversion (equality modulo β-reduction and rewriting).
//! The surface parser, the elaborator, the bidirectional type checker and
//! the proof shell are external collaborators:
//! they drive the engine through
//! the term constructors, the normalisers, and [`eq_modulo`].
//!
//! Neither confluence nor termination of the user's rule system is
//! checked here; a non-terminating rule system can make
//! normalisation and conversion diverge.
//!
//! The following example declares unary numbers with addition and
//! verifies that 2 + 2 reduces to 4.
//!
//! ~~~
//! use redukti::{lift, Rhs, Rule, Symbol, TBox, Term, Var};
//!
//! // N : Type
//! let nat = Symbol::new(Vec::new(), "N".to_string(), true, Term::Type);
//! let n = Term::Symb(nat.clone());
//! // N → N and N → N → N
//! let x = Var::new("_");
//! let unary = TBox::prod(lift(&n), lift(&n).bind(&x)).unbox();
//! let x = Var::new("_");
//! let binary = TBox::prod(lift(&n), lift(&unary).bind(&x)).unbox();
//!
//! // 0 : N,  s : N → N,  def add : N → N → N
//! let zero = Symbol::new(Vec::new(), "0".to_string(), true, n.clone());
//! let succ = Symbol::new(Vec::new(), "s".to_string(), true, unary);
//! let add = Symbol::new(Vec::new(), "add".to_string(), false, binary);
//! let s = |t: Term| Term::Symb(succ.clone()).apply(vec![t]);
//!
//! // add 0 $x ⟶ $x
//! let lhs = vec![
//!     Term::Symb(zero.clone()),
//!     TBox::patt(Some(0), "x", Vec::new()).unbox(),
//! ];
//! let rhs = Rhs::new(1, TBox::tenv(0, "x", Vec::new()).unbox());
//! add.add_rule(Rule::new(lhs, rhs))?;
//!
//! // add (s $x) $y ⟶ s (add $x $y)
//! let lhs = vec![
//!     s(TBox::patt(Some(0), "x", Vec::new()).unbox()),
//!     TBox::patt(Some(1), "y", Vec::new()).unbox(),
//! ];
//! let sum = Term::Symb(add.clone()).apply(vec![
//!     TBox::tenv(0, "x", Vec::new()).unbox(),
//!     TBox::tenv(1, "y", Vec::new()).unbox(),
//! ]);
//! add.add_rule(Rule::new(lhs, Rhs::new(2, s(sum))))?;
//!
//! let two = s(s(Term::Symb(zero.clone())));
//! let four = s(s(s(s(Term::Symb(zero)))));
//! let t = Term::Symb(add).apply(vec![two.clone(), two]);
//! assert!(t.snf() == four);
//! # Ok::<_, redukti::error::RuleError>(())
//! ~~~

extern crate alloc;
#[macro_use]
extern crate log;

pub mod bind;
pub mod debug;
pub mod error;
pub mod kernel;
mod meta;
mod rule;
mod stack;
mod subst;
mod symbol;
mod symbols;
pub mod term;

pub use bind::{lift, Binder, MBinder, TBox, Var};
pub use error::Error;
pub use kernel::{eq_modulo, eval, Config, Strategy};
pub use meta::{occurs, Meta, Metas, Name};
pub use rule::{Rhs, Rule};
pub use symbol::Symbol;
pub use symbols::Symbols;
pub use term::{distinct_vars, to_var, RTerm, Term, TermC, TermEnv};

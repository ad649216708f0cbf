//! Rewrite rules.

use crate::bind::MBinder;
use crate::term::{RTerm, Term, TermC, TermEnv};
use alloc::{rc::Rc, vec::Vec};
use core::fmt::{self, Display};

/// Rewrite rule attached to a symbol.
///
/// The head symbol is implicit: a rule belongs to the symbol it is
/// [attached](crate::Symbol::add_rule) to, and `lhs` holds only the
/// argument patterns.  A rule can fire once at least `arity` arguments
/// are on the machine stack.
#[derive(Clone, Debug)]
pub struct Rule {
    /// Argument patterns.
    pub lhs: Vec<Term>,
    /// Number of arguments consumed when the rule fires.
    pub arity: usize,
    /// Right-hand side.
    pub rhs: Rhs,
}

impl Rule {
    pub fn new(lhs: Vec<Term>, rhs: Rhs) -> Self {
        let arity = lhs.len();
        Self { lhs, arity, rhs }
    }
}

/// Right-hand side of a rewrite rule:
/// a multi-binder from pattern slots to a term.
///
/// The body refers to slots through free environment holes;
/// every slot it mentions must carry a `Some` index
/// in some pattern hole of the left-hand side.
#[derive(Clone, Debug)]
pub struct Rhs {
    arity: usize,
    body: Term,
}

impl Rhs {
    /// Create a right-hand side over `arity` pattern slots.
    pub fn new(arity: usize, body: Term) -> Self {
        Self { arity, body }
    }

    /// Number of pattern slots.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Substitute the slots with a matching environment.
    pub(crate) fn subst(&self, env: &[Option<Rc<MBinder>>]) -> Term {
        fill(&self.body, env)
    }
}

fn fill(t: &Term, env: &[Option<Rc<MBinder>>]) -> Term {
    match t {
        Term::Comb(c) => {
            let c2 = match &**c {
                TermC::TEnv(TermEnv::Free(slot, _), e) => {
                    let b = match &env[*slot] {
                        Some(b) => b.clone(),
                        None => unreachable!("pattern slot {} unbound after match", slot),
                    };
                    let e = e.iter().map(|u| fill(u, env)).collect();
                    TermC::TEnv(TermEnv::Filled(b), e)
                }
                TermC::Appl(head, arg) => TermC::Appl(fill(head, env), fill(arg, env)),
                TermC::Prod(dom, b) => {
                    TermC::Prod(fill(dom, env), b.map_body(|body| fill(body, env)))
                }
                TermC::Abst(dom, b) => {
                    TermC::Abst(fill(dom, env), b.map_body(|body| fill(body, env)))
                }
                TermC::Meta(m, e) => {
                    TermC::Meta(m.clone(), e.iter().map(|u| fill(u, env)).collect())
                }
                TermC::Patt(..) => unreachable!("pattern hole in rule right-hand side"),
                TermC::TEnv(te, e) => {
                    TermC::TEnv(te.clone(), e.iter().map(|u| fill(u, env)).collect())
                }
            };
            Term::Comb(RTerm::new(c2))
        }
        _ => t.clone(),
    }
}

impl Display for Rhs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.body.fmt(f)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for p in &self.lhs {
            write!(f, "{} ", p)?;
        }
        write!(f, "⟶ {}", self.rhs)
    }
}

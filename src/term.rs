//! Terms for the lambda-Pi calculus modulo rewriting.

use crate::bind::{Binder, MBinder, Var};
use crate::meta::Meta;
use crate::symbol::Symbol;
use alloc::{rc::Rc, string::String, vec::Vec};
use core::fmt::{self, Display};

/// Term for the lambda-Pi calculus modulo rewriting.
///
/// Atomic terms live at the top level;
/// composite terms are shared behind an [`RTerm`] pointer,
/// making `clone` a constant-time operation.
#[derive(Clone, Debug)]
pub enum Term {
    /// Bound variable.
    Vari(Var),
    /// The sort of types.
    Type,
    /// The sort of kinds.
    Kind,
    /// User-declared symbol.
    Symb(Symbol),
    /// Composite term.
    Comb(RTerm),
}

/// Pointer to a shared composite term.
#[derive(Clone, Debug)]
pub struct RTerm(Rc<TermC>);

/// Composite term.
#[derive(Clone, Debug)]
pub enum TermC {
    /// Dependent product.
    Prod(Term, Binder),
    /// Abstraction.
    Abst(Term, Binder),
    /// Application to one argument; n-ary applications are left-nested.
    Appl(Term, Term),
    /// Metavariable applied to an environment supplying its free variables.
    Meta(Meta, Vec<Term>),
    /// Pattern hole; occurs only in rule left-hand sides.
    ///
    /// The slot is the index of the hole in the matching environment;
    /// it is absent iff the hole is unused in the right-hand side and
    /// linear in the left-hand side.
    /// The environment is a sequence of distinct bound variables
    /// delimiting which variables the matched term may mention.
    Patt(Option<usize>, String, Vec<Term>),
    /// Environment hole; occurs only in rule right-hand sides.
    TEnv(TermEnv, Vec<Term>),
}

/// Content of an environment hole.
#[derive(Clone, Debug)]
pub enum TermEnv {
    /// Free multi-binder variable, to be filled by the matcher.
    Free(usize, Rc<str>),
    /// Filled multi-binder.
    Filled(Rc<MBinder>),
    /// Empty marker.
    Empty,
}

impl RTerm {
    /// Create a term pointer from a composite term.
    pub fn new(tm: TermC) -> Self {
        Self(Rc::new(tm))
    }

    /// Compare the memory addresses of two term pointers.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl core::ops::Deref for RTerm {
    type Target = TermC;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Term {
    /// Expand instantiated metavariables and filled environment holes
    /// at the root of the term.
    ///
    /// All reduction and conversion code matches on the unfolded term,
    /// never on the raw one.
    pub fn unfold(&self) -> Term {
        let mut t = self.clone();
        loop {
            let next = match &t {
                Term::Comb(c) => match &**c {
                    TermC::Meta(m, env) => m.value().map(|b| b.msubst(env)),
                    TermC::TEnv(TermEnv::Filled(b), env) => Some(b.msubst(env)),
                    _ => None,
                },
                _ => None,
            };
            match next {
                Some(u) => t = u,
                None => return t,
            }
        }
    }

    /// Strip a left-nested application into its head and its arguments.
    pub fn get_args(&self) -> (Term, Vec<Term>) {
        let mut args = Vec::new();
        let mut t = self.unfold();
        loop {
            let head = match &t {
                Term::Comb(c) => match &**c {
                    TermC::Appl(head, arg) => {
                        args.push(arg.clone());
                        head.unfold()
                    }
                    _ => break,
                },
                _ => break,
            };
            t = head;
        }
        args.reverse();
        (t, args)
    }

    /// Apply some arguments to the term, left-nesting the applications.
    pub fn apply(self, args: Vec<Term>) -> Self {
        args.into_iter()
            .fold(self, |head, arg| Term::Comb(RTerm::new(TermC::Appl(head, arg))))
    }

    /// Compare the memory addresses of two term pointers.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Type, Term::Type) | (Term::Kind, Term::Kind) => true,
            (Term::Vari(x), Term::Vari(y)) => x == y,
            (Term::Symb(s1), Term::Symb(s2)) => s1 == s2,
            (Term::Comb(c1), Term::Comb(c2)) => RTerm::ptr_eq(c1, c2),
            _ => false,
        }
    }
}

/// Unwrap a variable term.
///
/// Panics on any other term; callers must have established the shape before.
pub fn to_var(t: &Term) -> Var {
    match t.unfold() {
        Term::Vari(x) => x,
        t => panic!("variable expected, found {}", t),
    }
}

/// If `ts` is a sequence of pairwise distinct variables, return them.
pub fn distinct_vars(ts: &[Term]) -> Option<Vec<Var>> {
    let mut xs = Vec::with_capacity(ts.len());
    for t in ts {
        match t.unfold() {
            Term::Vari(x) if !xs.contains(&x) => xs.push(x),
            _ => return None,
        }
    }
    Some(xs)
}

/// Syntactic equality up to renaming of bound variables.
///
/// Metavariables are compared by handle; this is pure equality,
/// an uninstantiated metavariable is never instantiated here.
impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self.unfold(), other.unfold()) {
            (Term::Type, Term::Type) | (Term::Kind, Term::Kind) => true,
            (Term::Vari(x), Term::Vari(y)) => x == y,
            (Term::Symb(s1), Term::Symb(s2)) => s1 == s2,
            (Term::Comb(c1), Term::Comb(c2)) => match (&*c1, &*c2) {
                (TermC::Prod(a1, b1), TermC::Prod(a2, b2))
                | (TermC::Abst(a1, b1), TermC::Abst(a2, b2)) => {
                    a1 == a2 && b1.eq_under(b2, |t, u| t == u)
                }
                (TermC::Appl(f1, u1), TermC::Appl(f2, u2)) => f1 == f2 && u1 == u2,
                (TermC::Meta(m1, e1), TermC::Meta(m2, e2)) => m1 == m2 && e1 == e2,
                (TermC::Patt(..), _) | (_, TermC::Patt(..)) => {
                    unreachable!("pattern hole outside rewrite rule")
                }
                (TermC::TEnv(..), _) | (_, TermC::TEnv(..)) => {
                    unreachable!("environment hole outside rewrite rule")
                }
                _ => false,
            },
            _ => false,
        }
    }
}

impl Eq for Term {}

pub(crate) fn fmt_appl(head: &Term, args: &[Term], f: &mut fmt::Formatter) -> fmt::Result {
    let parens = !args.is_empty();
    if parens {
        write!(f, "(")?;
    }
    write!(f, "{}", head)?;
    for arg in args {
        write!(f, " {}", arg)?;
    }
    if parens {
        write!(f, ")")?;
    }
    Ok(())
}

fn fmt_env(env: &[Term], f: &mut fmt::Formatter) -> fmt::Result {
    let mut iter = env.iter();
    if let Some(t) = iter.next() {
        write!(f, "[{}", t)?;
        for t in iter {
            write!(f, "; {}", t)?;
        }
        write!(f, "]")?;
    }
    Ok(())
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let t = self.unfold();
        match &t {
            Term::Vari(x) => x.fmt(f),
            Term::Type => write!(f, "Type"),
            Term::Kind => write!(f, "Kind"),
            Term::Symb(s) => s.fmt(f),
            Term::Comb(c) => match &**c {
                TermC::Appl(..) => {
                    let (head, args) = t.get_args();
                    fmt_appl(&head, &args, f)
                }
                TermC::Prod(dom, b) => {
                    let (_, cod) = b.unbind();
                    write!(f, "(Π {} : {}. {})", b.name(), dom, cod)
                }
                TermC::Abst(dom, b) => {
                    let (_, body) = b.unbind();
                    write!(f, "(λ {} : {}. {})", b.name(), dom, body)
                }
                TermC::Meta(m, env) => {
                    m.fmt(f)?;
                    fmt_env(env, f)
                }
                TermC::Patt(_, name, env) => {
                    write!(f, "${}", name)?;
                    fmt_env(env, f)
                }
                TermC::TEnv(TermEnv::Free(_, name), env) => {
                    write!(f, "${}", name)?;
                    fmt_env(env, f)
                }
                TermC::TEnv(_, env) => {
                    write!(f, "$_")?;
                    fmt_env(env, f)
                }
            },
        }
    }
}

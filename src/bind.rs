//! Variables, binders, and the boxed term construction layer.
//!
//! Variable identity is a globally fresh number:
//! two variables are equal iff they stem from the same binder opening.
//! A binder stores the identity of its bound variable together with the body,
//! so opening, substitution and binding never consult names;
//! names are display hints only.
//! Because identities are never reused,
//! substitution cannot capture a variable,
//! and alpha-equivalence reduces to
//! opening two binders with the same fresh variable.
//!
//! Binders are formed exclusively through the boxed layer:
//! [`lift`] re-opens every binder of a concrete term under fresh variables,
//! yielding a [`TBox`] that can be composed with the smart constructors and
//! closed over a variable with [`TBox::bind`].

use crate::meta::Meta;
use crate::symbol::Symbol;
use crate::term::{RTerm, Term, TermC, TermEnv};
use alloc::{rc::Rc, string::String, vec::Vec};
use core::fmt::{self, Display};
use core::hash::{Hash, Hasher};
use core::sync::atomic::{AtomicU64, Ordering::Relaxed};

static FRESH: AtomicU64 = AtomicU64::new(0);

/// Variable with kernel-managed identity.
///
/// ~~~
/// # use redukti::Var;
/// let x = Var::new("x");
/// assert_eq!(x, x.clone());
/// assert_ne!(x, Var::new("x"));
/// ~~~
#[derive(Clone, Debug)]
pub struct Var {
    id: u64,
    name: Rc<str>,
}

impl Var {
    /// Create a variable distinct from all previously created ones.
    pub fn new(name: &str) -> Self {
        let id = FRESH.fetch_add(1, Relaxed);
        let name = Rc::from(name);
        Self { id, name }
    }

    /// Create a distinct variable with the same name hint.
    fn refresh(&self) -> Self {
        let id = FRESH.fetch_add(1, Relaxed);
        let name = self.name.clone();
        Self { id, name }
    }

    /// Preferred display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Var {}

impl Hash for Var {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// Single-variable binder.
#[derive(Clone, Debug)]
pub struct Binder {
    var: Var,
    body: Term,
}

impl Binder {
    pub(crate) fn new(var: Var, body: Term) -> Self {
        Self { var, body }
    }

    /// Preferred display name of the bound variable.
    pub fn name(&self) -> &str {
        self.var.name()
    }

    /// Apply the binder to an argument.
    pub fn subst(&self, arg: &Term) -> Term {
        self.body.subst_var(&self.var, arg)
    }

    /// Open the binder with a fresh variable.
    pub fn unbind(&self) -> (Var, Term) {
        let x = self.var.refresh();
        let body = self.subst(&Term::Vari(x.clone()));
        (x, body)
    }

    /// Open two binders with the same fresh variable.
    pub fn unbind2(&self, other: &Self) -> (Var, Term, Term) {
        let x = self.var.refresh();
        let arg = Term::Vari(x.clone());
        (x, self.subst(&arg), other.subst(&arg))
    }

    /// Compare two binders with the given body predicate.
    pub fn eq_under(&self, other: &Self, eq: impl FnOnce(&Term, &Term) -> bool) -> bool {
        let (_, t, u) = self.unbind2(other);
        eq(&t, &u)
    }

    /// Whether the binder owns the occurrences of `x`.
    pub(crate) fn binds(&self, x: &Var) -> bool {
        self.var == *x
    }

    pub(crate) fn var(&self) -> &Var {
        &self.var
    }

    pub(crate) fn body(&self) -> &Term {
        &self.body
    }

    /// Rebuild the binder around a transformed body.
    pub(crate) fn map_body(&self, f: impl FnOnce(&Term) -> Term) -> Self {
        Self::new(self.var.clone(), f(&self.body))
    }
}

/// Binder abstracting an ordered array of variables at once.
#[derive(Clone, Debug)]
pub struct MBinder {
    vars: Vec<Var>,
    body: Term,
}

impl MBinder {
    pub(crate) fn new(vars: Vec<Var>, body: Term) -> Self {
        Self { vars, body }
    }

    /// Number of abstracted variables.
    pub fn arity(&self) -> usize {
        self.vars.len()
    }

    /// Substitute all bound variables simultaneously.
    pub fn msubst(&self, args: &[Term]) -> Term {
        assert_eq!(
            args.len(),
            self.vars.len(),
            "environment length differs from binder arity"
        );
        if self.vars.is_empty() {
            self.body.clone()
        } else {
            self.body.msubst_vars(&self.vars, args)
        }
    }

    /// Open the binder with fresh variables.
    pub fn unbind(&self) -> (Vec<Var>, Term) {
        let xs: Vec<Var> = self.vars.iter().map(Var::refresh).collect();
        let args: Vec<Term> = xs.iter().cloned().map(Term::Vari).collect();
        let body = self.msubst(&args);
        (xs, body)
    }

    /// Whether all variables of the body are captured by the binder.
    pub fn is_closed(&self) -> bool {
        let mut bound = self.vars.clone();
        self.body.closed_wrt(&mut bound)
    }
}

/// Term under construction.
///
/// The smart constructors compose boxes;
/// [`TBox::bind`] and [`TBox::bind_mvar`] are the only way to form binders.
/// [`TBox::unbox`] materialises the box back into a concrete term.
#[derive(Clone)]
pub struct TBox(Term);

impl TBox {
    /// Variable occurrence.
    pub fn vari(x: &Var) -> Self {
        Self(Term::Vari(x.clone()))
    }

    /// The sort of types.
    pub fn typ() -> Self {
        Self(Term::Type)
    }

    /// The sort of kinds.
    pub fn kind() -> Self {
        Self(Term::Kind)
    }

    /// Symbol occurrence.
    pub fn symb(s: &Symbol) -> Self {
        Self(Term::Symb(s.clone()))
    }

    /// Dependent product.
    pub fn prod(dom: Self, cod: Binder) -> Self {
        Self(Term::Comb(RTerm::new(TermC::Prod(dom.0, cod))))
    }

    /// Abstraction.
    pub fn abst(dom: Self, body: Binder) -> Self {
        Self(Term::Comb(RTerm::new(TermC::Abst(dom.0, body))))
    }

    /// Application of one argument.
    pub fn appl(head: Self, arg: Self) -> Self {
        Self(Term::Comb(RTerm::new(TermC::Appl(head.0, arg.0))))
    }

    /// Metavariable applied to its environment.
    pub fn meta(m: &Meta, env: Vec<Self>) -> Self {
        let env = env.into_iter().map(|b| b.0).collect();
        Self(Term::Comb(RTerm::new(TermC::Meta(m.clone(), env))))
    }

    /// Pattern hole, for rule left-hand sides.
    pub fn patt(slot: Option<usize>, name: &str, env: Vec<Self>) -> Self {
        let env = env.into_iter().map(|b| b.0).collect();
        let name = String::from(name);
        Self(Term::Comb(RTerm::new(TermC::Patt(slot, name, env))))
    }

    /// Free environment hole, for rule right-hand sides.
    pub fn tenv(slot: usize, name: &str, env: Vec<Self>) -> Self {
        let env = env.into_iter().map(|b| b.0).collect();
        let te = TermEnv::Free(slot, Rc::from(name));
        Self(Term::Comb(RTerm::new(TermC::TEnv(te, env))))
    }

    /// Capture `x` in the boxed term, yielding a binder.
    pub fn bind(self, x: &Var) -> Binder {
        Binder::new(x.clone(), self.0)
    }

    /// Capture an array of variables at once.
    pub fn bind_mvar(self, xs: &[Var]) -> MBinder {
        MBinder::new(xs.to_vec(), self.0)
    }

    /// Materialise the box into a concrete term.
    pub fn unbox(self) -> Term {
        self.0
    }
}

/// Turn a concrete term into a box,
/// re-opening every binder under a fresh variable.
///
/// ~~~
/// # use redukti::{lift, TBox, Term, Var};
/// let x = Var::new("x");
/// let id = TBox::abst(TBox::typ(), TBox::vari(&x).bind(&x)).unbox();
/// assert!(lift(&id).unbox() == id);
/// ~~~
pub fn lift(t: &Term) -> TBox {
    TBox(refresh(t))
}

fn refresh(t: &Term) -> Term {
    let t = t.unfold();
    match &t {
        Term::Comb(c) => {
            let c2 = match &**c {
                TermC::Appl(head, arg) => TermC::Appl(refresh(head), refresh(arg)),
                TermC::Prod(dom, b) => TermC::Prod(refresh(dom), refresh_binder(b)),
                TermC::Abst(dom, b) => TermC::Abst(refresh(dom), refresh_binder(b)),
                TermC::Meta(m, env) => {
                    TermC::Meta(m.clone(), env.iter().map(refresh).collect())
                }
                TermC::Patt(slot, name, env) => {
                    TermC::Patt(*slot, name.clone(), env.iter().map(refresh).collect())
                }
                TermC::TEnv(te, env) => {
                    TermC::TEnv(te.clone(), env.iter().map(refresh).collect())
                }
            };
            Term::Comb(RTerm::new(c2))
        }
        _ => t,
    }
}

fn refresh_binder(b: &Binder) -> Binder {
    let (x, body) = b.unbind();
    Binder::new(x, refresh(&body))
}

//! Metavariables and their registry.

use crate::bind::MBinder;
use crate::error::MetaError as Error;
use crate::term::{Term, TermC};
use alloc::collections::BTreeSet;
use alloc::{rc::Rc, string::String};
use core::cell::RefCell;
use core::fmt::{self, Display};
use core::hash::{Hash, Hasher};
use fnv::FnvHashMap;

/// Metavariable name: either user-defined or internal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Name {
    User(String),
    Internal(u64),
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::User(s) => s.fmt(f),
            Self::Internal(i) => i.fmt(f),
        }
    }
}

/// Shared handle to a metavariable.
///
/// Equality is handle identity.
/// The value cell is written at most once, by [`Meta::instantiate`].
#[derive(Clone, Debug)]
pub struct Meta(Rc<MetaCell>);

#[derive(Debug)]
struct MetaCell {
    name: Name,
    arity: usize,
    ty: RefCell<Term>,
    value: RefCell<Option<Rc<MBinder>>>,
}

impl Meta {
    fn new(name: Name, ty: Term, arity: usize) -> Self {
        Self(Rc::new(MetaCell {
            name,
            arity,
            ty: RefCell::new(ty),
            value: RefCell::new(None),
        }))
    }

    pub fn name(&self) -> &Name {
        &self.0.name
    }

    /// Expected environment length.
    pub fn arity(&self) -> usize {
        self.0.arity
    }

    pub fn get_type(&self) -> Term {
        self.0.ty.borrow().clone()
    }

    pub fn set_type(&self, ty: Term) {
        *self.0.ty.borrow_mut() = ty
    }

    /// Whether the metavariable is not yet instantiated.
    pub fn unset(&self) -> bool {
        self.0.value.borrow().is_none()
    }

    /// Return the instantiation, if any.
    pub fn value(&self) -> Option<Rc<MBinder>> {
        self.0.value.borrow().clone()
    }

    /// Instantiate the metavariable with a multi-binder of its arity.
    ///
    /// Callers are responsible for the occurs check beforehand;
    /// see [`occurs`].
    pub fn instantiate(&self, body: MBinder) -> Result<(), Error> {
        assert_eq!(
            body.arity(),
            self.0.arity,
            "instantiation arity differs from metavariable arity"
        );
        let mut value = self.0.value.borrow_mut();
        if value.is_some() {
            return Err(Error::Instantiated);
        }
        *value = Some(Rc::new(body));
        Ok(())
    }
}

impl PartialEq for Meta {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Meta {}

impl Hash for Meta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::ptr::hash(Rc::as_ptr(&self.0), state)
    }
}

impl Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "?{}", self.0.name)
    }
}

/// Cofinite set of unused internal ids.
///
/// Ids at or above the frontier are free, as are all released ids;
/// allocation always takes the least free id.
#[derive(Default)]
struct FreeIds {
    frontier: u64,
    released: BTreeSet<u64>,
}

impl FreeIds {
    fn take_least(&mut self) -> u64 {
        match self.released.iter().next().copied() {
            Some(id) => {
                self.released.remove(&id);
                id
            }
            None => {
                let id = self.frontier;
                self.frontier += 1;
                id
            }
        }
    }
}

/// Registry of metavariables.
///
/// The registry is an explicit value rather than process state,
/// so independent elaboration sessions do not observe each other.
#[derive(Default)]
pub struct Metas {
    by_name: FnvHashMap<String, Meta>,
    by_id: FnvHashMap<u64, Meta>,
    free: FreeIds,
}

impl Metas {
    pub fn new() -> Self {
        Default::default()
    }

    /// Create an uninstantiated metavariable with a user-defined name.
    pub fn fresh_user(&mut self, name: String, ty: Term, arity: usize) -> Result<Meta, Error> {
        if self.by_name.contains_key(&name) {
            return Err(Error::Reintroduction(name));
        }
        let m = Meta::new(Name::User(name.clone()), ty, arity);
        self.by_name.insert(name, m.clone());
        Ok(m)
    }

    /// Create an uninstantiated metavariable under the least free internal id.
    pub fn fresh(&mut self, ty: Term, arity: usize) -> Meta {
        let id = self.free.take_least();
        let m = Meta::new(Name::Internal(id), ty, arity);
        self.by_id.insert(id, m.clone());
        m
    }

    pub fn find(&self, name: &Name) -> Option<Meta> {
        match name {
            Name::User(s) => self.by_name.get(s).cloned(),
            Name::Internal(i) => self.by_id.get(i).cloned(),
        }
    }

    pub fn exists(&self, name: &Name) -> bool {
        self.find(name).is_some()
    }
}

/// Whether `m` occurs anywhere in `t`.
///
/// Binders are walked by opening them once;
/// the values of other metavariables are not entered.
pub fn occurs(m: &Meta, t: &Term) -> bool {
    match t {
        Term::Comb(c) => match &**c {
            TermC::Meta(n, env) => n == m || env.iter().any(|u| occurs(m, u)),
            TermC::Appl(head, arg) => occurs(m, head) || occurs(m, arg),
            TermC::Prod(dom, b) | TermC::Abst(dom, b) => {
                occurs(m, dom) || {
                    let (_, body) = b.unbind();
                    occurs(m, &body)
                }
            }
            TermC::Patt(_, _, env) | TermC::TEnv(_, env) => env.iter().any(|u| occurs(m, u)),
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::{TBox, Var};
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn internal_ids_start_at_least() {
        let mut metas = Metas::new();
        let m0 = metas.fresh(Term::Type, 0);
        let m1 = metas.fresh(Term::Type, 0);
        assert_eq!(m0.name(), &Name::Internal(0));
        assert_eq!(m1.name(), &Name::Internal(1));
        assert!(metas.exists(&Name::Internal(0)));
        assert!(!metas.exists(&Name::Internal(2)));
        assert_eq!(metas.find(&Name::Internal(1)), Some(m1));
    }

    #[test]
    fn user_names_are_unique() {
        let mut metas = Metas::new();
        let m = metas.fresh_user("x".to_string(), Term::Type, 0).unwrap();
        assert_eq!(metas.find(&Name::User("x".to_string())), Some(m));
        let err = metas.fresh_user("x".to_string(), Term::Type, 1);
        assert_eq!(err.unwrap_err(), Error::Reintroduction("x".to_string()));
    }

    #[test]
    fn instantiation_is_write_once() {
        let mut metas = Metas::new();
        let m = metas.fresh(Term::Type, 0);
        assert!(m.unset());
        m.instantiate(TBox::typ().bind_mvar(&[])).unwrap();
        assert!(!m.unset());
        let again = m.instantiate(TBox::kind().bind_mvar(&[]));
        assert_eq!(again, Err(Error::Instantiated));
        // instantiated metavariables unfold to their value
        let t = TBox::meta(&m, Vec::new()).unbox();
        assert!(t == Term::Type);
    }

    #[test]
    fn instantiation_substitutes_the_environment() {
        let mut metas = Metas::new();
        let m = metas.fresh(Term::Type, 1);
        let x = Var::new("x");
        m.instantiate(TBox::appl(TBox::vari(&x), TBox::typ()).bind_mvar(&[x]))
            .unwrap();
        let t = TBox::meta(&m, vec![TBox::kind()]).unbox();
        let u = Term::Kind.apply(vec![Term::Type]);
        assert!(t == u);
    }

    #[test]
    fn occurs_walks_under_binders() {
        let mut metas = Metas::new();
        let m = metas.fresh(Term::Type, 0);
        let n = metas.fresh(Term::Type, 0);
        let x = Var::new("x");
        let body = TBox::appl(TBox::vari(&x), TBox::meta(&m, Vec::new()));
        let t = TBox::abst(TBox::typ(), body.bind(&x)).unbox();
        assert!(occurs(&m, &t));
        assert!(!occurs(&n, &t));
    }
}

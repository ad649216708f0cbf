//! Substitution for terms.
//!
//! All traversals unfold instantiated metavariables and
//! filled environment holes on the way down,
//! so the substituted term never hides an occurrence behind a value cell.
//! A node is rebuilt only if one of its children changed.

use crate::bind::Var;
use crate::term::{RTerm, Term, TermC};
use alloc::vec::Vec;

impl Term {
    /// Replace the occurrences of `x` by `u`.
    ///
    /// Occurrences under a binder that rebinds `x` belong to that binder
    /// and are left alone.
    pub(crate) fn subst_var(&self, x: &Var, u: &Term) -> Term {
        let t = self.unfold();
        match &t {
            Term::Vari(y) if y == x => u.clone(),
            Term::Comb(c) => {
                let c2 = match &**c {
                    TermC::Appl(head, arg) => {
                        let head2 = head.subst_var(x, u);
                        let arg2 = arg.subst_var(x, u);
                        if head2.ptr_eq(head) && arg2.ptr_eq(arg) {
                            return t.clone();
                        }
                        TermC::Appl(head2, arg2)
                    }
                    TermC::Prod(dom, b) => {
                        TermC::Prod(dom.subst_var(x, u), subst_binder(b, x, u))
                    }
                    TermC::Abst(dom, b) => {
                        TermC::Abst(dom.subst_var(x, u), subst_binder(b, x, u))
                    }
                    TermC::Meta(m, env) => {
                        let env = env.iter().map(|a| a.subst_var(x, u)).collect();
                        TermC::Meta(m.clone(), env)
                    }
                    TermC::Patt(slot, name, env) => {
                        let env = env.iter().map(|a| a.subst_var(x, u)).collect();
                        TermC::Patt(*slot, name.clone(), env)
                    }
                    TermC::TEnv(te, env) => {
                        let env = env.iter().map(|a| a.subst_var(x, u)).collect();
                        TermC::TEnv(te.clone(), env)
                    }
                };
                Term::Comb(RTerm::new(c2))
            }
            _ => t.clone(),
        }
    }

    /// Replace the occurrences of all `xs` simultaneously by the
    /// corresponding `us`.
    pub(crate) fn msubst_vars(&self, xs: &[Var], us: &[Term]) -> Term {
        let t = self.unfold();
        match &t {
            Term::Vari(y) => match xs.iter().position(|x| x == y) {
                Some(i) => us[i].clone(),
                None => t.clone(),
            },
            Term::Comb(c) => {
                let c2 = match &**c {
                    TermC::Appl(head, arg) => {
                        let head2 = head.msubst_vars(xs, us);
                        let arg2 = arg.msubst_vars(xs, us);
                        if head2.ptr_eq(head) && arg2.ptr_eq(arg) {
                            return t.clone();
                        }
                        TermC::Appl(head2, arg2)
                    }
                    TermC::Prod(dom, b) => {
                        TermC::Prod(dom.msubst_vars(xs, us), msubst_binder(b, xs, us))
                    }
                    TermC::Abst(dom, b) => {
                        TermC::Abst(dom.msubst_vars(xs, us), msubst_binder(b, xs, us))
                    }
                    TermC::Meta(m, env) => {
                        let env = env.iter().map(|a| a.msubst_vars(xs, us)).collect();
                        TermC::Meta(m.clone(), env)
                    }
                    TermC::Patt(slot, name, env) => {
                        let env = env.iter().map(|a| a.msubst_vars(xs, us)).collect();
                        TermC::Patt(*slot, name.clone(), env)
                    }
                    TermC::TEnv(te, env) => {
                        let env = env.iter().map(|a| a.msubst_vars(xs, us)).collect();
                        TermC::TEnv(te.clone(), env)
                    }
                };
                Term::Comb(RTerm::new(c2))
            }
            _ => t.clone(),
        }
    }

    /// Whether all variables of the term occur in `bound`.
    pub(crate) fn closed_wrt(&self, bound: &mut Vec<Var>) -> bool {
        let t = self.unfold();
        match &t {
            Term::Vari(y) => bound.contains(y),
            Term::Comb(c) => match &**c {
                TermC::Appl(head, arg) => head.closed_wrt(bound) && arg.closed_wrt(bound),
                TermC::Prod(dom, b) | TermC::Abst(dom, b) => {
                    dom.closed_wrt(bound) && {
                        bound.push(b.var().clone());
                        let closed = b.body().closed_wrt(bound);
                        bound.pop();
                        closed
                    }
                }
                TermC::Meta(_, env) | TermC::Patt(_, _, env) | TermC::TEnv(_, env) => {
                    env.iter().all(|a| a.closed_wrt(bound))
                }
            },
            _ => true,
        }
    }
}

fn subst_binder(b: &crate::bind::Binder, x: &Var, u: &Term) -> crate::bind::Binder {
    if b.binds(x) {
        b.clone()
    } else {
        b.map_body(|body| body.subst_var(x, u))
    }
}

fn msubst_binder(b: &crate::bind::Binder, xs: &[Var], us: &[Term]) -> crate::bind::Binder {
    match xs.iter().position(|x| b.binds(x)) {
        None => b.map_body(|body| body.msubst_vars(xs, us)),
        Some(i) => {
            // the binder shadows one of the substituted variables
            let mut xs2 = xs.to_vec();
            let mut us2 = us.to_vec();
            xs2.remove(i);
            us2.remove(i);
            if xs2.is_empty() {
                b.clone()
            } else {
                b.map_body(|body| body.msubst_vars(&xs2, &us2))
            }
        }
    }
}

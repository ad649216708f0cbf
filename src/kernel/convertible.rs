//! Convertibility checking modulo β-reduction and rewriting.

use super::reduce::State;
use crate::debug;
use crate::term::{Term, TermC};
use alloc::vec::Vec;

type Constraint = (Term, Term);

/// Return true if the two terms are convertible
/// modulo β-reduction and rewriting.
///
/// The procedure maintains a worklist of constraints and
/// is decidable only up to the user's rewrite system:
/// a non-terminating rule system can make it diverge.
///
/// ~~~
/// # use redukti::{eq_modulo, TBox, Term, Var};
/// let x = Var::new("x");
/// let id = TBox::abst(TBox::typ(), TBox::vari(&x).bind(&x)).unbox();
/// let t = id.apply(Vec::from([Term::Type]));
/// assert!(eq_modulo(&t, &Term::Type));
/// assert!(!eq_modulo(&t, &Term::Kind));
/// ~~~
pub fn eq_modulo(t1: &Term, t2: &Term) -> bool {
    let mut cns = Vec::from([(t1.clone(), t2.clone())]);
    loop {
        match cns.pop() {
            Some((c1, c2)) => {
                if debug::conversion() {
                    trace!("convertible: {} ~? {}", c1, c2);
                }
                if c1 != c2 && !step((c1, c2), &mut cns) {
                    break false;
                }
            }
            None => break true,
        }
    }
}

/// Reduce both sides of the constraint to machine state,
/// synchronise their spines, and decompose the heads.
///
/// Return false if the constraint cannot be satisfied;
/// otherwise push the remaining subconstraints onto the worklist.
fn step((c1, c2): Constraint, cns: &mut Vec<Constraint>) -> bool {
    let mut s1 = State::new(c1);
    s1.whnf();
    let mut s2 = State::new(c2);
    s2.whnf();
    // arguments in application order, innermost first
    let a1: Vec<Term> = s1.stack.into_iter().map(|cell| cell.term()).collect();
    let a2: Vec<Term> = s2.stack.into_iter().map(|cell| cell.term()).collect();
    // pair up arguments from the outermost end;
    // surplus innermost arguments are wrapped back onto their head
    let len = core::cmp::min(a1.len(), a2.len());
    let (rest1, args1) = a1.split_at(a1.len() - len);
    let (rest2, args2) = a2.split_at(a2.len() - len);
    let h1 = s1.term.apply(rest1.to_vec());
    let h2 = s2.term.apply(rest2.to_vec());
    for (u1, u2) in args1.iter().zip(args2.iter()).rev() {
        cns.push((u1.clone(), u2.clone()));
    }
    if h1 == h2 {
        return true;
    }
    match (h1.unfold(), h2.unfold()) {
        (Term::Comb(c1), Term::Comb(c2)) => match (&*c1, &*c2) {
            (TermC::Abst(a1, b1), TermC::Abst(a2, b2))
            | (TermC::Prod(a1, b1), TermC::Prod(a2, b2)) => {
                let (_, t1, t2) = b1.unbind2(b2);
                cns.push((a1.clone(), a2.clone()));
                cns.push((t1, t2));
                true
            }
            _ => false,
        },
        _ => false,
    }
}

//! Higher-order pattern matching of rule left-hand sides.

use super::convertible::eq_modulo;
use super::reduce::{RCell, Stack};
use crate::bind::{lift, MBinder, Var};
use crate::debug;
use crate::symbol::Symbol;
use crate::term::{to_var, Term, TermC};
use alloc::{rc::Rc, vec, vec::Vec};

/// Multi-binders bound by the pattern holes of one rule attempt.
type Env = Vec<Option<Rc<MBinder>>>;

/// Match the rules of `s` against the stack in declaration order.
///
/// On the first success, return the instantiated right-hand side and
/// the number of consumed arguments.
pub(crate) fn rewrite(s: &Symbol, stk: &Stack) -> Option<(Term, usize)> {
    let rules = s.rules();
    for rule in rules.iter() {
        if rule.arity > stk.len() {
            continue;
        }
        let mut env: Env = vec![None; rule.rhs.arity()];
        if stk
            .iter()
            .zip(&rule.lhs)
            .all(|(cell, p)| match_pat(&mut env, p, cell))
        {
            if debug::matching() {
                trace!("match: {} {}", s, rule);
            }
            return Some((rule.rhs.subst(&env), rule.arity));
        }
    }
    None
}

/// Match one argument pattern against one argument cell.
///
/// Pattern holes are tried before structural inspection,
/// so that matched arguments are not needlessly forced;
/// every structural clause forces the cell,
/// updating it in place for later inspections.
fn match_pat(env: &mut Env, p: &Term, cell: &RCell) -> bool {
    if let Term::Comb(c) = p {
        if let TermC::Patt(slot, _, e) = &**c {
            return match_hole(env, *slot, e, cell);
        }
    }
    let t = cell.force().unfold();
    match p {
        Term::Vari(x) => matches!(&t, Term::Vari(y) if x == y),
        Term::Symb(s) => matches!(&t, Term::Symb(s2) if s == s2),
        Term::Comb(c) => match (&**c, &t) {
            // domain annotations are not compared
            (TermC::Abst(_, pb), Term::Comb(tc)) => match &**tc {
                TermC::Abst(_, tb) => {
                    let (x, pbody) = pb.unbind();
                    let tbody = tb.subst(&Term::Vari(x));
                    match_pat(env, &pbody, &RCell::new(tbody))
                }
                _ => false,
            },
            (TermC::Appl(p1, p2), Term::Comb(tc)) => match &**tc {
                TermC::Appl(t1, t2) => {
                    match_pat(env, p1, &RCell::new(t1.clone()))
                        && match_pat(env, p2, &RCell::new(t2.clone()))
                }
                _ => false,
            },
            _ => false,
        },
        _ => false,
    }
}

/// Match a pattern hole with environment `e` against an argument cell.
fn match_hole(env: &mut Env, slot: Option<usize>, e: &[Term], cell: &RCell) -> bool {
    if e.is_empty() {
        match slot {
            // wildcard
            None => return true,
            Some(i) if env[i].is_none() => {
                // defer evaluation of the argument
                env[i] = Some(Rc::new(MBinder::new(Vec::new(), cell.term())));
                return true;
            }
            Some(_) => (),
        }
    }
    let t = cell.force();
    if let Some(i) = slot {
        if let Some(b) = env[i].clone() {
            // a nonlinear hole matches iff the arguments are convertible
            return eq_modulo(&b.msubst(e), &t);
        }
    }
    let xs: Vec<Var> = e.iter().map(to_var).collect();
    let b = lift(&t).bind_mvar(&xs);
    // the matched term may only mention the variables of the hole
    if !b.is_closed() {
        return false;
    }
    if let Some(i) = slot {
        env[i] = Some(Rc::new(b));
    }
    true
}

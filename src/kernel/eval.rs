//! Derived normalisation strategies.

use crate::bind::lift;
use crate::term::{RTerm, Term, TermC};

/// Evaluation strategy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// Weak head normal form.
    Whnf,
    /// Head normal form.
    Hnf,
    /// Strong normal form.
    Snf,
}

/// An evaluation request: a strategy and an optional step bound.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub strategy: Strategy,
    /// A bound of zero returns the input unchanged.
    /// Positive bounds are currently unsupported:
    /// the engine logs a warning and returns the input unchanged.
    pub steps: Option<usize>,
}

/// Evaluate a term according to the given configuration.
pub fn eval(cfg: &Config, t: Term) -> Term {
    match cfg.steps {
        Some(0) => t,
        Some(_) => {
            warn!("step-bounded evaluation is not supported; the term is returned unevaluated");
            t
        }
        None => match cfg.strategy {
            Strategy::Whnf => t.whnf(),
            Strategy::Hnf => t.hnf(),
            Strategy::Snf => t.snf(),
        },
    }
}

impl Term {
    /// Return the head normal form of the term:
    /// the weak head normal form with its head fully normalised.
    pub fn hnf(self) -> Self {
        let t = self.whnf();
        if let Term::Comb(c) = &t {
            if let TermC::Appl(head, arg) = &**c {
                let head = head.clone().hnf();
                return Term::Comb(RTerm::new(TermC::Appl(head, arg.clone())));
            }
        }
        t
    }

    /// Return the strong normal form of the term,
    /// normalising every subterm, also under binders.
    pub fn snf(self) -> Self {
        let t = self.whnf();
        match &t {
            Term::Comb(c) => {
                let c2 = match &**c {
                    TermC::Appl(head, arg) => {
                        TermC::Appl(head.clone().snf(), arg.clone().snf())
                    }
                    TermC::Prod(dom, b) => {
                        let (x, cod) = b.unbind();
                        TermC::Prod(dom.clone().snf(), lift(&cod.snf()).bind(&x))
                    }
                    TermC::Abst(dom, b) => {
                        let (x, body) = b.unbind();
                        TermC::Abst(dom.clone().snf(), lift(&body.snf()).bind(&x))
                    }
                    TermC::Meta(m, env) => {
                        let env = env.iter().map(|u| u.clone().snf()).collect();
                        TermC::Meta(m.clone(), env)
                    }
                    TermC::Patt(..) => unreachable!("pattern hole outside rewrite rule"),
                    TermC::TEnv(..) => unreachable!("environment hole outside rewrite rule"),
                };
                Term::Comb(RTerm::new(c2))
            }
            _ => t,
        }
    }
}

//! Reduction to weak head normal form (WHNF), including rewriting.

use super::matching;
use crate::debug;
use crate::stack;
use crate::term::{Term, TermC};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

/// An abstract machine representing arguments applied to a term.
///
/// The stack holds one cell per argument, so that
/// the work of evaluating an argument is shared between
/// all inspections of it during one reduction.
pub struct State {
    pub term: Term,
    pub stack: Stack,
}

/// Arguments of the abstract machine.
pub type Stack = stack::Stack<RCell>;

/// A shared mutable argument cell.
///
/// The only permitted mutation is replacing the content by its WHNF.
#[derive(Clone)]
pub struct RCell(Rc<RefCell<WCell>>);

/// Cell content, tracking whether it was reduced to WHNF yet.
struct WCell {
    term: Term,
    whnfed: bool,
}

impl RCell {
    pub fn new(term: Term) -> Self {
        let whnfed = false;
        Self(Rc::new(RefCell::new(WCell { term, whnfed })))
    }

    /// Current content, without evaluating anything.
    pub fn term(&self) -> Term {
        self.0.borrow().term.clone()
    }

    /// Replace the content by its WHNF if that was not done before,
    /// and return it.
    pub fn force(&self) -> Term {
        if !self.0.borrow().whnfed {
            let t = self.term().whnf();
            let mut cell = self.0.borrow_mut();
            cell.term = t;
            cell.whnfed = true;
        }
        self.term()
    }
}

impl State {
    /// Construct a new state from a term.
    ///
    /// This does not yet evaluate anything.
    pub fn new(term: Term) -> Self {
        Self {
            term,
            stack: Stack::new(),
        }
    }

    /// Evaluate the state to its weak head normal form.
    ///
    /// Applications push their argument onto the stack,
    /// abstractions consume the top of the stack, and
    /// symbols fire the first of their rules that matches the stack.
    pub fn whnf(&mut self) {
        loop {
            let t = self.term.unfold();
            if debug::reduction() {
                trace!("whnf: {}", t);
            }
            match t {
                Term::Comb(c) => match &*c {
                    TermC::Appl(head, arg) => {
                        self.stack.push(RCell::new(arg.clone()));
                        self.term = head.clone();
                    }
                    TermC::Abst(_, b) => match self.stack.pop() {
                        Some(cell) => self.term = b.subst(&cell.term()),
                        None => {
                            self.term = Term::Comb(c.clone());
                            break;
                        }
                    },
                    TermC::Prod(..) | TermC::Meta(..) => {
                        self.term = Term::Comb(c.clone());
                        break;
                    }
                    TermC::Patt(..) => unreachable!("pattern hole outside rewrite rule"),
                    TermC::TEnv(..) => unreachable!("environment hole outside rewrite rule"),
                },
                Term::Symb(s) => match matching::rewrite(&s, &self.stack) {
                    Some((rhs, arity)) => {
                        if debug::reduction() {
                            trace!("rewrite: {} … ⟶ {}", s, rhs);
                        }
                        self.stack.pop_many(arity);
                        self.term = rhs;
                    }
                    None => {
                        self.term = Term::Symb(s);
                        break;
                    }
                },
                t => {
                    self.term = t;
                    break;
                }
            }
        }
    }
}

impl From<State> for Term {
    fn from(state: State) -> Self {
        let args: Vec<Term> = state.stack.into_iter().map(|cell| cell.term()).collect();
        state.term.apply(args)
    }
}

impl Term {
    /// Return the weak head normal form of the term.
    ///
    /// ~~~
    /// # use redukti::{TBox, Term, Var};
    /// let x = Var::new("x");
    /// let id = TBox::abst(TBox::typ(), TBox::vari(&x).bind(&x)).unbox();
    /// let t = id.apply(Vec::from([Term::Type]));
    /// assert!(t.whnf() == Term::Type);
    /// ~~~
    pub fn whnf(self) -> Self {
        let mut state = State::new(self);
        state.whnf();
        Self::from(state)
    }
}

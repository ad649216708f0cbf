use criterion::{criterion_group, criterion_main, Criterion};
use redukti::{lift, Rhs, Rule, Symbol, TBox, Term, Var};

struct Nat {
    nat: Term,
    zero: Symbol,
    succ: Symbol,
}

fn sym(name: &str, constant: bool, ty: Term) -> Symbol {
    Symbol::new(Vec::new(), name.to_string(), constant, ty)
}

fn arrow(dom: &Term, cod: &Term) -> Term {
    let x = Var::new("_");
    TBox::prod(lift(dom), lift(cod).bind(&x)).unbox()
}

fn app(s: &Symbol, args: Vec<Term>) -> Term {
    Term::Symb(s.clone()).apply(args)
}

fn patt(slot: usize, name: &str) -> Term {
    TBox::patt(Some(slot), name, Vec::new()).unbox()
}

fn hole(slot: usize, name: &str) -> Term {
    TBox::tenv(slot, name, Vec::new()).unbox()
}

fn nat() -> Nat {
    let nat = Term::Symb(sym("N", true, Term::Type));
    let zero = sym("0", true, nat.clone());
    let succ = sym("s", true, arrow(&nat, &nat));
    Nat { nat, zero, succ }
}

impl Nat {
    fn num(&self, n: usize) -> Term {
        (0..n).fold(Term::Symb(self.zero.clone()), |t, _| app(&self.succ, vec![t]))
    }
}

fn add_sym(n: &Nat) -> Symbol {
    let add = sym("add", false, arrow(&n.nat, &arrow(&n.nat, &n.nat)));
    let lhs = vec![Term::Symb(n.zero.clone()), patt(0, "x")];
    add.add_rule(Rule::new(lhs, Rhs::new(1, hole(0, "x"))))
        .unwrap();
    let lhs = vec![app(&n.succ, vec![patt(0, "x")]), patt(1, "y")];
    let rhs = app(&n.succ, vec![app(&add, vec![hole(0, "x"), hole(1, "y")])]);
    add.add_rule(Rule::new(lhs, Rhs::new(2, rhs))).unwrap();
    add
}

fn fib_sym(n: &Nat, add: &Symbol) -> Symbol {
    let fib = sym("fib", false, arrow(&n.nat, &n.nat));
    // fib 0 ⟶ 0
    let lhs = vec![Term::Symb(n.zero.clone())];
    fib.add_rule(Rule::new(lhs, Rhs::new(0, n.num(0)))).unwrap();
    // fib (s 0) ⟶ s 0
    let lhs = vec![app(&n.succ, vec![Term::Symb(n.zero.clone())])];
    fib.add_rule(Rule::new(lhs, Rhs::new(0, n.num(1)))).unwrap();
    // fib (s (s $n)) ⟶ add (fib (s $n)) (fib $n)
    let lhs = vec![app(&n.succ, vec![app(&n.succ, vec![patt(0, "n")])])];
    let prev = app(&fib, vec![app(&n.succ, vec![hole(0, "n")])]);
    let rhs = app(add, vec![prev, app(&fib, vec![hole(0, "n")])]);
    fib.add_rule(Rule::new(lhs, Rhs::new(1, rhs))).unwrap();
    fib
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let n = nat();
    let add = add_sym(&n);
    let fib = fib_sym(&n, &add);

    let add64 = app(&add, vec![n.num(64), n.num(64)]);
    let fib12 = app(&fib, vec![n.num(12)]);

    c.bench_function("add64", |b| b.iter(|| add64.clone().snf()));
    c.bench_function("fib12", |b| b.iter(|| fib12.clone().snf()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

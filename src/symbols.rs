//! Maps from strings to shared symbols.

use crate::error::SymbolsError as Error;
use crate::symbol::Symbol;
use alloc::{string::String, vec::Vec};
use core::borrow::Borrow;
use fnv::FnvHashMap;
use nested_modules::Context;

/// Map from names to symbol handles, with module scoping.
///
/// Routing all symbol creation of one process through this table
/// guarantees that equal `(path, name)` pairs resolve to the same handle.
#[derive(Default)]
pub struct Symbols {
    ctx: Context<String, FnvHashMap<String, Symbol>>,
}

impl Symbols {
    pub fn new() -> Self {
        Default::default()
    }

    /// Find the symbol registered under the given path and name.
    pub fn get<S: Borrow<str> + Ord>(&self, path: &[S], name: &S) -> Option<Symbol> {
        self.ctx
            .find(path.iter().map(|p| p.borrow()))
            .filter_map(|module| module.data.get(name.borrow()))
            .next()
            .cloned()
    }

    /// Register a symbol under its name in the current module.
    pub fn insert(&mut self, sym: Symbol) -> Result<Symbol, Error> {
        let name = String::from(sym.name());
        // `insert` returns the previous symbol if the name was taken
        if self.ctx.get_mut().data.insert(name, sym.clone()).is_some() {
            return Err(Error::Reinsertion);
        }
        Ok(sym)
    }

    /// Close all open modules, then open the modules of the given path.
    pub fn set_path(&mut self, path: Vec<String>) {
        while self.ctx.close() {}
        path.into_iter().for_each(|p| self.ctx.open_or_default(p))
    }
}

//  Library for the Semparse semantic parser.
// Copyright (C) 2021 Charles Johnson
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use crate::{
    errors::{SemparseError, SemparseResult},
    value::Value,
};
use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

pub type SharedEnvironment = Rc<RefCell<Environment>>;

/// A scope of symbol bindings with an optional enclosing scope.
#[derive(Default)]
pub struct Environment {
    data: HashMap<String, Value>,
    outer: Option<SharedEnvironment>,
}

impl fmt::Debug for Environment {
    // Closures capture their environment so printing the bindings could recurse forever.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut symbols: Vec<&String> = self.data.keys().collect();
        symbols.sort();
        f.debug_struct("Environment")
            .field("symbols", &symbols)
            .field("has_outer", &self.outer.is_some())
            .finish()
    }
}

impl Environment {
    pub fn new(data: HashMap<String, Value>, outer: Option<SharedEnvironment>) -> Self {
        Self {
            data,
            outer,
        }
    }

    pub fn share(self) -> SharedEnvironment {
        Rc::new(RefCell::new(self))
    }

    /// A new empty scope enclosed by `outer`.
    pub fn child_of(outer: &SharedEnvironment) -> Self {
        Self::new(HashMap::new(), Some(outer.clone()))
    }

    /// Finds the value bound to `symbol` in the innermost scope that binds it.
    pub fn lookup(&self, symbol: &str) -> SemparseResult<Value> {
        match self.data.get(symbol) {
            Some(value) => Ok(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().lookup(symbol),
                None => Err(SemparseError::UnboundSymbol {
                    symbol: symbol.to_string(),
                }),
            },
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.data.contains_key(symbol)
            || self.outer.as_ref().map_or(false, |outer| outer.borrow().contains(symbol))
    }

    /// Binds `symbol` in this scope, shadowing any binding in enclosing scopes.
    pub fn define(&mut self, symbol: impl Into<String>, value: Value) {
        self.data.insert(symbol.into(), value);
    }

    /// Rebinds `symbol` in the innermost scope where it is already bound.
    pub fn assign(&mut self, symbol: &str, value: Value) -> SemparseResult<()> {
        if let Some(slot) = self.data.get_mut(symbol) {
            *slot = value;
            Ok(())
        } else {
            match &self.outer {
                Some(outer) => outer.borrow_mut().assign(symbol, value),
                None => Err(SemparseError::UnboundSymbol {
                    symbol: symbol.to_string(),
                }),
            }
        }
    }
}

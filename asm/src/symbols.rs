use arch::mem;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Predefined,
    Label,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub address: u16,
    pub kind: SymbolKind,
}

/// Name-to-address mapping for one assembly unit. Built once per run:
/// seeded with the predefined architecture symbols, filled with label
/// addresses by pass 1, extended with variables by pass 2.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
    next_var: u16,
}

impl SymbolTable {
    pub fn with_predefined() -> Self {
        let symbols = mem::PREDEFINED
            .iter()
            .map(|(name, address)| {
                let symbol = Symbol {
                    address: *address,
                    kind: SymbolKind::Predefined,
                };
                (name.clone(), symbol)
            })
            .collect();
        SymbolTable {
            symbols,
            next_var: mem::VAR_BASE,
        }
    }

    /// Record a label definition. A name may be defined once; this
    /// includes the predefined names.
    pub fn define_label(&mut self, name: &str, address: u16) -> Result<(), Error> {
        if self.symbols.contains_key(name) {
            return Err(Error::RedefinedLabel(name.to_string()));
        }
        let symbol = Symbol {
            address,
            kind: SymbolKind::Label,
        };
        self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    /// Resolve a symbolic operand. An unseen name is a new variable and
    /// claims the next free RAM slot, so later references to the same
    /// name resolve to the same address.
    pub fn resolve(&mut self, name: &str) -> Result<u16, Error> {
        if let Some(symbol) = self.symbols.get(name) {
            return Ok(symbol.address);
        }
        if self.next_var >= mem::SCREEN {
            return Err(Error::VariableSpaceExhausted(name.to_string()));
        }
        let address = self.next_var;
        self.next_var += 1;
        let symbol = Symbol {
            address,
            kind: SymbolKind::Variable,
        };
        self.symbols.insert(name.to_string(), symbol);
        Ok(address)
    }

    pub fn symbols(&self) -> &IndexMap<String, Symbol> {
        &self.symbols
    }
}

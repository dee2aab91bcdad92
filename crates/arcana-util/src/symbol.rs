//! String interning for identifiers and keywords.
//!
//! Grounded on `faxc_util::StringTable`: strings are hashed into an index,
//! with collisions resolved by verifying equality against the stored copy,
//! and the backing bytes live in a `bumpalo` arena for the table's lifetime
//! rather than being leaked individually.

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An interned string: cheap to copy, compare, and hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    index: u32,
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.index)
    }
}

/// Interns strings behind a hash index, backed by an arena so that returned
/// `&str`s can outlive the call that interned them (bounded by the table's
/// own lifetime).
#[derive(Debug)]
pub struct StringTable {
    index: FxHashMap<u64, Vec<u32>>,
    strings: Vec<String>,
    arena: bumpalo::Bump,
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StringTable {
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            strings: Vec::new(),
            arena: bumpalo::Bump::new(),
        }
    }

    /// Intern `text`, returning the symbol for it. Repeated calls with the
    /// same text return the same `Symbol`.
    pub fn intern(&mut self, text: &str) -> Symbol {
        let hash = Self::hash_str(text);
        if let Some(candidates) = self.index.get(&hash) {
            for &idx in candidates {
                if self.strings[idx as usize] == text {
                    return Symbol { index: idx };
                }
            }
        }
        let idx = self.strings.len() as u32;
        // Copy through the arena so `get` can hand back a borrow tied to
        // `&self` instead of `&mut self`, matching how the lexer/parser
        // read symbols long after interning them.
        let copy = self.arena.alloc_str(text);
        self.strings.push(copy.to_string());
        self.index.entry(hash).or_default().push(idx);
        Symbol { index: idx }
    }

    pub fn get(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.index as usize]
    }

    fn hash_str(text: &str) -> u64 {
        let mut hasher = rustc_hash::FxHasher::default();
        text.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_text_yields_same_symbol() {
        let mut table = StringTable::new();
        let a = table.intern("subjecto");
        let b = table.intern("subjecto");
        assert_eq!(a, b);
        assert_eq!(table.get(a), "subjecto");
    }

    #[test]
    fn distinct_text_yields_distinct_symbols() {
        let mut table = StringTable::new();
        let a = table.intern("inte");
        let b = table.intern("real");
        assert_ne!(a, b);
    }
}

use core::fmt;

use crate::*;

/// Glyphs cards are dealt from.
pub const SYMBOL_POOL: [&str; 32] = [
    "🐶", "🐱", "🦊", "🦁", "🐷", "🐼", "🐨", "🐵", //
    "🦄", "🐸", "🐙", "🐧", "🐤", "🦉", "🐝", "🦋", //
    "🌸", "🍀", "🍎", "🍊", "🍋", "🍇", "🥕", "🍩", //
    "⚽", "🏀", "🎲", "🎯", "🚗", "✈️", "🌈", "⭐",
];

/// Opaque card face, compared by identity only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    pub const POOL_SIZE: PairCount = SYMBOL_POOL.len() as PairCount;

    pub fn new(index: u8) -> Option<Self> {
        (index < Self::POOL_SIZE).then_some(Self(index))
    }

    pub fn pool() -> impl Iterator<Item = Self> {
        (0..Self::POOL_SIZE).map(Self)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn glyph(self) -> &'static str {
        SYMBOL_POOL[self.0 as usize]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

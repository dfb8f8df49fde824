use alloc::format;
use alloc::string::String;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CardState {
    #[default]
    Hidden,
    Flipped,
    Matched,
}

impl CardState {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Flipped | Self::Matched)
    }
}

/// One dealt card. Only `state` changes over its lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Card {
    symbol: Symbol,
    position: Position,
    pub(crate) state: CardState,
}

impl Card {
    pub const fn new(symbol: Symbol, position: Position) -> Self {
        Self {
            symbol,
            position,
            state: CardState::Hidden,
        }
    }

    pub const fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn state(&self) -> CardState {
        self.state
    }

    /// What the player currently sees on the card.
    pub const fn face(&self) -> &'static str {
        if self.state.is_face_up() {
            self.symbol.glyph()
        } else {
            "❓"
        }
    }

    pub fn label(&self) -> String {
        match self.state {
            CardState::Hidden => String::from("Hidden card"),
            CardState::Flipped => format!("Revealed {}", self.symbol),
            CardState::Matched => format!("Matched {}", self.symbol),
        }
    }
}

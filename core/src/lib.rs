#![no_std]

extern crate alloc;

pub use best_time::*;
pub use card::*;
pub use deck::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use symbol::*;
pub use timer::*;
pub use types::*;

mod best_time;
mod card;
mod deck;
mod difficulty;
mod engine;
mod error;
mod generator;
mod symbol;
mod timer;
mod types;

//! Доменная модель: карты, руки, колоды, слоты участников, фазы и правила стола.

pub mod card;
pub mod chips;
pub mod codec;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

/// Непрозрачный id сетевого подключения участника.
pub type ClientId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use codec::CodecError;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;

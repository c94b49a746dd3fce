//! Подсчёт очков руки (блэкджек, туз = 1 или 11).

pub mod hand_value;

pub use hand_value::{hand_value, is_bust, is_natural, BLACKJACK};

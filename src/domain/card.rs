use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Тип карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardKind {
    /// Обычная карта 1..=13 (туз = 1).
    Ordinary,
    /// Power-карта из магазина. Несёт `effect_id`, в очки не идёт.
    Special,
}

impl CardKind {
    pub fn as_byte(self) -> u8 {
        match self {
            CardKind::Ordinary => 0,
            CardKind::Special => 1,
        }
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(CardKind::Ordinary),
            1 => Some(CardKind::Special),
            _ => None,
        }
    }
}

pub const ACE: u8 = 1;
pub const KING: u8 = 13;
pub const MAX_SUIT: u8 = 3;

/// Карта. Неизменяемое значение, равенство структурное.
///
/// - `rank`: 1..=13 для обычных карт, 0 для power-карт;
/// - `suit`: 0..=3 (масть на счёт не влияет);
/// - `effect_id`: осмыслен только для `CardKind::Special`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub kind: CardKind,
    pub rank: u8,
    pub suit: u8,
    pub effect_id: u32,
}

impl Card {
    pub const fn ordinary(rank: u8, suit: u8) -> Self {
        Self {
            kind: CardKind::Ordinary,
            rank,
            suit,
            effect_id: 0,
        }
    }

    pub const fn special(effect_id: u32) -> Self {
        Self {
            kind: CardKind::Special,
            rank: 0,
            suit: 0,
            effect_id,
        }
    }

    pub fn is_special(&self) -> bool {
        self.kind == CardKind::Special
    }

    pub fn is_ace(&self) -> bool {
        self.kind == CardKind::Ordinary && self.rank == ACE
    }

    /// Вклад карты в сумму руки без учёта "мягкого" туза:
    /// J/Q/K = 10, туз = 1, power-карта = 0.
    pub fn base_points(&self) -> u32 {
        match self.kind {
            CardKind::Special => 0,
            CardKind::Ordinary => u32::from(self.rank.min(10)),
        }
    }

    /// Проверка диапазонов полей (используется при декодировании).
    pub fn is_well_formed(&self) -> bool {
        match self.kind {
            CardKind::Ordinary => (ACE..=KING).contains(&self.rank) && self.suit <= MAX_SUIT,
            CardKind::Special => self.rank == 0,
        }
    }
}

impl fmt::Display for Card {
    /// Формат: `A0`, `T2`, `K3` для обычных карт, `P7` для power-карты с effect_id = 7.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CardKind::Special => write!(f, "P{}", self.effect_id),
            CardKind::Ordinary => {
                let ch = match self.rank {
                    1 => 'A',
                    10 => 'T',
                    11 => 'J',
                    12 => 'Q',
                    13 => 'K',
                    r => char::from_digit(u32::from(r), 10).unwrap_or('?'),
                };
                write!(f, "{ch}{}", self.suit)
            }
        }
    }
}

/// Парсинг строки вида "A0", "T2", "K3", "P7".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let head = chars.next().ok_or_else(|| "Empty card string".to_string())?;
        let tail: String = chars.collect();

        if head == 'P' || head == 'p' {
            let effect_id = tail
                .parse::<u32>()
                .map_err(|_| format!("Invalid effect id: {tail}"))?;
            return Ok(Card::special(effect_id));
        }

        let rank = match head {
            'A' | 'a' => 1,
            'T' | 't' => 10,
            'J' | 'j' => 11,
            'Q' | 'q' => 12,
            'K' | 'k' => 13,
            d @ '2'..='9' => d as u8 - b'0',
            _ => return Err(format!("Invalid rank: {head}")),
        };

        let suit = tail
            .parse::<u8>()
            .map_err(|_| format!("Invalid suit: {tail}"))?;
        if suit > MAX_SUIT {
            return Err(format!("Invalid suit: {suit}"));
        }

        Ok(Card::ordinary(rank, suit))
    }
}

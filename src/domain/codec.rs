//! Wire-формат карт и рук.
//!
//! Карта (7 байт):
//! [kind:u8] [rank:u8] [suit:u8] [effect_id:u32 BE]
//!
//! Рука:
//! [count:u8] затем `count` записей карт. `count <= MAX_HAND_CARDS`.

use bytes::{Buf, BufMut};
use thiserror::Error;

use crate::domain::card::{Card, CardKind};
use crate::domain::hand::{Hand, MAX_HAND_CARDS};

pub const CARD_RECORD_LEN: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Буфер закончился: нужно {needed} байт, осталось {remaining}")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("Неизвестный тип карты: {0}")]
    UnknownCardKind(u8),

    #[error("Некорректная карта: kind={kind:?} rank={rank} suit={suit}")]
    MalformedCard { kind: CardKind, rank: u8, suit: u8 },

    #[error("В руке {0} карт, максимум {MAX_HAND_CARDS}")]
    HandTooLarge(usize),
}

fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), CodecError> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(CodecError::UnexpectedEof { needed, remaining });
    }
    Ok(())
}

pub fn encode_card(card: &Card, out: &mut impl BufMut) {
    out.put_u8(card.kind.as_byte());
    out.put_u8(card.rank);
    out.put_u8(card.suit);
    out.put_u32(card.effect_id);
}

pub fn decode_card(buf: &mut impl Buf) -> Result<Card, CodecError> {
    ensure_remaining(buf, CARD_RECORD_LEN)?;
    let kind_byte = buf.get_u8();
    let kind = CardKind::from_byte(kind_byte).ok_or(CodecError::UnknownCardKind(kind_byte))?;
    let rank = buf.get_u8();
    let suit = buf.get_u8();
    let effect_id = buf.get_u32();

    let card = Card {
        kind,
        rank,
        suit,
        effect_id,
    };
    if !card.is_well_formed() {
        return Err(CodecError::MalformedCard { kind, rank, suit });
    }
    Ok(card)
}

impl Hand {
    pub fn encode(&self, out: &mut impl BufMut) {
        // len() <= MAX_HAND_CARDS (32), в u8 влезает.
        out.put_u8(self.len() as u8);
        for card in self.cards() {
            encode_card(card, out);
        }
    }

    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.len() * CARD_RECORD_LEN);
        self.encode(&mut out);
        out
    }

    pub fn decode(buf: &mut impl Buf) -> Result<Hand, CodecError> {
        ensure_remaining(buf, 1)?;
        let count = buf.get_u8() as usize;
        if count > MAX_HAND_CARDS {
            return Err(CodecError::HandTooLarge(count));
        }
        ensure_remaining(buf, count * CARD_RECORD_LEN)?;

        let mut hand = Hand::new();
        for _ in 0..count {
            let card = decode_card(buf)?;
            hand.add(card)
                .map_err(|_| CodecError::HandTooLarge(count))?;
        }
        Ok(hand)
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::{ActionState, ParticipantSlot};
use crate::domain::table::Phase;
use crate::domain::{ClientId, SlotIndex};
use crate::engine::{RoundEnd, RoundSummary, TurnOutcome};
use crate::eval::hand_value;

use super::errors::ApiError;

/// DTO участника за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantDto {
    pub slot: SlotIndex,
    pub client_id: ClientId,
    pub hand: Vec<Card>,
    pub hand_value: u32,
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub chips: Chips,
    pub action: ActionState,
    pub eliminated: bool,
}

impl ParticipantDto {
    pub fn from_slot(slot: SlotIndex, p: &ParticipantSlot) -> Self {
        Self {
            slot,
            client_id: p.client_id,
            hand: p.hand.cards().to_vec(),
            hand_value: hand_value(&p.hand),
            hit_points: p.hit_points,
            max_hit_points: p.max_hit_points,
            chips: p.chips,
            action: p.action,
            eliminated: !p.is_alive(),
        }
    }
}

/// DTO всей сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionViewDto {
    pub version: u64,
    pub phase: Phase,
    pub round: u64,
    /// Слот, чей сейчас ход (осмысленно только в PlayerTurn).
    pub current_turn: Option<SlotIndex>,
    /// Sentinel: -1 нет победителя, -2 ничья, иначе слот.
    pub winner: i32,
    pub participants: Vec<ParticipantDto>,
    pub last_round: Option<RoundSummary>,
}

/// Локальный вид для магазина и "presence"-индикатора.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalViewDto {
    pub client_id: ClientId,
    pub slot: SlotIndex,
    pub chips: Chips,
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub can_act: bool,
    pub eliminated: bool,
}

/// Колода участника (ответ на RevealDeck).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckRevealDto {
    pub slot: SlotIndex,
    pub cards: Vec<Card>,
    pub specials: usize,
}

/// Внешнее представление исхода hit/stand.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnOutcomeDto {
    NextTurn { slot: SlotIndex },
    RoundResolved { summary: RoundSummary, end: RoundEnd },
}

impl From<TurnOutcome> for TurnOutcomeDto {
    fn from(outcome: TurnOutcome) -> Self {
        match outcome {
            TurnOutcome::NextTurn { slot } => TurnOutcomeDto::NextTurn { slot },
            TurnOutcome::RoundResolved(r) => TurnOutcomeDto::RoundResolved {
                summary: r.summary,
                end: r.end,
            },
        }
    }
}

/// Ответ хоста на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    Joined {
        slot: SlotIndex,
        already_joined: bool,
    },
    RoundStarted {
        round: u64,
        first_turn: SlotIndex,
    },
    CardDrawn {
        slot: SlotIndex,
        card: Card,
        value: u32,
        busted: bool,
        outcome: TurnOutcomeDto,
    },
    Stood {
        outcome: TurnOutcomeDto,
    },
    UpgradePurchased(ParticipantDto),
    PowerCardPurchased {
        effect_id: u32,
        participant: ParticipantDto,
    },
    DeckRevealed(DeckRevealDto),
    /// Команда отклонена, состояние не изменилось.
    Rejected {
        reason: ApiError,
    },
}

impl CommandResponse {
    pub fn is_rejected(&self) -> bool {
        matches!(self, CommandResponse::Rejected { .. })
    }
}


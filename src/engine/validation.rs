use crate::domain::table::{Phase, RulesConfig};
use crate::domain::{Chips, ClientId, ParticipantSlot, SlotIndex};
use crate::engine::errors::EngineError;
use crate::state::SessionState;

/// Клиент должен сидеть за столом. Возвращает его слот.
pub fn require_joined(state: &SessionState, client_id: ClientId) -> Result<SlotIndex, EngineError> {
    state
        .slot_of(client_id)
        .ok_or(EngineError::NotJoined(client_id))
}

/// Проверка hit/stand: клиент за столом, фаза PlayerTurn, сейчас его ход.
pub fn validate_turn(state: &SessionState, client_id: ClientId) -> Result<SlotIndex, EngineError> {
    let slot = require_joined(state, client_id)?;

    if state.phase != Phase::PlayerTurn {
        return Err(EngineError::WrongPhase(state.phase));
    }

    if !state.turn.is_turn_of(slot) {
        return Err(EngineError::NotYourTurn {
            client_id,
            current: state.turn.current,
        });
    }

    Ok(slot)
}

/// Проверка запуска раунда: только хост, подходящая фаза, минимум два живых участника.
pub fn validate_start_round(
    state: &SessionState,
    host: ClientId,
    requester: ClientId,
) -> Result<(), EngineError> {
    if requester != host {
        return Err(EngineError::NotHost(requester));
    }
    if !state.phase.accepts_start_round() {
        return Err(EngineError::WrongPhase(state.phase));
    }
    if state.alive_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }
    Ok(())
}

/// Проверка join для нового клиента.
pub fn validate_join(state: &SessionState, rules: &RulesConfig) -> Result<(), EngineError> {
    if state.phase == Phase::PlayerTurn {
        return Err(EngineError::WrongPhase(state.phase));
    }
    if state.participants.len() >= rules.max_participants {
        return Err(EngineError::TableFull(rules.max_participants));
    }
    Ok(())
}

/// Хватает ли фишек на покупку.
pub fn require_chips(participant: &ParticipantSlot, cost: Chips) -> Result<Chips, EngineError> {
    participant
        .chips
        .checked_sub(cost)
        .ok_or(EngineError::InsufficientChips {
            needed: cost,
            available: participant.chips,
        })
}

use serde::{Deserialize, Serialize};

use crate::domain::table::Phase;
use crate::domain::{ClientId, SlotIndex};
use crate::state::{SessionSnapshot, SessionState};

use super::dto::{LocalViewDto, ParticipantDto, SessionViewDto};

/// Запросы "только чтение". Отвечаются по опубликованному снапшоту.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Полное состояние стола.
    GetSession,

    /// Один слот.
    GetParticipant { slot: SlotIndex },

    /// Данные для магазина и индикатора "твой ход" конкретного клиента.
    LocalView { client_id: ClientId },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Session(SessionViewDto),
    Participant(Option<ParticipantDto>),
    LocalView(Option<LocalViewDto>),
}

/// Ответить на запрос по снапшоту.
pub fn answer_query(snapshot: &SessionSnapshot, query: &Query) -> QueryResponse {
    match query {
        Query::GetSession => QueryResponse::Session(build_session_view(snapshot)),
        Query::GetParticipant { slot } => QueryResponse::Participant(
            snapshot
                .state
                .participant(*slot)
                .map(|p| ParticipantDto::from_slot(*slot, p)),
        ),
        Query::LocalView { client_id } => {
            QueryResponse::LocalView(build_local_view(&snapshot.state, *client_id))
        }
    }
}

/// Сформировать DTO сессии.
/// `current_turn` отдаём только пока идёт PlayerTurn.
pub fn build_session_view(snapshot: &SessionSnapshot) -> SessionViewDto {
    let state = &snapshot.state;

    let current_turn = (state.phase == Phase::PlayerTurn).then(|| state.current_turn());

    SessionViewDto {
        version: snapshot.version,
        phase: state.phase,
        round: state.round,
        current_turn,
        winner: state.winner.as_sentinel(),
        participants: build_participants_dto(state),
        last_round: state.last_round.clone(),
    }
}

pub fn build_participants_dto(state: &SessionState) -> Vec<ParticipantDto> {
    state
        .participants
        .iter()
        .enumerate()
        .map(|(slot, p)| ParticipantDto::from_slot(slot, p))
        .collect()
}

/// Локальный вид клиента. `None`, если клиент не за столом.
pub fn build_local_view(state: &SessionState, client_id: ClientId) -> Option<LocalViewDto> {
    let slot = state.slot_of(client_id)?;
    let p = state.participant(slot)?;

    Some(LocalViewDto {
        client_id,
        slot,
        chips: p.chips,
        hit_points: p.hit_points,
        max_hit_points: p.max_hit_points,
        can_act: state.can_act(client_id),
        eliminated: !p.is_alive(),
    })
}

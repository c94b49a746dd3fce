//! GraphQL-поверхность для наблюдателей (только чтение).
//!
//! Каждый резолвер читает последний опубликованный снапшот из `TableHandle`,
//! актор стола при этом не трогается.

use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema, SimpleObject};

use crate::domain::ClientId;
use crate::host::TableHandle;

use super::dto::{LocalViewDto, ParticipantDto};
use super::queries::{build_local_view, build_participants_dto};

pub type ObserverSchema = Schema<ObserverQuery, EmptyMutation, EmptySubscription>;

/// Собрать схему наблюдателя поверх хэндла стола.
pub fn observer_schema(handle: TableHandle) -> ObserverSchema {
    Schema::build(ObserverQuery { handle }, EmptyMutation, EmptySubscription).finish()
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ParticipantObject {
    pub slot: u32,
    pub client_id: u64,
    /// Карты в текстовом виде: "A0", "T2", "P7".
    pub hand: Vec<String>,
    pub hand_value: u32,
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub chips: u64,
    pub action: String,
    pub eliminated: bool,
}

impl From<ParticipantDto> for ParticipantObject {
    fn from(p: ParticipantDto) -> Self {
        Self {
            slot: p.slot as u32,
            client_id: p.client_id,
            hand: p.hand.iter().map(|c| c.to_string()).collect(),
            hand_value: p.hand_value,
            hit_points: p.hit_points,
            max_hit_points: p.max_hit_points,
            chips: p.chips.0,
            action: format!("{:?}", p.action),
            eliminated: p.eliminated,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct LocalViewObject {
    pub slot: u32,
    pub chips: u64,
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub can_act: bool,
    pub eliminated: bool,
}

impl From<LocalViewDto> for LocalViewObject {
    fn from(v: LocalViewDto) -> Self {
        Self {
            slot: v.slot as u32,
            chips: v.chips.0,
            hit_points: v.hit_points,
            max_hit_points: v.max_hit_points,
            can_act: v.can_act,
            eliminated: v.eliminated,
        }
    }
}

pub struct ObserverQuery {
    handle: TableHandle,
}

#[Object]
impl ObserverQuery {
    /// Версия опубликованного снапшота.
    async fn version(&self) -> u64 {
        self.handle.snapshot().version
    }

    async fn phase(&self) -> String {
        self.handle.snapshot().state.phase.as_str().to_string()
    }

    async fn round(&self) -> u64 {
        self.handle.snapshot().state.round
    }

    async fn current_turn(&self) -> u32 {
        self.handle.snapshot().state.current_turn() as u32
    }

    /// -1 нет победителя, -2 ничья, иначе слот.
    async fn winner(&self) -> i32 {
        self.handle.snapshot().state.winner.as_sentinel()
    }

    async fn participants(&self) -> Vec<ParticipantObject> {
        let snapshot = self.handle.snapshot();
        build_participants_dto(&snapshot.state)
            .into_iter()
            .map(ParticipantObject::from)
            .collect()
    }

    async fn local_view(&self, client_id: ClientId) -> Option<LocalViewObject> {
        let snapshot = self.handle.snapshot();
        build_local_view(&snapshot.state, client_id).map(LocalViewObject::from)
    }
}

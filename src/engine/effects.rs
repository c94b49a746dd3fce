//! Точка расширения для power-карт.
//!
//! Магазин кладёт в колоду карту с `effect_id`; когда такая карта вытянута,
//! движок ищет обработчик в `EffectRegistry` и вызывает его. Сами эффекты
//! регистрирует тот, кто собирает сессию. Неизвестный `effect_id` — no-op.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::{Card, Hand, ParticipantSlot, SlotIndex};

/// Контекст вызова эффекта: кто вытянул и что именно.
///
/// Эффекту доступны только рука и текущие HP вытянувшего. Фишки и max HP
/// меняются только покупками и наградой за раунд.
pub struct EffectContext<'a> {
    pub slot: SlotIndex,
    pub card: Card,
    participant: &'a mut ParticipantSlot,
}

impl<'a> EffectContext<'a> {
    pub(crate) fn new(slot: SlotIndex, card: Card, participant: &'a mut ParticipantSlot) -> Self {
        Self {
            slot,
            card,
            participant,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.participant.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.participant.hand
    }

    pub fn hit_points(&self) -> u32 {
        self.participant.hit_points
    }

    pub fn max_hit_points(&self) -> u32 {
        self.participant.max_hit_points
    }

    /// Лечение не выше max HP. Возвращает фактически добавленные HP.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.participant.hit_points;
        self.participant.hit_points = before
            .saturating_add(amount)
            .min(self.participant.max_hit_points);
        self.participant.hit_points - before
    }

    /// Урон с полом в 0. Возвращает фактически снятые HP.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.participant.take_damage(amount)
    }
}

/// Обработчик power-карты.
pub trait PowerEffect: Send + Sync {
    /// Короткое имя для логов.
    fn name(&self) -> &str;

    fn on_draw(&self, ctx: EffectContext<'_>);
}

/// Таблица effect_id → обработчик.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    handlers: HashMap<u32, Arc<dyn PowerEffect>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Зарегистрировать обработчик. Старый обработчик с тем же id заменяется.
    pub fn register(&mut self, effect_id: u32, handler: Arc<dyn PowerEffect>) {
        self.handlers.insert(effect_id, handler);
    }

    pub fn get(&self, effect_id: u32) -> Option<Arc<dyn PowerEffect>> {
        self.handlers.get(&effect_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&u32> = self.handlers.keys().collect();
        ids.sort();
        f.debug_struct("EffectRegistry").field("effect_ids", &ids).finish()
    }
}

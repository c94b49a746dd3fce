use tracing::{debug, info};

use crate::domain::table::{Phase, RulesConfig, WinnerMark};
use crate::domain::{ActionState, Card, ClientId, ParticipantSlot, SlotIndex};
use crate::engine::actions::{HitResult, JoinOutcome, RoundResolution, TurnOutcome};
use crate::engine::deck_manager::DeckManager;
use crate::engine::effects::{EffectContext, EffectRegistry};
use crate::engine::errors::EngineError;
use crate::engine::history::{SessionEventKind, SessionHistory};
use crate::engine::resolution::{apply_round, compute_round, round_end, RoundEnd};
use crate::engine::turn_order::all_alive_resolved;
use crate::engine::validation::{
    require_chips, require_joined, validate_join, validate_start_round, validate_turn,
};
use crate::engine::RandomSource;
use crate::eval::{hand_value, BLACKJACK};
use crate::state::SessionState;

const LOG_TARGET: &str = "blackjack_engine::engine::game_loop";

/// Сколько карт раздаётся каждому в начале раунда.
pub const INITIAL_DEAL: usize = 2;

/// Чек покупки апгрейда max HP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeReceipt {
    pub slot: SlotIndex,
    pub participant: ParticipantSlot,
}

/// Чек покупки power-карты.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerCardReceipt {
    pub slot: SlotIndex,
    pub effect_id: u32,
    pub participant: ParticipantSlot,
}

/// Сессия стола на хосте: реплицируемое состояние + приватные колоды + RNG.
///
/// Единственный писатель состояния. Все операции синхронные; сериализацию
/// запросов обеспечивает актор хоста (`host::Actor`).
/// Любая ошибка означает, что состояние не изменилось.
pub struct TableSession<R: RandomSource> {
    /// Клиент хоста: только он может запускать раунды.
    pub host: ClientId,
    pub rules: RulesConfig,
    pub state: SessionState,
    pub history: SessionHistory,
    decks: DeckManager,
    effects: EffectRegistry,
    rng: R,
}

impl<R: RandomSource> TableSession<R> {
    pub fn new(host: ClientId, rules: RulesConfig, rng: R) -> Self {
        Self {
            host,
            rules,
            state: SessionState::new(),
            history: SessionHistory::new(),
            decks: DeckManager::new(),
            effects: EffectRegistry::new(),
            rng,
        }
    }

    /// Подключить таблицу обработчиков power-карт.
    pub fn with_effects(mut self, effects: EffectRegistry) -> Self {
        self.effects = effects;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn decks(&self) -> &DeckManager {
        &self.decks
    }

    /// Посадить клиента за стол. Повторный join того же клиента — no-op.
    pub fn join(&mut self, client_id: ClientId) -> Result<JoinOutcome, EngineError> {
        if let Some(slot) = self.state.slot_of(client_id) {
            return Ok(JoinOutcome::AlreadyJoined(slot));
        }

        validate_join(&self.state, &self.rules)?;

        let deck_slot = self.decks.add_deck(&mut self.rng);
        self.state
            .participants
            .push(ParticipantSlot::new(client_id, self.rules.starting_hp));
        let slot = self.state.participants.len() - 1;
        debug_assert_eq!(deck_slot, slot, "колоды и слоты должны идти параллельно");

        self.history
            .push(SessionEventKind::Joined { client_id, slot });
        info!(target: LOG_TARGET, client_id, slot, "participant joined");

        Ok(JoinOutcome::Joined(slot))
    }

    /// Старт раунда (только хост):
    /// - сброс колод (power-карты остаются);
    /// - очистка рук и раздача по 2 карты;
    /// - сброс stand/bust, фаза PlayerTurn, ход у первого живого слота.
    pub fn start_round(&mut self, requester: ClientId) -> Result<(), EngineError> {
        validate_start_round(&self.state, self.host, requester)?;

        let first = self
            .state
            .participants
            .iter()
            .position(|p| p.is_alive())
            .ok_or(EngineError::NotEnoughPlayers)?;

        self.state.round += 1;
        let round = self.state.round;

        let mut drawn: Vec<(SlotIndex, Card)> = Vec::new();
        for slot in 0..self.state.participants.len() {
            self.decks.reset(slot, &mut self.rng)?;

            let participant = &mut self.state.participants[slot];
            participant.hand.clear();
            participant.action = ActionState::None;

            for _ in 0..INITIAL_DEAL {
                let card = self.decks.draw(slot, &mut self.rng)?;
                participant
                    .hand
                    .add(card)
                    .map_err(|_| EngineError::HandFull(slot))?;
                drawn.push((slot, card));
            }
        }

        self.state.phase = Phase::PlayerTurn;
        let first = self.state.turn.reset(&self.state.participants).unwrap_or(first);
        self.state.winner = WinnerMark::NoWinner;
        self.state.last_round = None;

        self.history.push(SessionEventKind::RoundStarted { round });
        for (slot, card) in drawn {
            self.on_card_drawn(slot, card);
        }

        info!(
            target: LOG_TARGET,
            round,
            participants = self.state.participants.len(),
            first_turn = first,
            "round started"
        );
        Ok(())
    }

    /// Hit: взять карту. Перебор → Busted и разрешение раунда, иначе ход переходит дальше.
    pub fn hit(&mut self, client_id: ClientId) -> Result<HitResult, EngineError> {
        let slot = validate_turn(&self.state, client_id)?;

        if self.state.participants[slot].hand.is_full() {
            return Err(EngineError::HandFull(slot));
        }

        let card = self.decks.draw(slot, &mut self.rng)?;
        self.state.participants[slot]
            .hand
            .add(card)
            .map_err(|_| EngineError::HandFull(slot))?;
        self.on_card_drawn(slot, card);

        let value = hand_value(&self.state.participants[slot].hand);
        let busted = value > BLACKJACK;

        let outcome = if busted {
            self.state.participants[slot].action = ActionState::Busted;
            self.history
                .push(SessionEventKind::Busted { slot, value });
            info!(target: LOG_TARGET, slot, value, "participant busted");

            if self.rules.bust_ends_round || all_alive_resolved(&self.state.participants) {
                TurnOutcome::RoundResolved(self.resolve_round())
            } else {
                self.advance_or_resolve()
            }
        } else {
            debug!(target: LOG_TARGET, slot, value, "hit accepted");
            self.advance_or_resolve()
        };

        Ok(HitResult {
            slot,
            card,
            value,
            busted,
            outcome,
        })
    }

    /// Stand: слот закончил раунд. Если все живые закончили — разрешаем раунд.
    pub fn stand(&mut self, client_id: ClientId) -> Result<TurnOutcome, EngineError> {
        let slot = validate_turn(&self.state, client_id)?;

        self.state.participants[slot].action = ActionState::Stood;
        let value = hand_value(&self.state.participants[slot].hand);
        self.history
            .push(SessionEventKind::Stood { slot, value });
        debug!(target: LOG_TARGET, slot, value, "stand accepted");

        if all_alive_resolved(&self.state.participants) {
            Ok(TurnOutcome::RoundResolved(self.resolve_round()))
        } else {
            Ok(self.advance_or_resolve())
        }
    }

    /// Купить +max HP. По умолчанию ещё и лечит до нового максимума.
    pub fn purchase_upgrade(&mut self, client_id: ClientId) -> Result<UpgradeReceipt, EngineError> {
        let slot = require_joined(&self.state, client_id)?;
        let cost = self.rules.upgrade_cost;
        let remaining = require_chips(&self.state.participants[slot], cost)?;

        let participant = &mut self.state.participants[slot];
        participant.chips = remaining;
        participant.max_hit_points = participant
            .max_hit_points
            .saturating_add(self.rules.upgrade_hp_bonus);
        if self.rules.heal_on_upgrade {
            participant.restore_full_hp();
        }
        let max_hit_points = participant.max_hit_points;
        let receipt = UpgradeReceipt {
            slot,
            participant: participant.clone(),
        };

        self.history.push(SessionEventKind::UpgradePurchased {
            slot,
            cost,
            max_hit_points,
        });
        info!(
            target: LOG_TARGET,
            client_id,
            slot,
            max_hit_points,
            chips_left = remaining.0,
            "max hp upgrade purchased"
        );
        Ok(receipt)
    }

    /// Купить power-карту: она кладётся в колоду участника.
    pub fn purchase_power(
        &mut self,
        client_id: ClientId,
        effect_id: u32,
    ) -> Result<PowerCardReceipt, EngineError> {
        let slot = require_joined(&self.state, client_id)?;
        let cost = self.rules.power_card_cost;
        let remaining = require_chips(&self.state.participants[slot], cost)?;

        self.decks.add_special(slot, effect_id)?;
        let participant = &mut self.state.participants[slot];
        participant.chips = remaining;
        let receipt = PowerCardReceipt {
            slot,
            effect_id,
            participant: participant.clone(),
        };

        self.history.push(SessionEventKind::PowerCardPurchased {
            slot,
            cost,
            effect_id,
        });
        info!(
            target: LOG_TARGET,
            client_id,
            slot,
            effect_id,
            chips_left = remaining.0,
            "power card purchased"
        );
        Ok(receipt)
    }

    /// Содержимое собственной колоды запросившего.
    pub fn reveal_deck(&self, client_id: ClientId) -> Result<Vec<Card>, EngineError> {
        let slot = require_joined(&self.state, client_id)?;
        self.decks.snapshot(slot)
    }

    /// Передать ход; если ходить некому — разрешить раунд, а не зависнуть.
    fn advance_or_resolve(&mut self) -> TurnOutcome {
        match self.state.turn.advance(&self.state.participants) {
            Some(slot) => {
                debug!(target: LOG_TARGET, slot, "turn advanced");
                TurnOutcome::NextTurn { slot }
            }
            None => TurnOutcome::RoundResolved(self.resolve_round()),
        }
    }

    /// Разрешение раунда + проверка конца игры.
    fn resolve_round(&mut self) -> RoundResolution {
        let summary = compute_round(&self.state.participants, &self.rules);
        apply_round(&mut self.state.participants, &summary);

        self.state.winner = summary.winner;
        self.state.phase = Phase::RoundOver;
        self.state.last_round = Some(summary.clone());
        self.history.push(SessionEventKind::RoundResolved {
            round: self.state.round,
            summary: summary.clone(),
        });
        info!(
            target: LOG_TARGET,
            round = self.state.round,
            winner = summary.winner.as_sentinel(),
            winning_value = ?summary.winning_value,
            natural = summary.natural,
            losers = summary.damages.len(),
            "round resolved"
        );

        let end = round_end(&self.state.participants);
        if let RoundEnd::GameOver { winner } = end {
            self.state.phase = Phase::GameOver;
            self.state.winner = winner;
            for p in self.state.participants.iter_mut() {
                p.restore_full_hp();
            }
            self.history.push(SessionEventKind::GameOver { winner });
            info!(
                target: LOG_TARGET,
                winner = winner.as_sentinel(),
                "game over, hit points restored"
            );
        }

        RoundResolution { summary, end }
    }

    /// Карта попала в руку: журнал + эффект power-карты.
    fn on_card_drawn(&mut self, slot: SlotIndex, card: Card) {
        self.history
            .push(SessionEventKind::CardDrawn { slot, card });

        if !card.is_special() {
            return;
        }
        match self.effects.get(card.effect_id) {
            Some(effect) => {
                if let Some(participant) = self.state.participants.get_mut(slot) {
                    debug!(
                        target: LOG_TARGET,
                        slot,
                        effect_id = card.effect_id,
                        effect = effect.name(),
                        "power effect triggered"
                    );
                    effect.on_draw(EffectContext::new(slot, card, participant));
                }
            }
            None => {
                debug!(
                    target: LOG_TARGET,
                    slot,
                    effect_id = card.effect_id,
                    "no handler for power card"
                );
            }
        }
    }
}

//! Применение команд к сессии стола.

use tracing::warn;

use crate::engine::{EngineError, RandomSource, TableSession};

use super::commands::Command;
use super::dto::{CommandResponse, DeckRevealDto, ParticipantDto};
use super::errors::ApiError;

const LOG_TARGET: &str = "blackjack_engine::api::handlers";

/// Выполнить команду. Отказ движка превращается в `CommandResponse::Rejected`,
/// состояние при этом не меняется.
pub fn execute<R: RandomSource>(session: &mut TableSession<R>, command: Command) -> CommandResponse {
    let name = command.name();
    let client_id = command.client_id();

    match apply(session, command) {
        Ok(response) => response,
        Err(err) => {
            warn!(target: LOG_TARGET, command = name, client_id, error = %err, "command rejected");
            CommandResponse::Rejected {
                reason: ApiError::from(err),
            }
        }
    }
}

fn apply<R: RandomSource>(
    session: &mut TableSession<R>,
    command: Command,
) -> Result<CommandResponse, EngineError> {
    match command {
        Command::Join { client_id } => {
            let outcome = session.join(client_id)?;
            Ok(CommandResponse::Joined {
                slot: outcome.slot(),
                already_joined: matches!(outcome, crate::engine::JoinOutcome::AlreadyJoined(_)),
            })
        }
        Command::StartRound { client_id } => {
            session.start_round(client_id)?;
            Ok(CommandResponse::RoundStarted {
                round: session.state.round,
                first_turn: session.state.current_turn(),
            })
        }
        Command::Hit { client_id } => {
            let hit = session.hit(client_id)?;
            Ok(CommandResponse::CardDrawn {
                slot: hit.slot,
                card: hit.card,
                value: hit.value,
                busted: hit.busted,
                outcome: hit.outcome.into(),
            })
        }
        Command::Stand { client_id } => {
            let outcome = session.stand(client_id)?;
            Ok(CommandResponse::Stood {
                outcome: outcome.into(),
            })
        }
        Command::PurchaseUpgrade { client_id } => {
            let receipt = session.purchase_upgrade(client_id)?;
            Ok(CommandResponse::UpgradePurchased(ParticipantDto::from_slot(
                receipt.slot,
                &receipt.participant,
            )))
        }
        Command::PurchasePower {
            client_id,
            effect_id,
        } => {
            let receipt = session.purchase_power(client_id, effect_id)?;
            Ok(CommandResponse::PowerCardPurchased {
                effect_id: receipt.effect_id,
                participant: ParticipantDto::from_slot(receipt.slot, &receipt.participant),
            })
        }
        Command::RevealDeck { client_id } => {
            let cards = session.reveal_deck(client_id)?;
            let slot = session
                .state
                .slot_of(client_id)
                .ok_or(EngineError::NotJoined(client_id))?;
            let specials = cards.iter().filter(|c| c.is_special()).count();
            Ok(CommandResponse::DeckRevealed(DeckRevealDto {
                slot,
                cards,
                specials,
            }))
        }
    }
}

// src/bin/blackjack_dev_cli.rs

use blackjack_engine::api::{build_session_view, SessionViewDto};
use blackjack_engine::domain::table::Phase;
use blackjack_engine::domain::{Chips, ClientId};
use blackjack_engine::engine::EffectRegistry;
use blackjack_engine::eval::hand_value;
use blackjack_engine::host::{spawn_table, HostError, TableHandle};
use blackjack_engine::infra::{init_tracing, SessionConfig, SystemRng};

/// Сколько ботов садится за стол (первый из них — хост).
const BOT_COUNT: ClientId = 3;
/// Бот берёт карту, пока рука меньше этого значения.
const BOT_STAND_ON: u32 = 17;
/// Страховка от бесконечной партии.
const MAX_ROUNDS: u64 = 50;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    println!("blackjack_dev_cli: стартуем стол с ботами…");

    let config = SessionConfig::from_env()?;
    let host: ClientId = 1;
    let (table, actor) = spawn_table(&config, host, SystemRng, EffectRegistry::new());

    // Печать каждого опубликованного изменения.
    let mut changes = table.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(change) = changes.recv().await {
            println!("[v{}] изменилось: {:?}", change.snapshot.version, change.aggregates);
            debug_print_session(&build_session_view(&change.snapshot));
        }
    });

    for client_id in 1..=BOT_COUNT {
        let slot = table.join(client_id).await?;
        println!("бот {client_id} сел в слот {slot}");
    }

    table.start_round(host).await?;
    drive_bots(&table, host, config.rules.upgrade_cost).await?;

    let final_view = build_session_view(&table.snapshot());
    println!();
    println!("================ ИТОГ =================");
    debug_print_session(&final_view);

    table.shutdown().await?;
    actor.await?;
    printer.abort();
    Ok(())
}

/// Играть, пока не наступит GameOver (или не кончится лимит раундов).
async fn drive_bots(
    table: &TableHandle,
    host: ClientId,
    upgrade_cost: Chips,
) -> Result<(), HostError> {
    let mut snapshots = table.watch();

    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        let state = &snapshot.state;

        match state.phase {
            Phase::GameOver => {
                println!("игра окончена, победитель: {}", state.winner.as_sentinel());
                return Ok(());
            }
            Phase::PlayerTurn => {
                let slot = state.current_turn();
                let Some(p) = state.participant(slot) else {
                    return Ok(());
                };
                let client_id = p.client_id;
                if hand_value(&p.hand) < BOT_STAND_ON {
                    table.hit(client_id).await?;
                } else {
                    table.stand(client_id).await?;
                }
                continue;
            }
            Phase::RoundOver => {
                if state.round >= MAX_ROUNDS {
                    println!("лимит раундов исчерпан");
                    return Ok(());
                }
                // Между раундами боты тратят фишки на апгрейд.
                for p in &state.participants {
                    if p.chips >= upgrade_cost {
                        let _ = table.purchase_upgrade(p.client_id).await;
                    }
                }
            }
            Phase::Waiting => {
                table.start_round(host).await?;
                continue;
            }
        }

        // Ждём авто-рестарт (или любое другое изменение).
        if snapshots.changed().await.is_err() {
            return Err(HostError::Closed);
        }
    }
}

fn debug_print_session(view: &SessionViewDto) {
    println!(
        "  раунд {} | фаза {} | ход {:?} | победитель {}",
        view.round,
        view.phase.as_str(),
        view.current_turn,
        view.winner
    );
    for p in &view.participants {
        let cards: Vec<String> = p.hand.iter().map(|c| c.to_string()).collect();
        println!(
            "    слот {} (клиент {}): [{}] = {} | HP {}/{} | фишки {} | {:?}{}",
            p.slot,
            p.client_id,
            cards.join(" "),
            p.hand_value,
            p.hit_points,
            p.max_hit_points,
            p.chips.0,
            p.action,
            if p.eliminated { " | выбыл" } else { "" }
        );
    }
}

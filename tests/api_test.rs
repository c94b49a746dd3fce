// tests/api_test.rs
//
// API-слой:
//  - execute: команды → CommandResponse, отказы → Rejected с причиной;
//  - запросы по снапшоту (сессия, слот, локальный вид);
//  - сериализация команд и ответов (serde_json).

use blackjack_engine::api::{
    answer_query, build_local_view, build_session_view, execute, ApiError, Command,
    CommandResponse, Query, QueryResponse, RejectReason, TurnOutcomeDto,
};
use blackjack_engine::domain::card::Card;
use blackjack_engine::domain::table::{Phase, RulesConfig};
use blackjack_engine::domain::Chips;
use blackjack_engine::engine::{EngineError, RandomSource, TableSession};
use blackjack_engine::state::SessionSnapshot;

// -----------------------------
// ВСПОМОГАТЕЛЬНЫЕ КОНСТРУКТОРЫ
// -----------------------------

const HOST: u64 = 1;
const GUEST: u64 = 2;

struct FirstCardRng;

impl RandomSource for FirstCardRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}

fn table() -> TableSession<FirstCardRng> {
    let mut session = TableSession::new(HOST, RulesConfig::default(), FirstCardRng);
    for c in [HOST, GUEST] {
        let response = execute(&mut session, Command::Join { client_id: c });
        assert!(!response.is_rejected());
    }
    session
}

fn snapshot_of(session: &TableSession<FirstCardRng>, version: u64) -> SessionSnapshot {
    SessionSnapshot {
        version,
        state: session.state.clone(),
    }
}

// -----------------------------
// КОМАНДЫ
// -----------------------------

#[test]
fn join_reports_slot_and_rejoin() {
    let mut session = table();
    let response = execute(&mut session, Command::Join { client_id: GUEST });
    assert_eq!(
        response,
        CommandResponse::Joined {
            slot: 1,
            already_joined: true
        }
    );
}

#[test]
fn round_flow_through_commands() {
    let mut session = table();

    let started = execute(&mut session, Command::StartRound { client_id: HOST });
    assert_eq!(
        started,
        CommandResponse::RoundStarted {
            round: 1,
            first_turn: 0
        }
    );

    let hit = execute(&mut session, Command::Hit { client_id: HOST });
    assert_eq!(
        hit,
        CommandResponse::CardDrawn {
            slot: 0,
            card: Card::ordinary(3, 0),
            value: 16,
            busted: false,
            outcome: TurnOutcomeDto::NextTurn { slot: 1 },
        }
    );

    let stood = execute(&mut session, Command::Stand { client_id: GUEST });
    assert_eq!(
        stood,
        CommandResponse::Stood {
            outcome: TurnOutcomeDto::NextTurn { slot: 0 }
        }
    );

    match execute(&mut session, Command::Stand { client_id: HOST }) {
        CommandResponse::Stood {
            outcome: TurnOutcomeDto::RoundResolved { summary, .. },
        } => {
            assert_eq!(summary.winning_value, Some(16));
        }
        other => panic!("неожиданный ответ: {other:?}"),
    }
}

#[test]
fn rejection_carries_reason_and_message() {
    let mut session = table();
    let before = session.state.clone();

    let response = execute(&mut session, Command::StartRound { client_id: GUEST });
    let CommandResponse::Rejected { reason } = response else {
        panic!("не-хост не может запускать раунд");
    };
    assert_eq!(reason.reason, RejectReason::NotHost { client_id: GUEST });
    assert!(!reason.message.is_empty());
    assert_eq!(session.state, before);

    let response = execute(&mut session, Command::Hit { client_id: HOST });
    assert!(matches!(
        response,
        CommandResponse::Rejected {
            reason: ApiError {
                reason: RejectReason::WrongPhase {
                    phase: Phase::Waiting
                },
                ..
            }
        }
    ));
}

#[test]
fn purchases_and_deck_reveal() {
    let mut session = table();
    session.state.participants[1].chips = Chips(30);

    match execute(&mut session, Command::PurchaseUpgrade { client_id: GUEST }) {
        CommandResponse::UpgradePurchased(p) => {
            assert_eq!(p.slot, 1);
            assert_eq!(p.chips, Chips(20));
            assert_eq!(p.max_hit_points, 35);
        }
        other => panic!("неожиданный ответ: {other:?}"),
    }

    match execute(
        &mut session,
        Command::PurchasePower {
            client_id: GUEST,
            effect_id: 4,
        },
    ) {
        CommandResponse::PowerCardPurchased {
            effect_id,
            participant,
        } => {
            assert_eq!(effect_id, 4);
            assert_eq!(participant.chips, Chips(5));
        }
        other => panic!("неожиданный ответ: {other:?}"),
    }

    match execute(&mut session, Command::RevealDeck { client_id: GUEST }) {
        CommandResponse::DeckRevealed(deck) => {
            assert_eq!(deck.slot, 1);
            assert_eq!(deck.cards.len(), 14);
            assert_eq!(deck.specials, 1);
        }
        other => panic!("неожиданный ответ: {other:?}"),
    }

    let broke = execute(&mut session, Command::PurchaseUpgrade { client_id: GUEST });
    assert!(matches!(
        broke,
        CommandResponse::Rejected {
            reason: ApiError {
                reason: RejectReason::InsufficientChips { .. },
                ..
            }
        }
    ));
}

#[test]
fn engine_errors_map_to_reasons() {
    let cases = [
        (EngineError::NotJoined(5), RejectReason::NotJoined { client_id: 5 }),
        (
            EngineError::TableFull(8),
            RejectReason::TableFull {
                max_participants: 8,
            },
        ),
        (EngineError::NotEnoughPlayers, RejectReason::NotEnoughPlayers),
        (
            EngineError::NotYourTurn {
                client_id: 5,
                current: 2,
            },
            RejectReason::NotYourTurn { current: 2 },
        ),
        (EngineError::HandFull(1), RejectReason::HandFull { slot: 1 }),
        (EngineError::Internal("boom"), RejectReason::Internal),
    ];

    for (err, expected) in cases {
        assert_eq!(ApiError::from(err).reason, expected);
    }
}

// -----------------------------
// ЗАПРОСЫ
// -----------------------------

#[test]
fn session_view_hides_turn_outside_player_turn() {
    let mut session = table();
    let view = build_session_view(&snapshot_of(&session, 3));
    assert_eq!(view.version, 3);
    assert_eq!(view.phase, Phase::Waiting);
    assert_eq!(view.current_turn, None);
    assert_eq!(view.winner, -1);
    assert_eq!(view.participants.len(), 2);

    session.start_round(HOST).unwrap();
    let view = build_session_view(&snapshot_of(&session, 4));
    assert_eq!(view.current_turn, Some(0));
    assert_eq!(view.participants[0].hand_value, 13);
    assert_eq!(view.participants[0].hand.len(), 2);
}

#[test]
fn local_view_reports_shop_and_presence_data() {
    let mut session = table();
    session.start_round(HOST).unwrap();

    let host_view = build_local_view(&session.state, HOST).unwrap();
    assert!(host_view.can_act);
    assert_eq!(host_view.slot, 0);
    assert_eq!(host_view.hit_points, 30);

    let guest_view = build_local_view(&session.state, GUEST).unwrap();
    assert!(!guest_view.can_act);
    assert!(!guest_view.eliminated);

    assert_eq!(build_local_view(&session.state, 404), None);
}

#[test]
fn answer_query_dispatches_by_kind() {
    let session = table();
    let snapshot = snapshot_of(&session, 1);

    assert!(matches!(
        answer_query(&snapshot, &Query::GetSession),
        QueryResponse::Session(_)
    ));
    assert!(matches!(
        answer_query(&snapshot, &Query::GetParticipant { slot: 1 }),
        QueryResponse::Participant(Some(p)) if p.client_id == GUEST
    ));
    assert_eq!(
        answer_query(&snapshot, &Query::GetParticipant { slot: 9 }),
        QueryResponse::Participant(None)
    );
    assert!(matches!(
        answer_query(&snapshot, &Query::LocalView { client_id: HOST }),
        QueryResponse::LocalView(Some(_))
    ));
}

// -----------------------------
// СЕРИАЛИЗАЦИЯ
// -----------------------------

#[test]
fn commands_and_responses_survive_json() {
    let command = Command::PurchasePower {
        client_id: 7,
        effect_id: 3,
    };
    let json = serde_json::to_string(&command).unwrap();
    assert_eq!(serde_json::from_str::<Command>(&json).unwrap(), command);

    let mut session = table();
    let rejected = execute(&mut session, Command::Stand { client_id: 404 });
    let json = serde_json::to_string(&rejected).unwrap();
    assert_eq!(
        serde_json::from_str::<CommandResponse>(&json).unwrap(),
        rejected
    );
}

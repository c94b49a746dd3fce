// tests/domain_test.rs
//
// Доменный уровень:
//  - карты (Display / FromStr / очки);
//  - рука (ёмкость, clear, fingerprint);
//  - wire-формат руки и ошибки декодирования;
//  - колода (сброс с сохранением power-карт);
//  - подсчёт очков с гибким тузом;
//  - правила стола по умолчанию.

use blackjack_engine::domain::card::{Card, CardKind};
use blackjack_engine::domain::codec::{decode_card, encode_card, CodecError, CARD_RECORD_LEN};
use blackjack_engine::domain::hand::{Hand, HandFull, MAX_HAND_CARDS};
use blackjack_engine::domain::table::{Phase, RulesConfig, WinnerMark};
use blackjack_engine::domain::{ActionState, Chips, Deck, ParticipantSlot};
use blackjack_engine::engine::RandomSource;
use blackjack_engine::eval::{hand_value, is_bust, is_natural};
use blackjack_engine::infra::rng::DeterministicRng;

// -----------------------------
// ВСПОМОГАТЕЛЬНЫЕ КОНСТРУКТОРЫ
// -----------------------------

fn hand_of(cards: &[&str]) -> Hand {
    Hand::from_cards(cards.iter().map(|s| s.parse::<Card>().unwrap()))
}

// -----------------------------
// КАРТЫ
// -----------------------------

#[test]
fn card_display_and_parse_agree() {
    for s in ["A0", "T2", "K3", "71", "P42"] {
        let card: Card = s.parse().unwrap();
        assert_eq!(card.to_string(), s);
    }

    let power: Card = "P42".parse().unwrap();
    assert_eq!(power.kind, CardKind::Special);
    assert_eq!(power.effect_id, 42);
    assert_eq!(power.rank, 0);
}

#[test]
fn card_parse_rejects_garbage() {
    assert!("".parse::<Card>().is_err());
    assert!("X0".parse::<Card>().is_err());
    assert!("A9".parse::<Card>().is_err());
    assert!("Pzz".parse::<Card>().is_err());
}

#[test]
fn card_points_faces_count_ten_specials_zero() {
    assert_eq!(Card::ordinary(1, 0).base_points(), 1);
    assert_eq!(Card::ordinary(9, 0).base_points(), 9);
    assert_eq!(Card::ordinary(11, 0).base_points(), 10);
    assert_eq!(Card::ordinary(13, 2).base_points(), 10);
    assert_eq!(Card::special(5).base_points(), 0);
    assert!(Card::ordinary(1, 3).is_ace());
    assert!(!Card::special(1).is_ace());
}

// -----------------------------
// РУКА
// -----------------------------

#[test]
fn hand_rejects_card_past_capacity_and_stays_unchanged() {
    let mut hand = Hand::new();
    for i in 0..MAX_HAND_CARDS {
        hand.add(Card::ordinary((i % 13) as u8 + 1, 0)).unwrap();
    }
    assert!(hand.is_full());
    let before = hand.clone();

    assert_eq!(hand.add(Card::ordinary(1, 0)), Err(HandFull));
    assert_eq!(hand, before);
    assert_eq!(hand.len(), MAX_HAND_CARDS);
}

#[test]
fn hand_clear_and_get() {
    let mut hand = hand_of(&["A0", "K1"]);
    assert_eq!(hand.get(1), Some(&Card::ordinary(13, 1)));
    assert_eq!(hand.get(2), None);

    hand.clear();
    assert!(hand.is_empty());
}

#[test]
fn fingerprint_is_stable_and_structural() {
    let a = hand_of(&["A0", "K1"]);
    let b = hand_of(&["A0", "K1"]);
    let c = hand_of(&["K1", "A0"]);

    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());

    // Пустая рука: начальное значение свёртки.
    assert_eq!(Hand::new().fingerprint(), 17);

    // Одна карта A0: 17 → *31+0 → *31+1 → *31+0 → *31+0.
    let single = hand_of(&["A0"]);
    let expected = (((17u64 * 31) * 31 + 1) * 31) * 31;
    assert_eq!(single.fingerprint(), expected);
}

// -----------------------------
// WIRE-ФОРМАТ
// -----------------------------

#[test]
fn hand_wire_roundtrip_keeps_order_and_specials() {
    let hand = hand_of(&["A0", "P7", "Q3"]);
    let bytes = hand.encode_to_vec();

    assert_eq!(bytes.len(), 1 + 3 * CARD_RECORD_LEN);
    assert_eq!(bytes[0], 3);

    let decoded = Hand::decode(&mut bytes.as_slice()).unwrap();
    assert_eq!(decoded, hand);
}

#[test]
fn card_record_layout_is_big_endian() {
    let mut out = Vec::new();
    encode_card(&Card::special(0x0102_0304), &mut out);
    assert_eq!(out, vec![1, 0, 0, 1, 2, 3, 4]);

    let card = decode_card(&mut out.as_slice()).unwrap();
    assert_eq!(card, Card::special(0x0102_0304));
}

#[test]
fn decode_reports_truncated_buffer() {
    let bytes = hand_of(&["A0", "K1"]).encode_to_vec();
    let truncated = &bytes[..bytes.len() - 3];

    let err = Hand::decode(&mut &truncated[..]).unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedEof { .. }));

    let mut empty: &[u8] = &[];
    let err = Hand::decode(&mut empty).unwrap_err();
    assert_eq!(err, CodecError::UnexpectedEof { needed: 1, remaining: 0 });
}

#[test]
fn decode_rejects_unknown_kind_and_malformed_cards() {
    let unknown_kind = [9u8, 1, 0, 0, 0, 0, 0];
    assert_eq!(
        decode_card(&mut &unknown_kind[..]),
        Err(CodecError::UnknownCardKind(9))
    );

    let bad_rank = [0u8, 14, 0, 0, 0, 0, 0];
    assert!(matches!(
        decode_card(&mut &bad_rank[..]),
        Err(CodecError::MalformedCard { rank: 14, .. })
    ));

    let too_many = [(MAX_HAND_CARDS + 1) as u8];
    assert_eq!(
        Hand::decode(&mut &too_many[..]),
        Err(CodecError::HandTooLarge(MAX_HAND_CARDS + 1))
    );
}

// -----------------------------
// КОЛОДА
// -----------------------------

#[test]
fn fresh_deck_has_one_card_of_each_rank() {
    let deck = Deck::ordinary_set();
    let ranks: Vec<u8> = deck.cards.iter().map(|c| c.rank).collect();
    assert_eq!(ranks, (1..=13).collect::<Vec<u8>>());
    assert_eq!(deck.specials().count(), 0);
}

#[test]
fn deck_reset_keeps_specials_and_refills_ordinary() {
    let mut deck = Deck::ordinary_set();
    deck.add_special(3);
    deck.take_at(0).unwrap();
    deck.take_at(0).unwrap();
    assert_eq!(deck.len(), 12);

    deck.reset_keeping_specials();
    assert_eq!(deck.len(), 14);
    assert_eq!(deck.specials().count(), 1);
    assert_eq!(deck.cards[0], Card::special(3));
    assert_eq!(deck.take_at(99), None);
}

// -----------------------------
// ОЧКИ РУКИ
// -----------------------------

#[test]
fn ace_scoring_examples() {
    assert_eq!(hand_value(&hand_of(&["A0", "K0"])), 21);
    assert_eq!(hand_value(&hand_of(&["A0", "A1", "90"])), 21);
    assert_eq!(hand_value(&hand_of(&["A0", "A1", "K0"])), 12);
    assert_eq!(hand_value(&hand_of(&["A0", "50", "K0"])), 16);
    assert_eq!(hand_value(&hand_of(&["K0", "Q0", "50"])), 25);
    assert_eq!(hand_value(&hand_of(&["A0", "A1"])), 12);
    assert_eq!(hand_value(&Hand::new()), 0);
}

#[test]
fn three_aces_count_as_thirteen() {
    assert_eq!(hand_value(&hand_of(&["A0", "A1", "A2"])), 13);
}

#[test]
fn ordinary_hand_value_stays_within_card_count_bounds() {
    let mut rng = DeterministicRng::from_u64(21);

    for _ in 0..5000 {
        let len = 1 + rng.pick_index(MAX_HAND_CARDS);
        let cards: Vec<Card> = (0..len)
            .map(|_| {
                let rank = 1 + rng.pick_index(13) as u8;
                let suit = rng.pick_index(4) as u8;
                Card::ordinary(rank, suit)
            })
            .collect();
        let hand = Hand::from_cards(cards);

        let n = len as u32;
        let v = hand_value(&hand);
        assert!(n <= v && v <= 11 * n, "value {v} out of [{n}, {}]", 11 * n);
    }
}

#[test]
fn specials_do_not_change_value() {
    assert_eq!(hand_value(&hand_of(&["K0", "P1", "50"])), 15);
    assert_eq!(hand_value(&hand_of(&["P1", "P2"])), 0);
}

#[test]
fn bust_and_natural_flags() {
    assert!(is_bust(&hand_of(&["K0", "Q0", "20"])));
    assert!(!is_bust(&hand_of(&["K0", "Q0", "A0"])));

    assert!(is_natural(&hand_of(&["A0", "K0"])));
    assert!(!is_natural(&hand_of(&["70", "70", "70"])));
}

// -----------------------------
// СЛОТ, ФАЗЫ, ПРАВИЛА
// -----------------------------

#[test]
fn stood_or_busted_slot_cannot_take_turn() {
    assert!(!ActionState::None.is_resolved());
    assert!(ActionState::Stood.is_resolved());
    assert!(ActionState::Busted.is_resolved());

    let mut p = ParticipantSlot::new(1, 30);
    assert!(p.can_take_turn());
    p.action = ActionState::Stood;
    assert!(!p.can_take_turn());
}

#[test]
fn participant_damage_floors_at_zero() {
    let mut p = ParticipantSlot::new(7, 30);
    assert_eq!(p.take_damage(12), 12);
    assert_eq!(p.hit_points, 18);
    assert_eq!(p.take_damage(100), 18);
    assert_eq!(p.hit_points, 0);
    assert!(!p.is_alive());
    assert!(!p.can_take_turn());

    p.restore_full_hp();
    assert_eq!(p.hit_points, 30);
    assert_eq!(p.action, ActionState::None);
    assert_eq!(p.chips, Chips::ZERO);
}

#[test]
fn winner_sentinels() {
    assert_eq!(WinnerMark::NoWinner.as_sentinel(), -1);
    assert_eq!(WinnerMark::Tie.as_sentinel(), -2);
    assert_eq!(WinnerMark::Slot(3).as_sentinel(), 3);
    assert_eq!(WinnerMark::from_sentinel(-2), Some(WinnerMark::Tie));
    assert_eq!(WinnerMark::from_sentinel(1), Some(WinnerMark::Slot(1)));
    assert_eq!(WinnerMark::from_sentinel(-5), None);
}

#[test]
fn only_player_turn_blocks_start_round() {
    assert!(Phase::Waiting.accepts_start_round());
    assert!(Phase::RoundOver.accepts_start_round());
    assert!(Phase::GameOver.accepts_start_round());
    assert!(!Phase::PlayerTurn.accepts_start_round());
}

#[test]
fn default_rules_match_table_constants() {
    let rules = RulesConfig::default();
    assert_eq!(rules.starting_hp, 30);
    assert_eq!(rules.win_reward, Chips(10));
    assert_eq!(rules.natural_bonus, 5);
    assert_eq!(rules.upgrade_cost, Chips(10));
    assert_eq!(rules.upgrade_hp_bonus, 5);
    assert_eq!(rules.power_card_cost, Chips(15));
    assert!(rules.validate().is_ok());

    let broken = RulesConfig {
        starting_hp: 0,
        ..RulesConfig::default()
    };
    assert!(broken.validate().is_err());
}

use crate::domain::hand::Hand;

/// Порог перебора.
pub const BLACKJACK: u32 = 21;

/// Сколько добавляет туз, посчитанный как 11 вместо 1.
const SOFT_ACE_BONUS: u32 = 10;

/// Очки руки с "гибким" тузом.
///
/// Картинки считаются как 10, тузы как 1; пока есть неиспользованный туз
/// и сумма <= 11, один туз переводится в 11 (+10). Power-карты дают 0.
pub fn hand_value(hand: &Hand) -> u32 {
    let mut value = 0u32;
    let mut aces = 0u32;

    for card in hand.cards() {
        if card.is_ace() {
            aces += 1;
        }
        value += card.base_points();
    }

    while aces > 0 && value <= BLACKJACK - SOFT_ACE_BONUS {
        value += SOFT_ACE_BONUS;
        aces -= 1;
    }

    value
}

pub fn is_bust(hand: &Hand) -> bool {
    hand_value(hand) > BLACKJACK
}

/// Натуральный блэкджек: ровно две карты на 21.
pub fn is_natural(hand: &Hand) -> bool {
    hand.len() == 2 && hand_value(hand) == BLACKJACK
}

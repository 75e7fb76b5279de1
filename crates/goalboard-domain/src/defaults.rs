use crate::board::Board;
use crate::card::{Card, ParkingStatus};
use crate::column::{Column, ColumnId};

fn seeded(column: ColumnId, titles: &[&str]) -> Vec<Card> {
    titles
        .iter()
        .map(|title| Card::new(column, title.to_string()))
        .collect()
}

fn parked(title: &str, status: ParkingStatus) -> Card {
    let mut card = Card::new(ColumnId::Parking, title.to_string());
    match status {
        ParkingStatus::Future => card.is_future = Some(true),
        ParkingStatus::Completed => card.is_completed = Some(true),
        ParkingStatus::Unparked | ParkingStatus::Untagged => {}
    }
    card
}

/// The example board installed for identities with no saved state.
/// Card ids are freshly generated on every call.
pub fn default_board() -> Board {
    Board::new(vec![
        Column::new(ColumnId::Health, "Health", "lotus", "green").with_cards(seeded(
            ColumnId::Health,
            &["Exercise three times a week", "Eat more vegetables"],
        )),
        Column::new(ColumnId::Family, "Family", "heart", "blue").with_cards(seeded(
            ColumnId::Family,
            &[
                "Plan a family vacation",
                "Call parents on weekend",
                "Have a game night",
            ],
        )),
        Column::new(ColumnId::Create, "Create", "lightbulb", "orange").with_cards(seeded(
            ColumnId::Create,
            &["Write every day", "Learn piano"],
        )),
        Column::parking_lot().with_cards(vec![
            parked("Read a book", ParkingStatus::Future),
            parked("Complete project proposal", ParkingStatus::Completed),
        ]),
    ])
}

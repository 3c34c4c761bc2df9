use crate::domain::house::{House, HouseId};

/// Listings served by the simulated fetch when no seed file is configured.
pub fn initial_houses() -> Vec<House> {
    vec![
        House::new(1, "12 Valley of Kings", "Egypt", 900_000.0),
        House::new(2, "89 Road of Forks", "Switzerland", 500_000.0),
        House::new(3, "Grote Hof 12", "Belgium", 200_500.0),
        House::new(4, "Meel Kade 321", "Netherlands", 259_500.0),
        House::new(5, "Oude Gracht 32", "Netherlands", 400_500.0),
        House::new(6, "77 Sunset Boulevard", "USA", 1_250_000.0),
    ]
}

/// The fixed record the "Add" action appends.
pub fn placeholder_house(id: HouseId) -> House {
    House::new(id.0, "1456 Riverside Road", "USA", 25_000_000.0)
}

use std::collections::HashMap;

use crate::domain::house::{House, HouseId};
use crate::utils::format_currency;

/// Rendered rows keyed by listing id. A row is re-rendered only when the
/// listing it was rendered from no longer compares equal.
#[derive(Debug, Default)]
pub struct RowRenderCache {
    rows: HashMap<HouseId, (House, String)>,
    hits: u64,
    misses: u64,
}

impl RowRenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, house: &House) -> &str {
        let fresh = match self.rows.get(&house.id) {
            Some((cached, _)) => cached != house,
            None => true,
        };

        if fresh {
            self.misses += 1;
            self.rows
                .insert(house.id, (house.clone(), render_row(house)));
        } else {
            self.hits += 1;
        }

        self.rows
            .get(&house.id)
            .map(|(_, row)| row.as_str())
            .unwrap_or_default()
    }

    /// Forget rows for listings that are gone.
    pub fn retain(&mut self, houses: &[House]) {
        self.rows
            .retain(|id, _| houses.iter().any(|house| house.id == *id));
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn render_row(house: &House) -> String {
    format!(
        "{:>4}  {:<28}  {:<14}  {:>18}",
        house.id,
        house.address,
        house.country,
        format_currency(house.price)
    )
}

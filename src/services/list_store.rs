use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::house::{House, HouseId};
use crate::domain::seed;
use crate::services::error_handling::{ListingError, LogHelper};
use crate::services::validation::InputValidator;

/// Filter `houses` down to the listings whose country contains `query`,
/// ignoring case. Order is preserved; an empty query keeps everything.
pub fn project(houses: &[House], query: &str) -> Vec<House> {
    houses
        .iter()
        .filter(|house| house.matches_country(query))
        .cloned()
        .collect()
}

/// Owner of the canonical listing sequence.
///
/// The sequence is never edited in place. Every mutation builds a new vector
/// behind a fresh `Arc`, so a snapshot taken earlier keeps seeing the old list.
#[derive(Debug, Default)]
pub struct ListStore {
    houses: Arc<Vec<House>>,
    revision: u64,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<Vec<House>> {
        Arc::clone(&self.houses)
    }

    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    pub fn len(&self) -> usize {
        self.houses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }

    /// Number of mutations applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, id: HouseId) -> bool {
        self.houses.iter().any(|house| house.id == id)
    }

    pub fn apply_loaded(&mut self, houses: Vec<House>) {
        info!(count = houses.len(), "Applying loaded listings");
        self.replace(houses);
    }

    /// Drop the listing with `id`. Returns whether anything was removed; a
    /// missing id leaves the list with the same members in the same order.
    pub fn remove(&mut self, id: HouseId) -> bool {
        let remaining: Vec<House> = self
            .houses
            .iter()
            .filter(|house| house.id != id)
            .cloned()
            .collect();
        let removed = remaining.len() != self.houses.len();
        if removed {
            self.replace(remaining);
        }

        LogHelper::log_listing_operation("remove", id, removed);
        removed
    }

    /// Append a listing. Ids must stay unique, so a colliding id is rejected.
    pub fn add(&mut self, house: House) -> Result<(), ListingError> {
        if self.contains(house.id) {
            LogHelper::log_listing_operation("add", house.id, false);
            return Err(ListingError::DuplicateId { id: house.id });
        }
        InputValidator::validate_house(&house)?;
        let id = house.id;

        let mut next = Vec::with_capacity(self.houses.len() + 1);
        next.extend(self.houses.iter().cloned());
        next.push(house);
        self.replace(next);

        LogHelper::log_listing_operation("add", id, true);
        Ok(())
    }

    /// Append the fixed placeholder listing under a fresh id.
    pub fn add_placeholder(&mut self) -> Result<House, ListingError> {
        let house = seed::placeholder_house(self.next_id());
        self.add(house.clone())?;
        Ok(house)
    }

    /// One past the largest id in the list.
    pub fn next_id(&self) -> HouseId {
        let max = self.houses.iter().map(|house| house.id.0).max().unwrap_or(0);
        HouseId(max + 1)
    }

    pub fn project(&self, query: &str) -> Vec<House> {
        project(&self.houses, query)
    }

    fn replace(&mut self, houses: Vec<House>) {
        self.houses = Arc::new(houses);
        self.revision += 1;
        debug!(revision = self.revision, len = self.houses.len(), "Listing revision");
    }
}

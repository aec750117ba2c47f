use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use everycheese_common::slug::{candidate, is_assignable};
use everycheese_common::slugify;

use super::{CheeseChanges, CheeseRecord, CheeseStore, Country, NewCheese, StoreError};
use crate::seed::DEFAULT_COUNTRIES;

/// In-process [`CheeseStore`]. Records are keyed by slug, so slug assignment
/// is a single atomic entry reservation.
pub struct MemoryCheeseStore {
    next_id: AtomicI32,
    cheeses: DashMap<String, CheeseRecord>,
    countries: DashMap<String, Country>,
}

impl MemoryCheeseStore {
    /// A store seeded with the default country list.
    pub fn new() -> Self {
        Self::with_countries(DEFAULT_COUNTRIES.iter().map(|&(code, name)| Country {
            code: code.to_string(),
            name: name.to_string(),
        }))
    }

    pub fn with_countries(countries: impl IntoIterator<Item = Country>) -> Self {
        Self {
            next_id: AtomicI32::new(1),
            cheeses: DashMap::new(),
            countries: countries
                .into_iter()
                .map(|c| (c.code.clone(), c))
                .collect(),
        }
    }
}

impl Default for MemoryCheeseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheeseStore for MemoryCheeseStore {
    async fn list(&self) -> Result<Vec<CheeseRecord>, StoreError> {
        let mut records: Vec<CheeseRecord> =
            self.cheeses.iter().map(|r| r.value().clone()).collect();
        records.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
        Ok(records)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<CheeseRecord, StoreError> {
        self.cheeses
            .get(slug)
            .map(|r| r.value().clone())
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }

    async fn create(&self, new: NewCheese) -> Result<CheeseRecord, StoreError> {
        let country = match new.country_code {
            Some(ref code) => Some(
                self.country(code)
                    .await?
                    .ok_or_else(|| StoreError::UnknownCountry(code.clone()))?,
            ),
            None => None,
        };

        let base = slugify(&new.name);
        for n in 1..=u32::MAX {
            let slug = candidate(&base, n);
            if !is_assignable(&slug) {
                continue;
            }
            if let Entry::Vacant(entry) = self.cheeses.entry(slug.clone()) {
                let now = chrono::Utc::now();
                let record = CheeseRecord {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    name: new.name,
                    slug,
                    description: new.description,
                    firmness: new.firmness,
                    country,
                    creator: new.creator,
                    created_at: now,
                    updated_at: now,
                };
                entry.insert(record.clone());
                return Ok(record);
            }
        }

        Err(StoreError::Conflict(format!(
            "Could not assign a unique slug for '{}'",
            new.name
        )))
    }

    async fn update(
        &self,
        slug: &str,
        changes: CheeseChanges,
    ) -> Result<CheeseRecord, StoreError> {
        let mut record = self
            .cheeses
            .get_mut(slug)
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))?;

        if changes.is_empty() {
            return Ok(record.clone());
        }
        if let Some(description) = changes.description {
            record.description = description;
        }
        if let Some(firmness) = changes.firmness {
            record.firmness = firmness;
        }
        record.updated_at = chrono::Utc::now();

        Ok(record.clone())
    }

    async fn countries(&self) -> Result<Vec<Country>, StoreError> {
        let mut countries: Vec<Country> =
            self.countries.iter().map(|r| r.value().clone()).collect();
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    async fn country(&self, code: &str) -> Result<Option<Country>, StoreError> {
        Ok(self.countries.get(code).map(|r| r.value().clone()))
    }
}

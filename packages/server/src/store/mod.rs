//! Cheese persistence behind a backend-agnostic interface.
//!
//! Handlers only see [`CheeseStore`]; [`DbCheeseStore`] is the production
//! backend and [`MemoryCheeseStore`] keeps everything in process.

mod database;
mod error;
mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use everycheese_common::Firmness;

use crate::entity::country;

pub use database::DbCheeseStore;
pub use error::StoreError;
pub use memory::MemoryCheeseStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl From<country::Model> for Country {
    fn from(m: country::Model) -> Self {
        Self {
            code: m.code,
            name: m.name,
        }
    }
}

/// The user a cheese was created by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Creator {
    pub id: i32,
    pub username: String,
}

/// A cheese with its country and creator resolved for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheeseRecord {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub firmness: Firmness,
    pub country: Option<Country>,
    pub creator: Creator,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new cheese. The slug is derived by the store.
#[derive(Clone, Debug)]
pub struct NewCheese {
    pub name: String,
    pub description: String,
    pub firmness: Firmness,
    pub country_code: Option<String>,
    pub creator: Creator,
}

/// Mutable fields of an existing cheese. `None` leaves the field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheeseChanges {
    pub description: Option<String>,
    pub firmness: Option<Firmness>,
}

impl CheeseChanges {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.firmness.is_none()
    }
}

#[async_trait]
pub trait CheeseStore: Send + Sync {
    /// All cheeses, ordered by name.
    async fn list(&self) -> Result<Vec<CheeseRecord>, StoreError>;

    async fn get_by_slug(&self, slug: &str) -> Result<CheeseRecord, StoreError>;

    /// Persist a new cheese under the smallest free slug derived from its name.
    async fn create(&self, new: NewCheese) -> Result<CheeseRecord, StoreError>;

    /// Apply `changes` to the cheese at `slug`. Name, slug, country and
    /// creator are never touched.
    async fn update(&self, slug: &str, changes: CheeseChanges)
    -> Result<CheeseRecord, StoreError>;

    /// All known countries, ordered by name.
    async fn countries(&self) -> Result<Vec<Country>, StoreError>;

    async fn country(&self, code: &str) -> Result<Option<Country>, StoreError>;
}

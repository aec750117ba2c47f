use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use everycheese_common::{slugify, unique_slug};
use sea_orm::*;
use tracing::instrument;

use super::{CheeseChanges, CheeseRecord, CheeseStore, Country, Creator, NewCheese, StoreError};
use crate::entity::{cheese, country, user};

/// Insert attempts before a slug race is reported as a conflict.
const MAX_SLUG_ATTEMPTS: usize = 3;

/// [`CheeseStore`] backed by the relational database.
#[derive(Clone)]
pub struct DbCheeseStore {
    db: DatabaseConnection,
}

impl DbCheeseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn hydrate<C: ConnectionTrait>(
        db: &C,
        models: Vec<cheese::Model>,
    ) -> Result<Vec<CheeseRecord>, StoreError> {
        let creator_ids: Vec<i32> = models
            .iter()
            .map(|m| m.creator_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let country_codes: Vec<String> = models
            .iter()
            .filter_map(|m| m.country_code.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let creators: HashMap<i32, String> = if creator_ids.is_empty() {
            HashMap::new()
        } else {
            let rows: Vec<(i32, String)> = user::Entity::find()
                .filter(user::Column::Id.is_in(creator_ids))
                .select_only()
                .column(user::Column::Id)
                .column(user::Column::Username)
                .into_tuple()
                .all(db)
                .await?;
            rows.into_iter().collect()
        };

        let countries: HashMap<String, Country> = if country_codes.is_empty() {
            HashMap::new()
        } else {
            country::Entity::find()
                .filter(country::Column::Code.is_in(country_codes))
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.code.clone(), Country::from(c)))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| CheeseRecord {
                country: m
                    .country_code
                    .as_ref()
                    .and_then(|code| countries.get(code).cloned()),
                creator: Creator {
                    id: m.creator_id,
                    username: creators.get(&m.creator_id).cloned().unwrap_or_default(),
                },
                id: m.id,
                name: m.name,
                slug: m.slug,
                description: m.description,
                firmness: m.firmness,
                created_at: m.created_at,
                updated_at: m.updated_at,
            })
            .collect())
    }

    async fn hydrate_one<C: ConnectionTrait>(
        db: &C,
        model: cheese::Model,
    ) -> Result<CheeseRecord, StoreError> {
        let slug = model.slug.clone();
        Self::hydrate(db, vec![model])
            .await?
            .pop()
            .ok_or(StoreError::NotFound(slug))
    }

    async fn find_by_slug<C: ConnectionTrait>(
        db: &C,
        slug: &str,
    ) -> Result<cheese::Model, StoreError> {
        cheese::Entity::find()
            .filter(cheese::Column::Slug.eq(slug))
            .one(db)
            .await?
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }

    /// Insert `new` under `slug`. `None` means another writer already holds
    /// the slug.
    async fn try_insert(
        &self,
        new: &NewCheese,
        slug: &str,
    ) -> Result<Option<cheese::Model>, StoreError> {
        let now = chrono::Utc::now();
        let active = cheese::ActiveModel {
            name: Set(new.name.clone()),
            slug: Set(slug.to_string()),
            description: Set(new.description.clone()),
            firmness: Set(new.firmness),
            country_code: Set(new.country_code.clone()),
            creator_id: Set(new.creator.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match active.insert(&self.db).await {
            Ok(model) => Ok(Some(model)),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(None),
                _ => Err(e.into()),
            },
        }
    }

    /// Slugs already used by `base` or one of its numbered variants.
    async fn taken_slugs(&self, base: &str) -> Result<HashSet<String>, StoreError> {
        let slugs: Vec<String> = cheese::Entity::find()
            .select_only()
            .column(cheese::Column::Slug)
            .filter(
                Condition::any()
                    .add(cheese::Column::Slug.eq(base))
                    .add(cheese::Column::Slug.like(format!("{base}-%"))),
            )
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(slugs.into_iter().collect())
    }
}

#[async_trait]
impl CheeseStore for DbCheeseStore {
    async fn list(&self) -> Result<Vec<CheeseRecord>, StoreError> {
        let models = cheese::Entity::find()
            .order_by_asc(cheese::Column::Name)
            .order_by_asc(cheese::Column::Slug)
            .all(&self.db)
            .await?;
        Self::hydrate(&self.db, models).await
    }

    async fn get_by_slug(&self, slug: &str) -> Result<CheeseRecord, StoreError> {
        let model = Self::find_by_slug(&self.db, slug).await?;
        Self::hydrate_one(&self.db, model).await
    }

    #[instrument(skip(self, new), fields(name = %new.name, creator_id = new.creator.id))]
    async fn create(&self, new: NewCheese) -> Result<CheeseRecord, StoreError> {
        if let Some(ref code) = new.country_code
            && self.country(code).await?.is_none()
        {
            return Err(StoreError::UnknownCountry(code.clone()));
        }

        let base = slugify(&new.name);

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = unique_slug(&base, &self.taken_slugs(&base).await?);
            match self.try_insert(&new, &slug).await? {
                Some(model) => return Self::hydrate_one(&self.db, model).await,
                None => tracing::debug!(%slug, attempt, "Slug taken concurrently, retrying"),
            }
        }

        Err(StoreError::Conflict(format!(
            "Could not assign a unique slug for '{}'",
            new.name
        )))
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        slug: &str,
        changes: CheeseChanges,
    ) -> Result<CheeseRecord, StoreError> {
        let txn = self.db.begin().await?;

        let existing = Self::find_by_slug(&txn, slug).await?;
        if changes.is_empty() {
            let record = Self::hydrate_one(&txn, existing).await?;
            txn.commit().await?;
            return Ok(record);
        }

        let mut active: cheese::ActiveModel = existing.into();
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(firmness) = changes.firmness {
            active.firmness = Set(firmness);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&txn).await?;
        let record = Self::hydrate_one(&txn, model).await?;
        txn.commit().await?;

        Ok(record)
    }

    async fn countries(&self) -> Result<Vec<Country>, StoreError> {
        Ok(country::Entity::find()
            .order_by_asc(country::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Country::from)
            .collect())
    }

    async fn country(&self, code: &str) -> Result<Option<Country>, StoreError> {
        Ok(country::Entity::find_by_id(code.to_string())
            .one(&self.db)
            .await?
            .map(Country::from))
    }
}

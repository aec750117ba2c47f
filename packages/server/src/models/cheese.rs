use chrono::{DateTime, Utc};
use everycheese_common::Firmness;
use serde::{Deserialize, Serialize};

use super::shared::{FieldErrors, validate_name};
use crate::error::AppError;
use crate::store::{CheeseChanges, CheeseRecord, Country, Creator, NewCheese};

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Trimmed, uppercased country code; blank means no country.
pub fn normalize_country_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    (!code.is_empty()).then(|| code.to_ascii_uppercase())
}

/// Fields of the add/update cheese pages, as submitted.
///
/// Everything is kept as raw text so an invalid submission can be
/// redisplayed exactly as entered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheeseForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub firmness: String,
    #[serde(default)]
    pub country_of_origin: String,
}

impl CheeseForm {
    /// Prefill from an existing cheese.
    pub fn from_record(record: &CheeseRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            firmness: record.firmness.code().to_string(),
            country_of_origin: record
                .country
                .as_ref()
                .map(|c| c.code.clone())
                .unwrap_or_default(),
        }
    }

    fn parse_firmness(&self, errors: &mut FieldErrors) -> Firmness {
        let code = self.firmness.trim();
        if code.is_empty() {
            errors.add("firmness", "This field is required.");
            return Firmness::default();
        }
        code.parse().unwrap_or_else(|_| {
            errors.add(
                "firmness",
                format!("Select a valid choice. {code} is not one of the available choices."),
            );
            Firmness::default()
        })
    }

    /// Validate for the add page.
    pub fn to_new_cheese(&self, creator: Creator) -> Result<NewCheese, FieldErrors> {
        let mut errors = FieldErrors::default();
        if let Err(msg) = validate_name(&self.name, MAX_NAME_LENGTH) {
            errors.add("name", msg);
        }
        if let Err(msg) = validate_description(&self.description) {
            errors.add("description", msg);
        }
        let firmness = self.parse_firmness(&mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewCheese {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            firmness,
            country_code: normalize_country_code(&self.country_of_origin),
            creator,
        })
    }

    /// Validate for the update page. Only description and firmness are read.
    pub fn to_changes(&self) -> Result<CheeseChanges, FieldErrors> {
        let mut errors = FieldErrors::default();
        if let Err(msg) = validate_description(&self.description) {
            errors.add("description", msg);
        }
        let firmness = self.parse_firmness(&mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CheeseChanges {
            description: Some(self.description.clone()),
            firmness: Some(firmness),
        })
    }
}

/// Request body for creating a cheese through the API.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCheeseRequest {
    /// Display name; the slug is derived from it.
    #[schema(example = "Paski Sir")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "A salty hard cheese")]
    pub description: String,
    #[serde(default)]
    pub firmness: Firmness,
    /// ISO 3166-1 alpha-2 code.
    #[serde(default)]
    #[schema(example = "HR")]
    pub country_of_origin: Option<String>,
}

impl CreateCheeseRequest {
    pub fn into_new_cheese(self, creator: Creator) -> Result<NewCheese, AppError> {
        let mut errors = FieldErrors::default();
        if let Err(msg) = validate_name(&self.name, MAX_NAME_LENGTH) {
            errors.add("name", msg);
        }
        if let Err(msg) = validate_description(&self.description) {
            errors.add("description", msg);
        }
        if !errors.is_empty() {
            return Err(errors.into_app_error());
        }

        Ok(NewCheese {
            name: self.name.trim().to_string(),
            description: self.description,
            firmness: self.firmness,
            country_code: self
                .country_of_origin
                .as_deref()
                .and_then(normalize_country_code),
            creator,
        })
    }
}

/// Request body for updating a cheese. Absent fields are left unchanged;
/// name, slug, country and creator cannot be changed.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateCheeseRequest {
    #[schema(example = "Something new")]
    pub description: Option<String>,
    pub firmness: Option<Firmness>,
}

impl UpdateCheeseRequest {
    pub fn into_changes(self) -> Result<CheeseChanges, AppError> {
        if let Some(ref description) = self.description
            && let Err(msg) = validate_description(description)
        {
            return Err(AppError::Validation(msg));
        }
        Ok(CheeseChanges {
            description: self.description,
            firmness: self.firmness,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CountryResponse {
    #[schema(example = "HR")]
    pub code: String,
    #[schema(example = "Croatia")]
    pub name: String,
}

impl From<Country> for CountryResponse {
    fn from(c: Country) -> Self {
        Self {
            code: c.code,
            name: c.name,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CreatorResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice_wonder")]
    pub username: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CheeseResponse {
    #[schema(example = "paski-sir")]
    pub slug: String,
    #[schema(example = "Paski Sir")]
    pub name: String,
    pub description: String,
    pub firmness: Firmness,
    /// Human-readable firmness label.
    #[schema(example = "Hard")]
    pub firmness_display: String,
    pub country_of_origin: Option<CountryResponse>,
    pub creator: CreatorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CheeseRecord> for CheeseResponse {
    fn from(r: CheeseRecord) -> Self {
        Self {
            slug: r.slug,
            name: r.name,
            description: r.description,
            firmness: r.firmness,
            firmness_display: r.firmness.label().to_string(),
            country_of_origin: r.country.map(CountryResponse::from),
            creator: CreatorResponse {
                id: r.creator.id,
                username: r.creator.username,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

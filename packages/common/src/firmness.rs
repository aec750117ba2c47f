#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Texture grade of a cheese.
///
/// Each variant has a stored code (used in forms, JSON and the database) and a
/// human-readable label for display. When the `sea-orm` feature is enabled the
/// enum can be used directly as an entity column.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "kebab-case")]
pub enum Firmness {
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "unspecified"))]
    Unspecified,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "soft"))]
    Soft,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "semi-soft"))]
    SemiSoft,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "semi-hard"))]
    SemiHard,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "hard"))]
    Hard,
}

impl Firmness {
    /// All grades, softest first after `Unspecified`.
    pub const ALL: &'static [Firmness] = &[
        Self::Unspecified,
        Self::Soft,
        Self::SemiSoft,
        Self::SemiHard,
        Self::Hard,
    ];

    /// Stored code, e.g. `semi-hard`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Soft => "soft",
            Self::SemiSoft => "semi-soft",
            Self::SemiHard => "semi-hard",
            Self::Hard => "hard",
        }
    }

    /// Display label, e.g. `Semi-Hard`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::Soft => "Soft",
            Self::SemiSoft => "Semi-Soft",
            Self::SemiHard => "Semi-Hard",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Firmness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error when parsing an unknown firmness code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid firmness '{invalid}'. Valid values: {}", valid_codes())]
pub struct FirmnessParseError {
    invalid: String,
}

fn valid_codes() -> String {
    Firmness::ALL
        .iter()
        .map(|f| f.code())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for Firmness {
    type Err = FirmnessParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.code() == s)
            .ok_or_else(|| FirmnessParseError {
                invalid: s.to_string(),
            })
    }
}

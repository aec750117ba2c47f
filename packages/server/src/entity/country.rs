use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "country")]
pub struct Model {
    /// ISO 3166-1 alpha-2 code.
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,

    #[sea_orm(has_many)]
    pub cheeses: HasMany<super::cheese::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

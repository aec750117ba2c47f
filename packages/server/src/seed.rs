use sea_orm::sea_query::{Index, OnConflict};
use sea_orm::*;
use tracing::info;

use crate::entity::{cheese, country};

/// Countries seeded on startup, as `(code, name)`.
pub const DEFAULT_COUNTRIES: &[(&str, &str)] = &[
    ("AT", "Austria"),
    ("BE", "Belgium"),
    ("CA", "Canada"),
    ("CH", "Switzerland"),
    ("CY", "Cyprus"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("ES", "Spain"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("GR", "Greece"),
    ("HR", "Croatia"),
    ("IE", "Ireland"),
    ("IT", "Italy"),
    ("MX", "Mexico"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("SE", "Sweden"),
    ("TR", "Turkey"),
    ("US", "United States of America"),
];

/// Seed the `country` table with defaults. Existing rows are left untouched.
pub async fn seed_countries(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for &(code, name) in DEFAULT_COUNTRIES {
        let model = country::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = country::Entity::insert(model)
            .on_conflict(
                OnConflict::column(country::Column::Code)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(0) => {}
            Ok(_) => inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new countries", inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// Schema sync only creates the unique index on `slug`; the list view orders
/// by name, so that index is created here.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_cheese_name")
        .table(cheese::Entity)
        .col(cheese::Column::Name)
        .to_owned();

    let backend = db.get_database_backend();
    match db.execute_raw(backend.build(&stmt)).await {
        Ok(_) => info!("Ensured index idx_cheese_name exists"),
        Err(e) => tracing::warn!("Failed to create index idx_cheese_name: {}", e),
    }

    Ok(())
}

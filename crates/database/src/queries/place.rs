use directory::store::{Result, StoreError};
use model::place::{PlaceRecord, PlaceSummary};
use sqlx::{Executor, Postgres};

use super::convert_error;

// Table names are interpolated into the query strings below. They only
// ever come from the static category registry, never from request input.

pub async fn insert<'c, E>(
    executor: E,
    table: &str,
    place: &PlaceRecord,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = format!(
        "
        INSERT INTO {table}(
            id, name, slug, international_phone_number, address,
            opening_hours, rating, user_rating_count, restroom,
            wheelchair_accessible_parking, wheelchair_accessible_restroom,
            wheelchair_accessible_entrance, google_maps_uri, website_uri,
            latitude, longitude, description, good_for_children, services,
            payment_options, reviews, fuel_options, charge_options,
            categories, city_id, country_id
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
            $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26
        );
        "
    );

    sqlx::query(&query)
        .bind(&place.id)
        .bind(&place.name)
        .bind(&place.slug)
        .bind(&place.international_phone_number)
        .bind(&place.address)
        .bind(&place.opening_hours)
        .bind(place.rating)
        .bind(place.user_rating_count)
        .bind(place.restroom)
        .bind(place.wheelchair_accessible_parking)
        .bind(place.wheelchair_accessible_restroom)
        .bind(place.wheelchair_accessible_entrance)
        .bind(&place.google_maps_uri)
        .bind(&place.website_uri)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(&place.description)
        .bind(place.good_for_children)
        .bind(&place.services)
        .bind(&place.payment_options)
        .bind(&place.reviews)
        .bind(&place.fuel_options)
        .bind(&place.charge_options)
        .bind(&place.categories)
        .bind(place.city_id)
        .bind(place.country_id)
        .execute(executor)
        .await
        .map(|_| ())
        .map_err(convert_error)
}

pub async fn categories<'c, E>(
    executor: E,
    table: &str,
    id: &str,
) -> Result<Option<Vec<String>>>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = format!("SELECT categories FROM {table} WHERE id = $1;");

    let row: Option<(Option<Vec<String>>,)> = sqlx::query_as(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(convert_error)?;

    Ok(row.map(|(categories,)| categories.unwrap_or_default()))
}

pub async fn set_categories<'c, E>(
    executor: E,
    table: &str,
    id: &str,
    categories: &[String],
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = format!("UPDATE {table} SET categories = $2 WHERE id = $1;");

    let result = sqlx::query(&query)
        .bind(id)
        .bind(categories)
        .execute(executor)
        .await
        .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

#[derive(sqlx::FromRow)]
struct PlaceSummaryRow {
    id: String,
    name: String,
    slug: String,
    address: Option<String>,
    rating: Option<f64>,
    user_rating_count: Option<i32>,
    services: Vec<String>,
    description: Option<String>,
}

impl From<PlaceSummaryRow> for PlaceSummary {
    fn from(row: PlaceSummaryRow) -> Self {
        PlaceSummary {
            id: row.id,
            name: row.name,
            slug: row.slug,
            address: row.address,
            rating: row.rating,
            user_rating_count: row.user_rating_count,
            services: row.services,
            description: row.description,
        }
    }
}

/// Rows still lacking a usable description. Very short descriptions count
/// as missing, they are typically truncated imports.
pub async fn without_description<'c, E>(
    executor: E,
    table: &str,
) -> Result<Vec<PlaceSummary>>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = format!(
        "
        SELECT
            id, name, slug, address, rating, user_rating_count,
            services, description
        FROM {table}
        WHERE description IS NULL OR length(description) < 50
        ORDER BY name;
        "
    );

    let rows: Vec<PlaceSummaryRow> = sqlx::query_as(&query)
        .fetch_all(executor)
        .await
        .map_err(convert_error)?;

    Ok(rows.into_iter().map(PlaceSummary::from).collect())
}

pub async fn set_description<'c, E>(
    executor: E,
    table: &str,
    id: &str,
    description: &str,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = format!("UPDATE {table} SET description = $2 WHERE id = $1;");

    let result = sqlx::query(&query)
        .bind(id)
        .bind(description)
        .execute(executor)
        .await
        .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

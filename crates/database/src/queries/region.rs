use directory::store::Result;
use model::region::{City, Country};
use sqlx::PgPool;
use uuid::Uuid;

use super::convert_error;

/// All countries with their cities, ready for the import loops.
pub async fn countries(pool: &PgPool) -> Result<Vec<Country>> {
    let country_rows: Vec<(i32, String)> =
        sqlx::query_as("SELECT id, name FROM countries ORDER BY id;")
            .fetch_all(pool)
            .await
            .map_err(convert_error)?;

    let city_rows: Vec<(Uuid, String, i32)> =
        sqlx::query_as("SELECT id, name, country_id FROM cities ORDER BY name;")
            .fetch_all(pool)
            .await
            .map_err(convert_error)?;

    let mut countries = country_rows
        .into_iter()
        .map(|(id, name)| Country {
            id,
            name,
            cities: Vec::new(),
        })
        .collect::<Vec<_>>();

    for (id, name, country_id) in city_rows {
        if let Some(country) =
            countries.iter_mut().find(|country| country.id == country_id)
        {
            country.cities.push(City { id, name });
        }
    }

    Ok(countries)
}

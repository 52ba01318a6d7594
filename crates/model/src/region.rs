use uuid::Uuid;

/// A city places are imported for. One upstream query is issued per city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: Uuid,
    pub name: String,
}

/// A country together with its cities, the outer loop of every import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub cities: Vec<City>,
}

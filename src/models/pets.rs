#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PetRow {
    pub pet_id: String,
    pub owner_id: String,
    pub name: String,
    pub pet_type: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub age: Option<i64>,
    pub description: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: String,
}

// Search result row; owner coordinates drive the distance filter.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PetSearchRow {
    pub pet_id: String,
    pub owner_id: String,
    pub owner_username: String,
    pub name: String,
    pub pet_type: String,
    pub breed: Option<String>,
    pub age: Option<i64>,
    pub profile_picture_url: Option<String>,
    pub owner_latitude: Option<f64>,
    pub owner_longitude: Option<f64>,
    #[sqlx(skip)]
    pub distance_mi: Option<f64>,
}

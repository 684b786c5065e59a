use sqlx::{sqlite::SqliteArguments, Arguments, SqlitePool};

use crate::models::{PetRow, PetSearchRow};

pub struct NewPet<'a> {
    pub pet_id: &'a str,
    pub owner_id: &'a str,
    pub name: &'a str,
    pub pet_type: &'a str,
    pub breed: Option<&'a str>,
    pub color: Option<&'a str>,
    pub age: Option<i64>,
    pub description: Option<&'a str>,
    pub profile_picture_url: Option<&'a str>,
}

const SQL_INSERT_PET: &str = r#"
INSERT INTO pets (
  pet_id,
  owner_id,
  name,
  pet_type,
  breed,
  color,
  age,
  description,
  profile_picture_url
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub async fn insert_pet(pool: &SqlitePool, pet: NewPet<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_PET)
        .bind(pet.pet_id)
        .bind(pet.owner_id)
        .bind(pet.name)
        .bind(pet.pet_type)
        .bind(pet.breed)
        .bind(pet.color)
        .bind(pet.age)
        .bind(pet.description)
        .bind(pet.profile_picture_url)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_LOAD_PET: &str = r#"
SELECT
  pet_id,
  owner_id,
  name,
  pet_type,
  breed,
  color,
  age,
  description,
  profile_picture_url,
  created_at
FROM pets
WHERE pet_id = ?1
  AND (is_deleted = 0 OR is_deleted IS NULL)
LIMIT 1
"#;

pub async fn load_pet(pool: &SqlitePool, pet_id: &str) -> sqlx::Result<Option<PetRow>> {
    sqlx::query_as::<_, PetRow>(SQL_LOAD_PET)
        .bind(pet_id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_PETS_BY_OWNER: &str = r#"
SELECT
  pet_id,
  owner_id,
  name,
  pet_type,
  breed,
  color,
  age,
  description,
  profile_picture_url,
  created_at
FROM pets
WHERE owner_id = ?1
  AND (is_deleted = 0 OR is_deleted IS NULL)
ORDER BY created_at ASC
"#;

pub async fn list_pets_by_owner(pool: &SqlitePool, owner_id: &str) -> sqlx::Result<Vec<PetRow>> {
    sqlx::query_as::<_, PetRow>(SQL_LIST_PETS_BY_OWNER)
        .bind(owner_id)
        .fetch_all(pool)
        .await
}

pub struct PetUpdate<'a> {
    pub name: &'a str,
    pub pet_type: &'a str,
    pub breed: Option<&'a str>,
    pub color: Option<&'a str>,
    pub age: Option<i64>,
    pub description: Option<&'a str>,
    pub profile_picture_url: Option<&'a str>,
}

const SQL_UPDATE_PET: &str = r#"
UPDATE pets
SET name = ?2,
    pet_type = ?3,
    breed = ?4,
    color = ?5,
    age = ?6,
    description = ?7,
    profile_picture_url = ?8
WHERE pet_id = ?1
  AND (is_deleted = 0 OR is_deleted IS NULL)
"#;

pub async fn update_pet(
    pool: &SqlitePool,
    pet_id: &str,
    update: PetUpdate<'_>,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_PET)
        .bind(pet_id)
        .bind(update.name)
        .bind(update.pet_type)
        .bind(update.breed)
        .bind(update.color)
        .bind(update.age)
        .bind(update.description)
        .bind(update.profile_picture_url)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

const SQL_SOFT_DELETE_PET: &str = r#"
UPDATE pets
SET is_deleted = 1
WHERE pet_id = ?1
  AND (is_deleted = 0 OR is_deleted IS NULL)
"#;

pub async fn soft_delete_pet(pool: &SqlitePool, pet_id: &str) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_SOFT_DELETE_PET)
        .bind(pet_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

const SQL_REFRESH_HAS_PETS: &str = r#"
UPDATE users
SET has_pets = EXISTS (
  SELECT 1 FROM pets
  WHERE owner_id = ?1
    AND (is_deleted = 0 OR is_deleted IS NULL)
)
WHERE user_id = ?1
"#;

pub async fn refresh_has_pets(pool: &SqlitePool, user_id: &str) -> sqlx::Result<()> {
    sqlx::query(SQL_REFRESH_HAS_PETS)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub struct PetSearchParams<'a> {
    pub pet_id: Option<&'a str>,
    pub name: Option<&'a str>,
    pub breed: Option<&'a str>,
    pub age: Option<i64>,
}

const SQL_SEARCH_PETS_BASE: &str = r#"
SELECT
    p.pet_id, p.owner_id, u.username AS owner_username,
    p.name, p.pet_type, p.breed, p.age, p.profile_picture_url,
    u.latitude AS owner_latitude, u.longitude AS owner_longitude
FROM pets p
JOIN users u ON u.user_id = p.owner_id
WHERE (p.is_deleted = 0 OR p.is_deleted IS NULL)
  AND (u.is_deleted = 0 OR u.is_deleted IS NULL)
"#;

// Same two-stage shape as the user search: coarse box here, exact
// distance cut in the service. The box runs against the owner's coordinate.
pub async fn search_pet_candidates(
    pool: &SqlitePool,
    params: PetSearchParams<'_>,
    bbox: Option<(f64, f64, f64, f64)>,
) -> sqlx::Result<Vec<PetSearchRow>> {
    let mut sql = String::from(SQL_SEARCH_PETS_BASE);
    let mut args = SqliteArguments::default();

    if let Some(pet_id) = params.pet_id {
        sql.push_str(" AND p.pet_id = ?");
        args.add(pet_id);
    }
    if let Some(name) = params.name {
        sql.push_str(" AND LOWER(p.name) LIKE '%' || LOWER(?) || '%'");
        args.add(name);
    }
    if let Some(breed) = params.breed {
        sql.push_str(" AND LOWER(p.breed) LIKE '%' || LOWER(?) || '%'");
        args.add(breed);
    }
    if let Some(age) = params.age {
        sql.push_str(" AND p.age = ?");
        args.add(age);
    }

    if let Some((min_lat, max_lat, min_lon, max_lon)) = bbox {
        sql.push_str(" AND u.latitude BETWEEN ? AND ? AND u.longitude BETWEEN ? AND ?");
        args.add(min_lat);
        args.add(max_lat);
        args.add(min_lon);
        args.add(max_lon);
    }

    sql.push_str(" LIMIT 500");

    sqlx::query_as_with::<_, PetSearchRow, _>(&sql, args)
        .fetch_all(pool)
        .await
}

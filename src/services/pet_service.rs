use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::pet_repo;
use crate::error::{ServiceError, ServiceResult};
use crate::models::PetRow;

const PET_TYPES: [&str; 5] = ["dog", "cat", "bird", "reptile", "other"];

#[derive(Debug, Deserialize)]
pub struct NewPetRequest {
    pub name: String,
    pub pet_type: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub age: Option<i64>,
    pub description: Option<String>,
    pub profile_picture_url: Option<String>,
}

pub async fn create_pet(
    pool: &SqlitePool,
    owner_id: &str,
    request: NewPetRequest,
) -> ServiceResult<PetRow> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation("pet name is required".into()));
    }
    let pet_type = validate_pet_type(&request.pet_type)?;

    let pet_id = Uuid::new_v4().to_string();
    pet_repo::insert_pet(
        pool,
        pet_repo::NewPet {
            pet_id: &pet_id,
            owner_id,
            name,
            pet_type,
            breed: request.breed.as_deref(),
            color: request.color.as_deref(),
            age: request.age,
            description: request.description.as_deref(),
            profile_picture_url: request.profile_picture_url.as_deref(),
        },
    )
    .await?;
    pet_repo::refresh_has_pets(pool, owner_id).await?;

    pet_repo::load_pet(pool, &pet_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn load_pet(pool: &SqlitePool, pet_id: &str) -> ServiceResult<PetRow> {
    pet_repo::load_pet(pool, pet_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn list_pets(pool: &SqlitePool, owner_id: &str) -> ServiceResult<Vec<PetRow>> {
    Ok(pet_repo::list_pets_by_owner(pool, owner_id).await?)
}

pub async fn update_pet(
    pool: &SqlitePool,
    pet_id: &str,
    actor_id: &str,
    request: NewPetRequest,
) -> ServiceResult<PetRow> {
    let pet = pet_repo::load_pet(pool, pet_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if pet.owner_id != actor_id {
        return Err(ServiceError::Forbidden);
    }

    let name = request.name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation("pet name is required".into()));
    }
    let pet_type = validate_pet_type(&request.pet_type)?;

    pet_repo::update_pet(
        pool,
        pet_id,
        pet_repo::PetUpdate {
            name,
            pet_type,
            breed: request.breed.as_deref(),
            color: request.color.as_deref(),
            age: request.age,
            description: request.description.as_deref(),
            profile_picture_url: request.profile_picture_url.as_deref(),
        },
    )
    .await?;

    pet_repo::load_pet(pool, pet_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Owner-only soft delete; the owner's has_pets flag follows.
pub async fn delete_pet(pool: &SqlitePool, pet_id: &str, actor_id: &str) -> ServiceResult<()> {
    let pet = pet_repo::load_pet(pool, pet_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if pet.owner_id != actor_id {
        return Err(ServiceError::Forbidden);
    }

    pet_repo::soft_delete_pet(pool, pet_id).await?;
    pet_repo::refresh_has_pets(pool, actor_id).await?;
    Ok(())
}

fn validate_pet_type(raw: &str) -> Result<&str, ServiceError> {
    let raw = raw.trim();
    PET_TYPES
        .iter()
        .find(|t| t.eq_ignore_ascii_case(raw))
        .copied()
        .ok_or_else(|| ServiceError::Validation(format!("unknown pet type '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_type_is_case_insensitive() {
        assert_eq!(validate_pet_type("Dog").unwrap(), "dog");
        assert_eq!(validate_pet_type(" CAT ").unwrap(), "cat");
        assert!(validate_pet_type("dragon").is_err());
    }
}

//! Hero collection operations behind the HTTP routes. Each function validates
//! its input, talks to storage, and reports failures as [`ApiError`].

use shared::{
    domain::{Hero, HeroId, NewHero},
    error::{ApiError, ErrorCode},
};
use storage::Storage;
use tracing::debug;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

/// Lists the whole collection, or the heroes whose name contains `name` when a
/// non-blank filter is given.
pub async fn list_heroes(ctx: &ApiContext, name: Option<&str>) -> Result<Vec<Hero>, ApiError> {
    match name.map(str::trim).filter(|term| !term.is_empty()) {
        Some(term) => {
            debug!(term, "searching heroes");
            ctx.storage.search_heroes(term).await.map_err(internal)
        }
        None => ctx.storage.list_heroes().await.map_err(internal),
    }
}

pub async fn get_hero(ctx: &ApiContext, id: HeroId) -> Result<Hero, ApiError> {
    ctx.storage
        .get_hero(id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))
}

pub async fn create_hero(ctx: &ApiContext, hero: NewHero) -> Result<Hero, ApiError> {
    let name = validated_name(&hero.name)?;
    ctx.storage.create_hero(name).await.map_err(internal)
}

pub async fn update_hero(ctx: &ApiContext, hero: Hero) -> Result<(), ApiError> {
    let name = validated_name(&hero.name)?;
    let updated = ctx
        .storage
        .update_hero(&Hero::new(hero.id, name))
        .await
        .map_err(internal)?;
    if !updated {
        return Err(not_found(hero.id));
    }
    Ok(())
}

pub async fn delete_hero(ctx: &ApiContext, id: HeroId) -> Result<(), ApiError> {
    let deleted = ctx.storage.delete_hero(id).await.map_err(internal)?;
    if !deleted {
        return Err(not_found(id));
    }
    Ok(())
}

fn validated_name(raw: &str) -> Result<&str, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::new(
            ErrorCode::Validation,
            "hero name cannot be empty",
        ));
    }
    Ok(name)
}

fn not_found(id: HeroId) -> ApiError {
    ApiError::new(ErrorCode::NotFound, format!("hero {id} not found"))
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;

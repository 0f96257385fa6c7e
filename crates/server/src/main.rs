use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::{Hero, HeroId, NewHero},
    error::{ApiError, ErrorCode},
    protocol::{hero_search_route, HeroSearchQuery, HEROES_ROUTE},
};
use storage::Storage;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::ApiContext;
use app_state::AppState;
use config::{load_settings, prepare_database_url};

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    if settings.seed_heroes {
        storage.seed_heroes().await?;
    }

    let app = build_router(Arc::new(AppState {
        api: ApiContext { storage },
    }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "hero server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            HEROES_ROUTE,
            get(http_list_heroes).post(http_create_hero).put(http_update_hero),
        )
        .route(&hero_search_route(), get(http_list_heroes))
        .route(
            &format!("{HEROES_ROUTE}/:id"),
            get(http_get_hero).delete(http_delete_hero),
        )
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, HttpError> {
    state
        .api
        .storage
        .health_check()
        .await
        .map_err(|e| http_error(ApiError::new(ErrorCode::Internal, e.to_string())))?;
    Ok("ok")
}

async fn http_list_heroes(
    State(state): State<Arc<AppState>>,
    Query(q): Query<HeroSearchQuery>,
) -> Result<Json<Vec<Hero>>, HttpError> {
    let heroes = api::list_heroes(&state.api, q.name.as_deref())
        .await
        .map_err(http_error)?;
    Ok(Json(heroes))
}

async fn http_get_hero(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Hero>, HttpError> {
    let hero = api::get_hero(&state.api, HeroId(id))
        .await
        .map_err(http_error)?;
    Ok(Json(hero))
}

async fn http_create_hero(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewHero>,
) -> Result<(StatusCode, Json<Hero>), HttpError> {
    let hero = api::create_hero(&state.api, req)
        .await
        .map_err(http_error)?;
    info!(hero_id = hero.id.0, "created hero");
    Ok((StatusCode::CREATED, Json(hero)))
}

async fn http_update_hero(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Hero>,
) -> Result<StatusCode, HttpError> {
    let hero_id = req.id;
    api::update_hero(&state.api, req)
        .await
        .map_err(http_error)?;
    info!(hero_id = hero_id.0, "updated hero");
    Ok(StatusCode::NO_CONTENT)
}

async fn http_delete_hero(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    api::delete_hero(&state.api, HeroId(id))
        .await
        .map_err(http_error)?;
    info!(hero_id = id, "deleted hero");
    Ok(StatusCode::NO_CONTENT)
}

fn http_error(err: ApiError) -> HttpError {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(message = %err.message, "hero request failed");
    }
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;

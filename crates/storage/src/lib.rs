use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::info;

use shared::domain::{Hero, HeroId};

/// The roster the store starts with when seeding is enabled. Ids begin at 11
/// so freshly created heroes land after the seeded block.
pub const SEED_HEROES: &[(i64, &str)] = &[
    (11, "Dr Nice"),
    (12, "Narco"),
    (13, "Bombasto"),
    (14, "Celeritas"),
    (15, "Magneta"),
    (16, "RubberMan"),
    (17, "Dynama"),
    (18, "Dr IQ"),
    (19, "Magma"),
    (20, "Tornado"),
];

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Inserts [`SEED_HEROES`] when the table is empty. Returns how many rows
    /// were written.
    pub async fn seed_heroes(&self) -> Result<usize> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM heroes")
            .fetch_one(&self.pool)
            .await
            .context("failed to count heroes")?;
        if existing > 0 {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for &(id, name) in SEED_HEROES {
            sqlx::query("INSERT INTO heroes (id, name) VALUES (?, ?)")
                .bind(id)
                .bind(name)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("failed to seed hero {id}"))?;
        }
        tx.commit().await?;

        info!(count = SEED_HEROES.len(), "seeded hero table");
        Ok(SEED_HEROES.len())
    }

    pub async fn list_heroes(&self) -> Result<Vec<Hero>> {
        let rows = sqlx::query("SELECT id, name FROM heroes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(hero_from_row).collect())
    }

    /// Case-insensitive substring match on the hero name.
    pub async fn search_heroes(&self, term: &str) -> Result<Vec<Hero>> {
        let rows = sqlx::query(
            "SELECT id, name FROM heroes
             WHERE instr(lower(name), lower(?)) > 0
             ORDER BY id",
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(hero_from_row).collect())
    }

    pub async fn get_hero(&self, id: HeroId) -> Result<Option<Hero>> {
        let row = sqlx::query("SELECT id, name FROM heroes WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(hero_from_row))
    }

    pub async fn create_hero(&self, name: &str) -> Result<Hero> {
        let rec = sqlx::query("INSERT INTO heroes (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(Hero::new(HeroId(rec.get::<i64, _>(0)), name))
    }

    /// Replaces the stored name. Returns `false` when no hero has that id.
    pub async fn update_hero(&self, hero: &Hero) -> Result<bool> {
        let result = sqlx::query("UPDATE heroes SET name = ? WHERE id = ?")
            .bind(&hero.name)
            .bind(hero.id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no hero has that id.
    pub async fn delete_hero(&self, id: HeroId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn hero_from_row(row: &SqliteRow) -> Hero {
    Hero::new(HeroId(row.get::<i64, _>("id")), row.get::<String, _>("name"))
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::domain::HeroId;

pub const HEROES_ROUTE: &str = "/api/heroes";

pub fn hero_route(id: HeroId) -> String {
    format!("{HEROES_ROUTE}/{id}")
}

/// Search goes through the collection path with a trailing slash, e.g.
/// `/api/heroes/?name=ma`.
pub fn hero_search_route() -> String {
    format!("{HEROES_ROUTE}/")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroSearchQuery {
    #[serde(default)]
    pub name: Option<String>,
}

use shared::domain::{Hero, NewHero};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::{HeroClient, HeroRef};

/// Local mirror of the hero collection behind the heroes view.
pub struct HeroesController {
    client: HeroClient,
    heroes: Vec<Hero>,
}

impl HeroesController {
    pub fn new(client: HeroClient) -> Self {
        Self {
            client,
            heroes: Vec::new(),
        }
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    /// Replaces the local list with whatever the backend returns. A failed
    /// fetch leaves an empty list.
    pub async fn load(&mut self) {
        self.heroes = self.client.get_heroes().await;
    }

    /// Creates a hero from a trimmed, non-empty name and appends it. Blank
    /// names are ignored without contacting the backend.
    pub async fn add(&mut self, name: &str) -> Option<&Hero> {
        let name = name.trim();
        if name.is_empty() {
            debug!("heroes: ignoring blank hero name");
            return None;
        }
        let created = self.client.add_hero(&NewHero::new(name)).await?;
        self.heroes.push(created);
        self.heroes.last()
    }

    /// Drops `hero` from the local list right away and spawns the backend
    /// delete. The request is sent whether or not the handle is awaited, and
    /// the local removal is never rolled back, whatever the backend answers.
    ///
    /// Must be called from within a tokio runtime.
    pub fn delete(&mut self, hero: &Hero) -> JoinHandle<()> {
        self.heroes.retain(|h| h.id != hero.id);
        let client = self.client.clone();
        let target = HeroRef::from(hero);
        tokio::spawn(async move {
            client.delete_hero(target).await;
        })
    }
}

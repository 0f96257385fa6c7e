use std::sync::Arc;

use shared::domain::{Hero, HeroId};
use tracing::warn;

use crate::{
    client::HeroClient,
    navigation::{NavigationContext, Navigator},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Unresolved,
    /// Lookup finished; `None` means no hero came back.
    Resolved(Option<Hero>),
}

/// Detail view for one hero: resolve from the route id, edit, save, go back.
pub struct HeroDetailController {
    client: HeroClient,
    navigator: Arc<dyn Navigator>,
    state: DetailState,
}

impl HeroDetailController {
    pub fn new(client: HeroClient, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            client,
            navigator,
            state: DetailState::Unresolved,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn hero(&self) -> Option<&Hero> {
        match &self.state {
            DetailState::Resolved(hero) => hero.as_ref(),
            DetailState::Unresolved => None,
        }
    }

    pub fn hero_mut(&mut self) -> Option<&mut Hero> {
        match &mut self.state {
            DetailState::Resolved(hero) => hero.as_mut(),
            DetailState::Unresolved => None,
        }
    }

    /// Renames the loaded hero. Returns `false` when nothing is loaded.
    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        match self.hero_mut() {
            Some(hero) => {
                hero.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Restarts at [`DetailState::Unresolved`] and looks up the hero named by
    /// the route. An id that is not an integer resolves to no hero without a
    /// backend call.
    pub async fn activate(&mut self, context: &NavigationContext) {
        self.state = DetailState::Unresolved;
        let hero = match parse_hero_id(&context.id_param) {
            Some(id) => self.client.get_hero(id).await,
            None => {
                warn!(id_param = %context.id_param, "heroes: route id is not an integer");
                None
            }
        };
        self.state = DetailState::Resolved(hero);
    }

    /// Sends the edited hero and navigates back whatever the outcome. With no
    /// hero loaded there is nothing to send, and the view still navigates back.
    pub async fn save(&mut self) {
        if let Some(hero) = self.hero() {
            self.client.update_hero(hero).await;
        }
        self.go_back();
    }

    pub fn go_back(&self) {
        self.navigator.back();
    }
}

fn parse_hero_id(raw: &str) -> Option<HeroId> {
    raw.trim().parse::<i64>().ok().map(HeroId)
}

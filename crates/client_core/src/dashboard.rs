use shared::domain::Hero;

use crate::client::HeroClient;

const TOP_HEROES: std::ops::Range<usize> = 1..5;

/// Dashboard view: the second through fifth heroes of the collection.
pub struct DashboardController {
    client: HeroClient,
    heroes: Vec<Hero>,
}

impl DashboardController {
    pub fn new(client: HeroClient) -> Self {
        Self {
            client,
            heroes: Vec::new(),
        }
    }

    pub fn top_heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub async fn load(&mut self) {
        let all = self.client.get_heroes().await;
        self.heroes = all
            .into_iter()
            .skip(TOP_HEROES.start)
            .take(TOP_HEROES.len())
            .collect();
    }
}

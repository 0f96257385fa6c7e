//! Scripted in-process backend for client and controller tests.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::domain::{Hero, HeroId};

use crate::{
    client::HeroClient,
    error::TransportError,
    messages::MessageService,
    transport::{HeroTransport, TransportRequest},
};

/// Emulates the hero API over a `Vec<Hero>`. Flip `fail` to make every call
/// fail the way an unreachable server would.
#[derive(Default)]
pub(crate) struct FakeHeroBackend {
    heroes: Mutex<Vec<Hero>>,
    requests: Mutex<Vec<TransportRequest>>,
    fail: AtomicBool,
}

impl FakeHeroBackend {
    pub(crate) fn seeded(heroes: &[(i64, &str)]) -> Arc<Self> {
        let backend = Self::default();
        *backend.heroes.lock().expect("heroes") = heroes
            .iter()
            .map(|(id, name)| Hero::new(HeroId(*id), *name))
            .collect();
        Arc::new(backend)
    }

    pub(crate) fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().expect("requests").clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().expect("requests").len()
    }

    pub(crate) fn stored(&self) -> Vec<Hero> {
        self.heroes.lock().expect("heroes").clone()
    }

    fn not_found(id: &str) -> TransportError {
        TransportError::Status {
            status: 404,
            body: format!("hero {id} not found"),
        }
    }

    fn handle(&self, request: &TransportRequest) -> Result<Value, TransportError> {
        let mut heroes = self.heroes.lock().expect("heroes");
        let tail = request
            .path
            .strip_prefix("/api/heroes")
            .ok_or_else(|| Self::not_found(&request.path))?
            .trim_start_matches('/');

        match (request.method.as_str(), tail) {
            ("GET", "") => {
                let term = request
                    .query
                    .iter()
                    .find(|(key, _)| key == "name")
                    .map(|(_, value)| value.trim().to_lowercase())
                    .filter(|term| !term.is_empty());
                let found: Vec<&Hero> = heroes
                    .iter()
                    .filter(|hero| match &term {
                        Some(term) => hero.name.to_lowercase().contains(term.as_str()),
                        None => true,
                    })
                    .collect();
                Ok(serde_json::to_value(found)?)
            }
            ("GET", id) => {
                let hero = heroes
                    .iter()
                    .find(|hero| hero.id.to_string() == id)
                    .ok_or_else(|| Self::not_found(id))?;
                Ok(serde_json::to_value(hero)?)
            }
            ("POST", "") => {
                let name = request
                    .body
                    .as_ref()
                    .and_then(|body| body.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let next_id = heroes.iter().map(|hero| hero.id.0).max().unwrap_or(10) + 1;
                let hero = Hero::new(HeroId(next_id), name);
                heroes.push(hero.clone());
                Ok(serde_json::to_value(hero)?)
            }
            ("PUT", "") => {
                let update: Hero =
                    serde_json::from_value(request.body.clone().unwrap_or_default())?;
                let slot = heroes
                    .iter_mut()
                    .find(|hero| hero.id == update.id)
                    .ok_or_else(|| Self::not_found(&update.id.to_string()))?;
                *slot = update;
                Ok(Value::Null)
            }
            ("DELETE", id) => {
                let before = heroes.len();
                heroes.retain(|hero| hero.id.to_string() != id);
                if heroes.len() == before {
                    return Err(Self::not_found(id));
                }
                Ok(Value::Null)
            }
            _ => Err(TransportError::Status {
                status: 405,
                body: json!({ "method": request.method.as_str() }).to_string(),
            }),
        }
    }
}

#[async_trait]
impl HeroTransport for FakeHeroBackend {
    async fn execute(&self, request: TransportRequest) -> Result<Value, TransportError> {
        self.requests.lock().expect("requests").push(request.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable("connection refused".into()));
        }
        self.handle(&request)
    }
}

/// A client wired to `backend`, plus the message panel it writes to.
pub(crate) fn client_for(backend: &Arc<FakeHeroBackend>) -> (HeroClient, Arc<MessageService>) {
    let messages = Arc::new(MessageService::new());
    let client = HeroClient::new(backend.clone(), messages.clone());
    (client, messages)
}

pub(crate) const SEED: &[(i64, &str)] = &[
    (11, "Dr Nice"),
    (12, "Narco"),
    (13, "Bombasto"),
    (14, "Celeritas"),
    (15, "Magneta"),
    (16, "RubberMan"),
];

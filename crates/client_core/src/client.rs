//! The hero resource client.
//!
//! Every public operation resolves to a plain value. Transport failures are
//! caught inside [`HeroClient::recover`], written once to the message log and
//! replaced by the operation's fallback:
//!
//! | operation       | fallback |
//! |-----------------|----------|
//! | `get_heroes`    | `vec![]` |
//! | `get_hero`      | `None`   |
//! | `search_heroes` | `vec![]` |
//! | `add_hero`      | `None`   |
//! | `update_hero`   | `None`   |
//! | `delete_hero`   | `None`   |
//!
//! The list operations fall back to an empty collection while the single-hero
//! operations fall back to `None`, so callers of `get_hero` must handle the
//! missing case themselves.

use std::{future::Future, sync::Arc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use shared::{
    domain::{Hero, HeroId, NewHero},
    protocol::{hero_route, hero_search_route, HEROES_ROUTE},
};
use tracing::{info, warn};

use crate::{
    error::TransportError,
    messages::MessageLog,
    settings::ClientSettings,
    transport::{HeroTransport, HttpTransport, TransportRequest},
};

const LOG_TAG: &str = "HeroService";

/// Opaque acknowledgement returned by writes that carry no entity back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack(pub Value);

/// What to delete: a bare id, or a hero the id is taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroRef {
    ById(HeroId),
    ByEntity(Hero),
}

impl HeroRef {
    pub fn id(&self) -> HeroId {
        match self {
            HeroRef::ById(id) => *id,
            HeroRef::ByEntity(hero) => hero.id,
        }
    }
}

impl From<HeroId> for HeroRef {
    fn from(value: HeroId) -> Self {
        HeroRef::ById(value)
    }
}

impl From<Hero> for HeroRef {
    fn from(value: Hero) -> Self {
        HeroRef::ByEntity(value)
    }
}

impl From<&Hero> for HeroRef {
    fn from(value: &Hero) -> Self {
        HeroRef::ByEntity(value.clone())
    }
}

#[derive(Clone)]
pub struct HeroClient {
    transport: Arc<dyn HeroTransport>,
    log: Arc<dyn MessageLog>,
}

impl HeroClient {
    pub fn new(transport: Arc<dyn HeroTransport>, log: Arc<dyn MessageLog>) -> Self {
        Self { transport, log }
    }

    pub fn over_http(settings: ClientSettings, log: Arc<dyn MessageLog>) -> Self {
        Self::new(Arc::new(HttpTransport::new(settings)), log)
    }

    pub async fn get_heroes(&self) -> Vec<Hero> {
        self.recover(
            "get_heroes",
            Vec::new(),
            self.fetch::<Vec<Hero>>(TransportRequest::get(HEROES_ROUTE)),
            |_| "fetched heroes".to_string(),
        )
        .await
    }

    /// `None` when the hero does not exist or the request failed.
    pub async fn get_hero(&self, id: HeroId) -> Option<Hero> {
        self.recover(
            &format!("get_hero id={id}"),
            None,
            self.fetch::<Hero>(TransportRequest::get(hero_route(id))),
            |_| format!("fetched hero id={id}"),
        )
        .await
    }

    /// Heroes whose name contains `term`. A blank term answers an empty list
    /// without touching the transport.
    pub async fn search_heroes(&self, term: &str) -> Vec<Hero> {
        if term.trim().is_empty() {
            return Vec::new();
        }
        let request = TransportRequest::get(hero_search_route()).with_query("name", term);
        self.recover(
            "search_heroes",
            Vec::new(),
            self.fetch::<Vec<Hero>>(request),
            |_| format!("found heroes matching \"{term}\""),
        )
        .await
    }

    /// Returns the stored hero, carrying the id the backend assigned.
    pub async fn add_hero(&self, hero: &NewHero) -> Option<Hero> {
        let call = async {
            let body = serde_json::to_value(hero)?;
            self.fetch::<Hero>(TransportRequest::post(HEROES_ROUTE, body))
                .await
        };
        self.recover("add_hero", None, call, |created: &Hero| {
            format!("added hero w/ id={}", created.id)
        })
        .await
    }

    /// Sends the whole hero as its replacement.
    pub async fn update_hero(&self, hero: &Hero) -> Option<Ack> {
        let id = hero.id;
        let call = async {
            let body = serde_json::to_value(hero)?;
            self.fetch::<Ack>(TransportRequest::put(HEROES_ROUTE, body))
                .await
        };
        self.recover(&format!("update_hero id={id}"), None, call, |_| {
            format!("updated hero id={id}")
        })
        .await
    }

    pub async fn delete_hero(&self, target: impl Into<HeroRef>) -> Option<Ack> {
        let id = target.into().id();
        self.recover(
            &format!("delete_hero id={id}"),
            None,
            self.fetch::<Ack>(TransportRequest::delete(hero_route(id))),
            |_| format!("deleted hero id={id}"),
        )
        .await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: TransportRequest,
    ) -> Result<T, TransportError> {
        let value = self.transport.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Awaits `call` and logs exactly one message about it. On failure the
    /// error is swallowed and `fallback` is returned instead.
    async fn recover<T, F>(
        &self,
        operation: &str,
        fallback: F,
        call: impl Future<Output = Result<T, TransportError>>,
        describe: impl FnOnce(&T) -> String,
    ) -> F
    where
        T: Into<F>,
    {
        match call.await {
            Ok(value) => {
                let message = describe(&value);
                info!(operation, "heroes: {message}");
                self.log(&message);
                value.into()
            }
            Err(error) => {
                warn!(
                    operation,
                    status = ?error.status(),
                    %error,
                    "heroes: request failed, using fallback"
                );
                self.log(&format!("{operation} failed: {error}"));
                fallback
            }
        }
    }

    fn log(&self, message: &str) {
        self.log.append(format!("{LOG_TAG}: {message}"));
    }
}

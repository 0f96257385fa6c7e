use reqwest::Method;
use serde_json::Value;
use shared::domain::{Hero, HeroId, NewHero};

use super::support::{client_for, FakeHeroBackend, SEED};
use crate::client::{Ack, HeroRef};

#[tokio::test]
async fn blank_search_terms_short_circuit_without_transport_call() {
    let backend = FakeHeroBackend::seeded(SEED);
    let (client, messages) = client_for(&backend);

    for term in ["", " ", "\t\n", "    "] {
        assert!(client.search_heroes(term).await.is_empty());
    }
    assert_eq!(backend.request_count(), 0);
    assert!(messages.is_empty());
}

#[tokio::test]
async fn search_matches_name_substring_case_insensitively() {
    let backend = FakeHeroBackend::seeded(&[(1, "A"), (2, "B")]);
    let (client, messages) = client_for(&backend);

    let found = client.search_heroes("a").await;
    assert_eq!(found, vec![Hero::new(HeroId(1), "A")]);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/api/heroes/");
    assert_eq!(requests[0].query, vec![("name".to_string(), "a".to_string())]);
    assert_eq!(
        messages.messages(),
        vec!["HeroService: found heroes matching \"a\""]
    );
}

#[tokio::test]
async fn get_heroes_falls_back_to_empty_list() {
    let backend = FakeHeroBackend::seeded(SEED);
    backend.set_failing(true);
    let (client, messages) = client_for(&backend);

    assert!(client.get_heroes().await.is_empty());
    let log = messages.messages();
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("HeroService: get_heroes failed: "));
}

#[tokio::test]
async fn get_hero_falls_back_to_none_not_an_empty_hero() {
    let backend = FakeHeroBackend::seeded(SEED);
    backend.set_failing(true);
    let (client, messages) = client_for(&backend);

    assert_eq!(client.get_hero(HeroId(11)).await, None);
    let log = messages.messages();
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("HeroService: get_hero id=11 failed: "));
}

#[tokio::test]
async fn missing_hero_resolves_to_none() {
    let backend = FakeHeroBackend::seeded(SEED);
    let (client, messages) = client_for(&backend);

    assert_eq!(client.get_hero(HeroId(99)).await, None);
    assert!(messages.messages()[0].contains("get_hero id=99 failed"));
}

#[tokio::test]
async fn every_operation_logs_exactly_once_on_success() {
    let backend = FakeHeroBackend::seeded(SEED);
    let (client, messages) = client_for(&backend);

    client.get_heroes().await;
    client.get_hero(HeroId(12)).await;
    client.search_heroes("ma").await;
    let created = client.add_hero(&NewHero::new("Alpha")).await.expect("created");
    client.update_hero(&Hero::new(HeroId(12), "Narco II")).await;
    client.delete_hero(HeroId(13)).await;

    assert_eq!(
        messages.messages(),
        vec![
            "HeroService: fetched heroes".to_string(),
            "HeroService: fetched hero id=12".to_string(),
            "HeroService: found heroes matching \"ma\"".to_string(),
            format!("HeroService: added hero w/ id={}", created.id),
            "HeroService: updated hero id=12".to_string(),
            "HeroService: deleted hero id=13".to_string(),
        ]
    );
}

#[tokio::test]
async fn create_then_get_round_trips_name() {
    let backend = FakeHeroBackend::seeded(SEED);
    let (client, _messages) = client_for(&backend);

    let input = NewHero::new("Alpha");
    let created = client.add_hero(&input).await.expect("created");
    assert_eq!(created.id, HeroId(17));
    assert_eq!(input, NewHero::new("Alpha"));

    let fetched = client.get_hero(created.id).await.expect("fetched");
    assert_eq!(fetched.name, "Alpha");

    let post = &backend.requests()[0];
    assert_eq!(post.method, Method::POST);
    assert_eq!(post.body, Some(serde_json::json!({ "name": "Alpha" })));
}

#[tokio::test]
async fn update_then_get_sees_new_name() {
    let backend = FakeHeroBackend::seeded(&[(7, "Alpha")]);
    let (client, _messages) = client_for(&backend);

    let hero = Hero::new(HeroId(7), "Beta");
    let ack = client.update_hero(&hero).await;
    assert_eq!(ack, Some(Ack(Value::Null)));
    assert_eq!(hero, Hero::new(HeroId(7), "Beta"));

    let fetched = client.get_hero(HeroId(7)).await.expect("fetched");
    assert_eq!(fetched.name, "Beta");
}

#[tokio::test]
async fn failed_writes_resolve_to_none() {
    let backend = FakeHeroBackend::seeded(SEED);
    backend.set_failing(true);
    let (client, messages) = client_for(&backend);

    assert_eq!(client.add_hero(&NewHero::new("Alpha")).await, None);
    assert_eq!(client.update_hero(&Hero::new(HeroId(11), "X")).await, None);
    assert_eq!(client.delete_hero(HeroId(11)).await, None);

    let log = messages.messages();
    assert_eq!(log.len(), 3);
    assert!(log[0].starts_with("HeroService: add_hero failed: "));
    assert!(log[1].starts_with("HeroService: update_hero id=11 failed: "));
    assert!(log[2].starts_with("HeroService: delete_hero id=11 failed: "));
}

#[tokio::test]
async fn delete_accepts_id_or_hero() {
    let backend = FakeHeroBackend::seeded(SEED);
    let (client, _messages) = client_for(&backend);

    let hero = Hero::new(HeroId(14), "Celeritas");
    assert!(client.delete_hero(&hero).await.is_some());
    assert!(client.delete_hero(HeroId(15)).await.is_some());
    assert!(client.delete_hero(HeroRef::ById(HeroId(16))).await.is_some());

    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec!["/api/heroes/14", "/api/heroes/15", "/api/heroes/16"]
    );
    assert!(backend
        .stored()
        .iter()
        .all(|hero| ![14, 15, 16].contains(&hero.id.0)));
}

#[test]
fn hero_ref_extracts_id_from_either_shape() {
    assert_eq!(HeroRef::from(HeroId(3)).id(), HeroId(3));
    assert_eq!(HeroRef::from(Hero::new(HeroId(4), "D")).id(), HeroId(4));
}

#[tokio::test]
async fn padded_search_term_is_sent_as_given_and_matched_trimmed() {
    let backend = FakeHeroBackend::seeded(SEED);
    let (client, _messages) = client_for(&backend);

    let names: Vec<String> = client
        .search_heroes(" ma ")
        .await
        .into_iter()
        .map(|hero| hero.name)
        .collect();
    assert_eq!(names, vec!["Magneta", "RubberMan"]);
    assert_eq!(
        backend.requests()[0].query,
        vec![("name".to_string(), " ma ".to_string())]
    );
}

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    ClientSettings, DashboardController, HeroClient, HeroDetailController, HeroesController,
    Location, MessageService,
};
use shared::domain::{Hero, HeroId};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "heroes", about = "Browse and edit the hero roster")]
struct Cli {
    #[arg(long, env = "HEROES_SERVER_URL", default_value = "http://127.0.0.1:8080")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every hero.
    List,
    /// Heroes whose name contains TERM.
    Search { term: String },
    /// Create a hero.
    Add { name: String },
    /// Remove a hero from the roster.
    Delete { id: i64 },
    /// Show one hero through its detail route.
    Show { id: String },
    /// Rename a hero and navigate back.
    Rename { id: String, name: String },
    /// The dashboard's top heroes.
    Top,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = ClientSettings::from_server_url(&cli.server_url)
        .with_context(|| format!("invalid server url '{}'", cli.server_url))?;
    info!(api_base = %settings.api_base, "heroes: using server");
    let messages = Arc::new(MessageService::new());
    let client = HeroClient::over_http(settings, messages.clone());

    run(cli.command, client).await?;

    println!("-- messages --");
    for message in messages.messages() {
        println!("{message}");
    }
    Ok(())
}

async fn run(command: Command, client: HeroClient) -> Result<()> {
    match command {
        Command::List => {
            let mut heroes = HeroesController::new(client);
            heroes.load().await;
            print_heroes(heroes.heroes());
        }
        Command::Search { term } => {
            print_heroes(&client.search_heroes(&term).await);
        }
        Command::Add { name } => {
            let mut heroes = HeroesController::new(client);
            match heroes.add(&name).await {
                Some(hero) => println!("added {} {}", hero.id, hero.name),
                None => println!("nothing added"),
            }
        }
        Command::Delete { id } => {
            let mut heroes = HeroesController::new(client);
            heroes.load().await;
            let target = heroes
                .heroes()
                .iter()
                .find(|hero| hero.id == HeroId(id))
                .cloned();
            match target {
                Some(hero) => {
                    heroes
                        .delete(&hero)
                        .await
                        .context("delete task failed")?;
                    println!("removed {} {}", hero.id, hero.name);
                }
                None => println!("hero {id} is not in the roster"),
            }
        }
        Command::Show { id } => {
            let location = Arc::new(Location::new());
            let detail = open_detail(&location, client, &id).await?;
            match detail.hero() {
                Some(hero) => println!("{} {}", hero.id, hero.name),
                None => println!("no hero for id '{id}'"),
            }
        }
        Command::Rename { id, name } => {
            let location = Arc::new(Location::new());
            location.navigate("/heroes");
            let mut detail = open_detail(&location, client, &id).await?;
            if !detail.set_name(name) {
                println!("no hero for id '{id}'");
            }
            detail.save().await;
            println!("back at {}", location.path());
        }
        Command::Top => {
            let mut dashboard = DashboardController::new(client);
            dashboard.load().await;
            print_heroes(dashboard.top_heroes());
        }
    }
    Ok(())
}

async fn open_detail(
    location: &Arc<Location>,
    client: HeroClient,
    id: &str,
) -> Result<HeroDetailController> {
    let route = location
        .navigate(&format!("/detail/{id}"))
        .ok_or_else(|| anyhow!("'{id}' is not a valid detail route"))?;
    let context = route
        .navigation_context()
        .ok_or_else(|| anyhow!("detail route carries no id"))?;
    let mut detail = HeroDetailController::new(client, location.clone());
    detail.activate(&context).await;
    Ok(detail)
}

fn print_heroes(heroes: &[Hero]) {
    if heroes.is_empty() {
        println!("(no heroes)");
    }
    for hero in heroes {
        println!("{:>4}  {}", hero.id, hero.name);
    }
}

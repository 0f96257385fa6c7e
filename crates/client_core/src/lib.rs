//! Client side of the hero tour: a resource client that never surfaces
//! transport errors, and the view controllers built on top of it.

pub mod client;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod heroes;
pub mod messages;
pub mod navigation;
pub mod settings;
pub mod transport;

pub use client::{Ack, HeroClient, HeroRef};
pub use dashboard::DashboardController;
pub use detail::{DetailState, HeroDetailController};
pub use error::TransportError;
pub use heroes::HeroesController;
pub use messages::{MessageLog, MessageService};
pub use navigation::{Location, NavigationContext, Navigator, Route};
pub use settings::ClientSettings;
pub use transport::{HeroTransport, HttpTransport, TransportRequest};

#[cfg(test)]
mod tests;

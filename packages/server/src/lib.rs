#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the ReFeed application.
//!
//! Serves the REST API for registering donors, logging donations,
//! browsing food desert zones, recording market prices, and running the
//! donation matchmaking engine. State lives in the in-memory stores
//! from `refeed_store`, seeded with the bundled fixture data at
//! startup.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use chrono::Utc;
use refeed_farming::CropSuitabilityScorer;
use refeed_matching::{EngineConfig, MatchEngine};
use refeed_store::memory::{
    MemoryDonationStore, MemoryDonorStore, MemoryMatchStore, MemoryPriceStore,
    MemoryRecipientStore,
};
use refeed_store::{DonationStore, DonorStore, MatchStore, PriceStore, RecipientStore, seed};

/// Shared application state.
pub struct AppState {
    /// Registered donors.
    pub donors: Arc<dyn DonorStore>,
    /// Logged donations.
    pub donations: Arc<dyn DonationStore>,
    /// Recipient zones (food deserts and demand locations).
    pub recipients: Arc<dyn RecipientStore>,
    /// Committed matches.
    pub matches: Arc<dyn MatchStore>,
    /// Recorded price observations.
    pub prices: Arc<dyn PriceStore>,
    /// Matchmaking engine over the stores above.
    pub engine: MatchEngine,
    /// Crop suitability scorer with the embedded catalog.
    pub scorer: CropSuitabilityScorer,
}

impl AppState {
    /// Builds application state over seeded in-memory stores.
    ///
    /// # Panics
    ///
    /// Panics if the embedded crop catalog fails to parse.
    #[must_use]
    pub fn seeded() -> Self {
        let now = Utc::now();
        let donors: Arc<dyn DonorStore> =
            Arc::new(MemoryDonorStore::with_donors(seed::donors(now)));
        let donations: Arc<dyn DonationStore> =
            Arc::new(MemoryDonationStore::with_donations(seed::donations(now)));
        let recipients: Arc<dyn RecipientStore> = Arc::new(
            MemoryRecipientStore::with_recipients(seed::recipients(now)),
        );
        let matches: Arc<dyn MatchStore> = Arc::new(MemoryMatchStore::default());
        let prices: Arc<dyn PriceStore> =
            Arc::new(MemoryPriceStore::with_observations(seed::prices(now)));

        let engine = MatchEngine::new(
            Arc::clone(&donations),
            Arc::clone(&recipients),
            Arc::clone(&matches),
            Arc::clone(&prices),
            EngineConfig::default(),
        );
        let scorer =
            CropSuitabilityScorer::from_embedded().expect("Failed to load crop catalog");

        Self {
            donors,
            donations,
            recipients,
            matches,
            prices,
            engine,
            scorer,
        }
    }
}

/// Starts the ReFeed API server.
///
/// Seeds the in-memory stores, builds the matchmaking engine and crop
/// scorer, and starts the Actix-Web HTTP server. This is a regular
/// async function — the caller is responsible for providing the async
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the embedded crop catalog fails to parse.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Seeding in-memory stores...");
    let state = web::Data::new(AppState::seeded());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/categories", web::get().to(handlers::categories))
                    .route("/donors", web::get().to(handlers::donors))
                    .route("/donors", web::post().to(handlers::create_donor))
                    .route("/donations", web::get().to(handlers::donations))
                    .route("/donations", web::post().to(handlers::create_donation))
                    .route("/food-deserts", web::get().to(handlers::food_deserts))
                    .route("/prices", web::get().to(handlers::prices))
                    .route("/prices", web::post().to(handlers::record_price))
                    .route("/matches", web::get().to(handlers::matches))
                    .route("/matches", web::post().to(handlers::create_match))
                    .route("/matches/find", web::post().to(handlers::find_matches))
                    .route(
                        "/matchmaking/run",
                        web::post().to(handlers::run_matchmaking),
                    )
                    .route(
                        "/farming/recommendations",
                        web::get().to(handlers::crop_recommendations),
                    )
                    .route(
                        "/farming/containers",
                        web::get().to(handlers::container_plans),
                    ),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

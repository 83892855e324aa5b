//! HTTP handler functions for the ReFeed API.

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use chrono::Utc;
use refeed_farming::plan_containers;
use refeed_food_models::{DesertSeverity, FoodCategory};
use refeed_geo::Coordinate;
use refeed_matching::MatchError;
use refeed_server_models::{
    ApiCategory, ApiDonation, ApiDonor, ApiFoodDesert, ApiHealth, ApiMatch, CreateMatchRequest,
    DonationQueryParams, FoodDesertQueryParams, MatchQueryParams, NewDonationRequest,
    NewDonorRequest, NewPriceRequest, PriceQueryParams, RecommendationQueryParams,
};
use refeed_store::StoreError;
use refeed_store_models::{
    Demographics, Donation, DonationQuery, Donor, MatchQuery, PriceObservation, PriceQuery,
};
use uuid::Uuid;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/categories`
///
/// Returns the food category taxonomy.
pub async fn categories() -> HttpResponse {
    let categories: Vec<ApiCategory> = FoodCategory::all()
        .iter()
        .map(|cat| ApiCategory {
            name: cat.to_string(),
            perishable: cat.is_perishable(),
        })
        .collect();

    HttpResponse::Ok().json(categories)
}

/// `GET /api/donors`
pub async fn donors(state: web::Data<AppState>) -> HttpResponse {
    let donors: Vec<ApiDonor> = state
        .donors
        .list()
        .into_iter()
        .map(ApiDonor::from)
        .collect();
    HttpResponse::Ok().json(donors)
}

/// `POST /api/donors`
///
/// Registers a new donor.
pub async fn create_donor(
    state: web::Data<AppState>,
    body: web::Json<NewDonorRequest>,
) -> HttpResponse {
    let body = body.into_inner();
    let location = match Coordinate::new(body.latitude, body.longitude) {
        Ok(location) => location,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    let donor = Donor {
        id: Uuid::new_v4().to_string(),
        name: body.name,
        donor_type: body.donor_type,
        location,
        address: body.address,
        phone: body.phone,
        email: body.email,
        is_active: true,
        registered_at: Utc::now(),
    };
    state.donors.insert(donor.clone());

    log::info!("donor registered: {} ({})", donor.name, donor.donor_type);
    HttpResponse::Created().json(ApiDonor::from(donor))
}

/// `GET /api/donations`
///
/// Lists donations with donor, matched-state, and category filters.
pub async fn donations(
    state: web::Data<AppState>,
    params: web::Query<DonationQueryParams>,
) -> HttpResponse {
    let query = DonationQuery {
        donor_id: params.donor_id.clone(),
        is_matched: params.matched,
        category: params.category,
    };

    let donations: Vec<ApiDonation> = state
        .donations
        .list(&query)
        .into_iter()
        .map(ApiDonation::from)
        .collect();
    HttpResponse::Ok().json(donations)
}

/// `POST /api/donations`
///
/// Logs a new donation. The pickup point defaults to the donor's
/// registered location when not given explicitly.
pub async fn create_donation(
    state: web::Data<AppState>,
    body: web::Json<NewDonationRequest>,
) -> HttpResponse {
    let body = body.into_inner();

    let donor = match state.donors.get(&body.donor_id) {
        Ok(donor) => donor,
        Err(e @ StoreError::NotFound { .. }) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    let origin = match (body.latitude, body.longitude) {
        (Some(lat), Some(lng)) => match Coordinate::new(lat, lng) {
            Ok(origin) => origin,
            Err(e) => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": e.to_string()
                }));
            }
        },
        _ => donor.location,
    };

    let now = Utc::now();
    let donation = Donation {
        id: Uuid::new_v4().to_string(),
        donor_id: body.donor_id,
        food_type: body.food_type,
        category: body.category,
        condition: body.condition,
        quantity: body.quantity,
        unit: body.unit,
        expiry_date: body.expiry_date,
        origin,
        description: body.description,
        is_matched: false,
        created_at: now,
        updated_at: now,
    };
    state.donations.insert(donation.clone());

    log::info!(
        "donation logged: {} {} of {} from {}",
        donation.quantity,
        donation.unit,
        donation.food_type,
        donor.name
    );
    HttpResponse::Created().json(ApiDonation::from(donation))
}

/// `GET /api/food-deserts`
///
/// Lists recipient zones, optionally filtered by minimum severity.
pub async fn food_deserts(
    state: web::Data<AppState>,
    params: web::Query<FoodDesertQueryParams>,
) -> HttpResponse {
    let severity_min = params
        .severity_min
        .and_then(|v| DesertSeverity::from_value(v).ok());

    let zones: Vec<ApiFoodDesert> = state
        .recipients
        .list()
        .into_iter()
        .filter(|z| severity_min.is_none_or(|min| z.severity >= min))
        .map(ApiFoodDesert::from)
        .collect();
    HttpResponse::Ok().json(zones)
}

/// `GET /api/prices`
///
/// Lists price observations with region and item filters.
pub async fn prices(
    state: web::Data<AppState>,
    params: web::Query<PriceQueryParams>,
) -> HttpResponse {
    let query = PriceQuery {
        region: params.region.clone(),
        item: params.item.clone(),
    };
    HttpResponse::Ok().json(state.prices.list(&query))
}

/// `POST /api/prices`
///
/// Records a price observation and reports whether it completes a
/// spike against the previous observation for the same key.
pub async fn record_price(
    state: web::Data<AppState>,
    body: web::Json<NewPriceRequest>,
) -> HttpResponse {
    let body = body.into_inner();
    let now = Utc::now();

    let observation = PriceObservation {
        id: Uuid::new_v4().to_string(),
        region: body.region,
        item: body.item,
        price: body.price,
        currency: body.currency.unwrap_or_else(|| "USD".to_string()),
        unit: body.unit.unwrap_or_else(|| "per unit".to_string()),
        observed_at: body.observed_at.unwrap_or(now),
        recorded_at: now,
    };
    state.prices.insert(observation.clone());

    let history = state
        .prices
        .history(&observation.region, &observation.item);
    let spike = refeed_market::detect_spike(&history, state.engine.config().spike_threshold_pct);
    if spike {
        log::warn!(
            "price spike recorded: {} in {} at {}",
            observation.item,
            observation.region,
            observation.price
        );
    }

    HttpResponse::Created().json(serde_json::json!({
        "observation": observation,
        "spike": spike,
    }))
}

/// `GET /api/matches`
///
/// Lists committed matches with status, priority, and donation filters.
pub async fn matches(
    state: web::Data<AppState>,
    params: web::Query<MatchQueryParams>,
) -> HttpResponse {
    let query = MatchQuery {
        status: params.status,
        priority: params.priority,
        donation_id: params.donation_id.clone(),
    };

    let matches: Vec<ApiMatch> = state
        .matches
        .list(&query)
        .into_iter()
        .map(ApiMatch::from)
        .collect();
    HttpResponse::Ok().json(matches)
}

/// `POST /api/matches/find`
///
/// Computes ranked match candidates without committing anything.
pub async fn find_matches(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.engine.find_candidates(Utc::now()))
}

/// `POST /api/matches`
///
/// Commits a match between a donation and a recipient zone.
pub async fn create_match(
    state: web::Data<AppState>,
    body: web::Json<CreateMatchRequest>,
) -> HttpResponse {
    match state
        .engine
        .create_match(&body.donation_id, &body.recipient_id, body.priority, Utc::now())
    {
        Ok(record) => HttpResponse::Created().json(ApiMatch::from(record)),
        Err(e @ MatchError::AlreadyMatched { .. }) => {
            HttpResponse::Conflict().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
        Err(e @ MatchError::Store(StoreError::NotFound { .. })) => {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}

/// `POST /api/matchmaking/run`
///
/// Runs one full matchmaking pass. When the `CRON_SECRET` environment
/// variable is set, the request must carry it as a bearer token.
pub async fn run_matchmaking(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let secret = std::env::var("CRON_SECRET").ok();
    if !authorized(req.headers().get(header::AUTHORIZATION), secret.as_deref()) {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "invalid or missing bearer token"
        }));
    }

    HttpResponse::Ok().json(state.engine.run_matchmaking(Utc::now()))
}

/// `GET /api/farming/recommendations`
///
/// Recommends crops either for a stored recipient zone (`recipientId`)
/// or for explicitly given zone conditions.
pub async fn crop_recommendations(
    state: web::Data<AppState>,
    params: web::Query<RecommendationQueryParams>,
) -> HttpResponse {
    let params = params.into_inner();

    let (climate_zone, population, demographics) = if let Some(id) = &params.recipient_id {
        match state.recipients.get(id) {
            Ok(zone) => (
                zone.climate_zone.unwrap_or_else(|| "temperate".to_string()),
                zone.population.unwrap_or(0),
                zone.demographics,
            ),
            Err(e @ StoreError::NotFound { .. }) => {
                return HttpResponse::NotFound().json(serde_json::json!({
                    "error": e.to_string()
                }));
            }
        }
    } else {
        let demographics = match (params.children, params.seniors) {
            (None, None) => None,
            (children, seniors) => Some(Demographics {
                children: children.unwrap_or(0),
                seniors: seniors.unwrap_or(0),
                households: params.households.unwrap_or(0),
            }),
        };
        (
            params
                .climate_zone
                .unwrap_or_else(|| "temperate".to_string()),
            params.population.unwrap_or(0),
            demographics,
        )
    };

    let recommendations = state
        .scorer
        .recommend(&climate_zone, population, demographics);
    HttpResponse::Ok().json(recommendations)
}

/// `GET /api/farming/containers`
///
/// Plans vertical farming containers for high-severity zones, sorted
/// by projected impact.
pub async fn container_plans(state: web::Data<AppState>) -> HttpResponse {
    let zones = state.recipients.list();
    HttpResponse::Ok().json(plan_containers(&zones, &state.scorer))
}

/// Checks a bearer token against the configured secret. No secret
/// configured means the endpoint is open.
fn authorized(header_value: Option<&header::HeaderValue>, secret: Option<&str>) -> bool {
    let Some(secret) = secret.filter(|s| !s.is_empty()) else {
        return true;
    };
    header_value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token == secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_when_no_secret_is_configured() {
        assert!(authorized(None, None));
        assert!(authorized(None, Some("")));
    }

    #[test]
    fn bearer_token_must_match_the_secret() {
        let good = header::HeaderValue::from_static("Bearer hunter2");
        let bad = header::HeaderValue::from_static("Bearer wrong");
        let malformed = header::HeaderValue::from_static("hunter2");

        assert!(authorized(Some(&good), Some("hunter2")));
        assert!(!authorized(Some(&bad), Some("hunter2")));
        assert!(!authorized(Some(&malformed), Some("hunter2")));
        assert!(!authorized(None, Some("hunter2")));
    }
}

use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;
use crate::config::Settings;
use crate::core::{
    eligible_partners_for, exclusions_for, expand_exclusions, first_duplicate_id, generate_participants,
    matchup_links, render_links, CycleSolver, IdAllocator, ShareTokenCodec, SolveOutcome,
};
use crate::models::{
    DecodeShareQuery, ErrorResponse, ExclusionsRequest, ExclusionsResponse, FixturesResponse,
    GenerateFixturesRequest, HealthResponse, SolveRequest, SolveResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub solver: CycleSolver,
    pub codec: ShareTokenCodec,
    pub allocator: Arc<IdAllocator>,
    pub share_base_url: String,
    pub max_participants: usize,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            solver: CycleSolver::new(settings.solver.options()),
            codec: ShareTokenCodec::new(&settings.share.key),
            allocator: Arc::new(IdAllocator::new()),
            share_base_url: settings.share.base_url.clone(),
            max_participants: settings.solver.max_participants,
        }
    }
}

/// Configure all matchup-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matchups", web::post().to(solve_matchups))
        .route("/exclusions", web::post().to(lookup_exclusions))
        .route("/share/decode", web::get().to(decode_share))
        .route("/fixtures", web::post().to(generate_fixtures));
}

fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: 400,
    })
}

fn internal_error(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: 500,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Compute matchups
///
/// POST /api/v1/matchups
///
/// Request body:
/// ```json
/// {
///   "participants": [{"id": 0, "name": "Alice", "email": "alice@example.com", "exclusions": [1]}],
///   "oneWay": false,
///   "seed": 42
/// }
/// ```
///
/// An empty `matchups` list always comes with a non-`solved` status.
async fn solve_matchups(
    state: web::Data<AppState>,
    req: web::Json<SolveRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let SolveRequest { participants, one_way, seed } = req.into_inner();

    let active: Vec<_> = participants.iter().filter(|p| !p.is_empty()).collect();
    if let Some(id) = first_duplicate_id(active.iter().copied()) {
        return bad_request(
            "Duplicate participant id",
            format!("Participant id {} is used more than once", id),
        );
    }

    let active = active.len();
    if active > state.max_participants {
        return bad_request(
            "Too many participants",
            format!("{} participants given, at most {} supported", active, state.max_participants),
        );
    }

    tracing::info!("Solving matchups for {} participants (one_way={})", active, one_way);

    let solver = state.solver.clone();
    let solve_input = participants.clone();
    let report = match web::block(move || match seed {
        Some(seed) => solver.solve_seeded(&solve_input, one_way, seed),
        None => solver.solve_detailed(&solve_input, one_way, &mut rand::thread_rng()),
    })
    .await
    {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Solver task failed: {}", e);
            return internal_error("Solver failed", e.to_string());
        }
    };

    let status = report.outcome.as_str().to_string();
    if !report.outcome.is_solved() {
        tracing::info!(
            "No matchups: {} after {} permutations",
            status,
            report.permutations_examined
        );
    }

    let matchups = match report.outcome {
        SolveOutcome::Solved(pairs) => pairs,
        _ => Vec::new(),
    };

    let links = match matchup_links(&matchups, &participants, &state.share_base_url, &state.codec) {
        Ok(links) => links,
        Err(e) => {
            tracing::error!("Failed to build share links: {}", e);
            return internal_error("Failed to build share links", e.to_string());
        }
    };

    HttpResponse::Ok().json(SolveResponse {
        status,
        rendered: render_links(&links),
        matchups,
        permutations_examined: report.permutations_examined,
        links,
    })
}

/// Exclusions and remaining candidates for one participant
///
/// POST /api/v1/exclusions
async fn lookup_exclusions(req: web::Json<ExclusionsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let pairs = req
        .exclusion_pairs
        .clone()
        .unwrap_or_else(|| expand_exclusions(&req.participants));

    let excluded_ids = exclusions_for(&req.participants, &pairs, req.id, req.one_way);
    let eligible_partner_ids = eligible_partners_for(&req.participants, &pairs, req.id, req.one_way)
        .iter()
        .map(|p| p.id)
        .collect();

    HttpResponse::Ok().json(ExclusionsResponse {
        excluded_ids,
        eligible_partner_ids,
    })
}

/// Read the participant behind a reveal link
///
/// GET /api/v1/share/decode?secret={secret}
async fn decode_share(
    state: web::Data<AppState>,
    query: web::Query<DecodeShareQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    // The query extractor has already percent-decoded the value
    match state.codec.decode::<Value>(&query.secret) {
        Ok(participant) => HttpResponse::Ok().json(participant),
        Err(e) => {
            tracing::info!("Rejected share token: {}", e);
            bad_request("invalid_share_token", "Invalid or expired link")
        }
    }
}

/// Generate demo participants
///
/// POST /api/v1/fixtures
async fn generate_fixtures(
    state: web::Data<AppState>,
    req: web::Json<GenerateFixturesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let participants = generate_participants(&state.allocator, req.count, req.num_exclusions);
    tracing::debug!("Generated {} fixture participants", participants.len());

    HttpResponse::Ok().json(FixturesResponse { participants })
}

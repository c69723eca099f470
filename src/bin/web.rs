//! Single binary web server: load standings, query elimination verdicts via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT,
//! ELIMINATION_INACTIVITY_HOURS, ELIMINATION_ALLOW_OUTSIDE_GAMES.

use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use division_elimination::{
    config::ServerConfig, parse_standings, Division, DivisionId, DivisionSummary,
    EliminationError, LoadOptions, Standings, TeamRow,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-division entry: evaluated division + timestamps (for auto-cleanup).
struct DivisionEntry {
    division: Division,
    created_at: DateTime<Utc>,
    last_activity: Instant,
}

/// In-memory state: many divisions by ID. Idle entries are removed by the cleanup task.
type AppState = Data<RwLock<HashMap<DivisionId, DivisionEntry>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct DivisionResponse {
    #[serde(flatten)]
    summary: DivisionSummary,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct AgainstResponse {
    team1: String,
    team2: String,
    games: u32,
}

#[derive(Deserialize)]
struct CreateDivisionBody {
    teams: Vec<TeamRow>,
    /// Overrides the server default for this division.
    #[serde(default)]
    allow_outside_games: Option<bool>,
}

/// Path segment: division id (e.g. /api/divisions/{id})
#[derive(Deserialize)]
struct DivisionPath {
    id: DivisionId,
}

/// Path segments: division id and team name.
#[derive(Deserialize)]
struct DivisionTeamPath {
    id: DivisionId,
    team: String,
}

/// Path segments: division id and two team names.
#[derive(Deserialize)]
struct DivisionPairPath {
    id: DivisionId,
    team1: String,
    team2: String,
}

fn error_response(e: &EliminationError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        EliminationError::UnknownTeam(_) => HttpResponse::NotFound().json(body),
        e if e.is_malformed_input() => HttpResponse::BadRequest().json(body),
        _ => {
            log::error!("Internal error: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn no_division() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No division" }))
}

/// Evaluate the standings off the async workers and store the result.
async fn store_division(state: &AppState, standings: Standings) -> HttpResponse {
    let division = match web::block(move || Division::new(standings)).await {
        Ok(Ok(d)) => d,
        Ok(Err(e)) => return error_response(&e),
        Err(_) => return HttpResponse::InternalServerError().body("evaluation aborted"),
    };
    let response = DivisionResponse {
        summary: division.summary(),
        created_at: Utc::now(),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        division.id,
        DivisionEntry {
            division,
            created_at: response.created_at,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(response)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "division-elimination",
    })
}

/// Create a division from JSON rows (returns it with id and every verdict).
#[post("/api/divisions")]
async fn api_create_division(
    state: AppState,
    config: Data<ServerConfig>,
    body: Json<CreateDivisionBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let options = LoadOptions {
        allow_outside_games: body
            .allow_outside_games
            .unwrap_or(config.load.allow_outside_games),
    };
    match Standings::from_rows(body.teams, options) {
        Ok(standings) => store_division(&state, standings).await,
        Err(e) => error_response(&e),
    }
}

/// Create a division from the plain text standings format.
#[post("/api/divisions/text")]
async fn api_create_division_text(
    state: AppState,
    config: Data<ServerConfig>,
    body: String,
) -> HttpResponse {
    match parse_standings(&body, config.load) {
        Ok(standings) => store_division(&state, standings).await,
        Err(e) => error_response(&e),
    }
}

/// Get a division by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/divisions/{id}")]
async fn api_get_division(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(DivisionResponse {
                summary: entry.division.summary(),
                created_at: entry.created_at,
            })
        }
        None => no_division(),
    }
}

#[delete("/api/divisions/{id}")]
async fn api_delete_division(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => no_division(),
    }
}

/// Team names in table order.
#[get("/api/divisions/{id}/teams")]
async fn api_list_teams(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_division(),
    };
    entry.last_activity = Instant::now();
    let names: Vec<&str> = entry.division.teams().collect();
    HttpResponse::Ok().json(names)
}

/// Record, elimination flag and certificate for one team.
#[get("/api/divisions/{id}/teams/{team}")]
async fn api_get_team(state: AppState, path: Path<DivisionTeamPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_division(),
    };
    entry.last_activity = Instant::now();
    match entry.division.team_report(&path.team) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(&e),
    }
}

/// Remaining games between two teams.
#[get("/api/divisions/{id}/against/{team1}/{team2}")]
async fn api_against(state: AppState, path: Path<DivisionPairPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_division(),
    };
    entry.last_activity = Instant::now();
    match entry.division.against(&path.team1, &path.team2) {
        Ok(games) => HttpResponse::Ok().json(AgainstResponse {
            team1: path.team1.clone(),
            team2: path.team2.clone(),
            games,
        }),
        Err(e) => error_response(&e),
    }
}

/// Drop divisions idle for at least `timeout`; returns how many were removed.
/// A poisoned lock is recovered so cleanup keeps running after a handler panic.
fn remove_idle(state: &RwLock<HashMap<DivisionId, DivisionEntry>>, timeout: Duration) -> usize {
    let mut g = state.write().unwrap_or_else(|poisoned| {
        log::error!("Division map lock poisoned; recovering for cleanup");
        poisoned.into_inner()
    });
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
    before - g.len()
}

/// Register every API route. `/api/divisions/text` goes before `/api/divisions`.
fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_division_text)
        .service(api_create_division)
        .service(api_get_division)
        .service(api_delete_division)
        .service(api_list_teams)
        .service(api_get_team)
        .service(api_against);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    if config.load.allow_outside_games {
        log::info!("Accepting remaining games against teams outside a division");
    }

    let state = Data::new(RwLock::new(HashMap::<DivisionId, DivisionEntry>::new()));

    // Background task: periodically remove divisions idle past the inactivity timeout
    let state_cleanup = state.clone();
    let (cleanup_interval, inactivity_timeout) = (config.cleanup_interval, config.inactivity_timeout);
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let removed = remove_idle(&state_cleanup, inactivity_timeout);
            if removed > 0 {
                log::info!("Cleaned up {} inactive division(s)", removed);
            }
        }
    });

    let config = Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .configure(routes)
    })
    .bind(bind)?
    .run()
    .await
}

//! Single binary web server: REST API over one live league, persisted to a JSON file.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, LEAGUE_STORE (path of the state file), STRICT_DRAW (true/false).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use futsal_queue::persistence::{restore_league, save_league, FileStore};
use futsal_queue::{
    resolve_match, tick, DrawPolicy, League, LeagueError, LeagueView, Outcome, TeamId,
    TimerEvent,
};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// The one owner of league state. Every request and the clock task go through this lock.
struct LeagueEntry {
    league: League,
    store: FileStore,
    /// Bumped once per timer expiry so a polling client can alert exactly once.
    expiry_alerts: u64,
}

impl LeagueEntry {
    fn persist(&mut self) {
        if let Err(e) = save_league(&mut self.store, &self.league) {
            log::warn!("Failed to save league to {}: {}", self.store.path().display(), e);
        }
    }

    fn response(&self) -> LeagueResponse {
        LeagueResponse {
            league: self.league.view(),
            expiry_alerts: self.expiry_alerts,
        }
    }
}

type AppState = Data<Mutex<LeagueEntry>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct LeagueResponse {
    #[serde(flatten)]
    league: LeagueView,
    expiry_alerts: u64,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct ResolveMatchBody {
    outcome: Outcome,
}

#[derive(Deserialize)]
struct DurationBody {
    seconds: u32,
}

/// Path segment: team id (e.g. /api/league/teams/{id})
#[derive(Deserialize)]
struct TeamPath {
    id: TeamId,
}

/// Lock the league, apply `op`, persist on success and answer with the new state.
fn mutate<F>(state: &AppState, op: F) -> HttpResponse
where
    F: FnOnce(&mut League) -> Result<(), LeagueError>,
{
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match op(&mut g.league) {
        Ok(()) => {
            g.persist();
            HttpResponse::Ok().json(g.response())
        }
        Err(e) => {
            log::debug!("Rejected: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "futsal-queue",
    })
}

/// Current queue, court, timer and settings.
#[get("/api/league")]
async fn api_get_league(state: AppState) -> HttpResponse {
    match state.lock() {
        Ok(g) => HttpResponse::Ok().json(g.response()),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Add a team to the back of the queue.
#[post("/api/league/teams")]
async fn api_add_team(state: AppState, body: Json<AddTeamBody>) -> HttpResponse {
    mutate(&state, |league| league.add_team(body.name.as_str()).map(|_| ()))
}

/// Remove a waiting team (teams on court cannot be removed).
#[delete("/api/league/teams/{id}")]
async fn api_remove_team(state: AppState, path: Path<TeamPath>) -> HttpResponse {
    mutate(&state, |league| league.remove_team(path.id))
}

/// Declare the result of the current match.
#[post("/api/league/result")]
async fn api_resolve_match(state: AppState, body: Json<ResolveMatchBody>) -> HttpResponse {
    mutate(&state, |league| resolve_match(league, body.outcome))
}

/// Change game length (timer must not be running).
#[put("/api/league/duration")]
async fn api_set_duration(state: AppState, body: Json<DurationBody>) -> HttpResponse {
    mutate(&state, |league| league.set_game_duration(body.seconds))
}

#[post("/api/league/timer/start")]
async fn api_start_timer(state: AppState) -> HttpResponse {
    mutate(&state, |league| league.start_timer())
}

#[post("/api/league/timer/pause")]
async fn api_pause_timer(state: AppState) -> HttpResponse {
    mutate(&state, |league| {
        league.pause_timer();
        Ok(())
    })
}

#[post("/api/league/timer/reset")]
async fn api_reset_timer(state: AppState) -> HttpResponse {
    mutate(&state, |league| {
        league.reset_timer();
        Ok(())
    })
}

/// Wipe all teams and the current match. Confirmation is up to the client.
#[post("/api/league/reset")]
async fn api_reset_league(state: AppState) -> HttpResponse {
    mutate(&state, |league| {
        league.reset_league();
        Ok(())
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_store_path() -> String {
    "futsal_league.json".to_string()
}

fn draw_policy_from_env() -> DrawPolicy {
    match std::env::var("STRICT_DRAW").ok().as_deref() {
        Some("false") | Some("0") => DrawPolicy::Lenient,
        _ => DrawPolicy::Strict,
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let store_path = std::env::var("LEAGUE_STORE").unwrap_or_else(|_| default_store_path());
    let draw_policy = draw_policy_from_env();

    let store = FileStore::new(store_path);
    let league = restore_league(&store, draw_policy);
    log::info!(
        "Restored league from {}: {} queued, {} on court, {}s games, {:?} draws",
        store.path().display(),
        league.queue().len(),
        league.active_match().teams().count(),
        league.game_duration().seconds(),
        league.draw_policy(),
    );

    let mut entry = LeagueEntry {
        league,
        store,
        expiry_alerts: 0,
    };
    entry.persist();
    let state = Data::new(Mutex::new(entry));

    // Clock task: one tick per second. Ticks while the timer is not armed do nothing.
    let state_clock = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let mut g = match state_clock.lock() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            if tick(&mut g.league) == Some(TimerEvent::Expired) {
                g.expiry_alerts += 1;
            }
        }
    });

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_league)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_resolve_match)
            .service(api_set_duration)
            .service(api_start_timer)
            .service(api_pause_timer)
            .service(api_reset_timer)
            .service(api_reset_league)
    })
    .bind(bind)?
    .run()
    .await
}

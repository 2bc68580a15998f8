use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    PlayerConfig, SimulationConfig,
    board::{self, BOARD_SIZE},
    run_analysis,
};

/// Opponent description accepted both as a repeatable `--opponent` JSON
/// argument and inside the API payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
struct OpponentSpec {
    name: Option<String>,
    cash: f64,
    position: usize,
    owned: Vec<usize>,
    risk_tolerance: f64,
}

impl Default for OpponentSpec {
    fn default() -> Self {
        Self {
            name: None,
            cash: 1500.0,
            position: 0,
            owned: Vec::new(),
            risk_tolerance: 0.5,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "boardwalk",
    about = "Monte Carlo Monopoly property investment analyzer"
)]
struct Cli {
    #[arg(long, help = "Target property by name, e.g. \"Boardwalk\"")]
    property: Option<String>,
    #[arg(long, help = "Target property by board position; overrides --property")]
    target_position: Option<usize>,
    #[arg(long, default_value_t = 1500.0, help = "Tracked player's starting cash")]
    cash: f64,
    #[arg(long, default_value_t = 0, help = "Tracked player's starting position")]
    start_position: usize,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Positions the tracked player already owns, e.g. 31,32"
    )]
    owned: Vec<usize>,
    #[arg(
        long,
        default_value_t = 0.5,
        help = "Tracked player's risk tolerance between 0 and 1"
    )]
    risk_tolerance: f64,
    #[arg(
        long = "opponent",
        value_name = "JSON",
        help = "Opponent spec as a JSON object, repeatable; e.g. '{\"cash\":2000,\"riskTolerance\":0.7}'"
    )]
    opponent: Vec<String>,
    #[arg(
        long,
        default_value_t = 3,
        help = "Number of default opponents when no --opponent is given"
    )]
    opponents: u32,
    #[arg(long, default_value_t = 1000)]
    simulations: u32,
    #[arg(
        long,
        default_value_t = 100,
        help = "Total player-turn cap per trial"
    )]
    max_turns: u32,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Per-turn discount rate for NPV and IRR in percent"
    )]
    discount_rate: f64,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        help = "Develop houses and hotels on completed color sets"
    )]
    house_building: bool,
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        help = "Buy the target on first landing regardless of purchase policy"
    )]
    force_purchase: bool,
    #[arg(long, help = "Include per-trial outcome records in the report")]
    include_trials: bool,
}

#[derive(Debug)]
struct AnalyzeRequest {
    config: SimulationConfig,
    include_trials: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AnalyzePayload {
    property: Option<String>,
    target_position: Option<usize>,
    cash: Option<f64>,
    start_position: Option<usize>,
    owned: Option<Vec<usize>>,
    risk_tolerance: Option<f64>,
    opponents: Option<Vec<OpponentSpec>>,
    opponent_count: Option<u32>,
    simulations: Option<u32>,
    max_turns: Option<u32>,
    discount_rate: Option<f64>,
    seed: Option<u64>,
    house_building: Option<bool>,
    force_purchase: Option<bool>,
    include_trials: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_config(cli: Cli) -> Result<AnalyzeRequest, String> {
    let target_position = match (cli.target_position, cli.property.as_deref()) {
        (Some(pos), _) => pos,
        (None, Some(name)) => board::find_by_name(name)
            .ok_or_else(|| format!("--property does not match any board space: {name}"))?,
        (None, None) => return Err("--property or --target-position is required".to_string()),
    };

    if target_position >= BOARD_SIZE {
        return Err("--target-position must be < 40".to_string());
    }

    if !board::space(target_position).is_ownable() {
        return Err("--target-position must be an ownable space".to_string());
    }

    if cli.simulations == 0 {
        return Err("--simulations must be > 0".to_string());
    }

    if cli.max_turns == 0 {
        return Err("--max-turns must be > 0".to_string());
    }

    if !cli.discount_rate.is_finite() || cli.discount_rate <= -100.0 {
        return Err("--discount-rate must be > -100".to_string());
    }

    let mut specs: Vec<OpponentSpec> = Vec::new();
    if cli.opponent.is_empty() {
        specs.resize_with(cli.opponents as usize, OpponentSpec::default);
    } else {
        for raw in &cli.opponent {
            let spec = serde_json::from_str(raw)
                .map_err(|e| format!("--opponent must be a JSON object: {e}"))?;
            specs.push(spec);
        }
    }

    if specs.is_empty() {
        return Err("--opponents must be > 0".to_string());
    }

    let mut players = Vec::with_capacity(specs.len() + 1);
    players.push(PlayerConfig {
        name: "Investor".to_string(),
        cash: cli.cash,
        position: cli.start_position,
        owned_properties: cli.owned.clone(),
        risk_tolerance: cli.risk_tolerance,
    });
    for (i, spec) in specs.into_iter().enumerate() {
        players.push(PlayerConfig {
            name: spec
                .name
                .unwrap_or_else(|| format!("Opponent {}", i + 1)),
            cash: spec.cash,
            position: spec.position,
            owned_properties: spec.owned,
            risk_tolerance: spec.risk_tolerance,
        });
    }

    let mut already_owned = [false; BOARD_SIZE];
    for player in &players {
        if !player.cash.is_finite() || player.cash < 0.0 {
            return Err("--cash must be >= 0".to_string());
        }
        if player.position >= BOARD_SIZE {
            return Err("--start-position must be < 40".to_string());
        }
        if !(0.0..=1.0).contains(&player.risk_tolerance) {
            return Err("--risk-tolerance must be between 0 and 1".to_string());
        }
        for &pos in &player.owned_properties {
            if pos >= BOARD_SIZE {
                return Err("--owned positions must be < 40".to_string());
            }
            if !board::space(pos).is_ownable() {
                return Err("--owned positions must be ownable spaces".to_string());
            }
            if already_owned[pos] {
                return Err("--owned positions must not repeat across players".to_string());
            }
            already_owned[pos] = true;
        }
    }

    if already_owned[target_position] {
        return Err("the target position is already owned at the start".to_string());
    }

    Ok(AnalyzeRequest {
        config: SimulationConfig {
            target_position,
            tracked_player: 0,
            players,
            simulations: cli.simulations,
            max_turns: cli.max_turns,
            discount_rate: cli.discount_rate / 100.0,
            seed: cli.seed,
            house_building: cli.house_building,
            force_target_purchase: cli.force_purchase,
        },
        include_trials: cli.include_trials,
    })
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let request = build_config(cli)?;
    let mut report = run_analysis(&request.config)?;
    if !request.include_trials {
        report.trials = None;
    }
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("Failed to encode report: {e}"))?;
    println!("{json}");
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/analyze",
            get(analyze_get_handler).post(analyze_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Analyzer HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/analyze");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn analyze_get_handler(Query(payload): Query<AnalyzePayload>) -> Response {
    analyze_handler_impl(payload).await
}

async fn analyze_post_handler(Json(payload): Json<AnalyzePayload>) -> Response {
    analyze_handler_impl(payload).await
}

async fn analyze_handler_impl(payload: AnalyzePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match run_analysis(&request.config) {
        Ok(mut report) => {
            if !request.include_trials {
                report.trials = None;
            }
            json_response(StatusCode::OK, report)
        }
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<AnalyzeRequest, String> {
    let payload = serde_json::from_str::<AnalyzePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: AnalyzePayload) -> Result<AnalyzeRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.property {
        cli.property = Some(v);
    }
    if let Some(v) = payload.target_position {
        cli.target_position = Some(v);
    }
    if let Some(v) = payload.cash {
        cli.cash = v;
    }
    if let Some(v) = payload.start_position {
        cli.start_position = v;
    }
    if let Some(v) = payload.owned {
        cli.owned = v;
    }
    if let Some(v) = payload.risk_tolerance {
        cli.risk_tolerance = v;
    }
    if let Some(specs) = payload.opponents {
        let mut raw = Vec::with_capacity(specs.len());
        for spec in &specs {
            raw.push(
                serde_json::to_string(spec)
                    .map_err(|e| format!("Invalid opponent spec: {e}"))?,
            );
        }
        cli.opponent = raw;
    }
    if let Some(v) = payload.opponent_count {
        cli.opponents = v;
    }
    if let Some(v) = payload.simulations {
        cli.simulations = v;
    }
    if let Some(v) = payload.max_turns {
        cli.max_turns = v;
    }
    if let Some(v) = payload.discount_rate {
        cli.discount_rate = v;
    }
    if let Some(v) = payload.seed {
        cli.seed = v;
    }
    if let Some(v) = payload.house_building {
        cli.house_building = v;
    }
    if let Some(v) = payload.force_purchase {
        cli.force_purchase = v;
    }
    if let Some(v) = payload.include_trials {
        cli.include_trials = v;
    }

    build_config(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        property: None,
        target_position: None,
        cash: 1500.0,
        start_position: 0,
        owned: Vec::new(),
        risk_tolerance: 0.5,
        opponent: Vec::new(),
        opponents: 3,
        simulations: 1000,
        max_turns: 100,
        discount_rate: 5.0,
        seed: 42,
        house_building: true,
        force_purchase: true,
        include_trials: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cli() -> Cli {
        let mut cli = default_cli_for_api();
        cli.target_position = Some(39);
        cli
    }

    #[test]
    fn build_config_resolves_property_names_case_insensitively() {
        let mut cli = sample_cli();
        cli.target_position = None;
        cli.property = Some("north carolina avenue".to_string());

        let request = build_config(cli).expect("valid config");
        assert_eq!(request.config.target_position, 32);
    }

    #[test]
    fn build_config_prefers_explicit_position_over_name() {
        let mut cli = sample_cli();
        cli.property = Some("Boardwalk".to_string());
        cli.target_position = Some(31);

        let request = build_config(cli).expect("valid config");
        assert_eq!(request.config.target_position, 31);
    }

    #[test]
    fn build_config_requires_a_target() {
        let mut cli = sample_cli();
        cli.target_position = None;
        cli.property = None;

        let err = build_config(cli).expect_err("must require a target");
        assert!(err.contains("--property or --target-position"));
    }

    #[test]
    fn build_config_rejects_unknown_property_names() {
        let mut cli = sample_cli();
        cli.target_position = None;
        cli.property = Some("Mayfair".to_string());

        let err = build_config(cli).expect_err("must reject unknown names");
        assert!(err.contains("--property"));
    }

    #[test]
    fn build_config_rejects_unownable_targets() {
        for target in [0, 10, 20, 30, 4] {
            let mut cli = sample_cli();
            cli.target_position = Some(target);
            let err = build_config(cli).expect_err("must reject unownable target");
            assert!(err.contains("ownable"), "position {target}: {err}");
        }

        let mut cli = sample_cli();
        cli.target_position = Some(40);
        let err = build_config(cli).expect_err("must reject off-board target");
        assert!(err.contains("< 40"));
    }

    #[test]
    fn build_config_rejects_zero_simulations_and_turns() {
        let mut cli = sample_cli();
        cli.simulations = 0;
        let err = build_config(cli).expect_err("must reject zero simulations");
        assert!(err.contains("--simulations"));

        let mut cli = sample_cli();
        cli.max_turns = 0;
        let err = build_config(cli).expect_err("must reject zero turns");
        assert!(err.contains("--max-turns"));
    }

    #[test]
    fn build_config_rejects_out_of_range_risk_tolerance() {
        let mut cli = sample_cli();
        cli.risk_tolerance = 1.5;
        let err = build_config(cli).expect_err("must reject risk > 1");
        assert!(err.contains("--risk-tolerance"));
    }

    #[test]
    fn build_config_rejects_negative_cash() {
        let mut cli = sample_cli();
        cli.cash = -100.0;
        let err = build_config(cli).expect_err("must reject negative cash");
        assert!(err.contains("--cash"));
    }

    #[test]
    fn build_config_validates_owned_positions() {
        let mut cli = sample_cli();
        cli.owned = vec![31, 41];
        let err = build_config(cli).expect_err("must reject off-board holdings");
        assert!(err.contains("< 40"));

        let mut cli = sample_cli();
        cli.owned = vec![20];
        let err = build_config(cli).expect_err("must reject unownable holdings");
        assert!(err.contains("ownable"));

        let mut cli = sample_cli();
        cli.owned = vec![31];
        cli.opponent = vec![r#"{"owned":[31]}"#.to_string()];
        let err = build_config(cli).expect_err("must reject duplicate holdings");
        assert!(err.contains("repeat"));
    }

    #[test]
    fn build_config_rejects_a_pre_owned_target() {
        let mut cli = sample_cli();
        cli.target_position = Some(31);
        cli.owned = vec![31];
        let err = build_config(cli).expect_err("must reject pre-owned target");
        assert!(err.contains("already owned"));
    }

    #[test]
    fn build_config_fills_in_default_opponents() {
        let request = build_config(sample_cli()).expect("valid config");
        assert_eq!(request.config.players.len(), 4);
        assert_eq!(request.config.tracked_player, 0);
        assert_eq!(request.config.players[0].name, "Investor");
        assert_eq!(request.config.players[1].name, "Opponent 1");
        assert_eq!(request.config.players[3].cash, 1500.0);
    }

    #[test]
    fn build_config_requires_at_least_one_opponent() {
        let mut cli = sample_cli();
        cli.opponents = 0;
        let err = build_config(cli).expect_err("must require an opponent");
        assert!(err.contains("--opponents"));
    }

    #[test]
    fn build_config_parses_opponent_json() {
        let mut cli = sample_cli();
        cli.opponent = vec![
            r#"{"name":"Shark","cash":2500,"position":10,"owned":[5,15],"riskTolerance":0.8}"#
                .to_string(),
        ];

        let request = build_config(cli).expect("valid config");
        assert_eq!(request.config.players.len(), 2);
        let shark = &request.config.players[1];
        assert_eq!(shark.name, "Shark");
        assert_eq!(shark.cash, 2500.0);
        assert_eq!(shark.position, 10);
        assert_eq!(shark.owned_properties, vec![5, 15]);
        assert_eq!(shark.risk_tolerance, 0.8);
    }

    #[test]
    fn build_config_rejects_malformed_opponent_json() {
        let mut cli = sample_cli();
        cli.opponent = vec!["not-json".to_string()];
        let err = build_config(cli).expect_err("must reject bad JSON");
        assert!(err.contains("--opponent"));
    }

    #[test]
    fn build_config_converts_discount_rate_from_percent() {
        let mut cli = sample_cli();
        cli.discount_rate = 7.5;
        let request = build_config(cli).expect("valid config");
        assert!((request.config.discount_rate - 0.075).abs() < 1e-12);
    }

    #[test]
    fn api_request_from_json_parses_web_keys() {
        let json = r#"{
          "property": "Boardwalk",
          "cash": 3500,
          "startPosition": 20,
          "owned": [37],
          "riskTolerance": 0.6,
          "opponents": [
            {"cash": 1800, "riskTolerance": 0.3},
            {"name": "Banker", "cash": 2200, "owned": [5, 15]}
          ],
          "simulations": 500,
          "maxTurns": 80,
          "discountRate": 4,
          "seed": 7,
          "houseBuilding": true,
          "forcePurchase": false,
          "includeTrials": true
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        let config = &request.config;

        assert_eq!(config.target_position, 39);
        assert_eq!(config.players.len(), 3);
        assert_eq!(config.players[0].cash, 3500.0);
        assert_eq!(config.players[0].position, 20);
        assert_eq!(config.players[0].owned_properties, vec![37]);
        assert_eq!(config.players[1].name, "Opponent 1");
        assert_eq!(config.players[2].name, "Banker");
        assert_eq!(config.players[2].owned_properties, vec![5, 15]);
        assert_eq!(config.simulations, 500);
        assert_eq!(config.max_turns, 80);
        assert!((config.discount_rate - 0.04).abs() < 1e-12);
        assert_eq!(config.seed, 7);
        assert!(config.house_building);
        assert!(!config.force_target_purchase);
        assert!(request.include_trials);
    }

    #[test]
    fn api_request_from_json_rejects_a_missing_target() {
        let err = api_request_from_json("{}").expect_err("must require a target");
        assert!(err.contains("--property or --target-position"));
    }

    #[test]
    fn analysis_runs_end_to_end_from_a_payload() {
        let json = r#"{
          "targetPosition": 32,
          "owned": [31],
          "simulations": 25,
          "maxTurns": 40
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        let report = run_analysis(&request.config).expect("analysis should run");

        assert_eq!(report.property_name, "North Carolina Avenue");
        assert_eq!(report.property_position, 32);
        assert_eq!(report.property_price, 300.0);
        assert_eq!(report.summary.trials, 25);

        let encoded = serde_json::to_string(&report).expect("report should serialize");
        assert!(encoded.contains("\"purchaseRate\""));
        assert!(encoded.contains("\"breakEvenProbability\""));
        assert!(encoded.contains("\"propertyName\""));
    }
}

use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PurchasePolicy {
    Conservative,
    Balanced,
    Aggressive,
}

impl PurchasePolicy {
    pub fn from_risk_tolerance(risk_tolerance: f64) -> Self {
        if risk_tolerance < 0.4 {
            PurchasePolicy::Conservative
        } else if risk_tolerance < 0.6 {
            PurchasePolicy::Balanced
        } else {
            PurchasePolicy::Aggressive
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub name: String,
    pub cash: f64,
    pub position: usize,
    pub owned_properties: Vec<usize>,
    pub risk_tolerance: f64,
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub target_position: usize,
    /// Index into `players` of the player whose investment is tracked.
    pub tracked_player: usize,
    pub players: Vec<PlayerConfig>,
    pub simulations: u32,
    pub max_turns: u32,
    pub discount_rate: f64,
    pub seed: u64,
    pub house_building: bool,
    /// When set, the tracked player buys the target property on landing
    /// regardless of their purchase policy, funds permitting.
    pub force_target_purchase: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentLogEntry {
    pub turn: u32,
    pub position: usize,
    pub property_name: &'static str,
    pub new_level: u8,
    pub cost: f64,
    pub expected_value: f64,
    pub cash_after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialOutcome {
    pub total_investment: f64,
    pub total_returns: f64,
    pub net_profit: f64,
    pub roi: f64,
    pub npv: f64,
    pub irr: Option<f64>,
    pub properties_owned: u32,
    pub houses_built: u32,
    pub hotels_built: u32,
    pub rent_collected: f64,
    pub turns_elapsed: u32,
    pub final_cash: f64,
    pub bought_target: bool,
    pub purchase_turn: Option<u32>,
    pub break_even_turn: Option<u32>,
    pub won: bool,
    pub went_bankrupt: bool,
    pub cash_flow_by_turn: Vec<f64>,
    pub development_log: Vec<DevelopmentLogEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricStats {
    pub mean: f64,
    pub median: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub trials: u32,
    pub purchased_trials: u32,
    pub purchase_rate: f64,
    pub roi: Option<MetricStats>,
    pub npv: Option<MetricStats>,
    pub irr_mean: Option<f64>,
    pub irr_median: Option<f64>,
    pub irr_converged_trials: u32,
    pub break_even_probability: f64,
    pub mean_rent_collected: f64,
    pub mean_final_cash: f64,
    pub win_rate: f64,
    pub bankruptcy_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub property_name: &'static str,
    pub property_position: usize,
    pub property_price: f64,
    pub summary: AnalysisSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trials: Option<Vec<TrialOutcome>>,
}

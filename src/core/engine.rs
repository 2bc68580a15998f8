use super::board::{
    self, AVERAGE_DICE_TOTAL, BOARD_SIZE, COLOR_GROUPS, ColorGroup, GO_SALARY, JAIL_POSITION,
    JAIL_TERM_TURNS, LandingTable, RAILROAD_BASE_RENT, RAILROAD_POSITIONS, SpaceKind,
    UTILITY_POSITIONS,
};
use super::solver::{irr, npv};
use super::types::{
    AnalysisReport, AnalysisSummary, DevelopmentLogEntry, MetricStats, PurchasePolicy,
    SimulationConfig, TrialOutcome,
};

const HOTEL_LEVEL: u8 = 5;
const MIN_HOUSE_COST: f64 = 50.0;
const DOUBLES_JAIL_STREAK: u32 = 3;

// Strategic multipliers applied to ev-per-dollar before greedy ranking.
const HOTEL_COMPLETION_BONUS: f64 = 1.3;
const ORANGE_TRAFFIC_BONUS: f64 = 1.2;
const RED_YELLOW_TRAFFIC_BONUS: f64 = 1.1;
const FIRST_HOUSE_BONUS: f64 = 1.15;
const RISK_APPETITE_BONUS: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Ownership {
    owner: Option<usize>,
    level: u8,
}

impl Ownership {
    const fn vacant() -> Self {
        Self {
            owner: None,
            level: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct PlayerState {
    cash: f64,
    position: usize,
    in_jail: bool,
    jail_turns_remaining: u32,
    doubles_streak: u32,
    risk_tolerance: f64,
    policy: PurchasePolicy,
    bankrupt: bool,
}

#[derive(Debug, Clone)]
struct GameState {
    players: Vec<PlayerState>,
    ownership: [Ownership; BOARD_SIZE],
    turn: u32,
    max_turns: u32,
}

impl GameState {
    fn from_config(config: &SimulationConfig) -> Self {
        let mut ownership = [Ownership::vacant(); BOARD_SIZE];
        let players = config
            .players
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                for &pos in &p.owned_properties {
                    ownership[pos] = Ownership {
                        owner: Some(idx),
                        level: 0,
                    };
                }
                PlayerState {
                    cash: p.cash,
                    position: p.position,
                    in_jail: false,
                    jail_turns_remaining: 0,
                    doubles_streak: 0,
                    risk_tolerance: p.risk_tolerance,
                    policy: PurchasePolicy::from_risk_tolerance(p.risk_tolerance),
                    bankrupt: false,
                }
            })
            .collect();

        Self {
            players,
            ownership,
            turn: 0,
            max_turns: config.max_turns,
        }
    }

    fn owner_of(&self, position: usize) -> Option<usize> {
        self.ownership[position].owner
    }

    fn level(&self, position: usize) -> u8 {
        self.ownership[position].level
    }

    fn player_owns(&self, idx: usize, position: usize) -> bool {
        self.ownership[position].owner == Some(idx)
    }

    fn owned_total(&self, idx: usize) -> usize {
        self.ownership
            .iter()
            .filter(|o| o.owner == Some(idx))
            .count()
    }

    fn owned_count_in_group(&self, idx: usize, group: ColorGroup) -> usize {
        group
            .positions()
            .iter()
            .filter(|&&pos| self.player_owns(idx, pos))
            .count()
    }

    fn has_monopoly(&self, idx: usize, group: ColorGroup) -> bool {
        group
            .positions()
            .iter()
            .all(|&pos| self.player_owns(idx, pos))
    }

    fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| !p.bankrupt).count()
    }

    fn active_opponents(&self, idx: usize) -> usize {
        self.players
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != idx && !p.bankrupt)
            .count()
    }

    fn is_over(&self) -> bool {
        self.active_player_count() <= 1
    }

    fn sole_survivor(&self) -> Option<usize> {
        if self.active_player_count() != 1 {
            return None;
        }
        self.players.iter().position(|p| !p.bankrupt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TurnEvent {
    PassedGo,
    Purchased { position: usize, price: f64 },
    RentPaid { position: usize, amount: f64, owner: usize },
    TaxPaid { amount: f64 },
    SentToJail,
    ServedJailTurn,
    WentBankrupt,
}

fn take_turn(
    state: &mut GameState,
    idx: usize,
    rng: &mut Rng,
    purchase_override: Option<usize>,
) -> Vec<TurnEvent> {
    if state.players[idx].bankrupt {
        return Vec::new();
    }

    if state.players[idx].in_jail {
        let player = &mut state.players[idx];
        player.jail_turns_remaining = player.jail_turns_remaining.saturating_sub(1);
        if player.jail_turns_remaining == 0 {
            player.in_jail = false;
        }
        return vec![TurnEvent::ServedJailTurn];
    }

    let die1 = rng.roll_die();
    let die2 = rng.roll_die();
    resolve_roll(state, idx, die1, die2, purchase_override)
}

fn resolve_roll(
    state: &mut GameState,
    idx: usize,
    die1: u8,
    die2: u8,
    purchase_override: Option<usize>,
) -> Vec<TurnEvent> {
    let mut events = Vec::new();

    if die1 == die2 {
        state.players[idx].doubles_streak += 1;
        if state.players[idx].doubles_streak >= DOUBLES_JAIL_STREAK {
            send_to_jail(state, idx);
            events.push(TurnEvent::SentToJail);
            return events;
        }
    } else {
        state.players[idx].doubles_streak = 0;
    }

    let player = &mut state.players[idx];
    let old_position = player.position;
    player.position = (old_position + die1 as usize + die2 as usize) % BOARD_SIZE;
    if player.position < old_position {
        player.cash += GO_SALARY;
        events.push(TurnEvent::PassedGo);
    }

    resolve_landing(state, idx, purchase_override, &mut events);
    events
}

fn resolve_landing(
    state: &mut GameState,
    idx: usize,
    purchase_override: Option<usize>,
    events: &mut Vec<TurnEvent>,
) {
    let position = state.players[idx].position;
    let space = board::space(position);

    match space.kind {
        SpaceKind::GoToJail => {
            send_to_jail(state, idx);
            events.push(TurnEvent::SentToJail);
        }
        SpaceKind::Tax { amount } => {
            let paid = pay_from(state, idx, amount, events);
            events.push(TurnEvent::TaxPaid { amount: paid });
        }
        SpaceKind::Street { .. } | SpaceKind::Railroad { .. } | SpaceKind::Utility { .. } => {
            match state.owner_of(position) {
                None => {
                    let price = space.price().unwrap_or(0.0);
                    let forced = purchase_override == Some(position);
                    let wants = forced
                        || state.players[idx]
                            .policy
                            .decide_purchase(state, idx, position);
                    if wants && state.players[idx].cash >= price {
                        state.players[idx].cash -= price;
                        state.ownership[position] = Ownership {
                            owner: Some(idx),
                            level: 0,
                        };
                        events.push(TurnEvent::Purchased { position, price });
                    }
                }
                Some(owner) if owner == idx => {}
                // A bankrupt owner is frozen; their holdings charge nothing.
                Some(owner) if state.players[owner].bankrupt => {}
                Some(owner) => {
                    let rent = compute_rent(state, position, owner);
                    let paid = pay_from(state, idx, rent, events);
                    state.players[owner].cash += paid;
                    events.push(TurnEvent::RentPaid {
                        position,
                        amount: paid,
                        owner,
                    });
                }
            }
        }
        _ => {}
    }
}

/// Deducts up to `amount` from the player's cash. A shortfall pays out the
/// remaining cash, leaves the balance at exactly zero and marks the player
/// bankrupt. Returns the amount actually paid.
fn pay_from(state: &mut GameState, idx: usize, amount: f64, events: &mut Vec<TurnEvent>) -> f64 {
    let player = &mut state.players[idx];
    if player.cash >= amount {
        player.cash -= amount;
        return amount;
    }

    let paid = player.cash;
    player.cash = 0.0;
    player.bankrupt = true;
    events.push(TurnEvent::WentBankrupt);
    paid
}

fn send_to_jail(state: &mut GameState, idx: usize) {
    let player = &mut state.players[idx];
    player.position = JAIL_POSITION;
    player.in_jail = true;
    player.jail_turns_remaining = JAIL_TERM_TURNS;
    player.doubles_streak = 0;
}

fn compute_rent(state: &GameState, position: usize, owner: usize) -> f64 {
    let space = board::space(position);
    match space.kind {
        SpaceKind::Street { group, .. } => {
            let has_monopoly = state.has_monopoly(owner, group);
            space.street_rent(has_monopoly, state.level(position))
        }
        SpaceKind::Railroad { .. } => {
            let owned = RAILROAD_POSITIONS
                .iter()
                .filter(|&&pos| state.player_owns(owner, pos))
                .count();
            RAILROAD_BASE_RENT * f64::from(1u32 << (owned.max(1) - 1))
        }
        SpaceKind::Utility { .. } => {
            let owned = UTILITY_POSITIONS
                .iter()
                .filter(|&&pos| state.player_owns(owner, pos))
                .count();
            let multiplier = if owned == 2 { 10.0 } else { 4.0 };
            AVERAGE_DICE_TOTAL * multiplier
        }
        _ => 0.0,
    }
}

impl PurchasePolicy {
    fn decide_purchase(self, state: &GameState, idx: usize, position: usize) -> bool {
        let space = board::space(position);
        let Some(price) = space.price() else {
            return false;
        };
        let cash = state.players[idx].cash;

        match self {
            PurchasePolicy::Conservative => {
                if cash < price * 3.0 {
                    return false;
                }
                if completes_monopoly(state, idx, position) {
                    return true;
                }
                price <= 150.0
            }
            PurchasePolicy::Aggressive => {
                if cash < price + 100.0 {
                    return false;
                }
                match space.kind {
                    SpaceKind::Utility { .. } => state.owned_total(idx) < 3,
                    SpaceKind::Street { .. } if price < 100.0 => state.owned_total(idx) < 5,
                    _ => true,
                }
            }
            PurchasePolicy::Balanced => {
                if cash < price * 2.0 + 250.0 {
                    return false;
                }
                match space.kind {
                    SpaceKind::Railroad { .. } => true,
                    SpaceKind::Utility { .. } => {
                        // Only worth finishing the pair.
                        UTILITY_POSITIONS
                            .iter()
                            .filter(|&&pos| state.player_owns(idx, pos))
                            .count()
                            == 1
                    }
                    SpaceKind::Street { group, rents, .. } => {
                        if completes_monopoly(state, idx, position) {
                            return true;
                        }
                        let high_traffic = matches!(
                            group,
                            ColorGroup::Orange
                                | ColorGroup::Red
                                | ColorGroup::Yellow
                                | ColorGroup::Green
                        );
                        if high_traffic && state.owned_count_in_group(idx, group) == 0 {
                            return true;
                        }
                        rents[6] / price > 3.5
                    }
                    _ => false,
                }
            }
        }
    }
}

fn completes_monopoly(state: &GameState, idx: usize, position: usize) -> bool {
    let Some(group) = board::space(position).color_group() else {
        return false;
    };
    group
        .positions()
        .iter()
        .all(|&pos| pos == position || state.player_owns(idx, pos))
}

#[derive(Debug, Clone, Copy)]
struct DevelopmentCandidate {
    position: usize,
    group: ColorGroup,
    current_level: u8,
    cost: f64,
    rent_increase: f64,
    expected_value: f64,
    ev_per_dollar: f64,
}

/// Cash floor kept untouched during development. Lower risk tolerance
/// reserves more.
fn development_reserve(risk_tolerance: f64) -> f64 {
    400.0 * (1.0 - risk_tolerance.clamp(0.0, 1.0))
}

fn generate_candidates(state: &GameState, idx: usize) -> Vec<DevelopmentCandidate> {
    let mut candidates = Vec::new();

    for group in COLOR_GROUPS {
        if !state.has_monopoly(idx, group) {
            continue;
        }

        let positions = group.positions();
        let min_level = positions
            .iter()
            .map(|&pos| state.level(pos))
            .min()
            .unwrap_or(0);
        if min_level >= HOTEL_LEVEL {
            continue;
        }

        // Even building: only the least-developed group members may grow.
        for &position in positions {
            if state.level(position) != min_level {
                continue;
            }
            let space = board::space(position);
            let Some(cost) = space.house_cost() else {
                continue;
            };
            let rent_increase =
                space.street_rent(true, min_level + 1) - space.street_rent(true, min_level);
            candidates.push(DevelopmentCandidate {
                position,
                group,
                current_level: min_level,
                cost,
                rent_increase,
                expected_value: 0.0,
                ev_per_dollar: 0.0,
            });
        }
    }

    candidates
}

fn score_candidates(
    candidates: &mut [DevelopmentCandidate],
    landing: &LandingTable,
    remaining_turns: u32,
    opponents: usize,
    risk_tolerance: f64,
) {
    for candidate in candidates.iter_mut() {
        let expected_landings = landing.probability(candidate.position)
            * f64::from(remaining_turns)
            * opponents as f64;
        candidate.expected_value = candidate.rent_increase * expected_landings;
        let base = if candidate.cost > 0.0 {
            candidate.expected_value / candidate.cost
        } else {
            0.0
        };

        let mut multiplier = 1.0;
        if candidate.current_level + 1 == HOTEL_LEVEL {
            multiplier *= HOTEL_COMPLETION_BONUS;
        }
        match candidate.group {
            ColorGroup::Orange => multiplier *= ORANGE_TRAFFIC_BONUS,
            ColorGroup::Red | ColorGroup::Yellow => multiplier *= RED_YELLOW_TRAFFIC_BONUS,
            _ => {}
        }
        if candidate.current_level == 0 {
            multiplier *= FIRST_HOUSE_BONUS;
        }
        if risk_tolerance > 0.7 && candidate.cost > 150.0 {
            multiplier *= RISK_APPETITE_BONUS;
        } else if risk_tolerance < 0.4 && candidate.cost < 100.0 {
            multiplier *= RISK_APPETITE_BONUS;
        }

        candidate.ev_per_dollar = base * multiplier;
    }
}

/// Greedy budget-constrained development pass for one player. Applies the
/// best affordable candidate, then regenerates the candidate set against
/// the updated levels so a build can unlock or block later builds within
/// the same pass. Returns the total amount spent.
fn run_development_pass(
    state: &mut GameState,
    idx: usize,
    landing: &LandingTable,
    log: &mut Vec<DevelopmentLogEntry>,
) -> f64 {
    let risk_tolerance = state.players[idx].risk_tolerance;
    let reserve = development_reserve(risk_tolerance);
    let remaining_turns = state.max_turns.saturating_sub(state.turn);
    let opponents = state.active_opponents(idx);
    let mut spent = 0.0;

    loop {
        let budget = state.players[idx].cash - reserve;
        if budget < MIN_HOUSE_COST {
            break;
        }

        let mut candidates = generate_candidates(state, idx);
        if candidates.is_empty() {
            break;
        }
        score_candidates(
            &mut candidates,
            landing,
            remaining_turns,
            opponents,
            risk_tolerance,
        );
        candidates.retain(|c| c.cost <= budget);
        // Ties break toward the cheaper, then lower-positioned build so
        // selection is reproducible.
        candidates.sort_by(|a, b| {
            b.ev_per_dollar
                .total_cmp(&a.ev_per_dollar)
                .then(a.cost.total_cmp(&b.cost))
                .then(a.position.cmp(&b.position))
        });
        let Some(best) = candidates.first().copied() else {
            break;
        };

        state.players[idx].cash -= best.cost;
        state.ownership[best.position].level = best.current_level + 1;
        spent += best.cost;
        log.push(DevelopmentLogEntry {
            turn: state.turn,
            position: best.position,
            property_name: board::space(best.position).name,
            new_level: best.current_level + 1,
            cost: best.cost,
            expected_value: best.expected_value,
            cash_after: state.players[idx].cash,
        });
    }

    spent
}

/// Rent received on `position` counts toward the tracked investment when it
/// is the target itself or a property developed during the trial (levels
/// only ever come from the development pass).
fn attributable(state: &GameState, target: usize, position: usize) -> bool {
    position == target || state.level(position) > 0
}

fn simulate_trial(config: &SimulationConfig, landing: &LandingTable, trial_id: u32) -> TrialOutcome {
    let mut state = GameState::from_config(config);
    let mut rng = Rng::new(derive_seed(config.seed, trial_id));
    let tracked = config.tracked_player;

    let mut cash_flow_by_turn = Vec::with_capacity(config.max_turns as usize);
    let mut development_log = Vec::new();
    let mut purchase_turn = None;
    let mut purchase_price = 0.0;
    let mut development_spent = 0.0;
    let mut total_returns = 0.0;
    let mut rent_collected = 0.0;

    let mut current = 0;
    while state.turn < config.max_turns && !state.is_over() {
        let idx = current;
        current = (current + 1) % state.players.len();

        let mut turn_flow = 0.0;
        if !state.players[idx].bankrupt {
            let force = (idx == tracked && config.force_target_purchase)
                .then_some(config.target_position);
            let events = take_turn(&mut state, idx, &mut rng, force);

            for event in &events {
                match *event {
                    TurnEvent::Purchased { position, price }
                        if idx == tracked && position == config.target_position =>
                    {
                        purchase_turn = Some(state.turn);
                        purchase_price = price;
                        turn_flow -= price;
                    }
                    TurnEvent::RentPaid {
                        position,
                        amount,
                        owner,
                    } if owner == tracked => {
                        rent_collected += amount;
                        if attributable(&state, config.target_position, position) {
                            total_returns += amount;
                            turn_flow += amount;
                        }
                    }
                    _ => {}
                }
            }

            if idx == tracked && config.house_building && !state.players[tracked].bankrupt {
                let dev = run_development_pass(&mut state, tracked, landing, &mut development_log);
                development_spent += dev;
                turn_flow -= dev;
            }
        }

        cash_flow_by_turn.push(turn_flow);
        state.turn += 1;
    }

    let total_investment = purchase_price + development_spent;
    let net_profit = total_returns - total_investment;
    let roi = if total_investment > 0.0 {
        net_profit / total_investment * 100.0
    } else {
        0.0
    };

    let break_even_turn = purchase_turn.and_then(|bought_at| {
        let mut cumulative = 0.0;
        for (turn, flow) in cash_flow_by_turn.iter().enumerate() {
            cumulative += flow;
            if turn as u32 > bought_at && cumulative >= 0.0 {
                return Some(turn as u32);
            }
        }
        None
    });

    let mut properties_owned = 0;
    let mut houses_built = 0;
    let mut hotels_built = 0;
    for record in state.ownership.iter() {
        if record.owner != Some(tracked) {
            continue;
        }
        properties_owned += 1;
        if record.level == HOTEL_LEVEL {
            hotels_built += 1;
        } else {
            houses_built += u32::from(record.level);
        }
    }

    TrialOutcome {
        total_investment,
        total_returns,
        net_profit,
        roi,
        npv: npv(config.discount_rate, &cash_flow_by_turn),
        irr: irr(&cash_flow_by_turn).map(|rate| rate * 100.0),
        properties_owned,
        houses_built,
        hotels_built,
        rent_collected,
        turns_elapsed: state.turn,
        final_cash: state.players[tracked].cash,
        bought_target: purchase_turn.is_some(),
        purchase_turn,
        break_even_turn,
        won: state.sole_survivor() == Some(tracked),
        went_bankrupt: state.players[tracked].bankrupt,
        cash_flow_by_turn,
        development_log,
    }
}

pub fn run_analysis(config: &SimulationConfig) -> Result<AnalysisReport, String> {
    if config.simulations == 0 {
        return Err("simulation count must be > 0".to_string());
    }
    if config.tracked_player >= config.players.len() {
        return Err("tracked player index is out of range".to_string());
    }
    if config.target_position >= BOARD_SIZE {
        return Err("target position must be on the board".to_string());
    }
    for player in &config.players {
        if player.position >= BOARD_SIZE {
            return Err("player starting positions must be on the board".to_string());
        }
        if player
            .owned_properties
            .iter()
            .any(|&pos| pos >= BOARD_SIZE)
        {
            return Err("owned property positions must be on the board".to_string());
        }
    }

    let landing = LandingTable::new();
    let mut outcomes = Vec::with_capacity(config.simulations as usize);
    for trial_id in 0..config.simulations {
        outcomes.push(simulate_trial(config, &landing, trial_id));
    }

    let summary = summarize(&outcomes);
    let space = board::space(config.target_position);
    Ok(AnalysisReport {
        property_name: space.name,
        property_position: config.target_position,
        property_price: space.price().unwrap_or(0.0),
        summary,
        trials: Some(outcomes),
    })
}

fn summarize(outcomes: &[TrialOutcome]) -> AnalysisSummary {
    let trials = outcomes.len() as u32;
    let purchased: Vec<&TrialOutcome> = outcomes.iter().filter(|o| o.bought_target).collect();
    let purchased_trials = purchased.len() as u32;
    let purchase_rate = if trials > 0 {
        f64::from(purchased_trials) / f64::from(trials)
    } else {
        0.0
    };

    if purchased.is_empty() {
        // Target never bought: an explicit no-data summary, not an error.
        return AnalysisSummary {
            trials,
            purchased_trials: 0,
            purchase_rate,
            roi: None,
            npv: None,
            irr_mean: None,
            irr_median: None,
            irr_converged_trials: 0,
            break_even_probability: 0.0,
            mean_rent_collected: 0.0,
            mean_final_cash: 0.0,
            win_rate: 0.0,
            bankruptcy_rate: 0.0,
        };
    }

    let mut roi_samples: Vec<f64> = purchased.iter().map(|o| o.roi).collect();
    let mut npv_samples: Vec<f64> = purchased.iter().map(|o| o.npv).collect();
    let mut irr_samples: Vec<f64> = purchased.iter().filter_map(|o| o.irr).collect();
    let irr_converged_trials = irr_samples.len() as u32;

    let count = purchased.len() as f64;
    let break_even_probability = purchased
        .iter()
        .filter(|o| o.break_even_turn.is_some())
        .count() as f64
        / count;
    let win_rate = purchased.iter().filter(|o| o.won).count() as f64 / count;
    let bankruptcy_rate = purchased.iter().filter(|o| o.went_bankrupt).count() as f64 / count;

    AnalysisSummary {
        trials,
        purchased_trials,
        purchase_rate,
        roi: metric_stats(&mut roi_samples),
        npv: metric_stats(&mut npv_samples),
        irr_mean: (!irr_samples.is_empty()).then(|| mean(&irr_samples)),
        irr_median: (!irr_samples.is_empty()).then(|| percentile(&mut irr_samples, 50.0)),
        irr_converged_trials,
        break_even_probability,
        mean_rent_collected: mean(&purchased.iter().map(|o| o.rent_collected).collect::<Vec<_>>()),
        mean_final_cash: mean(&purchased.iter().map(|o| o.final_cash).collect::<Vec<_>>()),
        win_rate,
        bankruptcy_rate,
    }
}

fn metric_stats(values: &mut Vec<f64>) -> Option<MetricStats> {
    if values.is_empty() {
        return None;
    }
    Some(MetricStats {
        mean: mean(values),
        median: percentile(values, 50.0),
        p10: percentile(values, 10.0),
        p25: percentile(values, 25.0),
        p75: percentile(values, 75.0),
        p90: percentile(values, 90.0),
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn percentile(values: &mut [f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let n = values.len();
    if n == 1 {
        return values[0];
    }

    let rank = (p / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        values[lower]
    } else {
        let w = rank - lower as f64;
        values[lower] * (1.0 - w) + values[upper] * w
    }
}

fn derive_seed(base_seed: u64, trial_id: u32) -> u64 {
    let mixed = base_seed ^ ((trial_id as u64) << 32) ^ trial_id as u64;
    splitmix64(mixed)
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        let state = if seed == 0 {
            0xA5A5_A5A5_A5A5_A5A5
        } else {
            seed
        };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    fn roll_die(&mut self) -> u8 {
        (self.next_u64() % 6) as u8 + 1
    }
}

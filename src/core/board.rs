pub const BOARD_SIZE: usize = 40;
pub const GO_SALARY: f64 = 200.0;
pub const JAIL_POSITION: usize = 10;
pub const GO_TO_JAIL_POSITION: usize = 30;
pub const JAIL_TERM_TURNS: u32 = 3;

pub const RAILROAD_POSITIONS: [usize; 4] = [5, 15, 25, 35];
pub const UTILITY_POSITIONS: [usize; 2] = [12, 28];
pub const RAILROAD_BASE_RENT: f64 = 25.0;
// Utility rent uses the mean two-dice total instead of a live roll.
pub const AVERAGE_DICE_TOTAL: f64 = 7.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    Blue,
}

pub const COLOR_GROUPS: [ColorGroup; 8] = [
    ColorGroup::Brown,
    ColorGroup::LightBlue,
    ColorGroup::Pink,
    ColorGroup::Orange,
    ColorGroup::Red,
    ColorGroup::Yellow,
    ColorGroup::Green,
    ColorGroup::Blue,
];

impl ColorGroup {
    pub fn positions(self) -> &'static [usize] {
        match self {
            ColorGroup::Brown => &[1, 3],
            ColorGroup::LightBlue => &[6, 8, 9],
            ColorGroup::Pink => &[11, 13, 14],
            ColorGroup::Orange => &[16, 18, 19],
            ColorGroup::Red => &[21, 23, 24],
            ColorGroup::Yellow => &[26, 27, 29],
            // The Greens are the 300-dollar twins; Pennsylvania Avenue
            // plays in the premium set with Park Place and Boardwalk.
            ColorGroup::Green => &[31, 32],
            ColorGroup::Blue => &[34, 37, 39],
        }
    }
}

/// Rent ladder for a street: `[base, full color set, 1-4 houses, hotel]`.
pub type RentLadder = [f64; 7];

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SpaceKind {
    Go,
    Street {
        group: ColorGroup,
        price: f64,
        house_cost: f64,
        rents: RentLadder,
    },
    Railroad {
        price: f64,
    },
    Utility {
        price: f64,
    },
    Tax {
        amount: f64,
    },
    Chance,
    CommunityChest,
    Jail,
    FreeParking,
    GoToJail,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Space {
    pub name: &'static str,
    pub kind: SpaceKind,
}

impl Space {
    pub fn is_ownable(&self) -> bool {
        matches!(
            self.kind,
            SpaceKind::Street { .. } | SpaceKind::Railroad { .. } | SpaceKind::Utility { .. }
        )
    }

    pub fn price(&self) -> Option<f64> {
        match self.kind {
            SpaceKind::Street { price, .. }
            | SpaceKind::Railroad { price }
            | SpaceKind::Utility { price } => Some(price),
            _ => None,
        }
    }

    pub fn color_group(&self) -> Option<ColorGroup> {
        match self.kind {
            SpaceKind::Street { group, .. } => Some(group),
            _ => None,
        }
    }

    pub fn house_cost(&self) -> Option<f64> {
        match self.kind {
            SpaceKind::Street { house_cost, .. } => Some(house_cost),
            _ => None,
        }
    }

    /// Rent for a street at the given development level. Level 0 pays the
    /// base rent, or the doubled color-set rent under a monopoly; levels
    /// 1-4 are houses and 5 is the hotel.
    pub fn street_rent(&self, has_monopoly: bool, level: u8) -> f64 {
        match self.kind {
            SpaceKind::Street { rents, .. } => match level {
                0 if has_monopoly => rents[1],
                0 => rents[0],
                1..=5 => rents[1 + level as usize],
                _ => rents[6],
            },
            _ => 0.0,
        }
    }
}

const fn street(
    name: &'static str,
    group: ColorGroup,
    price: f64,
    house_cost: f64,
    rents: RentLadder,
) -> Space {
    Space {
        name,
        kind: SpaceKind::Street {
            group,
            price,
            house_cost,
            rents,
        },
    }
}

const fn special(name: &'static str, kind: SpaceKind) -> Space {
    Space { name, kind }
}

pub const BOARD: [Space; BOARD_SIZE] = [
    special("Go", SpaceKind::Go),
    street("Mediterranean Avenue", ColorGroup::Brown, 60.0, 50.0, [
        2.0, 4.0, 10.0, 30.0, 90.0, 160.0, 250.0,
    ]),
    special("Community Chest", SpaceKind::CommunityChest),
    street("Baltic Avenue", ColorGroup::Brown, 60.0, 50.0, [
        4.0, 8.0, 20.0, 60.0, 180.0, 320.0, 450.0,
    ]),
    special("Income Tax", SpaceKind::Tax { amount: 200.0 }),
    special("Reading Railroad", SpaceKind::Railroad { price: 200.0 }),
    street("Oriental Avenue", ColorGroup::LightBlue, 100.0, 50.0, [
        6.0, 12.0, 30.0, 90.0, 270.0, 400.0, 550.0,
    ]),
    special("Chance", SpaceKind::Chance),
    street("Vermont Avenue", ColorGroup::LightBlue, 100.0, 50.0, [
        6.0, 12.0, 30.0, 90.0, 270.0, 400.0, 550.0,
    ]),
    street("Connecticut Avenue", ColorGroup::LightBlue, 120.0, 50.0, [
        8.0, 16.0, 40.0, 100.0, 300.0, 450.0, 600.0,
    ]),
    special("Jail", SpaceKind::Jail),
    street("St. Charles Place", ColorGroup::Pink, 140.0, 100.0, [
        10.0, 20.0, 50.0, 150.0, 450.0, 625.0, 750.0,
    ]),
    special("Electric Company", SpaceKind::Utility { price: 150.0 }),
    street("States Avenue", ColorGroup::Pink, 140.0, 100.0, [
        10.0, 20.0, 50.0, 150.0, 450.0, 625.0, 750.0,
    ]),
    street("Virginia Avenue", ColorGroup::Pink, 160.0, 100.0, [
        12.0, 24.0, 60.0, 180.0, 500.0, 700.0, 900.0,
    ]),
    special("Pennsylvania Railroad", SpaceKind::Railroad { price: 200.0 }),
    street("St. James Place", ColorGroup::Orange, 180.0, 100.0, [
        14.0, 28.0, 70.0, 200.0, 550.0, 750.0, 950.0,
    ]),
    special("Community Chest", SpaceKind::CommunityChest),
    street("Tennessee Avenue", ColorGroup::Orange, 180.0, 100.0, [
        14.0, 28.0, 70.0, 200.0, 550.0, 750.0, 950.0,
    ]),
    street("New York Avenue", ColorGroup::Orange, 200.0, 100.0, [
        16.0, 32.0, 80.0, 220.0, 600.0, 800.0, 1000.0,
    ]),
    special("Free Parking", SpaceKind::FreeParking),
    street("Kentucky Avenue", ColorGroup::Red, 220.0, 150.0, [
        18.0, 36.0, 90.0, 250.0, 700.0, 875.0, 1050.0,
    ]),
    special("Chance", SpaceKind::Chance),
    street("Indiana Avenue", ColorGroup::Red, 220.0, 150.0, [
        18.0, 36.0, 90.0, 250.0, 700.0, 875.0, 1050.0,
    ]),
    street("Illinois Avenue", ColorGroup::Red, 240.0, 150.0, [
        20.0, 40.0, 100.0, 300.0, 750.0, 925.0, 1100.0,
    ]),
    special("B. & O. Railroad", SpaceKind::Railroad { price: 200.0 }),
    street("Atlantic Avenue", ColorGroup::Yellow, 260.0, 150.0, [
        22.0, 44.0, 110.0, 330.0, 800.0, 975.0, 1150.0,
    ]),
    street("Ventnor Avenue", ColorGroup::Yellow, 260.0, 150.0, [
        22.0, 44.0, 110.0, 330.0, 800.0, 975.0, 1150.0,
    ]),
    special("Water Works", SpaceKind::Utility { price: 150.0 }),
    street("Marvin Gardens", ColorGroup::Yellow, 280.0, 150.0, [
        24.0, 48.0, 120.0, 360.0, 850.0, 1025.0, 1200.0,
    ]),
    special("Go To Jail", SpaceKind::GoToJail),
    street("Pacific Avenue", ColorGroup::Green, 300.0, 200.0, [
        26.0, 52.0, 130.0, 390.0, 900.0, 1100.0, 1275.0,
    ]),
    street("North Carolina Avenue", ColorGroup::Green, 300.0, 200.0, [
        26.0, 52.0, 130.0, 390.0, 900.0, 1100.0, 1275.0,
    ]),
    special("Community Chest", SpaceKind::CommunityChest),
    street("Pennsylvania Avenue", ColorGroup::Blue, 320.0, 200.0, [
        28.0, 56.0, 150.0, 450.0, 1000.0, 1200.0, 1400.0,
    ]),
    special("Short Line", SpaceKind::Railroad { price: 200.0 }),
    special("Chance", SpaceKind::Chance),
    street("Park Place", ColorGroup::Blue, 350.0, 200.0, [
        35.0, 70.0, 175.0, 500.0, 1100.0, 1300.0, 1500.0,
    ]),
    special("Luxury Tax", SpaceKind::Tax { amount: 100.0 }),
    street("Boardwalk", ColorGroup::Blue, 400.0, 200.0, [
        50.0, 100.0, 200.0, 600.0, 1400.0, 1700.0, 2000.0,
    ]),
];

pub fn space(position: usize) -> &'static Space {
    &BOARD[position % BOARD_SIZE]
}

pub fn find_by_name(name: &str) -> Option<usize> {
    let wanted = name.trim();
    BOARD
        .iter()
        .position(|s| s.name.eq_ignore_ascii_case(wanted))
}

/// Precomputed per-position landing probabilities used for expected-value
/// estimates. Structural adjustments, not sampled: Orange and Red streets
/// pick up jail-exit traffic, railroads sit on high-traffic corners, the
/// Go To Jail corner never hosts a resting token, and Jail accumulates
/// tokens while sentences are served. Normalized to sum to 1.
#[derive(Debug, Clone)]
pub struct LandingTable {
    probabilities: [f64; BOARD_SIZE],
}

impl LandingTable {
    pub fn new() -> Self {
        let base = 1.0 / BOARD_SIZE as f64;
        let mut probabilities = [0.0_f64; BOARD_SIZE];

        for (pos, slot) in probabilities.iter_mut().enumerate() {
            *slot = match pos {
                16..=19 => base * 1.25,
                21..=24 => base * 1.10,
                GO_TO_JAIL_POSITION => 0.0,
                JAIL_POSITION => base * 1.5,
                p if RAILROAD_POSITIONS.contains(&p) => base * 1.05,
                _ => base,
            };
        }

        let total: f64 = probabilities.iter().sum();
        for p in probabilities.iter_mut() {
            *p /= total;
        }

        Self { probabilities }
    }

    pub fn probability(&self, position: usize) -> f64 {
        self.probabilities[position % BOARD_SIZE]
    }
}

impl Default for LandingTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_has_forty_spaces_and_standard_landmarks() {
        assert_eq!(BOARD.len(), 40);
        assert_eq!(BOARD[0].kind, SpaceKind::Go);
        assert_eq!(BOARD[JAIL_POSITION].kind, SpaceKind::Jail);
        assert_eq!(BOARD[GO_TO_JAIL_POSITION].kind, SpaceKind::GoToJail);
        assert_eq!(BOARD[39].name, "Boardwalk");
        assert_eq!(BOARD[39].price(), Some(400.0));
    }

    #[test]
    fn color_groups_cover_exactly_the_street_positions() {
        let mut from_groups: Vec<usize> = COLOR_GROUPS
            .iter()
            .flat_map(|g| g.positions().iter().copied())
            .collect();
        from_groups.sort_unstable();

        let from_board: Vec<usize> = (0..BOARD_SIZE)
            .filter(|&p| matches!(BOARD[p].kind, SpaceKind::Street { .. }))
            .collect();
        assert_eq!(from_groups, from_board);

        for group in COLOR_GROUPS {
            for &pos in group.positions() {
                assert_eq!(BOARD[pos].color_group(), Some(group));
            }
        }
    }

    #[test]
    fn green_twins_form_a_complete_set_that_doubles_rent() {
        assert_eq!(ColorGroup::Green.positions(), &[31, 32]);
        assert_eq!(ColorGroup::Blue.positions(), &[34, 37, 39]);
        for &pos in ColorGroup::Green.positions() {
            assert_eq!(BOARD[pos].price(), Some(300.0));
            assert_eq!(BOARD[pos].street_rent(false, 0), 26.0);
            assert_eq!(BOARD[pos].street_rent(true, 0), 52.0);
        }
    }

    #[test]
    fn street_rent_follows_the_ladder() {
        let pacific = space(31);
        assert_eq!(pacific.street_rent(false, 0), 26.0);
        assert_eq!(pacific.street_rent(true, 0), 52.0);
        assert_eq!(pacific.street_rent(true, 1), 130.0);
        assert_eq!(pacific.street_rent(true, 4), 1100.0);
        assert_eq!(pacific.street_rent(true, 5), 1275.0);
    }

    #[test]
    fn rent_ladders_are_monotonic() {
        for s in BOARD.iter() {
            if let SpaceKind::Street { rents, .. } = s.kind {
                for pair in rents.windows(2) {
                    assert!(pair[0] < pair[1], "{} ladder not increasing", s.name);
                }
            }
        }
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        assert_eq!(find_by_name("north carolina avenue"), Some(32));
        assert_eq!(find_by_name("  Boardwalk "), Some(39));
        assert_eq!(find_by_name("Marvin Gardens"), Some(29));
        assert_eq!(find_by_name("Nonexistent Place"), None);
    }

    #[test]
    fn landing_probabilities_sum_to_one() {
        let table = LandingTable::new();
        let total: f64 = (0..BOARD_SIZE).map(|p| table.probability(p)).sum();
        assert!((total - 1.0).abs() < 1e-9, "sum was {total}");
    }

    #[test]
    fn landing_table_reflects_structural_adjustments() {
        let table = LandingTable::new();
        assert_eq!(table.probability(GO_TO_JAIL_POSITION), 0.0);
        // Jail collects the most traffic, Orange beats Red beats baseline.
        assert!(table.probability(JAIL_POSITION) > table.probability(16));
        assert!(table.probability(16) > table.probability(21));
        assert!(table.probability(21) > table.probability(1));
        assert!(table.probability(5) > table.probability(1));
    }
}

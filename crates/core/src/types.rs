use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

pub fn chebyshev(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// Orthogonal directions first, then diagonals clockwise from north-east.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|direction| direction.delta() == (dx, dy))
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
    Grass,
    Trapdoor,
    Campfire,
    Shop,
    Blacksmith,
    Shrine,
    BountyBoard,
    Entrance,
    Upstairs,
    Crate,
    Barrel,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Grass | Tile::Trapdoor | Tile::Entrance | Tile::Upstairs)
    }

    pub fn is_smashable(self) -> bool {
        matches!(self, Tile::Crate | Tile::Barrel)
    }

    pub fn is_interactable(self) -> bool {
        matches!(
            self,
            Tile::Campfire | Tile::Shop | Tile::Blacksmith | Tile::Shrine | Tile::BountyBoard
        )
    }

    /// Plain open ground that props and spawns may be placed on.
    pub fn is_open_ground(self) -> bool {
        matches!(self, Tile::Floor | Tile::Grass)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrapKind {
    Fire,
    Poison,
    Spike,
    Shock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Burning,
    Poison,
    Regeneration,
    Speed,
    Slow,
    Invisibility,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move { dx: i32, dy: i32 },
    Wait,
    Interact,
    UseItem { slot: usize },
}

impl Action {
    pub fn step(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Action::Move { dx, dy }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Idle,
    PlayerActing,
    TrapResolution,
    LootPickup,
    AiPhase,
    StatusTick,
    HungerRegen,
    DeathCheck,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Enemy(String),
    Trap(TrapKind),
    Status(StatusKind),
    Starvation,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    InProgress,
    Dead(DeathCause),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub accepted: bool,
    pub phases: Vec<TurnPhase>,
    pub game_over: bool,
}

impl TurnReport {
    pub(crate) fn rejected() -> Self {
        Self { accepted: false, phases: Vec::new(), game_over: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    GameOver,
    NotAdjacentToShop,
    NoSuchOffer,
    InsufficientGold,
    InventoryFull,
    NoSuchSlot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    PlayerHit { enemy: String, damage: i32, crit: bool },
    PlayerMissed { enemy: String },
    EnemyHit { enemy: String, damage: i32, crit: bool },
    EnemyMissed { enemy: String },
    EnemySlain { enemy: String, score: u64 },
    EnemyDied { enemy: String },
    BossSlain { enemy: String },
    ComboMilestone { combo: u32 },
    LootDropped { item: String, pos: Pos },
    ItemPickedUp { item: String },
    GoldPickedUp { amount: u32 },
    InventoryFull { item: String },
    TrapTriggered { kind: TrapKind, damage: i32, hidden: bool },
    EnemyTriggeredTrap { enemy: String, kind: TrapKind },
    StatusApplied { status: StatusKind, turns: u32 },
    StatusExpired { status: StatusKind },
    StatusDamage { status: StatusKind, damage: i32 },
    Regenerated { amount: i32 },
    Hungry,
    Starving,
    Ate { item: String, poisoned: bool },
    PotionUsed { item: String },
    ExplosionFizzled,
    Equipped { item: String },
    PropSmashed { tile: Tile, pos: Pos },
    FoodCooked { count: u32 },
    CampfireNothingToCook,
    ShrineBlessed,
    ShrineSpent,
    BountyAccepted { target: String, required: u32, reward: u32 },
    BountyProgress { progress: u32, required: u32 },
    BountyCompleted { reward: u32 },
    BountyAlreadyActive,
    WeaponForged { item: String, tier: u8 },
    BlacksmithNeedsMaterial,
    NothingToForge,
    ShopOpened { pos: Pos },
    Purchased { item: String, price: u32 },
    HiddenAreaRevealed,
    MouseFled,
    ExitSealed,
    Descended { floor: u32 },
    PlayerDied { cause: DeathCause },
}

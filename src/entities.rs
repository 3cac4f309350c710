/// All game entity types — pure data plus the geometry they share.
///
/// Per-tick behaviour lives in `compute`; nothing here touches the RNG or
/// the terminal.

// ── Fixed dimensions ──────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

pub const BULLET_SIZE: Size = Size { width: 3.0, height: 3.0 };
pub const INVADER_SIZE: Size = Size { width: 16.0, height: 16.0 };
pub const PLAYER_SIZE: Size = Size { width: 16.0, height: 16.0 };

/// Gap between the player's bottom edge and the bottom of the world.
pub const PLAYER_BOTTOM_MARGIN: f64 = 20.0;

// ── Primitives ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Axis-aligned rectangle overlap.  Edges that merely touch count as
/// overlapping; only a strict gap on one side separates two boxes.
pub fn boxes_overlap(a_pos: Vec2, a_size: Size, b_pos: Vec2, b_size: Size) -> bool {
    !(a_pos.x + a_size.width < b_pos.x
        || a_pos.y + a_size.height < b_pos.y
        || a_pos.x > b_pos.x + b_size.width
        || a_pos.y > b_pos.y + b_size.height)
}

// ── Bodies ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Player,
    Invader,
    Bullet,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    /// Displacement applied every tick.
    pub velocity: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Invader {
    pub position: Vec2,
    /// Horizontal distance travelled since the sweep started.  Leaving
    /// [0, PATROL_LIMIT] reverses `speed_x`.
    pub patrol_x: f64,
    /// Either +1 or -1.
    pub speed_x: f64,
}

impl Invader {
    pub fn new(position: Vec2) -> Self {
        Invader {
            position,
            patrol_x: 0.0,
            speed_x: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Shots fired in the current cooldown window, capped at MAX_BULLETS_IN_FLIGHT.
    pub bullets_in_flight: u32,
    pub tick_timer: u64,
}

impl Player {
    /// A player centred horizontally, `PLAYER_BOTTOM_MARGIN` above the bottom edge.
    pub fn spawn(world: Size) -> Self {
        Player {
            position: Vec2::new(
                world.width / 2.0 - PLAYER_SIZE.width / 2.0,
                world.height - PLAYER_SIZE.height - PLAYER_BOTTOM_MARGIN,
            ),
            bullets_in_flight: 0,
            tick_timer: 0,
        }
    }
}

/// Everything that collides and gets drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Bullet(Bullet),
    Invader(Invader),
    Player(Player),
}

impl Body {
    pub fn kind(&self) -> BodyKind {
        match self {
            Body::Bullet(_) => BodyKind::Bullet,
            Body::Invader(_) => BodyKind::Invader,
            Body::Player(_) => BodyKind::Player,
        }
    }

    pub fn position(&self) -> Vec2 {
        match self {
            Body::Bullet(b) => b.position,
            Body::Invader(i) => i.position,
            Body::Player(p) => p.position,
        }
    }

    pub fn size(&self) -> Size {
        match self.kind() {
            BodyKind::Bullet => BULLET_SIZE,
            BodyKind::Invader => INVADER_SIZE,
            BodyKind::Player => PLAYER_SIZE,
        }
    }
}

impl From<Bullet> for Body {
    fn from(b: Bullet) -> Self {
        Body::Bullet(b)
    }
}

impl From<Invader> for Body {
    fn from(i: Invader) -> Self {
        Body::Invader(i)
    }
}

impl From<Player> for Body {
    fn from(p: Player) -> Self {
        Body::Player(p)
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Logical keys held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// The whole simulation.  `bodies` keeps insertion order; the player is
/// appended after the invader formation.
#[derive(Clone, Debug)]
pub struct World {
    pub bodies: Vec<Body>,
    pub size: Size,
    /// Completed calls to `step`.
    pub tick: u64,
}

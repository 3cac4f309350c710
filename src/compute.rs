/// Game-logic for one simulation tick.
///
/// Entities never hold a reference back to the `World`: updates receive the
/// bodies they need to look at and hand any spawned bullet back to the
/// caller.  All randomness comes through an injected `Rng`, so a seeded
/// generator makes a whole game reproducible.

use log::{debug, trace};
use rand::Rng;

use crate::entities::{
    boxes_overlap, Body, BodyKind, Bullet, InputState, Invader, Player, Size, Vec2, World,
    BULLET_SIZE, INVADER_SIZE, PLAYER_SIZE,
};

// ── Tuning ───────────────────────────────────────────────────────────────────

/// An invader reverses once its cumulative sweep leaves [0, PATROL_LIMIT].
pub const PATROL_LIMIT: f64 = 500.0;
/// Per-tick chance that an unobstructed invader fires.
pub const INVADER_FIRE_CHANCE: f64 = 0.02;
pub const INVADER_BULLET_SPEED: f64 = 2.0;

pub const PLAYER_SPEED: f64 = 2.0;
pub const PLAYER_BULLET_SPEED: f64 = 6.0;
/// Gap between the player's top edge and a freshly fired bullet.
pub const PLAYER_MUZZLE_OFFSET: f64 = 4.0;
pub const MAX_BULLETS_IN_FLIGHT: u32 = 5;
/// `bullets_in_flight` is cleared whenever `tick_timer` hits a multiple of this.
pub const FIRE_RESET_TICKS: u64 = 12;

// ── Formation layout ─────────────────────────────────────────────────────────

pub const INVADER_COUNT: usize = 24;
pub const INVADER_COLUMNS: usize = 8;
pub const INVADER_ROWS: usize = 3;
pub const INVADER_SPACING: f64 = 30.0;
pub const FORMATION_ORIGIN: Vec2 = Vec2::new(30.0, 30.0);

/// Grid slot of the `index`-th invader.  Columns cycle every 8 and rows every
/// 3, so the 24 invaders cover the full 8×3 grid exactly once.
pub fn formation_slot(index: usize) -> Vec2 {
    Vec2::new(
        FORMATION_ORIGIN.x + (index % INVADER_COLUMNS) as f64 * INVADER_SPACING,
        FORMATION_ORIGIN.y + (index % INVADER_ROWS) as f64 * INVADER_SPACING,
    )
}

// ── Geometry helpers ─────────────────────────────────────────────────────────

/// Two bodies collide when their boxes overlap or touch.  Callers are
/// responsible for not testing a body against itself.
pub fn colliding(a: &Body, b: &Body) -> bool {
    boxes_overlap(a.position(), a.size(), b.position(), b.size())
}

/// True if any invader in `others` sits lower on screen than `invader` and
/// within one invader-width horizontally.  Used to stop invaders shooting
/// through their own formation.
pub fn invaders_below<'a>(invader: &Invader, others: impl IntoIterator<Item = &'a Body>) -> bool {
    others.into_iter().any(|body| match body {
        Body::Invader(other) => {
            other.position.y > invader.position.y
                && (other.position.x - invader.position.x).abs() < INVADER_SIZE.width
        }
        _ => false,
    })
}

// ── Per-entity updates ───────────────────────────────────────────────────────

impl Bullet {
    pub fn update(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
    }
}

impl Invader {
    /// Advance one tick.  `others` is every body in the world except this
    /// one; it is only consulted when the firing roll succeeds.
    pub fn update<'a>(
        &mut self,
        others: impl IntoIterator<Item = &'a Body>,
        rng: &mut impl Rng,
    ) -> Option<Bullet> {
        // Reverse before moving: the step that crosses the bound is the
        // first one taken in the new direction.
        if self.patrol_x < 0.0 || self.patrol_x > PATROL_LIMIT {
            self.speed_x = -self.speed_x;
        }
        self.position.x += self.speed_x;
        self.patrol_x += self.speed_x;

        let roll: f64 = rng.gen();
        if roll >= INVADER_FIRE_CHANCE || invaders_below(self, others) {
            return None;
        }

        Some(Bullet {
            position: Vec2::new(
                self.position.x + INVADER_SIZE.width / 2.0 - BULLET_SIZE.width / 2.0,
                self.position.y + INVADER_SIZE.height,
            ),
            velocity: Vec2::new(rng.gen_range(-0.5..0.5), INVADER_BULLET_SPEED),
        })
    }
}

impl Player {
    /// Apply one tick of input.  Movement is clamped to
    /// [0, world_width - width].
    pub fn update(&mut self, input: &InputState, world_width: f64) -> Option<Bullet> {
        if input.left {
            self.position.x = (self.position.x - PLAYER_SPEED).max(0.0);
        }
        if input.right {
            self.position.x =
                (self.position.x + PLAYER_SPEED).min(world_width - PLAYER_SIZE.width);
        }

        let mut fired = None;
        if input.fire && self.bullets_in_flight < MAX_BULLETS_IN_FLIGHT {
            fired = Some(Bullet {
                position: Vec2::new(
                    self.position.x + PLAYER_SIZE.width / 2.0 - BULLET_SIZE.width / 2.0,
                    self.position.y - PLAYER_MUZZLE_OFFSET,
                ),
                velocity: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            });
            self.bullets_in_flight += 1;
        }

        // Coarse cooldown: the whole window resets together, however late in
        // it the shots were fired.
        self.tick_timer += 1;
        if self.tick_timer % FIRE_RESET_TICKS == 0 {
            self.bullets_in_flight = 0;
        }

        fired
    }
}

// ── World ────────────────────────────────────────────────────────────────────

impl World {
    /// A fresh game: the invader formation followed by the player.
    pub fn new(size: Size) -> Self {
        let mut bodies: Vec<Body> = (0..INVADER_COUNT)
            .map(|i| Invader::new(formation_slot(i)).into())
            .collect();
        bodies.push(Player::spawn(size).into());
        World { bodies, size, tick: 0 }
    }

    pub fn add_body(&mut self, body: impl Into<Body>) {
        self.bodies.push(body.into());
    }

    pub fn count(&self, kind: BodyKind) -> usize {
        self.bodies.iter().filter(|b| b.kind() == kind).count()
    }

    pub fn player(&self) -> Option<&Player> {
        self.bodies.iter().find_map(|b| match b {
            Body::Player(p) => Some(p),
            _ => None,
        })
    }

    /// Advance the simulation by one tick: prune collisions, prune bodies
    /// outside the vertical bounds, then update every survivor in order.
    /// Bullets spawned during the update pass join the world afterwards and
    /// are first pruned and moved on the next tick.
    pub fn step(&mut self, input: &InputState, rng: &mut impl Rng) {
        self.prune_collisions();
        self.prune_out_of_bounds();

        let mut spawned: Vec<Bullet> = Vec::new();
        for i in 0..self.bodies.len() {
            let (before, rest) = self.bodies.split_at_mut(i);
            let Some((body, after)) = rest.split_first_mut() else {
                break;
            };
            let fired = match body {
                Body::Bullet(bullet) => {
                    bullet.update();
                    None
                }
                Body::Invader(invader) => invader.update(before.iter().chain(after.iter()), rng),
                Body::Player(player) => player.update(input, self.size.width),
            };
            if let Some(bullet) = fired {
                debug!(
                    "tick {}: {:?} fired from ({:.1}, {:.1})",
                    self.tick,
                    body.kind(),
                    bullet.position.x,
                    bullet.position.y
                );
                spawned.push(bullet);
            }
        }
        for bullet in spawned {
            self.add_body(bullet);
        }

        self.tick += 1;
        trace!(
            "tick {}: {} bodies ({} invaders, {} bullets)",
            self.tick,
            self.bodies.len(),
            self.count(BodyKind::Invader),
            self.count(BodyKind::Bullet)
        );
    }

    /// Remove every body that overlaps another.  Every decision is taken
    /// against the same snapshot, so both partners of a hit always go.
    fn prune_collisions(&mut self) {
        let bodies = &self.bodies;
        let hit: Vec<bool> = (0..bodies.len())
            .map(|i| {
                (0..bodies.len()).any(|j| i != j && colliding(&bodies[i], &bodies[j]))
            })
            .collect();

        let mut hit = hit.into_iter();
        self.bodies.retain(|_| !hit.next().unwrap_or(false));
    }

    fn prune_out_of_bounds(&mut self) {
        let height = self.size.height;
        self.bodies.retain(|b| {
            let y = b.position().y;
            (0.0..=height).contains(&y)
        });
    }
}

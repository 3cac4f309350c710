use space_invaders::entities::*;

#[test]
fn body_kind_and_size_follow_variant() {
    let bullet: Body = Bullet {
        position: Vec2::new(1.0, 2.0),
        velocity: Vec2::new(0.0, -6.0),
    }
    .into();
    let invader: Body = Invader::new(Vec2::new(30.0, 30.0)).into();
    let player: Body = Player::spawn(Size::new(WORLD_WIDTH, WORLD_HEIGHT)).into();

    assert_eq!(bullet.kind(), BodyKind::Bullet);
    assert_eq!(invader.kind(), BodyKind::Invader);
    assert_eq!(player.kind(), BodyKind::Player);

    assert_eq!(bullet.size(), Size::new(3.0, 3.0));
    assert_eq!(invader.size(), Size::new(16.0, 16.0));
    assert_eq!(player.size(), Size::new(16.0, 16.0));

    assert_eq!(bullet.position(), Vec2::new(1.0, 2.0));
    assert_eq!(invader.position(), Vec2::new(30.0, 30.0));
}

#[test]
fn new_invader_starts_sweeping_right() {
    let inv = Invader::new(Vec2::new(60.0, 90.0));
    assert_eq!(inv.patrol_x, 0.0);
    assert_eq!(inv.speed_x, 1.0);
}

#[test]
fn player_spawns_centred_above_bottom_edge() {
    let p = Player::spawn(Size::new(800.0, 600.0));
    assert_eq!(p.position, Vec2::new(392.0, 564.0)); // 800/2 - 8, 600 - 16 - 20
    assert_eq!(p.bullets_in_flight, 0);
    assert_eq!(p.tick_timer, 0);
}

// ── boxes_overlap ─────────────────────────────────────────────────────────────

const SQUARE: Size = Size { width: 16.0, height: 16.0 };

#[test]
fn overlapping_boxes_overlap() {
    assert!(boxes_overlap(Vec2::new(0.0, 0.0), SQUARE, Vec2::new(8.0, 8.0), SQUARE));
}

#[test]
fn touching_edges_count_as_overlap() {
    // right edge of A meets left edge of B
    assert!(boxes_overlap(Vec2::new(0.0, 0.0), SQUARE, Vec2::new(16.0, 0.0), SQUARE));
    // bottom edge of A meets top edge of B
    assert!(boxes_overlap(Vec2::new(0.0, 0.0), SQUARE, Vec2::new(0.0, 16.0), SQUARE));
    // corners touching
    assert!(boxes_overlap(Vec2::new(0.0, 0.0), SQUARE, Vec2::new(16.0, 16.0), SQUARE));
}

#[test]
fn any_strict_gap_separates() {
    let a = Vec2::new(0.0, 0.0);
    assert!(!boxes_overlap(a, SQUARE, Vec2::new(16.5, 0.0), SQUARE)); // right
    assert!(!boxes_overlap(a, SQUARE, Vec2::new(-16.5, 0.0), SQUARE)); // left
    assert!(!boxes_overlap(a, SQUARE, Vec2::new(0.0, 16.5), SQUARE)); // below
    assert!(!boxes_overlap(a, SQUARE, Vec2::new(0.0, -16.5), SQUARE)); // above
}

#[test]
fn overlap_is_symmetric() {
    let small = Size::new(3.0, 3.0);
    let cases = [
        (Vec2::new(0.0, 0.0), Vec2::new(15.0, 15.0)),
        (Vec2::new(0.0, 0.0), Vec2::new(17.0, 0.0)),
        (Vec2::new(10.0, 20.0), Vec2::new(12.0, 36.0)),
    ];
    for (a, b) in cases {
        assert_eq!(
            boxes_overlap(a, SQUARE, b, small),
            boxes_overlap(b, small, a, SQUARE)
        );
    }
}

#[test]
fn body_clone_is_independent() {
    let original: Body = Invader::new(Vec2::new(30.0, 30.0)).into();
    let mut cloned = original.clone();
    if let Body::Invader(inv) = &mut cloned {
        inv.position.x = 99.0;
    }
    assert_eq!(original.position().x, 30.0);
    assert_ne!(original, cloned);
}

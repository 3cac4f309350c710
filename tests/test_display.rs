use space_invaders::display::*;
use space_invaders::entities::*;

/// Canvas that records every call instead of drawing.
#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

#[derive(Debug, PartialEq)]
enum Call {
    Clear(Rgb),
    Fill(PixelRect, Rgb),
    Present,
}

impl Canvas for Recorder {
    fn clear(&mut self, color: Rgb) -> std::io::Result<()> {
        self.calls.push(Call::Clear(color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) -> std::io::Result<()> {
        self.calls.push(Call::Fill(rect, color));
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

fn world_of(bodies: Vec<Body>) -> World {
    World {
        bodies,
        size: Size::new(WORLD_WIDTH, WORLD_HEIGHT),
        tick: 0,
    }
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_clears_draws_each_body_then_presents() {
    let world = World::new(Size::new(WORLD_WIDTH, WORLD_HEIGHT));
    let mut rec = Recorder::default();
    render(&mut rec, &world).unwrap();

    assert_eq!(rec.calls.len(), 1 + 25 + 1);
    assert_eq!(rec.calls[0], Call::Clear(Rgb::new(255, 255, 255)));
    assert_eq!(rec.calls[26], Call::Present);
    assert_eq!(
        rec.calls[1],
        Call::Fill(PixelRect { x: 30, y: 30, width: 16, height: 16 }, Rgb::new(255, 0, 0))
    );
    assert_eq!(
        rec.calls[25],
        Call::Fill(PixelRect { x: 392, y: 564, width: 16, height: 16 }, Rgb::new(0, 255, 0))
    );
}

#[test]
fn render_floors_fractional_positions() {
    let world = world_of(vec![Bullet {
        position: Vec2::new(107.5, 99.9),
        velocity: Vec2::new(0.3, 2.0),
    }
    .into()]);
    let mut rec = Recorder::default();
    render(&mut rec, &world).unwrap();
    assert_eq!(
        rec.calls[1],
        Call::Fill(PixelRect { x: 107, y: 99, width: 3, height: 3 }, Rgb::new(0, 0, 255))
    );
}

#[test]
fn render_empty_world_still_clears_and_presents() {
    let mut rec = Recorder::default();
    render(&mut rec, &world_of(Vec::new())).unwrap();
    assert_eq!(rec.calls, vec![Call::Clear(C_BACKGROUND), Call::Present]);
}

#[test]
fn palette_per_kind() {
    assert_eq!(color_for(BodyKind::Player), C_PLAYER);
    assert_eq!(color_for(BodyKind::Invader), C_INVADER);
    assert_eq!(color_for(BodyKind::Bullet), C_BULLET);
}

#[test]
fn floor_of_negative_rounds_down() {
    let r = PixelRect::floor_of(-0.5, -1.2, Size::new(3.0, 3.0));
    assert_eq!(r, PixelRect { x: -1, y: -2, width: 3, height: 3 });
}

// ── TerminalCanvas ────────────────────────────────────────────────────────────

fn canvas(cols: u16, rows: u16) -> TerminalCanvas<Vec<u8>> {
    TerminalCanvas::new(Vec::new(), Size::new(800.0, 600.0), cols, rows)
}

#[test]
fn cell_span_covers_touched_cells() {
    // 80×30 grid → 10×20 pixel cells
    let c = canvas(80, 30);
    let span = c.cell_span(PixelRect { x: 30, y: 30, width: 16, height: 16 });
    assert_eq!(span, Some(((3, 5), (1, 3))));
}

#[test]
fn cell_span_keeps_tiny_rects_visible() {
    let c = canvas(80, 30);
    let span = c.cell_span(PixelRect { x: 100, y: 100, width: 0, height: 0 });
    assert_eq!(span, Some(((10, 11), (5, 6))));
}

#[test]
fn cell_span_clips_to_grid() {
    let c = canvas(80, 30);
    let span = c.cell_span(PixelRect { x: 795, y: -5, width: 16, height: 16 });
    assert_eq!(span, Some(((79, 80), (0, 1))));
}

#[test]
fn cell_span_off_screen_is_none() {
    let c = canvas(80, 30);
    assert_eq!(c.cell_span(PixelRect { x: 900, y: 10, width: 3, height: 3 }), None);
    assert_eq!(c.cell_span(PixelRect { x: 10, y: -40, width: 3, height: 3 }), None);
}

#[test]
fn resize_rescales_cells() {
    let mut c = canvas(80, 30);
    c.resize(Size::new(800.0, 600.0), 160, 60);
    assert_eq!(c.grid(), (160, 60));
    let span = c.cell_span(PixelRect { x: 30, y: 30, width: 16, height: 16 });
    assert_eq!(span, Some(((6, 10), (3, 5))));
}

#[test]
fn zero_sized_terminal_is_treated_as_one_cell() {
    let c = canvas(0, 0);
    assert_eq!(c.grid(), (1, 1));
}

#[test]
fn terminal_canvas_writes_frame() {
    let world = World::new(Size::new(WORLD_WIDTH, WORLD_HEIGHT));
    let mut c = canvas(80, 30);
    render(&mut c, &world).unwrap();
    let bytes = c.into_inner();
    assert!(!bytes.is_empty());
    let text = String::from_utf8_lossy(&bytes);
    // background and invader colours are both emitted as truecolor escapes
    assert!(text.contains("48;2;255;255;255"));
    assert!(text.contains("48;2;255;0;0"));
    assert!(text.contains("48;2;0;255;0"));
}

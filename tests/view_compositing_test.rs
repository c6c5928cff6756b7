//! Views composited onto a canvas through the z-gate.

use tile_canvas::core::{Canvas, CanvasConfig, HeadlessBackend, Offset, View};
use tile_canvas::types::{glyph, Colour};

fn canvas(w: u16, h: u16) -> Canvas<HeadlessBackend> {
    let config = CanvasConfig {
        width: w,
        height: h,
        framerate: 0,
        ..CanvasConfig::default()
    };
    Canvas::setup(HeadlessBackend::new(), &config).unwrap()
}

fn filled(w: i32, h: i32, x: i32, y: i32, z: i32, g: u32) -> View {
    let mut v = View::new(w, h, x, y, z, false);
    for vy in 0..h {
        for vx in 0..w {
            v.draw(vx, vy, g, Colour::WHITE, Colour::BLACK);
        }
    }
    v
}

#[test]
fn view_does_not_overwrite_higher_canvas_cell() {
    let mut c = canvas(12, 12);
    c.change_cell(3, 3, 2, 'X' as u32, Colour::WHITE, Colour::BLACK);

    let v = filled(5, 5, 3, 3, 1, '#' as u32);
    v.render(&mut c, None);

    let kept = c.cell(3, 3).unwrap();
    assert_eq!(kept.glyph(), Some('X' as u32));
    assert_eq!(kept.z(), 2);

    for y in 3..8 {
        for x in 3..8 {
            if (x, y) == (3, 3) {
                continue;
            }
            let cell = c.cell(x, y).unwrap();
            assert_eq!(cell.glyph(), Some('#' as u32), "({x}, {y})");
            assert_eq!(cell.z(), 1);
        }
    }
    assert_eq!(c.cell(8, 8).unwrap().glyph(), Some(glyph::NONE));
}

#[test]
fn overlay_wins_regardless_of_render_order() {
    let map = filled(6, 6, 0, 0, 0, '.' as u32);
    let overlay = filled(2, 2, 2, 2, 5, '@' as u32);

    let mut a = canvas(6, 6);
    map.render(&mut a, None);
    overlay.render(&mut a, None);

    let mut b = canvas(6, 6);
    overlay.render(&mut b, None);
    map.render(&mut b, None);

    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(a.cell(x, y).unwrap().glyph(), b.cell(x, y).unwrap().glyph());
        }
    }
    assert_eq!(a.cell(2, 2).unwrap().glyph(), Some('@' as u32));
    assert_eq!(a.cell(1, 1).unwrap().glyph(), Some('.' as u32));
}

#[test]
fn view_is_clipped_to_canvas() {
    let mut c = canvas(4, 4);
    let v = filled(3, 3, 2, -1, 0, '#' as u32);
    v.render(&mut c, None);

    assert_eq!(c.cell(2, 0).unwrap().glyph(), Some('#' as u32));
    assert_eq!(c.cell(3, 1).unwrap().glyph(), Some('#' as u32));
    assert_eq!(c.cell(2, 2).unwrap().glyph(), Some(glyph::NONE));
}

#[test]
fn offset_shifts_position_and_layer() {
    let mut c = canvas(8, 8);
    let v = filled(1, 1, 1, 1, 2, 'o' as u32);
    v.render(&mut c, Some(Offset::new(3, 2, 4)));

    let cell = c.cell(4, 3).unwrap();
    assert_eq!(cell.glyph(), Some('o' as u32));
    assert_eq!(cell.z(), 6);
    assert_eq!(c.cell(1, 1).unwrap().glyph(), Some(glyph::NONE));
}

#[test]
fn hidden_view_writes_nothing() {
    let mut c = canvas(4, 4);
    c.render().unwrap();
    let mut v = filled(2, 2, 0, 0, 0, '#' as u32);
    v.set_visible(false);
    v.render(&mut c, None);
    assert_eq!(c.dirty_count(), 0);

    v.toggle_visible();
    v.render(&mut c, None);
    assert_eq!(c.dirty_count(), 4);
}

#[test]
fn unchanged_view_is_not_redrawn() {
    let mut c = canvas(10, 10);
    let v = filled(4, 4, 1, 1, 0, '#' as u32);
    v.render(&mut c, None);
    c.render().unwrap();

    v.render(&mut c, None);
    let stats = c.render().unwrap();
    assert_eq!(stats.cells_drawn, 0);
}

#[test]
fn bordered_view_draws_frame_and_title() {
    let mut c = canvas(12, 8);
    let mut v = View::new(6, 3, 2, 2, 1, true);
    for y in 0..3 {
        for x in 0..6 {
            v.draw(x, y, '.' as u32, Colour::WHITE, Colour::BLACK);
        }
    }
    v.set_title("MAP");
    v.set_focused(true);
    v.render(&mut c, None);

    assert_eq!(c.cell(1, 1).unwrap().glyph(), Some(glyph::BORDER_DR));
    assert_eq!(c.cell(8, 5).unwrap().glyph(), Some(glyph::BORDER_UL));
    assert_eq!(c.cell(1, 1).unwrap().fore(), c.border_colours().focused);
    assert_eq!(c.cell(1, 1).unwrap().z(), 1);

    // "MAP" spans two cells centred on a 6-wide top edge.
    assert_eq!(c.cell(4, 1).unwrap().chars(), Some(['M' as u32, 'A' as u32]));
    assert_eq!(c.cell(5, 1).unwrap().chars(), Some(['P' as u32, glyph::TEXT_SPACE]));
}

#[test]
fn moved_view_leaves_old_cells_until_cleared() {
    let mut c = canvas(8, 2);
    let mut v = filled(2, 1, 0, 0, 3, '#' as u32);
    v.render(&mut c, None);
    v.move_to(4, 0);
    v.render(&mut c, None);

    // Old footprint still holds z 3, so a z 0 write is refused.
    c.change_cell(0, 0, 0, '.' as u32, Colour::WHITE, Colour::BLACK);
    assert_eq!(c.cell(0, 0).unwrap().glyph(), Some('#' as u32));

    c.clear(Some(tile_canvas::types::Rect::new(0, 0, 2, 1)));
    c.change_cell(0, 0, 0, '.' as u32, Colour::WHITE, Colour::BLACK);
    assert_eq!(c.cell(0, 0).unwrap().glyph(), Some('.' as u32));
    assert_eq!(c.cell(4, 0).unwrap().glyph(), Some('#' as u32));
}

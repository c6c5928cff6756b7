//! Canvas setup, font swapping, shutdown and frame-rate capping.

use std::path::Path;

use tile_canvas::core::{
    BorderColours, Canvas, CanvasConfig, CanvasError, DrawOp, HeadlessBackend, TileSize,
};
use tile_canvas::types::{glyph, Colour, Rect};

fn config(w: u16, h: u16, fps: u32) -> CanvasConfig {
    CanvasConfig {
        width: w,
        height: h,
        framerate: fps,
        ..CanvasConfig::default()
    }
}

#[test]
fn setup_opens_window_sized_in_tiles() {
    let cfg = CanvasConfig {
        title: "demo".to_string(),
        ..config(10, 5, 0)
    };
    let c = Canvas::setup(HeadlessBackend::new(), &cfg).unwrap();
    assert_eq!(c.dims(), (10, 5));
    assert_eq!(c.tile_size(), TileSize { width: 24, height: 24 });
    assert_eq!(c.backend().window(), Some((240, 120)));
    assert_eq!(c.backend().title(), "demo");
}

#[test]
fn setup_fails_on_missing_atlas() {
    let cfg = config(4, 4, 0);
    let backend = HeadlessBackend::new().with_missing(cfg.font_atlas.clone());
    match Canvas::setup(backend, &cfg) {
        Err(CanvasError::Texture { path, .. }) => assert_eq!(path, cfg.font_atlas),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("setup should fail"),
    }
}

#[test]
fn setup_rejects_atlas_too_small_for_tiles() {
    let cfg = config(4, 4, 0);
    let backend = HeadlessBackend::new().with_atlas_size(cfg.glyph_atlas.clone(), 16, 16);
    assert!(matches!(
        Canvas::setup(backend, &cfg),
        Err(CanvasError::InvalidAtlas { width: 16, height: 16, .. })
    ));
}

#[test]
fn setup_fails_when_buffer_cannot_be_created() {
    let cfg = config(4, 4, 0);
    let backend = HeadlessBackend::new().with_failing_surfaces();
    assert!(matches!(Canvas::setup(backend, &cfg), Err(CanvasError::Buffer(_))));
}

#[test]
fn setup_rejects_empty_canvas() {
    let cfg = config(0, 4, 0);
    assert!(matches!(
        Canvas::setup(HeadlessBackend::new(), &cfg),
        Err(CanvasError::Config(_))
    ));
}

#[test]
fn change_fonts_resizes_for_new_tile_size() {
    let big = Path::new("assets/big_glyphs.txt");
    let backend = HeadlessBackend::new().with_atlas_size(big, 512, 512);
    let cfg = config(10, 4, 0);
    let mut c = Canvas::setup(backend, &cfg).unwrap();
    c.change_cell(1, 1, 3, glyph::BLOCK, Colour::WHITE, Colour::BLACK);
    c.render().unwrap();

    c.change_fonts(big, &cfg.font_atlas).unwrap();
    assert_eq!(c.tile_size(), TileSize { width: 32, height: 32 });
    assert_eq!(c.backend().window(), Some((320, 128)));

    // Content is cleared and everything is repainted on the next frame.
    assert_eq!(c.cell(1, 1).unwrap().glyph(), Some(glyph::NONE));
    assert_eq!(c.render().unwrap().cells_drawn, 40);
}

#[test]
fn change_fonts_with_same_tile_size_keeps_window() {
    let cfg = config(3, 3, 0);
    let mut c = Canvas::setup(HeadlessBackend::new(), &cfg).unwrap();
    c.change_fonts(Path::new("other/glyphs.txt"), Path::new("other/font.txt"))
        .unwrap();
    assert_eq!(c.backend().window(), Some((72, 72)));
}

#[test]
fn failed_change_fonts_keeps_current_atlases() {
    let cfg = config(3, 3, 0);
    let mut c = Canvas::setup(HeadlessBackend::new(), &cfg).unwrap();
    c.change_cell(0, 0, 0, glyph::AT, Colour::WHITE, Colour::BLACK);
    c.backend_mut().set_missing("gone.txt");

    let err = c.change_fonts(Path::new("gone.txt"), &cfg.font_atlas);
    assert!(matches!(err, Err(CanvasError::Texture { .. })));
    assert_eq!(c.tile_size(), TileSize { width: 24, height: 24 });
    assert_eq!(c.cell(0, 0).unwrap().glyph(), Some(glyph::AT));
}

#[test]
fn shutdown_closes_window_and_returns_backend() {
    let c = Canvas::setup(HeadlessBackend::new(), &config(2, 2, 0)).unwrap();
    let backend = c.shutdown().unwrap();
    assert_eq!(backend.window(), None);
}

#[test]
fn border_colours_can_be_replaced() {
    let mut c = Canvas::setup(HeadlessBackend::new(), &config(6, 6, 0)).unwrap();
    let red = Colour::rgb(255, 0, 0);
    c.set_border_colours(BorderColours {
        focused: red,
        unfocused: Colour::WHITE,
    });
    c.draw_border(1, 1, 0, 2, 2, "", true);
    assert_eq!(c.cell(0, 0).unwrap().fore(), red);
}

#[test]
fn limiter_waits_only_the_shortfall() {
    // 50 fps -> 20ms per frame.
    let mut c = Canvas::setup(HeadlessBackend::new(), &config(2, 2, 50)).unwrap();

    c.render().unwrap();
    assert_eq!(c.backend().delayed_ms(), 20);

    c.backend_mut().advance(5);
    c.render().unwrap();
    assert_eq!(c.backend().delayed_ms(), 35);

    // A slow frame is not delayed at all.
    c.backend_mut().advance(30);
    c.render().unwrap();
    assert_eq!(c.backend().delayed_ms(), 35);
    assert_eq!(c.frame_count(), 3);
}

#[test]
fn zero_framerate_is_uncapped() {
    let mut c = Canvas::setup(HeadlessBackend::new(), &config(2, 2, 60)).unwrap();
    c.set_framerate(0);
    for _ in 0..10 {
        c.render().unwrap();
    }
    assert_eq!(c.backend().delayed_ms(), 0);
}

#[test]
fn framerate_above_one_thousand_waits_one_ms() {
    let mut c = Canvas::setup(HeadlessBackend::new(), &config(2, 2, 5000)).unwrap();
    c.render().unwrap();
    assert_eq!(c.backend().delayed_ms(), 1);
}

#[test]
fn config_loads_from_json() {
    let cfg = CanvasConfig::from_json_str(
        r#"{ "width": 20, "height": 10, "framerate": 30, "border_focused": 4294901760 }"#,
    )
    .unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.framerate), (20, 10, 30));
    assert_eq!(cfg.border_focused, Colour(0xFFFF_0000));
    assert_eq!(cfg.border_unfocused, CanvasConfig::default().border_unfocused);
}

#[test]
fn change_fonts_rolls_back_when_buffer_cannot_be_recreated() {
    let big = Path::new("assets/big_glyphs.txt");
    let backend = HeadlessBackend::recording().with_atlas_size(big, 512, 512);
    let cfg = config(10, 4, 0);
    let mut c = Canvas::setup(backend, &cfg).unwrap();
    c.change_cell(0, 0, 0, glyph::AT, Colour::WHITE, Colour::BLACK);
    c.backend_mut().set_failing_surfaces(true);

    let err = c.change_fonts(big, &cfg.font_atlas);
    assert!(matches!(err, Err(CanvasError::Buffer(_))));
    assert_eq!(c.tile_size(), TileSize { width: 24, height: 24 });
    assert_eq!(c.backend().window(), Some((240, 96)));
    assert_eq!(c.cell(0, 0).unwrap().glyph(), Some(glyph::AT));

    // Still drawing from the original atlas with 24px source tiles.
    c.render().unwrap();
    let blit = c.backend().ops().iter().find_map(|op| match op {
        DrawOp::Blit { atlas, src, .. } => Some((atlas.clone(), *src)),
        _ => None,
    });
    assert_eq!(
        blit,
        Some((cfg.glyph_atlas.clone(), Rect::new(0, 96, 24, 24)))
    );
}

#[test]
fn failed_present_forces_full_redraw_next_frame() {
    let mut c = Canvas::setup(HeadlessBackend::new(), &config(4, 3, 0)).unwrap();
    c.render().unwrap();

    c.change_cell(1, 1, 0, glyph::BLOCK, Colour::WHITE, Colour::BLACK);
    c.backend_mut().set_failing_present(true);
    assert!(matches!(c.render(), Err(CanvasError::Present(_))));

    c.backend_mut().set_failing_present(false);
    assert_eq!(c.render().unwrap().cells_drawn, 12);
    assert_eq!(c.render().unwrap().cells_drawn, 0);
}

#[test]
fn setup_with_failing_present_still_succeeds() {
    let backend = HeadlessBackend::new().with_failing_present();
    let mut c = Canvas::setup(backend, &config(2, 2, 0)).unwrap();
    assert!(matches!(c.render(), Err(CanvasError::Present(_))));
}

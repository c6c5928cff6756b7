use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_canvas::core::{Canvas, CanvasConfig, HeadlessBackend, View};
use tile_canvas::types::{glyph, Colour};

fn canvas() -> Canvas<HeadlessBackend> {
    let config = CanvasConfig {
        width: 80,
        height: 50,
        framerate: 0,
        ..CanvasConfig::default()
    };
    Canvas::setup(HeadlessBackend::new(), &config).expect("headless setup")
}

fn bench_full_redraw(c: &mut Criterion) {
    let mut canvas = canvas();
    for y in 0..50 {
        for x in 0..80 {
            canvas.change_cell(x, y, 0, glyph::SHADE_LIGHT, Colour::WHITE, Colour::BLACK);
        }
    }

    c.bench_function("render_full_80x50", |b| {
        b.iter(|| {
            canvas.force_redraw();
            black_box(canvas.render().ok());
        })
    });
}

fn bench_sparse_changes(c: &mut Criterion) {
    let mut canvas = canvas();
    canvas.render().ok();
    let mut frame = 0u32;

    c.bench_function("render_16_dirty_cells", |b| {
        b.iter(|| {
            frame = frame.wrapping_add(1);
            let g = if frame % 2 == 0 { glyph::AT } else { glyph::BLOCK };
            for i in 0..16 {
                canvas.change_cell(i * 5, i * 3, 0, g, Colour::WHITE, Colour::BLACK);
            }
            black_box(canvas.render().ok());
        })
    });
}

fn bench_view_composite(c: &mut Criterion) {
    let mut canvas = canvas();
    let mut map = View::new(78, 48, 1, 1, 0, true);
    map.set_title("MAP");
    for y in 0..48 {
        for x in 0..78 {
            map.draw(x, y, glyph::DOT, Colour::WHITE, Colour::BLACK);
        }
    }
    let overlay = View::new(20, 10, 10, 10, 5, true);

    c.bench_function("composite_map_and_overlay", |b| {
        b.iter(|| {
            overlay.render(&mut canvas, None);
            map.render(black_box(&mut canvas), None);
        })
    });
}

criterion_group!(benches, bench_full_redraw, bench_sparse_changes, bench_view_composite);
criterion_main!(benches);

//! Text drawing throughput on the in-memory framebuffer
//!
//! Covers the two blit paths of the built-in cell font (streamed window and
//! clipped rect runs), magnified text, and the grayscale rasterizer with and
//! without background.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pixfont::export::Framebuffer;
use pixfont::loader::format::{encode_font, FontHeader, GlyphRecord};
use pixfont::prelude::*;
use pixfont::types::ClipRect;

const LINE: &str = "The quick brown fox jumps over the lazy dog.";

/// Printable ASCII with a soft diagonal ramp per glyph
fn ramp_font() -> Vec<u8> {
    let header = FontHeader {
        glyph_count: 95,
        version: 11,
        line_advance: 14,
        ascent: 10,
        descent: 3,
    };
    let glyphs: Vec<_> = (0x20u16..0x7F)
        .map(|code| {
            let record = GlyphRecord {
                code,
                height: 11,
                width: 7,
                x_advance: 8,
                y_delta: 10,
                x_offset: 0,
            };
            let pixels = (0..77u32).map(|i| ((i * 37 + code as u32) % 256) as u8).collect();
            (record, pixels)
        })
        .collect();
    encode_font(&header, &glyphs)
}

fn bench_cell_font(c: &mut Criterion) {
    let registry = FontRegistry::with_builtins();
    let mut group = c.benchmark_group("cell_font");

    group.bench_function("opaque_streamed", |b| {
        let mut engine = TextEngine::new(&registry);
        engine.set_text_colors(Rgb888::WHITE, Rgb888::BLACK);
        let mut fb = Framebuffer::new(320, 240);
        b.iter(|| engine.draw_string(&mut fb, black_box(LINE), 0, 0))
    });

    group.bench_function("transparent", |b| {
        let mut engine = TextEngine::new(&registry);
        let mut fb = Framebuffer::new(320, 240);
        b.iter(|| engine.draw_string(&mut fb, black_box(LINE), 0, 0))
    });

    group.bench_function("opaque_clipped", |b| {
        let mut engine = TextEngine::new(&registry);
        engine.set_text_colors(Rgb888::WHITE, Rgb888::BLACK);
        let mut fb = Framebuffer::new(320, 240);
        fb.set_clip_rect(ClipRect::new(3, 2, 200, 5));
        b.iter(|| engine.draw_string(&mut fb, black_box(LINE), 0, 0))
    });

    for size in [1u8, 2, 4] {
        group.bench_with_input(BenchmarkId::new("scaled", size), &size, |b, &size| {
            let mut engine = TextEngine::new(&registry);
            engine.set_text_colors(Rgb888::WHITE, Rgb888::BLACK);
            engine.set_text_size(size, size);
            let mut fb = Framebuffer::new(1200, 64);
            b.iter(|| engine.draw_string(&mut fb, black_box(LINE), 0, 0))
        });
    }

    group.finish();
}

fn bench_streamed_font(c: &mut Criterion) {
    let registry = FontRegistry::with_builtins();
    let bytes = ramp_font();
    let mut group = c.benchmark_group("streamed_font");

    for (name, back) in [("opaque", Rgb888::BLACK), ("alpha", Rgb888::WHITE)] {
        group.bench_function(name, |b| {
            let mut engine = TextEngine::new(&registry);
            if engine.load_font_bytes(bytes.clone()).is_err() {
                return;
            }
            engine.set_text_colors(Rgb888::WHITE, back);
            let mut fb = Framebuffer::new(400, 32);
            b.iter(|| engine.draw_string(&mut fb, black_box(LINE), 0, 0))
        });
    }

    group.bench_function("text_width", |b| {
        let mut engine = TextEngine::new(&registry);
        if engine.load_font_bytes(bytes.clone()).is_err() {
            return;
        }
        b.iter(|| engine.text_width(black_box(LINE)))
    });

    group.finish();
}

fn bench_write_stream(c: &mut Criterion) {
    let registry = FontRegistry::with_builtins();
    let text = format!("{LINE}\n").repeat(40);

    c.bench_function("write_scrolling", |b| {
        let mut engine = TextEngine::new(&registry);
        engine.set_text_colors(Rgb888::WHITE, Rgb888::BLACK);
        let mut fb = Framebuffer::new(240, 96);
        engine.set_text_scroll(&fb, true);
        b.iter(|| engine.write_str(&mut fb, black_box(&text)))
    });
}

criterion_group!(benches, bench_cell_font, bench_streamed_font, bench_write_stream);
criterion_main!(benches);

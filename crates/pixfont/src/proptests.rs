use proptest::prelude::*;

use pixfont_core::{Datum, HAlign, Rgb888, VAlign};
use pixfont_export::Framebuffer;

use crate::{FontRegistry, TextEngine};

fn any_halign() -> impl Strategy<Value = HAlign> {
    prop_oneof![Just(HAlign::Left), Just(HAlign::Center), Just(HAlign::Right)]
}

proptest! {
    #[test]
    fn prop_anchor_matches_measured_width(
        text in "[ -~]{1,8}",
        x in 100i32..150,
        h in any_halign(),
        size in 1u8..=2,
    ) {
        let registry = FontRegistry::with_builtins();
        let mut engine = TextEngine::new(&registry);
        engine.set_text_colors(Rgb888::WHITE, Rgb888::BLACK);
        engine.set_text_size(size, size);
        let mut fb = Framebuffer::new(300, 20);

        let width = engine.text_width(&text);
        let drawn = engine.draw_string_with_datum(&mut fb, &text, x, 0, Datum::new(h, VAlign::Top));
        prop_assert_eq!(drawn, width);

        let painted: Vec<i32> = (0..300)
            .filter(|&col| (0..20).any(|row| fb.write_count(col, row) > 0))
            .collect();
        let start = painted[0];
        let end = painted[painted.len() - 1] + 1;
        prop_assert_eq!(end - start, width);
        let anchor = match h {
            HAlign::Left => start,
            HAlign::Center => start + (width >> 1),
            HAlign::Right => start + width,
        };
        prop_assert_eq!(anchor, x);
    }

    #[test]
    fn prop_vertical_datum_keeps_cursor_line(
        text in "[!-~]{1,6}",
        v in prop_oneof![Just(VAlign::Top), Just(VAlign::Middle), Just(VAlign::Bottom), Just(VAlign::Baseline)],
    ) {
        let registry = FontRegistry::with_builtins();
        let mut engine = TextEngine::new(&registry);
        engine.set_text_datum(Datum::new(HAlign::Left, v));
        engine.set_cursor(0, 20);
        let mut fb = Framebuffer::new(200, 40);

        engine.write_str(&mut fb, &text);
        prop_assert_eq!(engine.cursor(), (6 * text.len() as i32, 20));
    }
}

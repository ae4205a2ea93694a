use super::*;
use pixfont_core::FontFace;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn font_with_codes(codes: &BTreeSet<u16>) -> RuntimeFont {
    let header = FontHeader {
        glyph_count: codes.len() as u32,
        version: 11,
        line_advance: 10,
        ascent: 7,
        descent: 2,
    };
    let glyphs: Vec<_> = codes
        .iter()
        .enumerate()
        .map(|(i, &code)| {
            let record = GlyphRecord {
                code,
                height: 2,
                width: (i % 4) as u8 + 1,
                x_advance: (i % 4) as u8 + 2,
                y_delta: 2,
                x_offset: (i % 3) as i8 - 1,
            };
            (record, vec![0x80; record.bitmap_len()])
        })
        .collect();
    RuntimeFont::from_bytes(format::encode_font(&header, &glyphs), &LoadOptions::default()).unwrap()
}

// Property: binary search returns the exact index when present and the
// sorted insertion point otherwise
proptest! {
    #[test]
    fn prop_search_matches_sorted_order(
        codes in proptest::collection::btree_set(any::<u16>(), 1..64),
        probe in any::<u16>(),
    ) {
        let font = font_with_codes(&codes);
        let expected = codes.iter().position(|&c| c == probe);
        let below = codes.iter().filter(|&&c| c < probe).count();
        match font.search(probe) {
            Ok(i) => prop_assert_eq!(Some(i), expected),
            Err(i) => {
                prop_assert!(expected.is_none());
                prop_assert_eq!(i, below);
            }
        }
    }
}

// Property: table metrics agree with a direct record re-read for every glyph
proptest! {
    #[test]
    fn prop_table_metrics_match_record_reread(
        codes in proptest::collection::btree_set(any::<u16>(), 1..32),
    ) {
        let mut font = font_with_codes(&codes);
        for (index, &code) in codes.iter().enumerate() {
            let from_table = font.metrics_for(code).unwrap();
            let record = font.read_glyph_record(index).unwrap();
            prop_assert_eq!(from_table.width, record.width as i32);
            prop_assert_eq!(from_table.x_advance, record.x_advance as i32);
            prop_assert_eq!(from_table.x_offset, record.x_offset as i32);
        }
    }
}

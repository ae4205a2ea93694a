use super::*;
use proptest::prelude::*;

// Property: every BMP scalar survives encode -> byte-at-a-time decode,
// with nothing emitted on intermediate bytes
proptest! {
    #[test]
    fn prop_utf8_round_trip(c in any::<char>().prop_filter("BMP only", |c| (*c as u32) <= 0xFFFF)) {
        let mut buf = [0u8; 4];
        let bytes = c.encode_utf8(&mut buf).as_bytes();
        let mut decoder = Utf8Decoder::new();

        let (last, lead) = bytes.split_last().unwrap();
        for &b in lead {
            prop_assert_eq!(decoder.feed(b), None);
        }
        prop_assert_eq!(decoder.feed(*last), Some(c as u32 as u16));
        prop_assert!(!decoder.is_pending());
    }
}

// Property: the decoder never gets stuck; any byte soup ends in a state
// from which plain ASCII decodes immediately
proptest! {
    #[test]
    fn prop_decoder_recovers(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut decoder = Utf8Decoder::new();
        for b in bytes {
            decoder.feed(b);
        }
        prop_assert_eq!(decoder.feed(b'Z'), Some(b'Z' as u16));
    }
}

// Property: anchored start + measured width reconstructs the anchor
proptest! {
    #[test]
    fn prop_anchor_round_trip(x in -2000i32..2000, width in 0i32..2000, bits in prop::sample::select(vec![0u8, 1, 2, 4, 5, 6, 8, 9, 10, 16, 17, 18])) {
        let datum = Datum::from_bits(bits);
        let start = datum.align_x(x, width);
        match datum.h {
            HAlign::Left => prop_assert_eq!(start, x),
            HAlign::Center => prop_assert_eq!(start + (width >> 1), x),
            HAlign::Right => prop_assert_eq!(start + width, x),
        }
    }
}

// Property: clip intersection never grows and stays inside both boxes
proptest! {
    #[test]
    fn prop_clip_intersection_is_contained(
        l in -50i32..50, t in -50i32..50, cw in 1i32..100, ch in 1i32..100,
        x in -100i32..100, y in -100i32..100, w in 0i32..100, h in 0i32..100,
    ) {
        let clip = ClipRect::new(l, t, l + cw - 1, t + ch - 1);
        let r = Rect::new(x, y, w, h);
        let i = clip.intersect(r);
        if !i.is_empty() {
            prop_assert!(clip.contains(i));
            prop_assert!(i.x >= r.x && i.y >= r.y);
            prop_assert!(i.x + i.w <= r.x + r.w && i.y + i.h <= r.y + r.h);
        }
        prop_assert_eq!(!i.is_empty(), clip.intersects(r));
    }
}

use image::Rgb;
use tx_fingerprint::FingerprintError;
use tx_fingerprint::core::font::BuiltinFont;
use tx_fingerprint::core::genesis::{GENESIS_TX_HEX, GENESIS_TXID};
use tx_fingerprint::core::hash::Txid;
use tx_fingerprint::core::layout::RenderConfig;
use tx_fingerprint::core::render::{label_text, render_fingerprint, render_to_file};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

#[test]
fn genesis_renders_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tx_postable.png");
    let config = RenderConfig::default();

    let summary = render_to_file(GENESIS_TX_HEX, None, &path, &config, &BuiltinFont).unwrap();

    assert_eq!(summary.txid.to_string(), GENESIS_TXID);
    assert_eq!(summary.grid_dim, 6);
    assert_eq!(summary.squares, 33);
    assert_eq!(summary.square_size, 121);
    assert_eq!(summary.font, "builtin");
    assert_eq!(summary.font_size, 15);

    let img = image::open(&path).unwrap().into_rgb8();
    assert_eq!(img.dimensions(), (826, 898));
    assert!(img.width() >= 2 * config.margin + summary.grid_dim);
}

#[test]
fn cells_are_filled_with_chunk_colors() {
    let fp = render_fingerprint(GENESIS_TX_HEX, None, &RenderConfig::default(), &BuiltinFont)
        .unwrap();
    let img = &fp.image;
    let s = fp.layout.square_size;

    // Background.
    assert_eq!(*img.get_pixel(0, 0), WHITE);
    assert_eq!(*img.get_pixel(49, 49), WHITE);

    // First chunk "010000000100" -> (1, 0, 0), whole cell.
    assert_eq!(*img.get_pixel(50, 50), Rgb([1, 0, 0]));
    assert_eq!(*img.get_pixel(50 + s - 1, 50 + s - 1), Rgb([1, 0, 0]));

    // Second chunk "000000000000" -> black, column 1.
    assert_eq!(*img.get_pixel(50 + s, 50), BLACK);

    // Chunk 7 (col 1, row 1): "04ffff001d01" -> (4, 255, 255).
    assert_eq!(*img.get_pixel(50 + s + 3, 50 + s + 3), Rgb([4, 255, 255]));

    // Padding cell 35 (col 5, row 5) is all-zero -> black.
    assert_eq!(*img.get_pixel(50 + 5 * s + 1, 50 + 5 * s + 1), BLACK);

    // Right margin stays white.
    assert_eq!(*img.get_pixel(50 + 6 * s, 60), WHITE);
}

#[test]
fn label_is_drawn_below_grid() {
    let fp = render_fingerprint(GENESIS_TX_HEX, None, &RenderConfig::default(), &BuiltinFont)
        .unwrap();
    let y0 = fp.layout.label_y;
    let inked = (y0..y0 + BuiltinFont::line_height(fp.font_size))
        .flat_map(|y| (50..50 + 419).map(move |x| (x, y)))
        .filter(|&(x, y)| *fp.image.get_pixel(x, y) == BLACK)
        .count();
    assert!(inked > 0, "expected label pixels under the grid");

    // Nothing drawn between grid and label.
    let gap_row = fp.layout.margin + fp.layout.grid_px() + 2;
    assert!((0..fp.image.width()).all(|x| *fp.image.get_pixel(x, gap_row) == WHITE));
}

#[test]
fn supplied_txid_is_used_for_label() {
    let supplied: Txid = GENESIS_TXID.parse().unwrap();
    let fp = render_fingerprint("00", Some(supplied), &RenderConfig::default(), &BuiltinFont)
        .unwrap();
    assert_eq!(fp.txid, supplied);
    assert_eq!(label_text(&fp.txid), format!("TXID: {GENESIS_TXID}"));
}

#[test]
fn input_is_trimmed_and_lowercased() {
    let a = render_fingerprint("ff00ab000000", None, &RenderConfig::default(), &BuiltinFont)
        .unwrap();
    let b = render_fingerprint("  FF00AB000000\n", None, &RenderConfig::default(), &BuiltinFont)
        .unwrap();
    assert_eq!(a.txid, b.txid);
    assert_eq!(a.image, b.image);
    assert_eq!(*a.image.get_pixel(50, 50), Rgb([255, 0, 171]));
}

#[test]
fn rendering_is_deterministic() {
    let config = RenderConfig::default();
    let a = render_fingerprint(GENESIS_TX_HEX, None, &config, &BuiltinFont).unwrap();
    let b = render_fingerprint(GENESIS_TX_HEX, None, &config, &BuiltinFont).unwrap();
    assert!(a.image == b.image);
}

#[test]
fn odd_length_hex_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");

    let err = render_to_file("abc", None, &path, &RenderConfig::default(), &BuiltinFont)
        .unwrap_err();
    assert!(
        matches!(err, FingerprintError::InvalidInput(_)),
        "unexpected error: {err}"
    );
    assert!(!path.exists());
}

#[test]
fn malformed_hex_fails_even_with_supplied_txid() {
    let supplied: Txid = GENESIS_TXID.parse().unwrap();
    let err = render_fingerprint("zz", Some(supplied), &RenderConfig::default(), &BuiltinFont)
        .err()
        .unwrap();
    assert!(matches!(err, FingerprintError::InvalidInput(_)));
}

#[test]
fn empty_hex_is_rejected() {
    let err = render_fingerprint("   ", None, &RenderConfig::default(), &BuiltinFont)
        .err()
        .unwrap();
    assert!(matches!(err, FingerprintError::EmptyTransaction));
}

#[test]
fn degenerate_layout_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let config = RenderConfig {
        width: 105,
        height: 200,
        margin: 50,
        font_size: 36,
    };

    let err = render_to_file(GENESIS_TX_HEX, None, &path, &config, &BuiltinFont).unwrap_err();
    assert!(matches!(err, FingerprintError::Layout(_)), "unexpected error: {err}");
    assert!(!path.exists());
}

#[test]
fn save_creates_parent_dirs_and_reports_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/fp.png");

    let summary = render_to_file("00", None, &path, &RenderConfig::default(), &BuiltinFont)
        .unwrap();
    assert!(path.exists());

    let v = serde_json::to_value(&summary).unwrap();
    assert_eq!(v["grid_dim"], 1);
    assert_eq!(v["squares"], 1);
    assert_eq!(v["txid"], summary.txid.to_string());
}

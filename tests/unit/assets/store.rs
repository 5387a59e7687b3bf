use super::*;

#[test]
fn empty_assets_draw_nothing() {
    let assets = PreparedBoothAssets::empty();
    assert!(assets.corner.is_none());
    assert!(assets.accent_left.is_none());
    assert!(assets.accent_right.is_none());
    assert!(assets.font_bytes.is_none());
}

#[test]
fn prepare_tolerates_missing_directory() {
    let assets = PreparedBoothAssets::prepare("/nonexistent/booth-assets").unwrap();
    assert!(assets.corner.is_none());
    assert!(assets.accent_left.is_none());
    assert!(assets.accent_right.is_none());
    assert!(assets.font_bytes.is_none());
}

#[test]
fn prepare_rasterizes_present_ornaments_at_fixed_sizes() {
    let root = std::env::temp_dir().join(format!("musabooth-assets-{}", std::process::id()));
    std::fs::create_dir_all(&root).unwrap();
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
        <rect width="10" height="10" fill="#573705"/>
    </svg>"##;
    std::fs::write(root.join("corner.svg"), svg).unwrap();
    std::fs::write(root.join("pero.svg"), svg).unwrap();

    let assets = PreparedBoothAssets::prepare(&root).unwrap();
    let corner = assets.corner.unwrap();
    assert_eq!((corner.width, corner.height), (CORNER_ORNAMENT_PX, CORNER_ORNAMENT_PX));
    let accent = assets.accent_left.unwrap();
    assert_eq!((accent.width, accent.height), (ACCENT_ORNAMENT_PX, ACCENT_ORNAMENT_PX));
    // knjiga.svg was not written, so the right accent is skipped.
    assert!(assets.accent_right.is_none());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn shaper_rejects_invalid_font_bytes() {
    let mut shaper = TextShaper::new();
    let err = shaper
        .shape_line("text", b"definitely not a font", 24.0, GlyphBrush::default())
        .err()
        .unwrap();
    assert!(matches!(err, crate::BoothError::Render(_)));
}

#[test]
fn shaper_rejects_degenerate_font_size() {
    let mut shaper = TextShaper::new();
    for size in [0.0f32, -12.0, f32::NAN] {
        let err = shaper
            .shape_line("text", &[], size, GlyphBrush::default())
            .err()
            .unwrap();
        assert!(matches!(err, crate::BoothError::Validation(_)));
    }
}

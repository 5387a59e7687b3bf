use super::*;

fn canvas(w: u32, h: u32) -> BoothCanvas {
    BoothCanvas::new(w, h).unwrap()
}

#[test]
fn landscape_reserves_control_strip_on_right() {
    let layout = resolve_frame_layout(canvas(1280, 720), &FramePolicy::default()).unwrap();
    assert_eq!(layout.frame, Rect::new(20.0, 20.0, 1280.0 - 140.0, 700.0));
}

#[test]
fn portrait_reserves_control_strip_at_bottom() {
    let layout = resolve_frame_layout(canvas(720, 1280), &FramePolicy::default()).unwrap();
    assert_eq!(layout.frame, Rect::new(20.0, 20.0, 700.0, 1280.0 - 140.0));
}

#[test]
fn square_canvas_uses_portrait_placement() {
    let layout = resolve_frame_layout(canvas(800, 800), &FramePolicy::default()).unwrap();
    assert_eq!(layout.frame, Rect::new(20.0, 20.0, 780.0, 660.0));
}

#[test]
fn frame_is_contained_and_nondegenerate_across_resolutions() {
    let policies = [
        FramePolicy::default(),
        FramePolicy::Proportional {
            side_frac: 0.05,
            top_frac: 0.05,
            bottom_frac: 0.18,
        },
    ];
    for policy in &policies {
        for &w in &[200u32, 320, 640, 1280, 1920, 3840] {
            for &h in &[200u32, 240, 480, 1080, 2160] {
                let c = canvas(w, h);
                let layout = resolve_frame_layout(c, policy).unwrap();
                let f = layout.frame;
                assert!(f.width() > 0.0 && f.height() > 0.0, "{w}x{h} {policy:?}");
                assert!(f.x0 >= 0.0 && f.y0 >= 0.0, "{w}x{h} {policy:?}");
                assert!(
                    f.x1 <= f64::from(w) && f.y1 <= f64::from(h),
                    "{w}x{h} {policy:?}"
                );
            }
        }
    }
}

#[test]
fn tiny_canvas_fails_instead_of_inverting() {
    // 100px wide minus a 140px control strip would invert the frame.
    let err = resolve_frame_layout(canvas(100, 300), &FramePolicy::default()).unwrap_err();
    assert!(matches!(err, BoothError::Validation(_)));
}

#[test]
fn negative_and_out_of_range_margins_are_rejected() {
    let bad_fixed = FramePolicy::FixedControlZone {
        margin_px: -1.0,
        control_px: 140.0,
    };
    assert!(resolve_frame_layout(canvas(640, 480), &bad_fixed).is_err());

    let bad_frac = FramePolicy::Proportional {
        side_frac: 0.5,
        top_frac: 0.05,
        bottom_frac: 0.18,
    };
    assert!(resolve_frame_layout(canvas(640, 480), &bad_frac).is_err());
}

#[test]
fn text_band_center_sits_between_frame_and_canvas_bottom() {
    let layout = resolve_frame_layout(canvas(720, 1280), &FramePolicy::default()).unwrap();
    let y = layout.text_band_center_y();
    assert!(y > layout.frame.y1);
    assert!(y < 1280.0);
    assert_eq!(y, (layout.frame.y1 + 1280.0) / 2.0);
}

#[test]
fn policies_round_trip_through_serde() {
    let policy = FramePolicy::Proportional {
        side_frac: 0.05,
        top_frac: 0.05,
        bottom_frac: 0.18,
    };
    let json = serde_json::to_string(&policy).unwrap();
    assert_eq!(serde_json::from_str::<FramePolicy>(&json).unwrap(), policy);

    let decor = DecorStyle::default();
    let json = serde_json::to_string(&decor).unwrap();
    assert_eq!(serde_json::from_str::<DecorStyle>(&json).unwrap(), decor);
}

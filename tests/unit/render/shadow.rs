use super::*;

#[test]
fn radius_zero_copies_source() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 2, 1, 0, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn mismatched_buffer_length_is_rejected() {
    assert!(blur_rgba8_premul(&[0u8; 7], 2, 1, 1, 1.0).is_err());
    assert!(blur_rgba8_premul(&[0u8; 8], 3, 1, 1, 1.0).is_err());
}

#[test]
fn degenerate_sigma_is_rejected() {
    for sigma in [0.0f32, -1.0, f32::NAN] {
        assert!(blur_rgba8_premul(&[0u8; 16], 2, 2, 1, sigma).is_err());
    }
}

#[test]
fn solid_field_is_preserved_by_blur() {
    // A uniform premultiplied field is a fixed point of any normalized kernel,
    // so every pixel stays within rounding of its input.
    let (w, h) = (8u32, 8u32);
    let src: Vec<u8> = std::iter::repeat([120u8, 60, 30, 200])
        .take((w * h) as usize)
        .flatten()
        .collect();
    let out = blur_rgba8_premul(&src, w, h, 4, 2.0).unwrap();
    for (o, s) in out.iter().zip(src.iter()) {
        assert!(o.abs_diff(*s) <= 1, "blurred {o} vs source {s}");
    }
}

#[test]
fn blur_spreads_an_impulse_symmetrically() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * 9 + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.0).unwrap();

    let alpha = |x: usize, y: usize| out[(y * 9 + x) * 4 + 3];
    assert!(alpha(4, 4) > 0);
    // Mass leaks to the neighbors and decays with distance.
    assert!(alpha(3, 4) > 0 && alpha(5, 4) > 0);
    assert!(alpha(4, 4) >= alpha(3, 4));
    // Horizontal and vertical symmetry around the impulse.
    assert_eq!(alpha(3, 4), alpha(5, 4));
    assert_eq!(alpha(4, 3), alpha(4, 5));
    assert!(alpha(2, 4).abs_diff(alpha(4, 2)) <= 1);
}

#[test]
fn over_with_transparent_source_leaves_dst_untouched() {
    let mut dst = vec![10u8, 20, 30, 40];
    premul_over_in_place(&mut dst, &[0, 0, 0, 0]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 40]);
}

#[test]
fn over_with_opaque_source_replaces_dst() {
    let mut dst = vec![10u8, 20, 30, 40];
    premul_over_in_place(&mut dst, &[200, 100, 50, 255]).unwrap();
    assert_eq!(dst, vec![200, 100, 50, 255]);
}

#[test]
fn over_blends_partial_coverage() {
    // src alpha 128 keeps 127/255 of dst and adds src on top.
    let mut dst = vec![0u8, 0, 255, 255];
    premul_over_in_place(&mut dst, &[128, 0, 0, 128]).unwrap();
    assert_eq!(dst[0], 128);
    assert_eq!(dst[3], 255);
    // Blue channel: 255 * 127/255 + 0 = 127.
    assert_eq!(dst[2], 127);
}

#[test]
fn over_rejects_length_mismatch() {
    let mut dst = vec![0u8; 8];
    assert!(premul_over_in_place(&mut dst, &[0u8; 4]).is_err());
    let mut odd = vec![0u8; 6];
    assert!(premul_over_in_place(&mut odd, &[0u8; 6]).is_err());
}

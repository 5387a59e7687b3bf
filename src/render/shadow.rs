//! Fixed-point gaussian blur and premultiplied `over` compositing for the
//! verse drop shadow. Operates on premultiplied RGBA8 buffers only.

use crate::foundation::error::{BoothError, BoothResult};

/// Blur a premultiplied RGBA8 buffer with a separable gaussian kernel.
///
/// `radius == 0` returns a copy of the source. Edge samples clamp.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> BoothResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BoothError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(BoothError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Normalized gaussian weights in Q16 fixed point summing to exactly 65536.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BoothResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BoothError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(BoothError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding drift into the center tap so the kernel stays normalized.
    let delta = 65536i64 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, kernel: &[u32]) {
    let w = width as usize;
    let r = (kernel.len() / 2) as i64;
    for y in 0..height as usize {
        let row = y * w * 4;
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = (x as i64 + k as i64 - r).clamp(0, w as i64 - 1) as usize;
                let s = row + sx * 4;
                for c in 0..4 {
                    acc[c] += u64::from(weight) * u64::from(src[s + c]);
                }
            }
            let d = row + x * 4;
            for c in 0..4 {
                dst[d + c] = ((acc[c] + (1 << 15)) >> 16).min(255) as u8;
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, kernel: &[u32]) {
    let w = width as usize;
    let h = height as usize;
    let r = (kernel.len() / 2) as i64;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let sy = (y as i64 + k as i64 - r).clamp(0, h as i64 - 1) as usize;
                let s = (sy * w + x) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(weight) * u64::from(src[s + c]);
                }
            }
            let d = (y * w + x) * 4;
            for c in 0..4 {
                dst[d + c] = ((acc[c] + (1 << 15)) >> 16).min(255) as u8;
            }
        }
    }
}

/// Source-over composite of `src` onto `dst`, both premultiplied RGBA8.
pub fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> BoothResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BoothError::render(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - sa;
        for c in 0..4 {
            let dc = mul_div255(u16::from(d[c]), inv);
            d[c] = dc.saturating_add(s[c]);
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/shadow.rs"]
mod tests;

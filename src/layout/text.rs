use crate::foundation::error::BoothResult;

/// Text-measurement capability supplied by the host renderer.
///
/// Keeping measurement behind a trait makes [`wrap`] a pure function of its
/// inputs: the same text, width budget, and measurer always produce the same
/// line sequence.
pub trait TextMeasurer {
    /// Measured pixel width of `text` at the measurer's configured font/size.
    fn width_px(&mut self, text: &str) -> BoothResult<f64>;
}

/// A wrapped multi-line text block with its resolved vertical placement.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedBlock {
    /// Lines in order, top to bottom.
    pub lines: Vec<String>,
    /// Vertical advance between line centers, in pixels.
    pub line_height: f64,
    /// Center of the first line, such that the whole block is centered on the
    /// requested anchor.
    pub start_y: f64,
}

/// Greedily pack whitespace-delimited words into lines of at most `max_width`
/// measured pixels.
///
/// A line is closed only when adding the next word would exceed the budget AND
/// the line already holds at least one word. A single word wider than
/// `max_width` is therefore never split; it overflows alone on its own line.
pub fn wrap(
    text: &str,
    max_width: f64,
    measurer: &mut dyn TextMeasurer,
) -> BoothResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if measurer.width_px(&candidate)? > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    Ok(lines)
}

/// Vertical center of the first line of a `line_count * line_height` block
/// centered on `center_y`.
pub fn block_start_y(line_count: usize, line_height: f64, center_y: f64) -> f64 {
    let total = (line_count as f64) * line_height;
    center_y - total / 2.0 + line_height / 2.0
}

/// Wrap `text` and resolve the block's vertical placement in one step.
pub fn layout_block(
    text: &str,
    max_width: f64,
    line_height: f64,
    center_y: f64,
    measurer: &mut dyn TextMeasurer,
) -> BoothResult<WrappedBlock> {
    let lines = wrap(text, max_width, measurer)?;
    let start_y = block_start_y(lines.len(), line_height, center_y);
    Ok(WrappedBlock {
        lines,
        line_height,
        start_y,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;

//! Text measurement, truncation, and wrapping utilities.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    if out.is_empty() {
        return out;
    }
    out.push('…');
    out
}

/// Wrap text to fit within a maximum pixel width, breaking on word boundaries.
/// A single word wider than the line is truncated.
pub fn wrap_text_to_width(text: &str, font_px: u32, max_px: u32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            cur = candidate;
        } else if cur.is_empty() {
            lines.push(truncate_to_width(word, font_px, max_px));
        } else {
            lines.push(std::mem::take(&mut cur));
            if estimate_text_width_px(word, font_px) <= max_px {
                cur = word.to_string();
            } else {
                lines.push(truncate_to_width(word, font_px, max_px));
            }
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_short_labels_and_ellipsizes_long_ones() {
        assert_eq!(truncate_to_width("Chad", 10, 200), "Chad");
        let cut = truncate_to_width("Central African Republic", 10, 60);
        assert!(cut.ends_with('…'));
        assert!(estimate_text_width_px(&cut, 10) <= 60);
    }

    #[test]
    fn wrapping_breaks_on_spaces() {
        let lines = wrap_text_to_width("Sao Tome and Principe", 10, 80);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| estimate_text_width_px(l, 10) <= 80));
    }
}

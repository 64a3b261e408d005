//! Display cleanup for scraped/model text: entity decoding, whitespace
//! normalization, length cap.

/// Hard cap for a displayed summary (chars, not bytes).
pub const MAX_SUMMARY_CHARS: usize = 2000;

/// Normalize a free-text summary for display.
///
/// - decodes HTML entities (`&amp;` → `&`),
/// - normalizes CRLF, trims line edges, collapses intra-line whitespace,
/// - collapses runs of blank lines into one,
/// - trims and caps at [`MAX_SUMMARY_CHARS`] on a char boundary.
pub fn clean_summary(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);

    let mut out = String::with_capacity(decoded.len().min(MAX_SUMMARY_CHARS));
    let mut pending_blank = false;

    for line in decoded.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(&collapsed);
    }

    if out.chars().count() > MAX_SUMMARY_CHARS {
        out = out.chars().take(MAX_SUMMARY_CHARS).collect();
    }
    out
}

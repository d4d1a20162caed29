//! Title and description heuristics.
//!
//! Both extractors are forward line scans and never fail: anything that
//! doesn't fit the expected shape yields an empty string.

/// Opening tag of a top-level heading in rendered text.
const H1_OPEN: &str = "<h1";
const P_OPEN: &str = "<p>";
const P_CLOSE: &str = "</p>";

/// Content of the first top-level `# ` heading in source text.
///
/// The first marker line wins even when its content is blank. Deeper
/// headings (`##`, `###`, ...) never match.
///
/// ```ignore
/// assert_eq!(extract_heading("# Title\nbody"), "Title");
/// assert_eq!(extract_heading("## Sub"), "");
/// ```
pub fn extract_heading(source: &str) -> String {
    source
        .lines()
        .find_map(top_level_heading)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Strip a single `#` marker followed by whitespace, if that's what the line is.
fn top_level_heading(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('#')?;
    rest.starts_with([' ', '\t']).then(|| rest.trim())
}

/// Plain paragraph immediately after the first `<h1>` in rendered text.
///
/// Only the single line following the heading is inspected. It counts when
/// it is a `<p>...</p>` line whose content holds no further markup; any
/// other shape gives an empty description.
pub fn extract_description(rendered: &str) -> String {
    let mut lines = rendered.lines();
    if !lines.any(|line| line.starts_with(H1_OPEN)) {
        return String::new();
    }
    lines
        .next()
        .and_then(plain_paragraph)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn plain_paragraph(line: &str) -> Option<&str> {
    let inner = line.strip_prefix(P_OPEN)?.strip_suffix(P_CLOSE)?;
    (!inner.contains(['<', '>'])).then(|| inner.trim())
}

//! HTML signal extraction
//!
//! Counts the structural markers used as content features. These are coarse
//! heuristics, not a security verdict.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

const HIDDEN_STYLE_PATTERN: &str = r"(?i)display\s*:\s*none";

/// Substrings that mark a script as suspicious
pub const DANGER_SUBSTRINGS: [&str; 2] = ["eval", "escape"];

static HIDDEN_STYLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(HIDDEN_STYLE_PATTERN).expect("Failed to compile hidden style pattern - this is a bug")
});

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("Failed to parse script selector - this is a bug"));

static STYLED_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[style]").expect("Failed to parse style selector - this is a bug"));

/// Structural counts taken from one HTML document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlSignals {
    /// Number of `<script>` elements
    pub script_count: usize,
    /// Elements whose inline style hides them
    pub hidden_elements_count: usize,
    /// Scripts whose text contains `eval` or `escape`
    pub suspicious_scripts_count: usize,
}

/// Parses HTML content and counts scripts and hidden elements
///
/// Parsing never fails; malformed markup is recovered the way a browser
/// would recover it.
///
/// # Example
///
/// ```
/// use phishing_features::content::analyze_html;
///
/// let html = r#"<html><body>
///     <div style="display:none">x</div>
///     <script>eval(atob("..."))</script>
/// </body></html>"#;
/// let signals = analyze_html(html);
/// assert_eq!(signals.script_count, 1);
/// assert_eq!(signals.hidden_elements_count, 1);
/// assert_eq!(signals.suspicious_scripts_count, 1);
/// ```
pub fn analyze_html(html: &str) -> HtmlSignals {
    let document = Html::parse_document(html);

    let mut script_count = 0;
    let mut suspicious_scripts_count = 0;
    for script in document.select(&SCRIPT_SELECTOR) {
        script_count += 1;
        let text: String = script.text().collect();
        if DANGER_SUBSTRINGS.iter().any(|s| text.contains(s)) {
            suspicious_scripts_count += 1;
        }
    }

    let hidden_elements_count = document
        .select(&STYLED_SELECTOR)
        .filter(|element| {
            element
                .value()
                .attr("style")
                .map(|style| HIDDEN_STYLE_REGEX.is_match(style))
                .unwrap_or(false)
        })
        .count();

    HtmlSignals {
        script_count,
        hidden_elements_count,
        suspicious_scripts_count,
    }
}

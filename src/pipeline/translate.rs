use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use super::token::Placeholder;

pub const LINE_BREAK: &str = "<br>";

static ROUTE_ICON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<img\s[^>]*?src\s*=\s*["']?images/routes/14px/([A-Za-z0-9_-]+)\.(?:png|gif)["']?[^>]*>"#,
    )
    .unwrap()
});
static ACCESSIBILITY_ICON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\s[^>]*?src\s*=\s*["']?images/ADA_WhlChr_small\.gif["']?[^>]*>"#)
        .unwrap()
});
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']?([\w:/.\-=?#&;%~+]*)["']?[^>]*>(.*?)</a\s*>"#)
        .unwrap()
});
static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static STATION_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://web\.mta\.info/weekender/tileMap\.html\?(?:[^#]*[&;])?staID=(\d+)")
        .unwrap()
});

/// A single pattern → placeholder rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    RouteIcon,
    AccessibilityIcon,
    Anchor,
    LineBreak,
}

/// Priority order: icons before links before line breaks.
pub const RULES: [Rule; 4] = [
    Rule::RouteIcon,
    Rule::AccessibilityIcon,
    Rule::Anchor,
    Rule::LineBreak,
];

impl Rule {
    pub fn pattern(self) -> &'static Regex {
        match self {
            Rule::RouteIcon => &ROUTE_ICON_RE,
            Rule::AccessibilityIcon => &ACCESSIBILITY_ICON_RE,
            Rule::Anchor => &ANCHOR_RE,
            Rule::LineBreak => &BREAK_RE,
        }
    }

    fn rewrite(self, caps: &Captures) -> String {
        match self {
            Rule::RouteIcon => Placeholder::Route(caps[1].to_string()).to_string(),
            Rule::AccessibilityIcon => Placeholder::Accessibility.to_string(),
            Rule::Anchor => rewrite_anchor(&caps[1], &caps[2]),
            Rule::LineBreak => LINE_BREAK.to_string(),
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self.pattern().replace_all(text, |caps: &Captures| self.rewrite(caps)) {
            Cow::Borrowed(_) => text.to_string(),
            Cow::Owned(rewritten) => {
                debug!(rule = ?self, "rewrote legacy markup");
                rewritten
            }
        }
    }
}

/// Rewrite recognized legacy markup into placeholder tokens. Anything not in
/// [`RULES`] passes through unchanged. Brace characters in the input are
/// dropped so the only tokens in the output are the ones emitted here.
pub fn translate(text: &str) -> String {
    let mut out = text.replace(['{', '}'], "");
    for rule in RULES {
        out = rule.apply(&out);
    }
    out
}

/// Numeric station id from a weekender deep link.
pub fn station_id(url: &str) -> Option<&str> {
    STATION_URL_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn rewrite_anchor(url: &str, inner: &str) -> String {
    let text = BREAK_RE.replace_all(inner, "");
    let text = text.trim();
    if url.is_empty() {
        return text.replace(['{', '}'], "");
    }
    match station_id(url) {
        Some(id) => Placeholder::station(id, text),
        None => Placeholder::link(url, text),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_icon_single_quoted_feed_shape() {
        let out = translate("<img src='images/routes/14px/A.png' align='bottom' /> trains");
        assert_eq!(out, "{{A}} trains");
    }

    #[test]
    fn route_icon_sanitized_shape() {
        let out = translate(r#"No <img src="images/routes/14px/SIR.gif" /> service"#);
        assert_eq!(out, "No {{SIR}} service");
    }

    #[test]
    fn shuttle_bus_icon_is_a_route_token() {
        let out = translate("<img src='images/routes/14px/shuttle_bus.png' align='bottom' />");
        assert_eq!(out, "{{shuttle_bus}}");
    }

    #[test]
    fn accessibility_icon() {
        assert_eq!(translate("<img src='images/ADA_WhlChr_small.gif'/>"), "{{isa}}");
        assert_eq!(translate("<img src='images/ADA_WhlChr_small.gif' >"), "{{isa}}");
    }

    #[test]
    fn station_link() {
        let out = translate(
            "<a href='http://web.mta.info/weekender/tileMap.html?staID=123'>Main St</a>",
        );
        assert_eq!(out, "{{station 123 Main St}}");
    }

    #[test]
    fn external_link_unquoted_with_extra_attributes() {
        let out = translate(
            "See <a class=x href=http://www.mta.info/nyct/service/ target=_blank>service<br>map</a>.",
        );
        assert_eq!(out, "See {{link http://www.mta.info/nyct/service/ servicemap}}.");
    }

    #[test]
    fn station_id_from_query() {
        assert_eq!(
            station_id("http://web.mta.info/weekender/tileMap.html?staID=42"),
            Some("42")
        );
        assert_eq!(
            station_id("http://web.mta.info/weekender/tileMap.html?x=1&staID=7"),
            Some("7")
        );
        assert_eq!(station_id("http://web.mta.info/weekender/tileMap.html?staID=abc"), None);
        assert_eq!(station_id("http://example.com/?staID=42"), None);
    }

    #[test]
    fn breaks_canonicalized_and_kept() {
        assert_eq!(translate("a<br/>b<BR />c<br>d"), "a<br>b<br>c<br>d");
    }

    #[test]
    fn unrecognized_markup_unchanged() {
        let text = "Trains run <b>local</b> <img src='images/other.png'>";
        assert_eq!(translate(text), text);
    }

    #[test]
    fn no_matches_unchanged() {
        let text = "Trains run every 20 minutes";
        assert_eq!(translate(text), text);
    }

    #[test]
    fn stray_braces_never_form_tokens() {
        assert_eq!(translate("{{{A}}"), "A");
        assert_eq!(translate("a { b } c"), "a  b  c");
    }

    #[test]
    fn rules_apply_independently() {
        let text = "<img src='images/routes/14px/Q.png' align='bottom' /><br>";
        assert_eq!(Rule::RouteIcon.apply(text), "{{Q}}<br>");
        assert_eq!(Rule::Anchor.apply(text), text);
        assert_eq!(Rule::LineBreak.apply("x<br/>"), "x<br>");
    }

    #[test]
    fn anchor_without_target_becomes_text() {
        assert_eq!(translate("Call <a href=''>511</a> now"), "Call 511 now");
    }

    #[test]
    fn icon_inside_link_text_is_flattened() {
        let out = translate(
            "<a href='http://mta.info/x'><img src='images/routes/14px/7.png' align='bottom' /> info</a>",
        );
        assert_eq!(out, "{{link http://mta.info/x 7 info}}");
    }
}

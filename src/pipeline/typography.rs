use std::sync::LazyLock;

use regex::{Captures, Regex};

pub const HAIR_SPACE: char = '\u{200A}';
/// Hair space, en dash, hair space.
pub const DASH: &str = "\u{200A}\u{2013}\u{200A}";
pub const BULLET: char = '•';
pub const BULLET_SEPARATOR: &str = " • ";

const BOUND_SUFFIX: &str = "bound";
const MAX_PASSES: usize = 4;

// `[\s&&[^\x{200A}]]` is whitespace other than the hair space the dash rule emits.
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s&&[^\x{200A}]]*(?:&(?:amp;)*bull;|•)[\s&&[^\x{200A}]]*").unwrap()
});
static AMP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&(?:amp;)+").unwrap());
static DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\s&&[^\x{200A}]]*)-([\s&&[^\x{200A}]]*)").unwrap());
static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s&&[^\x{200A}]]+([,.])").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").unwrap());

/// Title-level typography: trim, canonical bullets, `&amp;` decoding and
/// dashes between ranges.
pub fn normalize(text: &str) -> String {
    normalize_with(text, false)
}

/// Detail-level typography: as [`normalize`], plus no whitespace before `,`
/// or `.`.
pub fn normalize_detail(text: &str) -> String {
    normalize_with(text, true)
}

/// Rules run in order, repeated until the text stops changing, so the result
/// is always a fixed point.
pub fn normalize_with(text: &str, tighten_punctuation: bool) -> String {
    let mut current = pass(text, tighten_punctuation);
    for _ in 1..MAX_PASSES {
        let next = pass(&current, tighten_punctuation);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn pass(text: &str, tighten_punctuation: bool) -> String {
    let trimmed = text.trim_matches(is_plain_whitespace);
    outside_markup(trimmed, |span| {
        let mut s = BULLET_RE.replace_all(span, BULLET_SEPARATOR).into_owned();
        s = AMP_RE.replace_all(&s, "&").into_owned();
        s = dashify(&s);
        if tighten_punctuation {
            s = PUNCT_RE.replace_all(&s, "$1").into_owned();
        }
        s
    })
}

fn is_plain_whitespace(c: char) -> bool {
    c.is_whitespace() && c != HAIR_SPACE
}

/// Apply `f` to the text between tags; tags are copied verbatim so URLs in
/// attributes keep their hyphens.
fn outside_markup(text: &str, f: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for tag in TAG_RE.find_iter(text) {
        out.push_str(&f(&text[last..tag.start()]));
        out.push_str(tag.as_str());
        last = tag.end();
    }
    out.push_str(&f(&text[last..]));
    out
}

/// `\s*-\s*(?!bound)` with backtracking semantics: a hyphen glued to `bound`
/// is left alone, while `- bound` keeps one space before the suffix.
fn dashify(text: &str) -> String {
    DASH_RE
        .replace_all(text, |caps: &Captures| {
            let end = caps.get(0).map_or(text.len(), |m| m.end());
            if !text[end..].starts_with(BOUND_SUFFIX) {
                return DASH.to_string();
            }
            match caps[2].chars().last() {
                Some(kept) => format!("{DASH}{kept}"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

const ALLOWED_TAG: &str = "img";
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .unwrap()
});
static SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)src\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z]+);").unwrap());

/// Strip every tag except `<img src>`. Disallowed elements lose their content
/// up to the matching close tag; unmatched, void and stray close tags are
/// dropped alone. Text has entities decoded and `&` re-encoded.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(caps) = MARKUP_RE.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else { break };
        push_text(&text[pos..whole.start()], &mut out);
        pos = whole.end();

        // comment
        let Some(name) = caps.get(2) else { continue };
        if is_closing(&caps) {
            continue;
        }

        let attrs = caps.get(3).map_or("", |m| m.as_str());
        if name.as_str().eq_ignore_ascii_case(ALLOWED_TAG) {
            if let Some(src) = src_attr(attrs) {
                out.push_str("<img src=\"");
                out.push_str(&src.replace('"', "&quot;"));
                out.push_str("\" />");
            }
            continue;
        }

        if is_self_closing(attrs) || is_void(name.as_str()) {
            continue;
        }
        if let Some(end) = find_close(text, pos, name.as_str()) {
            pos = end;
        }
    }

    push_text(&text[pos..], &mut out);
    out
}

/// Byte offset just past the close tag matching an open `name` tag whose
/// content starts at `from`.
fn find_close(text: &str, from: usize, name: &str) -> Option<usize> {
    let mut depth = 1usize;
    for caps in MARKUP_RE.captures_iter(&text[from..]) {
        let Some(tag) = caps.get(2) else { continue };
        if !tag.as_str().eq_ignore_ascii_case(name) {
            continue;
        }
        if is_closing(&caps) {
            depth -= 1;
            if depth == 0 {
                return caps.get(0).map(|m| from + m.end());
            }
        } else if !is_self_closing(caps.get(3).map_or("", |m| m.as_str())) {
            depth += 1;
        }
    }
    None
}

fn is_closing(caps: &Captures) -> bool {
    caps.get(1).is_some_and(|m| !m.is_empty())
}

fn is_self_closing(attrs: &str) -> bool {
    attrs.trim_end().ends_with('/')
}

fn is_void(name: &str) -> bool {
    VOID_TAGS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

fn src_attr(attrs: &str) -> Option<String> {
    let caps = SRC_RE.captures(attrs)?;
    let value = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str()
        .trim_end_matches('/');
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn push_text(text: &str, out: &mut String) {
    out.push_str(&decode_entities(text).replace('&', "&amp;"));
}

fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY_RE.replace_all(text, |caps: &Captures| match decode_entity(&caps[1]) {
        Some(c) => c.to_string(),
        None => caps[0].to_string(),
    })
}

/// `<` and `>` stay encoded so decoded text can never form markup.
fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).filter(|c| *c != '<' && *c != '>');
    }
    let c = match name {
        "amp" => '&',
        "bull" => '•',
        "nbsp" => ' ',
        "quot" => '"',
        "apos" => '\'',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "hellip" => '…',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_img_src_only() {
        let out = sanitize(
            "<img src='images/routes/14px/A.png' align='bottom' alt='A' /> trains",
        );
        assert_eq!(out, "<img src=\"images/routes/14px/A.png\" /> trains");
    }

    #[test]
    fn img_without_src_dropped() {
        assert_eq!(sanitize("x<img alt='nothing'>y"), "xy");
    }

    #[test]
    fn disallowed_element_loses_content() {
        assert_eq!(sanitize("a<script>alert('x')</script>b"), "ab");
        assert_eq!(sanitize("a<style>p { color: red }</style>b"), "ab");
        assert_eq!(
            sanitize("See <a href='http://mta.info'>the map</a> now"),
            "See  now"
        );
    }

    #[test]
    fn nested_same_name() {
        assert_eq!(sanitize("a<span>1<span>2</span>3</span>b"), "ab");
    }

    #[test]
    fn void_and_stray_tags_removed_alone() {
        assert_eq!(sanitize("one<br>two</b>three<hr/>four"), "onetwothreefour");
    }

    #[test]
    fn unmatched_open_tag_keeps_following_text() {
        assert_eq!(sanitize("<b>SERVICE CHANGE"), "SERVICE CHANGE");
    }

    #[test]
    fn comments_removed() {
        assert_eq!(sanitize("a<!-- <b>hidden</b> -->b"), "ab");
    }

    #[test]
    fn entities_decoded_then_ampersand_encoded() {
        assert_eq!(sanitize("A &bull; B & C"), "A • B &amp; C");
        assert_eq!(sanitize("Q&amp;A"), "Q&amp;A");
        assert_eq!(sanitize("&#8226;&#x2022;"), "••");
    }

    #[test]
    fn angle_entities_stay_encoded() {
        assert_eq!(sanitize("&lt;b&gt;"), "&amp;lt;b&amp;gt;");
        assert_eq!(sanitize("&#60;"), "&amp;#60;");
    }

    #[test]
    fn plain_text_untouched() {
        let text = "No trains between 59 St and 125 St  •  Weekend";
        assert_eq!(sanitize(text), text);
    }
}

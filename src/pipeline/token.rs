use std::fmt;

pub const OPEN: &str = "{{";
pub const CLOSE: &str = "}}";

const SHUTTLE_BUS: &str = "shuttle_bus";
const ACCESSIBILITY: &str = "isa";
const LINK: &str = "link";
const STATION: &str = "station";

/// Inline `{{kind payload}}` marker carrying non-text meaning through the
/// plain-string stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Route(String),
    ShuttleBus,
    Accessibility,
    Link { url: String, text: String },
    Station { id: String, text: String },
}

impl Placeholder {
    pub fn link(url: &str, text: &str) -> Self {
        Placeholder::Link {
            url: scrub(url),
            text: scrub(text),
        }
    }

    pub fn station(id: &str, text: &str) -> Self {
        Placeholder::Station {
            id: scrub(id),
            text: scrub(text),
        }
    }

    /// Parse the inside of a token (without the braces). Total: a bare word
    /// that is not a keyword names a route line.
    pub fn parse(inner: &str) -> Self {
        let inner = inner.trim();
        let (kind, rest) = match inner.split_once(' ') {
            Some((kind, rest)) => (kind, Some(rest)),
            None => (inner, None),
        };

        match (kind, rest) {
            (LINK, Some(rest)) => {
                let (url, text) = rest.split_once(' ').unwrap_or((rest, ""));
                Placeholder::Link {
                    url: url.to_string(),
                    text: text.to_string(),
                }
            }
            (STATION, Some(rest)) => {
                let (id, text) = rest.split_once(' ').unwrap_or((rest, ""));
                Placeholder::Station {
                    id: id.to_string(),
                    text: text.to_string(),
                }
            }
            (SHUTTLE_BUS, None) => Placeholder::ShuttleBus,
            (ACCESSIBILITY, None) => Placeholder::Accessibility,
            _ => Placeholder::Route(inner.to_string()),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Route(line) => write!(f, "{OPEN}{line}{CLOSE}"),
            Placeholder::ShuttleBus => write!(f, "{OPEN}{SHUTTLE_BUS}{CLOSE}"),
            Placeholder::Accessibility => write!(f, "{OPEN}{ACCESSIBILITY}{CLOSE}"),
            Placeholder::Link { url, text } => write!(f, "{OPEN}{LINK} {url} {text}{CLOSE}"),
            Placeholder::Station { id, text } => write!(f, "{OPEN}{STATION} {id} {text}{CLOSE}"),
        }
    }
}

/// Payloads must never carry brace characters.
fn scrub(s: &str) -> String {
    s.replace(['{', '}'], "")
}

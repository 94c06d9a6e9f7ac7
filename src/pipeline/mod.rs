pub mod assemble;
pub mod sanitize;
pub mod segment;
pub mod token;
pub mod translate;
pub mod typography;

use std::borrow::Cow;

pub use segment::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Clauses split on double spaces, the first one becomes a heading.
    Title,
    /// `<br>`-delimited body with the empty-detail placeholder.
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingCase {
    AsIs,
    /// Lower-cased, first letter capitalized.
    Sentence,
}

/// Which stages run and how the result is presented. One descriptor per
/// call site; the stages themselves are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub sanitize: bool,
    pub layout: Layout,
    pub heading_case: HeadingCase,
    pub tighten_punctuation: bool,
    pub trailing_link: bool,
}

impl Policy {
    pub const SUMMARY: Policy = Policy {
        sanitize: true,
        layout: Layout::Title,
        heading_case: HeadingCase::Sentence,
        tighten_punctuation: false,
        trailing_link: false,
    };

    pub const DETAIL: Policy = Policy {
        sanitize: false,
        layout: Layout::Detail,
        heading_case: HeadingCase::AsIs,
        tighten_punctuation: true,
        trailing_link: true,
    };

    pub const WEEKEND_TITLE: Policy = Policy {
        sanitize: false,
        layout: Layout::Title,
        heading_case: HeadingCase::AsIs,
        tighten_punctuation: false,
        trailing_link: false,
    };

    pub const WEEKEND_DETAIL: Policy = Policy {
        sanitize: false,
        layout: Layout::Detail,
        heading_case: HeadingCase::AsIs,
        tighten_punctuation: true,
        trailing_link: true,
    };
}

/// Five-stage pipeline: sanitize → normalize → translate → segment → assemble.
pub fn transform(text: &str, policy: &Policy) -> Vec<Segment> {
    let text = if policy.sanitize {
        Cow::Owned(sanitize::sanitize(text))
    } else {
        Cow::Borrowed(text)
    };
    let text = typography::normalize_with(&text, policy.tighten_punctuation);
    let text = translate::translate(&text);
    assemble::assemble(&text, policy)
}

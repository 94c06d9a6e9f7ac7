//! Turns legacy transit service-notice strings (entities, `<img>` route
//! icons, `<a>` links, `<br>` breaks, double-space clause runs) into ordered,
//! typed segments for a rendering layer.

pub mod error;
pub mod feed;
pub mod notice;
pub mod pipeline;
pub mod render;
pub mod station;

pub use error::Error;
pub use notice::{render_notice, render_notices, RawNotice, RenderedNotice};
pub use pipeline::{transform, Policy, Segment};

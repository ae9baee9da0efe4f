//! Movie feed module
//!
//! The user-facing component: a titled list of movie cards that loads more
//! pages as its sentinel scrolls into view.
//!
//! # Views
//!
//! - `Loading` - spinner until the first page arrives
//! - `Error` - message when the first page fails
//! - `List` - movie cards plus a footer (loading more, more available,
//!   all loaded, or an inline error for a failed later page)

mod component;
mod view;

pub use component::MovieFeed;
pub use view::{
    render_card, FeedView, Footer, EXHAUSTED_CAPTION, FEED_TITLE, MORE_AVAILABLE_CAPTION, SPINNER,
};

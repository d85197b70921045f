// File: ./src/render/mod.rs
//! Document-view rendering: escaped-by-construction markup, the three section
//! renderers, and the full printable page.
pub mod markup;
pub mod page;
pub mod sections;

pub use markup::{Container, Element, Node, escape};
pub use page::render_page;
pub use sections::{render_log_unavailable, render_logs, render_merged_banners, render_scoped_banners};

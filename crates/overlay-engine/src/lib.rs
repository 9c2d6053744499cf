//! Overlay rendering and template stamping
//!
//! Builds the overlay pages a statement draws (text at fixed coordinates,
//! alternating row shading, dashed separators), assembles them into
//! standalone overlay PDFs, and stamps them onto the pages of a static
//! template document.

pub mod document;
pub mod error;
pub mod metrics;
pub mod page;
pub mod render;
pub mod stamp;

pub use document::build_overlay_document;
pub use error::OverlayError;
pub use metrics::{text_width, Font};
pub use page::OverlayPage;
pub use render::{render_card, render_chequing, RowLayout};
pub use stamp::{load_template, stamp_template, write_document, MergePolicy};

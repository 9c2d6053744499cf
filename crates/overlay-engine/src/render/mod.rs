//! Statement rendering
//!
//! Walks the derived statement lines from `statement-core` down the page,
//! one fixed-coordinate row at a time, and breaks to a fresh overlay page
//! when the next baseline would pass the layout's floor.

mod card;
mod chequing;

pub use card::render_card;
pub use chequing::render_chequing;

/// Vertical rhythm of a statement's transaction table.
#[derive(Debug, Clone, Copy)]
pub struct RowLayout {
    /// Baseline of the first row on a page.
    pub start_y: f32,
    /// Distance between row baselines.
    pub line_height: f32,
    /// Lowest baseline still on the page; the next row opens a new page.
    pub min_y: f32,
}

impl RowLayout {
    /// Baseline of the page-local `row`.
    pub fn baseline(&self, row: usize) -> f32 {
        self.start_y - row as f32 * self.line_height
    }

    /// Rows that fit on one page before a baseline would pass `min_y`.
    pub fn rows_per_page(&self) -> usize {
        ((self.start_y - self.min_y) / self.line_height) as usize + 1
    }
}

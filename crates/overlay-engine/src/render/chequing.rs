//! Chequing statement layout
//!
//! Five flat columns in Helvetica 8.5 with light-grey banding behind every
//! other row. The withdrawal, deposit, and balance columns are
//! right-aligned on their column edge; absent amounts leave the column
//! blank.

use statement_core::format;
use statement_core::ChequingStatement;

use crate::metrics::Font;
use crate::page::OverlayPage;
use crate::render::RowLayout;

const FONT_SIZE: f32 = 8.5;

const LAYOUT: RowLayout = RowLayout {
    start_y: 485.0,
    line_height: 10.0,
    min_y: 50.0,
};

const PAYEE_X: f32 = 70.0;
const WITHDRAWAL_X: f32 = 305.0;
const DEPOSIT_X: f32 = 405.0;
const DATE_X: f32 = 415.0;
const BALANCE_X: f32 = 535.0;

const SHADE_COLOR: (f32, f32, f32) = (237.0 / 255.0, 237.0 / 255.0, 237.0 / 255.0);
const SHADE_X: f32 = 40.0;
const SHADE_WIDTH: f32 = 500.0;

/// Render one chequing statement onto as many overlay pages as its rows
/// need.
pub fn render_chequing(statement: &ChequingStatement) -> Vec<OverlayPage> {
    let rows_per_page = LAYOUT.rows_per_page();
    let mut pages = Vec::new();
    let mut page = OverlayPage::new();

    for (index, line) in statement.lines.iter().enumerate() {
        let row = index % rows_per_page;
        if index > 0 && row == 0 {
            pages.push(std::mem::take(&mut page));
        }
        let y = LAYOUT.baseline(row);

        // Band behind the first, third, ... rendered row, drawn before the
        // row text so the text sits on top of it.
        if index % 2 == 0 {
            page.fill_rect(
                SHADE_COLOR,
                SHADE_X,
                y - (LAYOUT.line_height - 2.0),
                SHADE_WIDTH,
                LAYOUT.line_height,
            );
        }

        page.text(Font::Helvetica, FONT_SIZE, PAYEE_X, y, &line.payee);
        page.text_right(
            Font::Helvetica,
            FONT_SIZE,
            WITHDRAWAL_X,
            y,
            &format::plain_amount(line.withdrawal),
        );
        page.text_right(
            Font::Helvetica,
            FONT_SIZE,
            DEPOSIT_X,
            y,
            &format::plain_amount(line.deposit),
        );
        page.text(
            Font::Helvetica,
            FONT_SIZE,
            DATE_X,
            y,
            &format::compact_date(line.date),
        );
        page.text_right(
            Font::Helvetica,
            FONT_SIZE,
            BALANCE_X,
            y,
            &format::plain_amount(line.balance),
        );
    }

    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

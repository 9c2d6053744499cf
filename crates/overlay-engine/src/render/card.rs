//! Credit-card statement layout
//!
//! Four columns in Times-Roman 8 with a thin dark-red dashed separator
//! above every row and the beginning balance drawn once in Times-Bold 10.
//! Column lefts derive from a 47pt table edge and widths [48, 44, 170, 37].

use statement_core::format;
use statement_core::CardStatement;

use crate::metrics::Font;
use crate::page::OverlayPage;
use crate::render::RowLayout;

const FONT_SIZE: f32 = 8.0;

const LAYOUT: RowLayout = RowLayout {
    start_y: 571.0,
    line_height: 22.0,
    min_y: 50.0,
};

const DATE_X: f32 = 47.0;
const POSTING_X: f32 = 95.0;
const DESCRIPTION_X: f32 = 139.0;
const AMOUNT_RIGHT_X: f32 = 346.0;

const SEPARATOR_COLOR: (f32, f32, f32) = (139.0 / 255.0, 0.0, 0.0);
const SEPARATOR_WIDTH: f32 = 0.3;
const SEPARATOR_RISE: f32 = 10.0;

const BALANCE_SIZE: f32 = 10.0;
const BALANCE_Y: f32 = 591.0;

/// Render one credit-card statement onto as many overlay pages as its rows
/// need. The beginning balance lands on the first page only.
pub fn render_card(statement: &CardStatement) -> Vec<OverlayPage> {
    let rows_per_page = LAYOUT.rows_per_page();
    let mut pages = Vec::new();
    let mut page = OverlayPage::new();

    if let Some(balance) = statement.beginning_balance {
        page.text_right(
            Font::TimesBold,
            BALANCE_SIZE,
            AMOUNT_RIGHT_X,
            BALANCE_Y,
            &format::currency(balance),
        );
    }

    for (index, line) in statement.lines.iter().enumerate() {
        let row = index % rows_per_page;
        if index > 0 && row == 0 {
            pages.push(std::mem::take(&mut page));
        }
        let y = LAYOUT.baseline(row);

        page.dashed_line(
            SEPARATOR_COLOR,
            SEPARATOR_WIDTH,
            DATE_X,
            y + SEPARATOR_RISE,
            AMOUNT_RIGHT_X,
            y + SEPARATOR_RISE,
        );

        page.text(
            Font::TimesRoman,
            FONT_SIZE,
            DATE_X,
            y,
            &format::short_date(line.date),
        );
        page.text(
            Font::TimesRoman,
            FONT_SIZE,
            POSTING_X,
            y,
            &format::short_date(line.posting_date),
        );
        page.text(
            Font::TimesRoman,
            FONT_SIZE,
            DESCRIPTION_X,
            y,
            &line.description,
        );
        page.text_right(
            Font::TimesRoman,
            FONT_SIZE,
            AMOUNT_RIGHT_X,
            y,
            &format::currency(line.amount),
        );
    }

    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

//! Overlay page building
//!
//! An [`OverlayPage`] accumulates content-stream operations: text placed at
//! fixed coordinates (left- or right-aligned), filled rectangles, and dashed
//! separator lines. Colour-changing operators are bracketed with q/Q so text
//! keeps the page's default black fill.

use std::collections::BTreeSet;

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use crate::metrics::{self, Font};

/// One overlay page under construction.
#[derive(Debug, Default)]
pub struct OverlayPage {
    operations: Vec<Operation>,
    fonts: BTreeSet<Font>,
}

impl OverlayPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `text` with its left edge at (`x`, `y`). Empty strings draw
    /// nothing, which keeps blank amount columns blank.
    pub fn text(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.fonts.insert(font);
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec![
                Object::Name(font.resource_name().as_bytes().to_vec()),
                Object::Real(size),
            ],
        ));
        self.operations
            .push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                text.as_bytes().to_vec(),
                StringFormat::Literal,
            )],
        ));
        self.operations.push(Operation::new("ET", vec![]));
    }

    /// Draw `text` with its right edge at (`x`, `y`).
    pub fn text_right(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        let left = x - metrics::text_width(text, font, size);
        self.text(font, size, left, y, text);
    }

    /// Fill an axis-aligned rectangle; (`x`, `y`) is the lower-left corner.
    pub fn fill_rect(&mut self, color: (f32, f32, f32), x: f32, y: f32, width: f32, height: f32) {
        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new(
            "rg",
            vec![
                Object::Real(color.0),
                Object::Real(color.1),
                Object::Real(color.2),
            ],
        ));
        self.operations.push(Operation::new(
            "re",
            vec![
                Object::Real(x),
                Object::Real(y),
                Object::Real(width),
                Object::Real(height),
            ],
        ));
        self.operations.push(Operation::new("f", vec![]));
        self.operations.push(Operation::new("Q", vec![]));
    }

    /// Stroke a one-on/one-off dashed line from (`x1`, `y1`) to (`x2`, `y2`).
    pub fn dashed_line(
        &mut self,
        color: (f32, f32, f32),
        line_width: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    ) {
        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new(
            "d",
            vec![
                Object::Array(vec![Object::Integer(1), Object::Integer(1)]),
                Object::Integer(0),
            ],
        ));
        self.operations
            .push(Operation::new("w", vec![Object::Real(line_width)]));
        self.operations.push(Operation::new(
            "RG",
            vec![
                Object::Real(color.0),
                Object::Real(color.1),
                Object::Real(color.2),
            ],
        ));
        self.operations
            .push(Operation::new("m", vec![Object::Real(x1), Object::Real(y1)]));
        self.operations
            .push(Operation::new("l", vec![Object::Real(x2), Object::Real(y2)]));
        self.operations.push(Operation::new("S", vec![]));
        self.operations.push(Operation::new("Q", vec![]));
    }

    /// Operations drawn so far, in drawing order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Fonts the page references.
    pub fn fonts(&self) -> impl Iterator<Item = Font> + '_ {
        self.fonts.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn operators(page: &OverlayPage) -> Vec<&str> {
        page.operations()
            .iter()
            .map(|op| op.operator.as_str())
            .collect()
    }

    fn real(object: &Object) -> f32 {
        match object {
            Object::Real(value) => *value,
            other => panic!("expected Real, got {:?}", other),
        }
    }

    #[test]
    fn test_text_emits_a_text_block() {
        let mut page = OverlayPage::new();
        page.text(Font::Helvetica, 8.5, 70.0, 485.0, "OFFICE SUPPLY CO");

        assert_eq!(operators(&page), vec!["BT", "Tf", "Td", "Tj", "ET"]);

        let td = &page.operations()[2];
        assert_eq!(real(&td.operands[0]), 70.0);
        assert_eq!(real(&td.operands[1]), 485.0);
    }

    #[test]
    fn test_text_empty_string_draws_nothing() {
        let mut page = OverlayPage::new();
        page.text(Font::Helvetica, 8.5, 70.0, 485.0, "");

        assert!(page.is_empty());
        assert_eq!(page.fonts().count(), 0);
    }

    #[test]
    fn test_text_right_shifts_left_by_measured_width() {
        let mut page = OverlayPage::new();
        // "0.00" in Helvetica 8.5 measures 16.541pt
        page.text_right(Font::Helvetica, 8.5, 305.0, 485.0, "0.00");

        let td = &page.operations()[2];
        let x = real(&td.operands[0]);
        assert!((x - (305.0 - 16.541)).abs() < 0.001, "got x={}", x);
    }

    #[test]
    fn test_fill_rect_is_bracketed_by_state_save() {
        let mut page = OverlayPage::new();
        page.fill_rect((0.93, 0.93, 0.93), 40.0, 477.0, 500.0, 10.0);

        assert_eq!(operators(&page), vec!["q", "rg", "re", "f", "Q"]);
    }

    #[test]
    fn test_dashed_line_sets_pattern_and_restores_state() {
        let mut page = OverlayPage::new();
        page.dashed_line((0.545, 0.0, 0.0), 0.3, 47.0, 581.0, 346.0, 581.0);

        assert_eq!(operators(&page), vec!["q", "d", "w", "RG", "m", "l", "S", "Q"]);

        let dash = &page.operations()[1];
        assert_eq!(
            dash.operands[0],
            Object::Array(vec![Object::Integer(1), Object::Integer(1)])
        );
    }

    #[test]
    fn test_fonts_are_deduplicated() {
        let mut page = OverlayPage::new();
        page.text(Font::TimesRoman, 8.0, 47.0, 571.0, "MAR 03");
        page.text(Font::TimesRoman, 8.0, 95.0, 571.0, "MAR 05");
        page.text(Font::TimesBold, 10.0, 200.0, 591.0, "$4,250.00");

        let fonts: Vec<Font> = page.fonts().collect();
        assert_eq!(fonts, vec![Font::TimesRoman, Font::TimesBold]);
    }
}

//! Overlay document assembly
//!
//! Turns built [`OverlayPage`]s into a standalone one-or-more-page PDF:
//! US Letter media boxes, shared standard-font resources, and one content
//! stream per page. The batch pipeline writes these next to the stamped
//! statements when asked to keep its intermediates.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::OverlayError;
use crate::metrics::Font;
use crate::page::OverlayPage;

/// US Letter at 72 DPI.
const MEDIA_BOX: (i64, i64) = (612, 792);

/// Assemble `pages` into a standalone overlay PDF.
pub fn build_overlay_document(pages: &[OverlayPage]) -> Result<Document, OverlayError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    // Font objects are shared across pages
    let mut font_ids: BTreeMap<Font, ObjectId> = BTreeMap::new();
    let mut kids = Vec::new();

    for page in pages {
        let content = Content {
            operations: page.operations().to_vec(),
        };
        let encoded = content
            .encode()
            .map_err(|e| OverlayError::RenderError(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let mut fonts = Dictionary::new();
        for font in page.fonts() {
            let font_id = *font_ids
                .entry(font)
                .or_insert_with(|| doc.add_object(font_dictionary(font)));
            fonts.set(font.resource_name(), Object::Reference(font_id));
        }

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
            "MediaBox" => vec![
                0.into(),
                0.into(),
                MEDIA_BOX.0.into(),
                MEDIA_BOX.1.into(),
            ],
            "Resources" => dictionary! { "Font" => Object::Dictionary(fonts) },
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    Ok(doc)
}

/// Standard Type 1 font dictionary for one of the overlay fonts.
pub(crate) fn font_dictionary(font: Font) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_name(),
    }
}

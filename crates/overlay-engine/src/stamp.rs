//! Template stamping
//!
//! Composites overlay pages onto the pages of a template document in
//! place, preserving the template's page count. The template's own content
//! is bracketed with q/Q so its graphics state cannot leak into the
//! overlay, and the overlay's fonts are injected into the page resources
//! under collision-free names.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use crate::document::font_dictionary;
use crate::error::OverlayError;
use crate::metrics::Font;
use crate::page::OverlayPage;

/// Which overlay page (if any) lands on each template page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Every template page is stamped; template pages past the end of the
    /// overlay repeat its last page.
    RepeatLast,
    /// Template page `i` receives overlay page `i` while one exists; later
    /// template pages pass through unchanged.
    LeadingPages,
}

impl MergePolicy {
    /// Overlay page index for the 0-based `template_page`, or `None` when
    /// the page passes through unstamped.
    pub fn overlay_for(&self, template_page: usize, overlay_count: usize) -> Option<usize> {
        if overlay_count == 0 {
            return None;
        }
        match self {
            MergePolicy::RepeatLast => Some(template_page.min(overlay_count - 1)),
            MergePolicy::LeadingPages => {
                (template_page < overlay_count).then_some(template_page)
            }
        }
    }
}

/// Load the template PDF at `path`.
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<Document, OverlayError> {
    Document::load(path.as_ref())
        .map_err(|e| OverlayError::ParseError(format!("{}: {}", path.as_ref().display(), e)))
}

/// Compress and write `document` to `path`.
pub fn write_document<P: AsRef<Path>>(
    document: &mut Document,
    path: P,
) -> Result<(), OverlayError> {
    document.compress();
    document
        .save(path.as_ref())
        .map_err(|e| OverlayError::StampError(format!("{}: {}", path.as_ref().display(), e)))?;
    Ok(())
}

/// Stamp `overlay` pages onto the pages of `template` per `policy`.
///
/// Each stamped page's content becomes `[q, ...template content, Q,
/// overlay content]`, and the overlay's font objects are added to the
/// page's `Resources/Font` dictionary. The page count never changes.
pub fn stamp_template(
    template: &mut Document,
    overlay: &[OverlayPage],
    policy: MergePolicy,
) -> Result<(), OverlayError> {
    if overlay.is_empty() {
        return Ok(());
    }

    let page_ids: Vec<ObjectId> = template.get_pages().values().copied().collect();
    debug!(
        "Stamping {} overlay page(s) onto {} template page(s)",
        overlay.len(),
        page_ids.len()
    );

    // Streams shared by every stamped page, created on first use so an
    // all-pass-through run leaves the template untouched.
    let mut wrappers: Option<(ObjectId, ObjectId)> = None;
    let mut content_ids: Vec<Option<ObjectId>> = vec![None; overlay.len()];
    let mut font_ids: BTreeMap<Font, ObjectId> = BTreeMap::new();

    for (index, page_id) in page_ids.iter().enumerate() {
        let Some(overlay_index) = policy.overlay_for(index, overlay.len()) else {
            continue;
        };
        let overlay_page = &overlay[overlay_index];
        if overlay_page.is_empty() {
            continue;
        }

        let (save_id, restore_id) = match wrappers {
            Some(pair) => pair,
            None => {
                let pair = (
                    template.add_object(Stream::new(dictionary! {}, b"q\n".to_vec())),
                    template.add_object(Stream::new(dictionary! {}, b"Q\n".to_vec())),
                );
                wrappers = Some(pair);
                pair
            }
        };

        let content_id = match content_ids[overlay_index] {
            Some(id) => id,
            None => {
                let content = Content {
                    operations: overlay_page.operations().to_vec(),
                };
                let encoded = content
                    .encode()
                    .map_err(|e| OverlayError::RenderError(e.to_string()))?;
                let id = template.add_object(Stream::new(dictionary! {}, encoded));
                content_ids[overlay_index] = Some(id);
                id
            }
        };

        let mut font_refs: Vec<(&'static str, ObjectId)> = Vec::new();
        for font in overlay_page.fonts() {
            let font_id = *font_ids
                .entry(font)
                .or_insert_with(|| template.add_object(font_dictionary(font)));
            font_refs.push((font.resource_name(), font_id));
        }

        let page_dict = template
            .get_object(*page_id)
            .and_then(Object::as_dict)
            .map_err(|e| OverlayError::StampError(format!("template page {}: {}", index + 1, e)))?
            .clone();

        let mut existing: Vec<Object> = match page_dict.get(b"Contents") {
            Ok(Object::Reference(id)) => vec![Object::Reference(*id)],
            Ok(Object::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        let mut contents = Vec::with_capacity(existing.len() + 3);
        contents.push(Object::Reference(save_id));
        contents.append(&mut existing);
        contents.push(Object::Reference(restore_id));
        contents.push(Object::Reference(content_id));

        let resources = resources_with_fonts(template, &page_dict, &font_refs)?;

        let page_object = template
            .get_object_mut(*page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| OverlayError::StampError(format!("template page {}: {}", index + 1, e)))?;
        page_object.set("Contents", Object::Array(contents));
        page_object.set("Resources", Object::Dictionary(resources));
    }

    Ok(())
}

/// The page's effective resource dictionary with the overlay fonts added.
/// Referenced resource and font dictionaries are resolved and inlined so
/// the stamped page never mutates objects other pages may share.
fn resources_with_fonts(
    doc: &Document,
    page_dict: &Dictionary,
    fonts: &[(&'static str, ObjectId)],
) -> Result<Dictionary, OverlayError> {
    let mut resources = match inherited_resources(doc, page_dict)? {
        Some(dict) => dict,
        None => Dictionary::new(),
    };
    let mut font_dict = match resources.get(b"Font") {
        Ok(object) => resolved_dict(doc, object)?,
        Err(_) => Dictionary::new(),
    };
    for (name, id) in fonts {
        font_dict.set(*name, Object::Reference(*id));
    }
    resources.set("Font", Object::Dictionary(font_dict));
    Ok(resources)
}

/// The `Resources` in effect for a page node. `Resources` is inheritable:
/// a page without its own entry takes the nearest one up its `Parent`
/// chain, and the stamped page must carry that dictionary inline or
/// setting a page-level `Resources` would shadow the template's fonts.
fn inherited_resources(
    doc: &Document,
    page_dict: &Dictionary,
) -> Result<Option<Dictionary>, OverlayError> {
    let mut node = page_dict.clone();
    loop {
        if let Ok(object) = node.get(b"Resources") {
            return resolved_dict(doc, object).map(Some);
        }
        let parent = match node.get(b"Parent") {
            Ok(Object::Reference(id)) => *id,
            _ => return Ok(None),
        };
        node = doc
            .get_object(parent)
            .and_then(Object::as_dict)
            .map(Dictionary::clone)
            .map_err(|e| OverlayError::StampError(format!("unresolvable page parent: {}", e)))?;
    }
}

fn resolved_dict(doc: &Document, object: &Object) -> Result<Dictionary, OverlayError> {
    match object {
        Object::Reference(id) => doc
            .get_object(*id)
            .and_then(Object::as_dict)
            .map(Dictionary::clone)
            .map_err(|e| OverlayError::StampError(format!("unresolvable resource dictionary: {}", e))),
        Object::Dictionary(dict) => Ok(dict.clone()),
        other => Err(OverlayError::StampError(format!(
            "unexpected resource object: {:?}",
            other
        ))),
    }
}

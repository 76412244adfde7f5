use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::{ListedFile, PageListing, Section};

const VIDEO_OPTIONS: &str = "#videoList option";
const DELETE_CONTROLS: &str = ".delete-btn";
const STOP_CONTROL: &str = "#stopProcessingBtn";
const STATUS_TEXT: &str = "#processingStatus";
const UPLOAD_SECTION_CLASS: &str = "upload-section";

/// Scrapes the service's index page into an explicit listing.
///
/// The section of each deletable file is resolved here, once, from the
/// enclosing markup; everything downstream carries it as data.
pub fn parse_listing(html: &str) -> PageListing {
    let doc = Html::parse_document(html);

    let videos = select_all(&doc, VIDEO_OPTIONS)
        .filter_map(|option| option.value().attr("value"))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let files = select_all(&doc, DELETE_CONTROLS)
        .filter_map(|control| {
            let filename = control.value().attr("data-filename")?.trim();
            if filename.is_empty() {
                return None;
            }
            Some(ListedFile {
                filename: filename.to_string(),
                section: section_of(*control),
            })
        })
        .collect();

    let processing_active = select_all(&doc, STOP_CONTROL)
        .next()
        .is_some_and(|stop| stop.value().attr("disabled").is_none());

    let status_text = select_all(&doc, STATUS_TEXT)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty());

    PageListing {
        videos,
        files,
        processing_active,
        status_text,
    }
}

fn select_all<'a>(doc: &'a Html, css: &str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let selector = Selector::parse(css).ok();
    let matches: Vec<ElementRef<'a>> = match selector.as_ref() {
        Some(sel) => doc.select(sel).collect(),
        None => Vec::new(),
    };
    matches.into_iter()
}

fn section_of(node: NodeRef<'_, Node>) -> Section {
    let in_upload_section = node.ancestors().any(|ancestor| match ancestor.value() {
        Node::Element(element) => element.classes().any(|class| class == UPLOAD_SECTION_CLASS),
        _ => false,
    });
    if in_upload_section {
        Section::Uploaded
    } else {
        Section::Processed
    }
}

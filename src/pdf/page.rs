use pdf_writer::{Content, Rect};

use crate::assets::EmbeddedAssets;
use crate::model::Contact;

use super::header;
use super::{BOTTOM_MARGIN, CONTENT_TOP_PAD, PAGE_HEIGHT};

/// One URI hit region, turned into a link annotation at assembly time.
pub(crate) struct LinkAnnotation {
    pub(crate) rect: Rect,
    pub(crate) url: String,
}

/// Per-render pagination state: the current page's content stream, the
/// finished streams, collected link regions, the page index, and the write
/// cursor. One session is constructed inside each render call and dropped
/// with it, so page counters cannot leak between documents.
pub(crate) struct PageSession<'a> {
    pub(crate) content: Content,
    pub(crate) links: Vec<LinkAnnotation>,
    /// Baseline of the next element to draw.
    pub(crate) cursor: f32,
    finished: Vec<Content>,
    finished_links: Vec<Vec<LinkAnnotation>>,
    page_no: usize,
    name: &'a str,
    contact: Option<&'a Contact>,
    assets: &'a EmbeddedAssets,
}

impl<'a> PageSession<'a> {
    /// Opens the session and draws the first page's header.
    pub(crate) fn new(
        name: &'a str,
        contact: Option<&'a Contact>,
        assets: &'a EmbeddedAssets,
    ) -> Self {
        let mut session = Self {
            content: Content::new(),
            links: Vec::new(),
            cursor: 0.0,
            finished: Vec::new(),
            finished_links: Vec::new(),
            page_no: 1,
            name,
            contact,
            assets,
        };
        let h = header::draw(
            &mut session.content,
            &mut session.links,
            1,
            name,
            contact,
            assets,
        );
        session.cursor = PAGE_HEIGHT - h - CONTENT_TOP_PAD;
        session
    }

    pub(crate) fn page_no(&self) -> usize {
        self.page_no
    }

    /// Content height of a continuation page (minimal header). Blocks taller
    /// than this can never be placed atomically.
    pub(crate) fn full_page_height() -> f32 {
        PAGE_HEIGHT - header::MINIMAL_HEIGHT - CONTENT_TOP_PAD - BOTTOM_MARGIN
    }

    /// Finalizes the current page, opens the next one with its header drawn,
    /// and returns the new content-start cursor. The page index only grows.
    pub(crate) fn new_page(&mut self) -> f32 {
        self.finished
            .push(std::mem::replace(&mut self.content, Content::new()));
        self.finished_links.push(std::mem::take(&mut self.links));
        self.page_no += 1;
        let h = header::draw(
            &mut self.content,
            &mut self.links,
            self.page_no,
            self.name,
            self.contact,
            self.assets,
        );
        self.cursor = PAGE_HEIGHT - h - CONTENT_TOP_PAD;
        self.cursor
    }

    /// Breaks the page unless `needed` points still fit above the bottom
    /// margin.
    pub(crate) fn ensure_room(&mut self, needed: f32) {
        if self.cursor - needed < BOTTOM_MARGIN {
            self.new_page();
        }
    }

    /// Closes the session, yielding the per-page content streams and link
    /// regions in page order.
    pub(crate) fn finish(mut self) -> (Vec<Content>, Vec<Vec<LinkAnnotation>>) {
        self.finished.push(self.content);
        self.finished_links.push(self.links);
        (self.finished, self.finished_links)
    }
}

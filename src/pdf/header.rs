use pdf_writer::{Content, Name, Rect, Str};

use crate::assets::{EmbeddedAssets, ICON_SIZE, Icon};
use crate::fonts::{Font, to_winansi_bytes};
use crate::model::Contact;

use super::page::LinkAnnotation;
use super::{BG_DARK, LEFT_MARGIN, PAGE_HEIGHT, PAGE_WIDTH, RIGHT_MARGIN, TEXT, WHITE, set_fill};

/// Band heights for the three header variants.
pub(crate) const FIRST_PAGE_WITH_CONTACT: f32 = 90.0;
pub(crate) const FIRST_PAGE_NO_CONTACT: f32 = 70.0;
pub(crate) const MINIMAL_HEIGHT: f32 = 60.0;

const NAME_SIZE: f32 = 20.0;
const NAME_BASELINE_OFFSET: f32 = 35.0; // below the page top
const FIELD_SIZE: f32 = 9.0;
const ICON_GAP: f32 = 4.0;
const FIELD_GAP: f32 = 16.0;
const ROW_GAP: f32 = 18.0;
const LOGO_X_FIRST_PAGE: f32 = LEFT_MARGIN - 30.0;
const LOGO_X_LATER_PAGES: f32 = 20.0;
const LOGO_BOX_WIDTH: f32 = 80.0;

/// Variant selection: page 1 with contact → tall, page 1 without → short,
/// later pages → minimal regardless of contact.
pub(crate) fn height(page_no: usize, has_contact: bool) -> f32 {
    if page_no == 1 {
        if has_contact {
            FIRST_PAGE_WITH_CONTACT
        } else {
            FIRST_PAGE_NO_CONTACT
        }
    } else {
        MINIMAL_HEIGHT
    }
}

/// Last path segment of a profile/code-host URL.
fn handle(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// One icon-plus-text contact field placed flush against `right_edge`, built
/// right to left. Returns the right edge for the next field; absent fields
/// reclaim their width simply by never calling this. A `link` makes the
/// field's full drawn width clickable.
fn place_field(
    content: &mut Content,
    links: &mut Vec<LinkAnnotation>,
    assets: &EmbeddedAssets,
    icon: Icon,
    text: &str,
    link: Option<&str>,
    right_edge: f32,
    center_y: f32,
) -> f32 {
    let text_w = Font::Regular.text_width(text, FIELD_SIZE);
    let field_w = ICON_SIZE + ICON_GAP + text_w;
    let x = right_edge - field_w;

    // The icon box keeps its place even when the glyph file is missing, so
    // field geometry never depends on which assets are on disk.
    if let Some(pdf_name) = assets.icon(icon) {
        content.save_state();
        content.transform([
            ICON_SIZE,
            0.0,
            0.0,
            ICON_SIZE,
            x,
            center_y - ICON_SIZE / 2.0,
        ]);
        content.x_object(Name(pdf_name.as_bytes()));
        content.restore_state();
    }

    content
        .begin_text()
        .set_font(Font::Regular.pdf_name(), FIELD_SIZE)
        .next_line(x + ICON_SIZE + ICON_GAP, center_y - FIELD_SIZE * 0.3)
        .show(Str(&to_winansi_bytes(text)))
        .end_text();

    if let Some(url) = link {
        links.push(LinkAnnotation {
            rect: Rect::new(x, center_y - 8.0, x + field_w, center_y + 8.0),
            url: url.to_string(),
        });
    }

    x - FIELD_GAP
}

/// Draws the band for `page_no` and returns its height. The fill color is
/// reset to the body text color before returning, so callers never restore
/// drawing state themselves.
pub(crate) fn draw(
    content: &mut Content,
    links: &mut Vec<LinkAnnotation>,
    page_no: usize,
    name: &str,
    contact: Option<&Contact>,
    assets: &EmbeddedAssets,
) -> f32 {
    let h = height(page_no, contact.is_some());

    set_fill(content, BG_DARK);
    content
        .rect(0.0, PAGE_HEIGHT - h, PAGE_WIDTH, h)
        .fill_nonzero();

    if let Some((pdf_name, aspect)) = assets.logo() {
        let box_x = if page_no == 1 {
            LOGO_X_FIRST_PAGE
        } else {
            LOGO_X_LATER_PAGES
        };
        let box_h = h - 20.0;
        // Aspect-fit the logo inside its box, centered both ways.
        let (w, img_h) = if aspect > LOGO_BOX_WIDTH / box_h {
            (LOGO_BOX_WIDTH, LOGO_BOX_WIDTH / aspect)
        } else {
            (box_h * aspect, box_h)
        };
        let x = box_x + (LOGO_BOX_WIDTH - w) / 2.0;
        let y = PAGE_HEIGHT - h + 10.0 + (box_h - img_h) / 2.0;
        content.save_state();
        content.transform([w, 0.0, 0.0, img_h, x, y]);
        content.x_object(Name(pdf_name.as_bytes()));
        content.restore_state();
    }

    if page_no == 1 {
        set_fill(content, WHITE);
        let name_w = Font::Bold.text_width(name, NAME_SIZE);
        content
            .begin_text()
            .set_font(Font::Bold.pdf_name(), NAME_SIZE)
            .next_line(RIGHT_MARGIN - name_w, PAGE_HEIGHT - NAME_BASELINE_OFFSET)
            .show(Str(&to_winansi_bytes(name)))
            .end_text();

        if let Some(contact) = contact {
            let row1_y = PAGE_HEIGHT - NAME_BASELINE_OFFSET - 22.0;

            // Row 1: profile handle flush right, phone to its left. A missing
            // profile lets the phone reclaim the full right edge.
            let mut edge = RIGHT_MARGIN;
            if let Some(url) = contact.profile() {
                edge = place_field(
                    content,
                    links,
                    assets,
                    Icon::Profile,
                    handle(url),
                    Some(url),
                    edge,
                    row1_y,
                );
            }
            if let Some(phone) = contact.phone() {
                place_field(content, links, assets, Icon::Phone, phone, None, edge, row1_y);
            }

            // Row 2: code-host handle flush right, email to its left.
            let row2_y = row1_y - ROW_GAP;
            let mut edge = RIGHT_MARGIN;
            if let Some(url) = contact.code() {
                edge = place_field(
                    content,
                    links,
                    assets,
                    Icon::Code,
                    handle(url),
                    Some(url),
                    edge,
                    row2_y,
                );
            }
            if let Some(email) = contact.email() {
                place_field(content, links, assets, Icon::Mail, email, None, edge, row2_y);
            }
        }
    }

    set_fill(content, TEXT);
    h
}

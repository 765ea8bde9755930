use pdf_writer::Str;

use crate::fonts::{Font, to_winansi_bytes};

use super::page::PageSession;
use super::{
    BOTTOM_MARGIN, CONTENT_WIDTH, LEFT_MARGIN, LINE_HEIGHT, RIGHT_MARGIN, SECTION, TEXT, set_fill,
};

const BULLET_INDENT: f32 = 14.0;
const SPACE_BEFORE_SECTION: f32 = 20.0;
const TITLE_RESERVE: f32 = 30.0;
const TITLE_SIZE: f32 = 12.0;

fn draw_line(session: &mut PageSession, text: &str, x: f32, font: Font, size: f32) {
    session
        .content
        .begin_text()
        .set_font(font.pdf_name(), size)
        .next_line(x, session.cursor)
        .show(Str(&to_winansi_bytes(text)))
        .end_text();
}

/// Wrapped paragraph flowing line by line. A page break may fall between any
/// two lines but never inside one.
pub(crate) fn write_paragraph(
    session: &mut PageSession,
    text: &str,
    x: f32,
    width: f32,
    font: Font,
    size: f32,
) {
    set_fill(&mut session.content, TEXT);
    for line in font.wrap(text, size, width) {
        if session.cursor < BOTTOM_MARGIN {
            session.new_page();
        }
        draw_line(session, &line, x, font, size);
        session.cursor -= LINE_HEIGHT;
    }
}

/// Atomic wrapped block, used for entry titles and metadata lines: the page
/// break comes before the first line or not at all. A block taller than a
/// full page falls back to flowing so the break loop terminates.
pub(crate) fn write_block(session: &mut PageSession, text: &str, font: Font, size: f32) {
    let lines = font.wrap(text, size, CONTENT_WIDTH);
    let required = lines.len() as f32 * LINE_HEIGHT;
    if required <= PageSession::full_page_height() {
        session.ensure_room(required);
    }

    set_fill(&mut session.content, TEXT);
    for line in lines {
        if session.cursor < BOTTOM_MARGIN {
            session.new_page();
        }
        draw_line(session, &line, LEFT_MARGIN, font, size);
        session.cursor -= LINE_HEIGHT;
    }
}

/// Atomic bullet: the full wrapped height is measured first, and the bullet
/// starts on a fresh page when it would cross the bottom margin. Marker glyph
/// at the left margin, continuation lines indented.
pub(crate) fn write_bullet(session: &mut PageSession, text: &str) {
    let lines = Font::Regular.wrap(text, 10.0, CONTENT_WIDTH - BULLET_INDENT);
    if lines.is_empty() {
        return;
    }
    let required = lines.len() as f32 * LINE_HEIGHT;
    if required <= PageSession::full_page_height() {
        session.ensure_room(required);
    }

    set_fill(&mut session.content, TEXT);
    if session.cursor < BOTTOM_MARGIN {
        session.new_page();
    }
    draw_line(session, "\u{2022}", LEFT_MARGIN, Font::Bold, 10.0);
    for line in lines {
        if session.cursor < BOTTOM_MARGIN {
            session.new_page();
        }
        draw_line(session, &line, LEFT_MARGIN + BULLET_INDENT, Font::Regular, 10.0);
        session.cursor -= LINE_HEIGHT;
    }
}

/// Section heading: fixed spacing above, a break-reserve so the title never
/// sits alone at the page bottom, the upper-cased title with an underline
/// rule, and a fixed gap below.
pub(crate) fn section_title(session: &mut PageSession, title: &str) {
    session.cursor -= SPACE_BEFORE_SECTION;
    if session.cursor < BOTTOM_MARGIN + TITLE_RESERVE {
        session.new_page();
    }

    set_fill(&mut session.content, SECTION);
    let upper = title.to_uppercase();
    draw_line(session, &upper, LEFT_MARGIN, Font::Bold, TITLE_SIZE);
    session.cursor -= 6.0;
    session
        .content
        .move_to(LEFT_MARGIN, session.cursor)
        .line_to(RIGHT_MARGIN, session.cursor)
        .stroke();
    set_fill(&mut session.content, TEXT);
    session.cursor -= 16.0;
}

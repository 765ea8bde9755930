use pdf_writer::Str;

use crate::fonts::{Font, to_winansi_bytes};
use crate::model::{Category, Domain, Skillset};

use super::page::PageSession;
use super::{
    BG_DARK, BOTTOM_MARGIN, CONTENT_WIDTH, LEFT_MARGIN, SECTION, TABLE_BG, TEXT, WHITE, set_fill,
    set_stroke,
};

const DOMAIN_WIDTH: f32 = 90.0;
const CATEGORY_WIDTH: f32 = 160.0;
const SKILLS_WIDTH: f32 = CONTENT_WIDTH - DOMAIN_WIDTH - CATEGORY_WIDTH;
const COLUMN_WIDTHS: [f32; 3] = [DOMAIN_WIDTH, CATEGORY_WIDTH, SKILLS_WIDTH];
const CELL_PAD_X: f32 = 6.0;
const CELL_PAD_Y: f32 = 4.0;
const CELL_FONT_SIZE: f32 = 9.0;
const CELL_LINE_HEIGHT: f32 = 11.0;
const ASCENT: f32 = 0.75; // fraction of the font size above the baseline
const GRID_WIDTH: f32 = 0.5;
const TABLE_GAP_AFTER: f32 = 14.0;

/// One flattened table row. The domain label is blank on continuation rows of
/// the same domain (vertical-merge emulation).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SkillRow {
    pub(crate) domain: String,
    pub(crate) category: String,
    pub(crate) skills: String,
}

fn joined(skills: &[String]) -> Option<String> {
    let kept: Vec<&str> = skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if kept.is_empty() { None } else { Some(kept.join(", ")) }
}

/// Flattens the skillset variant tree into ordered rows, dropping every list,
/// category, and domain left without skills. Runs once before any drawing;
/// the drawing code never inspects the variant shapes again.
pub(crate) fn skill_rows(skillset: &Skillset) -> Vec<SkillRow> {
    let mut rows = Vec::new();
    for (domain, value) in skillset.0.iter() {
        let first_of_domain = rows.len();
        match value {
            Domain::Flat(skills) => {
                if let Some(skills) = joined(skills) {
                    rows.push(SkillRow {
                        domain: String::new(),
                        category: String::new(),
                        skills,
                    });
                }
            }
            Domain::Grouped(categories) => {
                for (category, value) in categories.iter() {
                    match value {
                        Category::Skills(skills) => {
                            if let Some(skills) = joined(skills) {
                                rows.push(SkillRow {
                                    domain: String::new(),
                                    category: category.to_string(),
                                    skills,
                                });
                            }
                        }
                        Category::Subgroups(subgroups) => {
                            for (subcategory, skills) in subgroups.iter() {
                                if let Some(skills) = joined(skills) {
                                    rows.push(SkillRow {
                                        domain: String::new(),
                                        category: format!("{category} ({subcategory})"),
                                        skills,
                                    });
                                }
                            }
                        }
                    }
                }
            }
        }
        if let Some(first) = rows.get_mut(first_of_domain) {
            first.domain = domain.to_string();
        }
    }
    rows
}

struct RowLayout {
    height: f32,
    cells: [Vec<String>; 3],
}

fn layout_row(domain: &str, category: &str, skills: &str, font: Font) -> RowLayout {
    let texts = [domain, category, skills];
    let mut cells: [Vec<String>; 3] = Default::default();
    let mut max_lines = 1usize;
    for (cell, (text, width)) in cells.iter_mut().zip(texts.iter().zip(COLUMN_WIDTHS)) {
        *cell = font.wrap(text, CELL_FONT_SIZE, width - 2.0 * CELL_PAD_X);
        max_lines = max_lines.max(cell.len());
    }
    RowLayout {
        height: max_lines as f32 * CELL_LINE_HEIGHT + 2.0 * CELL_PAD_Y,
        cells,
    }
}

fn draw_row(session: &mut PageSession, layout: &RowLayout, is_header: bool) {
    let row_top = session.cursor;
    let row_bottom = row_top - layout.height;
    let font = if is_header { Font::Bold } else { Font::Regular };

    set_fill(
        &mut session.content,
        if is_header { BG_DARK } else { TABLE_BG },
    );
    session
        .content
        .rect(LEFT_MARGIN, row_bottom, CONTENT_WIDTH, layout.height)
        .fill_nonzero();

    set_fill(&mut session.content, if is_header { WHITE } else { TEXT });
    let mut cell_x = LEFT_MARGIN;
    for (cell, width) in layout.cells.iter().zip(COLUMN_WIDTHS) {
        let mut baseline = row_top - CELL_PAD_Y - CELL_FONT_SIZE * ASCENT;
        for line in cell {
            // Header labels are centered in their column, body text is flush
            // left inside the cell padding.
            let x = if is_header {
                cell_x + (width - font.text_width(line, CELL_FONT_SIZE)) / 2.0
            } else {
                cell_x + CELL_PAD_X
            };
            session
                .content
                .begin_text()
                .set_font(font.pdf_name(), CELL_FONT_SIZE)
                .next_line(x, baseline)
                .show(Str(&to_winansi_bytes(line)))
                .end_text();
            baseline -= CELL_LINE_HEIGHT;
        }
        cell_x += width;
    }

    // Cell outlines over the backgrounds.
    session.content.save_state();
    session.content.set_line_width(GRID_WIDTH);
    set_stroke(&mut session.content, SECTION);
    let mut x = LEFT_MARGIN;
    for width in COLUMN_WIDTHS {
        session
            .content
            .rect(x, row_bottom, width, layout.height)
            .stroke();
        x += width;
    }
    session.content.restore_state();

    session.cursor = row_bottom;
}

/// Draws the normalized rows. The table is placed as one atomic block: when
/// it cannot fit the rest of the current page it moves whole to a fresh page,
/// and only a table taller than a full page spans pages, with the header row
/// repeated at the top of every continuation page. Breaks fall between rows,
/// never inside one.
pub(crate) fn draw_table(session: &mut PageSession, rows: &[SkillRow]) {
    let header = layout_row("Domain", "Category", "Skills", Font::Bold);
    let layouts: Vec<RowLayout> = rows
        .iter()
        .map(|row| layout_row(&row.domain, &row.category, &row.skills, Font::Regular))
        .collect();
    let total: f32 = header.height + layouts.iter().map(|l| l.height).sum::<f32>();

    log::debug!(
        "Skills table: {} rows, {:.1}pt total, {:.1}pt remaining on page {}",
        rows.len(),
        total,
        session.cursor - BOTTOM_MARGIN,
        session.page_no(),
    );

    if session.cursor - total < BOTTOM_MARGIN {
        session.new_page();
    }

    draw_row(session, &header, true);
    for layout in &layouts {
        if session.cursor - layout.height < BOTTOM_MARGIN {
            session.new_page();
            draw_row(session, &header, true);
        }
        draw_row(session, layout, false);
    }

    set_fill(&mut session.content, TEXT);
    session.cursor -= TABLE_GAP_AFTER;
}

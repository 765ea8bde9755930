mod flow;
mod header;
mod page;
mod table;

use std::time::Instant;

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::assets::Assets;
use crate::error::Error;
use crate::fonts::Font;
use crate::model::{Entry, Resume};

use page::PageSession;

// A4 portrait, in points.
pub(crate) const PAGE_WIDTH: f32 = 595.276;
pub(crate) const PAGE_HEIGHT: f32 = 841.89;
pub(crate) const LEFT_MARGIN: f32 = 72.0;
pub(crate) const RIGHT_MARGIN: f32 = PAGE_WIDTH - 72.0;
pub(crate) const BOTTOM_MARGIN: f32 = 72.0;
pub(crate) const CONTENT_WIDTH: f32 = RIGHT_MARGIN - LEFT_MARGIN;
pub(crate) const LINE_HEIGHT: f32 = 14.0;
/// Gap between the header band and the first content baseline.
pub(crate) const CONTENT_TOP_PAD: f32 = 30.0;

// Palette.
pub(crate) const BG_DARK: [u8; 3] = [0x0A, 0x0F, 0x20];
pub(crate) const SECTION: [u8; 3] = [0x0B, 0x3A, 0x3E];
pub(crate) const TEXT: [u8; 3] = [0x09, 0x14, 0x48];
pub(crate) const TABLE_BG: [u8; 3] = [0xF7, 0xF9, 0xFC];
pub(crate) const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];

pub(crate) fn set_fill(content: &mut Content, [r, g, b]: [u8; 3]) {
    content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
}

pub(crate) fn set_stroke(content: &mut Content, [r, g, b]: [u8; 3]) {
    content.set_stroke_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    History,
    Project,
}

fn draw_entry(session: &mut PageSession, entry: &Entry, kind: EntryKind) {
    let organization = entry.organization.trim();
    let title = if kind == EntryKind::History && !organization.is_empty() {
        format!("{} at {}", entry.title, organization)
    } else {
        entry.title.clone()
    };
    flow::write_block(session, &title, Font::Bold, 10.0);

    let metadata = match kind {
        EntryKind::History => {
            let timespan = entry.timespan.trim();
            (!timespan.is_empty()).then(|| timespan.to_string())
        }
        EntryKind::Project => {
            let tags: Vec<&str> = entry
                .tags
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect();
            (!tags.is_empty()).then(|| format!("Technologies: {}", tags.join(", ")))
        }
    };
    if let Some(metadata) = metadata {
        session.cursor -= 2.0;
        flow::write_block(session, &metadata, Font::Regular, 9.3);
    }
    session.cursor -= 3.0;

    for point in &entry.points {
        flow::write_bullet(session, point);
    }
    session.cursor -= 8.0;
}

/// Renders `resume` into finished PDF bytes. Pure and deterministic: the same
/// document renders to the same bytes, and all pagination state lives on a
/// session local to this call.
pub fn render(resume: &Resume, show_contact: bool, assets: &Assets) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    // Non-embedded base-14 fonts; layout metrics come from `fonts::Font`.
    let font_refs = [(Font::Regular, alloc()), (Font::Bold, alloc())];
    for (font, font_ref) in font_refs {
        pdf.type1_font(font_ref)
            .base_font(font.base_font())
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let embedded = assets.register(&mut pdf, &mut alloc);

    let name = resume.display_name();
    let contact = if show_contact {
        resume.contact.as_ref().filter(|c| c.has_fields())
    } else {
        None
    };

    let mut session = PageSession::new(name, contact, &embedded);

    let summary = resume.summary.join(" ");
    if !summary.trim().is_empty() {
        log::info!("Rendering Objectives section");
        // The first section sits flush with the content top; give back the
        // spacing the title is about to take.
        session.cursor += 20.0;
        flow::section_title(&mut session, "Objectives");
        flow::write_paragraph(
            &mut session,
            &summary,
            LEFT_MARGIN,
            CONTENT_WIDTH,
            Font::Regular,
            10.0,
        );
        session.cursor -= 10.0;
    } else {
        log::debug!("No summary provided, skipping Objectives section");
    }

    let sections = &resume.sections;

    if !sections.career_summary.is_empty() {
        log::info!("Rendering Career Summary section");
        flow::section_title(&mut session, "Career Summary");
        for point in &sections.career_summary {
            flow::write_bullet(&mut session, point);
        }
    } else {
        log::debug!("No Career Summary data found");
    }

    let rows = table::skill_rows(&sections.skillset);
    if !rows.is_empty() {
        log::info!("Rendering Skillset section ({} rows)", rows.len());
        flow::section_title(&mut session, "Skillset");
        table::draw_table(&mut session, &rows);
    } else {
        log::debug!("No Skillset data found");
    }

    if !sections.professional_history.is_empty() {
        log::info!("Rendering Employment History section");
        flow::section_title(&mut session, "Employment History");
        for entry in &sections.professional_history {
            draw_entry(&mut session, entry, EntryKind::History);
        }
    } else {
        log::debug!("No Professional History found");
    }

    if !sections.project_showcase.is_empty() {
        log::info!("Rendering {} project(s)", sections.project_showcase.len());
        flow::section_title(&mut session, "Project Showcase");
        for entry in &sections.project_showcase {
            draw_entry(&mut session, entry, EntryKind::Project);
        }
    } else {
        log::debug!("No projects found");
    }

    if !sections.education.is_empty() {
        log::info!("Rendering Education section");
        flow::section_title(&mut session, "Education");
        for line in &sections.education {
            flow::write_bullet(&mut session, line);
        }
    } else {
        log::debug!("No Education data found");
    }

    let (contents, page_links) = session.finish();
    let t_layout = t0.elapsed();

    // Assembly: annotations, content streams, page tree, shared resources.
    let n = contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let page_annot_refs: Vec<Vec<Ref>> = page_links
        .iter()
        .map(|links| {
            links
                .iter()
                .map(|link| {
                    let annot_ref = alloc();
                    let mut annot = pdf.annotation(annot_ref);
                    annot
                        .subtype(AnnotationType::Link)
                        .rect(link.rect)
                        .border(0.0, 0.0, 0.0, None);
                    annot
                        .action()
                        .action_type(ActionType::Uri)
                        .uri(Str(link.url.as_bytes()));
                    annot_ref
                })
                .collect()
        })
        .collect();

    for (i, content) in contents.into_iter().enumerate() {
        pdf.stream(content_ids[i], &content.finish());
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_ids[i]);
        if !page_annot_refs[i].is_empty() {
            page.annotations(page_annot_refs[i].iter().copied());
        }
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for (font, font_ref) in font_refs {
                fonts.pair(font.pdf_name(), font_ref);
            }
        }
        if !embedded.xobjects.is_empty() {
            let mut xobjects = resources.x_objects();
            for (xobj_name, xobj_ref) in &embedded.xobjects {
                xobjects.pair(Name(xobj_name.as_bytes()), *xobj_ref);
            }
        }
    }

    let t_assembly = t0.elapsed();
    log::info!(
        "Render phases: layout={:.1}ms, assembly={:.1}ms ({} pages)",
        t_layout.as_secs_f64() * 1000.0,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
        n,
    );

    Ok(pdf.finish())
}

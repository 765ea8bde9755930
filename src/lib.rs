//! Renders structured resume documents into paginated PDF files.
//!
//! The input is the JSON document an upstream extraction agent produces
//! ([`Resume`]); the output is a multi-page A4 PDF with a page-dependent
//! header band, flowed body sections, and a row-atomic skills table. Text
//! extraction from source files, the language-model normalization itself, and
//! folder watching all live outside this crate.

mod assets;
mod error;
mod fonts;
mod model;
mod pdf;

pub use assets::Assets;
pub use error::Error;
pub use model::{Category, Contact, Domain, Entry, OrderedMap, Resume, Sections, Skillset};
pub use pdf::render;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Knobs for [`generate_resume_pdf`].
pub struct RenderOptions {
    /// Draw the contact rows in the first-page header.
    pub show_contact: bool,
    /// Directory the finished file lands in; created on demand.
    pub output_dir: PathBuf,
    /// Directory holding the header icon and logo PNGs.
    pub assets_dir: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_contact: true,
            output_dir: PathBuf::from("OutputFolder"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

/// File-name-safe candidate name: whitespace runs become `_`, anything other
/// than ASCII alphanumerics, `-` and `_` is dropped.
fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for part in name.split_whitespace() {
        let kept: String = part
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if kept.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('_');
        }
        out.push_str(&kept);
    }
    if out.is_empty() { "Unknown".to_string() } else { out }
}

fn output_path(dir: &Path, name: &str) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{}_{}.pdf", sanitize_name(name), timestamp))
}

/// Renders `resume` and writes the finished PDF into the output directory,
/// returning the file's path.
///
/// The bytes go to a temporary file in the same directory first and move to
/// the final timestamped path only after a fully successful render, so a
/// failed render never leaves a partial file at the public path.
pub fn generate_resume_pdf(resume: &Resume, options: &RenderOptions) -> Result<PathBuf, Error> {
    let t0 = Instant::now();
    log::info!("Starting PDF generation for {}", resume.display_name());

    let assets = Assets::load(&options.assets_dir);
    let bytes = pdf::render(resume, options.show_contact, &assets)?;
    let t_render = t0.elapsed();

    std::fs::create_dir_all(&options.output_dir)?;
    let path = output_path(&options.output_dir, resume.display_name());
    let mut tmp = tempfile::NamedTempFile::new_in(&options.output_dir)?;
    tmp.write_all(&bytes)?;
    tmp.persist(&path).map_err(|e| Error::Io(e.error))?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes at {})",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
        path.display(),
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_safe_chars_and_joins_words() {
        assert_eq!(sanitize_name("Jane Doe"), "Jane_Doe");
        assert_eq!(sanitize_name("Shetty Gaurav Jagadeesha"), "Shetty_Gaurav_Jagadeesha");
        assert_eq!(sanitize_name("Anne-Marie O'Neill"), "Anne-Marie_ONeill");
        assert_eq!(sanitize_name("  spaced   out  "), "spaced_out");
    }

    #[test]
    fn sanitize_falls_back_on_unusable_names() {
        assert_eq!(sanitize_name(""), "Unknown");
        assert_eq!(sanitize_name("///"), "Unknown");
    }

    #[test]
    fn output_path_lands_in_dir_with_pdf_extension() {
        let path = output_path(Path::new("OutputFolder"), "Jane Doe");
        assert!(path.starts_with("OutputFolder"));
        let file = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file.starts_with("Jane_Doe_"), "{file}");
        assert!(file.ends_with(".pdf"), "{file}");
    }
}

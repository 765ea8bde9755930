mod common;

use std::path::Path;

use common::resume;
use serde_json::json;
use vitae_pdf::{RenderOptions, generate_resume_pdf};

fn options(dir: &Path) -> RenderOptions {
    RenderOptions {
        show_contact: true,
        output_dir: dir.to_path_buf(),
        // No artwork on disk; the render tolerates that.
        assets_dir: dir.join("no-assets-here"),
    }
}

#[test]
fn writes_one_finished_pdf_into_the_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let doc = resume(json!({
        "name": "Jane Doe",
        "sections": {"Education": ["B.S. in Z"]}
    }));

    let path = generate_resume_pdf(&doc, &options(dir.path())).unwrap();

    assert_eq!(path.parent(), Some(dir.path()));
    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("Jane_Doe_"), "{file_name}");
    assert!(file_name.ends_with(".pdf"), "{file_name}");

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    // No temp files left behind: the directory holds exactly the output.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries.len(), 1, "{entries:?}");
}

#[test]
fn creates_the_output_dir_on_demand() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("out/deeper");
    let doc = resume(json!({"name": "Nested Out"}));

    let mut opts = options(dir.path());
    opts.output_dir = nested.clone();
    let path = generate_resume_pdf(&doc, &opts).unwrap();

    assert!(nested.is_dir());
    assert!(path.starts_with(&nested));
}

#[test]
fn unusable_output_dir_fails_without_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the output directory should be.
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"in the way").unwrap();

    let doc = resume(json!({"name": "Doomed Render"}));
    let mut opts = options(dir.path());
    opts.output_dir = blocked.clone();

    assert!(generate_resume_pdf(&doc, &opts).is_err());
    // The blocking file is untouched and no PDF appeared anywhere.
    assert_eq!(std::fs::read(&blocked).unwrap(), b"in the way");
}

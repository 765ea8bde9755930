use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use vitae_pdf::{RenderOptions, Resume, generate_resume_pdf};

/// Render a structured resume JSON document to a paginated PDF.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Resume JSON file (the extraction agent's output).
    input: PathBuf,

    /// Directory the finished PDF lands in.
    #[arg(long, default_value = "OutputFolder")]
    output_dir: PathBuf,

    /// Directory holding the header icon and logo PNGs.
    #[arg(long, default_value = "assets")]
    assets_dir: PathBuf,

    /// Leave the contact rows out of the first-page header.
    #[arg(long)]
    no_contact: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let input = match std::fs::read_to_string(&args.input) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: cannot read {}: {e}", args.input.display());
            return ExitCode::FAILURE;
        }
    };
    let resume = match Resume::from_json(&input) {
        Ok(resume) => resume,
        Err(e) => {
            eprintln!("error: invalid resume document: {e}");
            return ExitCode::FAILURE;
        }
    };

    let options = RenderOptions {
        show_contact: !args.no_contact,
        output_dir: args.output_dir,
        assets_dir: args.assets_dir,
    };

    match generate_resume_pdf(&resume, &options) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

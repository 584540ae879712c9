//! CLI argument handling end to end, short of spawning the binary.

use clap::Parser;
use pdfstitch::cli::{Cli, Command};
use pdfstitch::config::OverwriteMode;
use pdfstitch::merge::merge_selections;

use crate::common::{page_tags, write_tagged_pdf};

#[tokio::test]
async fn test_merge_args_drive_a_real_merge() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    write_tagged_pdf(&a, "a", 3);
    write_tagged_pdf(&b, "b", 2);

    let cli = Cli::try_parse_from([
        "pdfstitch",
        "merge",
        &format!("{}=1-2", a.display()),
        &b.display().to_string(),
        "-o",
        &dir.path().join("out.pdf").display().to_string(),
        "--force",
    ])
    .unwrap();

    let Command::Merge(args) = cli.command else {
        panic!("expected merge subcommand");
    };
    let config = args.to_config().await.unwrap();
    assert_eq!(config.overwrite_mode, OverwriteMode::Force);

    let outcome = merge_selections(&config.selections).await.unwrap();
    assert_eq!(page_tags(&outcome.document), vec!["a-0", "a-1", "b-0", "b-1"]);
}

#[tokio::test]
async fn test_plan_file_merge() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    write_tagged_pdf(&a, "a", 2);
    write_tagged_pdf(&b, "b", 2);

    let plan_path = dir.path().join("plan.json");
    std::fs::write(
        &plan_path,
        format!(
            r#"[{{"filename": "{}", "ranges": "2"}}, {{"filename": "{}"}}]"#,
            a.display(),
            b.display()
        ),
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "pdfstitch",
        "merge",
        "--plan",
        &plan_path.display().to_string(),
        "-o",
        &dir.path().join("out.pdf").display().to_string(),
    ])
    .unwrap();

    let Command::Merge(args) = cli.command else {
        panic!("expected merge subcommand");
    };
    let config = args.to_config().await.unwrap();
    assert_eq!(config.selections.len(), 2);

    let outcome = merge_selections(&config.selections).await.unwrap();
    assert_eq!(page_tags(&outcome.document), vec!["a-1", "b-0", "b-1"]);
}

#[tokio::test]
async fn test_glob_input_merges_all_matches() {
    let dir = tempfile::tempdir().unwrap();
    write_tagged_pdf(&dir.path().join("x1.pdf"), "x1", 1);
    write_tagged_pdf(&dir.path().join("x2.pdf"), "x2", 2);

    let cli = Cli::try_parse_from([
        "pdfstitch",
        "merge",
        &format!("{}/x*.pdf", dir.path().display()),
        "-o",
        &dir.path().join("out.pdf").display().to_string(),
    ])
    .unwrap();

    let Command::Merge(args) = cli.command else {
        panic!("expected merge subcommand");
    };
    let config = args.to_config().await.unwrap();
    assert_eq!(config.selections.len(), 2);

    let outcome = merge_selections(&config.selections).await.unwrap();
    assert_eq!(page_tags(&outcome.document), vec!["x1-0", "x2-0", "x2-1"]);
}

#[test]
fn test_inspect_requires_inputs() {
    assert!(Cli::try_parse_from(["pdfstitch", "inspect"]).is_err());
}

#[test]
fn test_convert_parses_target_format() {
    let cli = Cli::try_parse_from([
        "pdfstitch", "convert", "report.docx", "--to", "pdf", "--outdir", "/tmp",
    ])
    .unwrap();

    let Command::Convert(args) = cli.command else {
        panic!("expected convert subcommand");
    };
    assert_eq!(args.inputs.len(), 1);
}

//! End-to-end tests for the `icon-font-to-png` binary.

use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

const FIXTURE_CSS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../icon-font/tests/fixtures/demo-icons.css"
);
const FIXTURE_TTF: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../icon-font/tests/fixtures/DejaVuSansMono.ttf"
);

fn run(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_icon-font-to-png"))
        .args(["--css", FIXTURE_CSS, "--ttf", FIXTURE_TTF])
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("cannot run icon-font-to-png")
}

fn stdout(output: &Output) -> String {
    assert!(output.status.success(), "process failed: {output:?}");
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    assert!(!output.status.success(), "process unexpectedly succeeded: {output:?}");
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn png_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

#[test]
fn listing_icons() {
    let dir = tempfile::tempdir().unwrap();
    let output = stdout(&run(&["--list"], dir.path()));
    let names: Vec<_> = output.lines().collect();
    assert_eq!(
        names,
        [
            "arrow-right",
            "block",
            "check",
            "close",
            "heart",
            "missing",
            "space",
            "star",
            "times",
        ]
    );
}

#[test]
fn listing_icons_with_prefix() {
    let dir = tempfile::tempdir().unwrap();
    for flag in ["--keep-prefix", "--keep_prefix"] {
        let output = stdout(&run(&["--list", flag], dir.path()));
        let names: Vec<_> = output.lines().collect();
        assert_eq!(names.len(), 9);
        assert!(names.iter().all(|name| name.starts_with("di-")), "{names:?}");
        assert!(names.contains(&"di-star"));
    }
}

#[test]
fn exporting_single_icon() {
    let dir = tempfile::tempdir().unwrap();
    let output = stdout(&run(&["star"], dir.path()));
    assert!(
        output.contains("Exporting icon 'star' as 'star.png' (16x16 pixels)"),
        "{output}"
    );
    assert!(output.contains("All done"), "{output}");

    let exported = dir.path().join("exported");
    assert_eq!(png_files(&exported), ["star.png"]);
    let image = image::open(exported.join("star.png")).unwrap().into_rgba8();
    assert_eq!(image.dimensions(), (16, 16));
    assert!(image.pixels().any(|pixel| pixel.0[3] > 0));
    assert!(image.pixels().any(|pixel| pixel.0[3] == 0));
}

#[test]
fn exporting_icon_with_custom_name_and_options() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let args = [
        "di-heart",
        "--filename",
        "love.PNG",
        "--size",
        "48",
        "--color",
        "#123123",
        "--scale",
        "0.5",
        "--output-dir",
        out.to_str().unwrap(),
    ];
    let output = stdout(&run(&args, dir.path()));
    assert!(output.contains("as 'love.png' (48x48 pixels)"), "{output}");

    assert_eq!(png_files(&out), ["love.png"]);
    let image = image::open(out.join("love.png")).unwrap().into_rgba8();
    assert_eq!(image.dimensions(), (48, 48));
    let opaque = image.pixels().find(|pixel| pixel.0[3] > 0).unwrap();
    assert_eq!(opaque.0[..3], [0x12, 0x31, 0x23]);
}

#[test]
fn exporting_multiple_icons_with_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let output = stdout(&run(&["star", "di-check", "--filename", "icon-"], dir.path()));
    assert!(output.contains("'icon-star.png'"), "{output}");
    assert!(output.contains("'icon-check.png'"), "{output}");

    let exported = dir.path().join("exported");
    assert_eq!(png_files(&exported), ["icon-check.png", "icon-star.png"]);
}

#[test]
fn exporting_all_icons() {
    let dir = tempfile::tempdir().unwrap();
    let output = stdout(&run(&["ALL", "--keep-prefix"], dir.path()));
    assert!(output.contains("All done"), "{output}");

    // Blank and missing glyphs are skipped.
    let exported = dir.path().join("exported");
    assert_eq!(
        png_files(&exported),
        [
            "di-arrow-right.png",
            "di-block.png",
            "di-check.png",
            "di-close.png",
            "di-heart.png",
            "di-star.png",
            "di-times.png",
        ]
    );
}

#[test]
fn unknown_icon_aborts_export() {
    let dir = tempfile::tempdir().unwrap();
    let err = stderr(&run(&["star", "rocket"], dir.path()));
    assert!(err.contains("Unknown icon name 'rocket'"), "{err}");
    assert!(!dir.path().join("exported").exists());
}

#[test]
fn empty_glyph_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = stderr(&run(&["space"], dir.path()));
    assert!(err.contains("'space'"), "{err}");
    assert!(!dir.path().join("exported/space.png").exists());
}

#[test]
fn icons_are_required() {
    let dir = tempfile::tempdir().unwrap();
    let err = stderr(&run(&[], dir.path()));
    assert!(err.contains("at least one icon name"), "{err}");
}

#[test]
fn invalid_options() {
    let dir = tempfile::tempdir().unwrap();
    for args in [
        &["star", "--scale", "2"][..],
        &["star", "--size", "0"],
        &["star", "--size", "200000"],
        &["star", "--color", "blurple"],
        &["--download", "material"],
    ] {
        stderr(&run(args, dir.path()));
    }
    assert!(!dir.path().join("exported").exists());
}

#[test]
fn size_is_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let err = stderr(&run(&["star", "--size", "8193"], dir.path()));
    assert!(err.contains("8193"), "{err}");

    let output = stdout(&run(&["--list", "--size", "8192"], dir.path()));
    assert!(output.lines().any(|line| line == "star"), "{output}");
}

#[test]
fn sources_are_required() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_icon-font-to-png"))
        .arg("star")
        .current_dir(dir.path())
        .output()
        .unwrap();
    let err = stderr(&output);
    assert!(err.contains("You have to provide CSS and TTF files"), "{err}");

    let missing_css = dir.path().join("missing.css");
    let output = Command::new(env!("CARGO_BIN_EXE_icon-font-to-png"))
        .args(["--css", missing_css.to_str().unwrap(), "--ttf", FIXTURE_TTF, "star"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    let err = stderr(&output);
    assert!(err.contains("missing.css"), "{err}");
}

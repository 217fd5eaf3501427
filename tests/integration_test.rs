use image::{Rgba, RgbaImage};
use launchpad_icon::inspect::read_icon;
use launchpad_icon::style::{LOGO_PATH, OUTPUT_PATH};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs `launchpad-icon` from a temp project root against a solid white logo and checks
/// the frames of the resulting ICO.
#[test]
fn test_icon_generation_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    create_white_logo(root);

    let output = run_generator(root);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "expected exactly two lines, got: {stdout}");
    assert!(lines[0].starts_with("Icon saved to: "));
    assert!(lines[0].ends_with(OUTPUT_PATH));
    assert_eq!(
        lines[1],
        "Sizes: 16x16, 24x24, 32x32, 48x48, 64x64, 128x128, 256x256"
    );

    let icon_path = root.join(OUTPUT_PATH);
    assert!(
        icon_path.exists(),
        "Icon should exist at: {}",
        icon_path.display()
    );

    let frames = read_icon(&icon_path).expect("Generated icon should parse");
    assert_eq!(frames.len(), 7, "ICO should hold seven frames");

    let sizes: Vec<u32> = frames.iter().map(|frame| frame.width).collect();
    assert_eq!(sizes, vec![256, 128, 64, 48, 32, 24, 16]);
    for frame in &frames {
        assert_eq!(frame.width, frame.height, "frames must be square");
        assert_eq!(frame.image.dimensions(), (frame.width, frame.height));
    }

    let largest = &frames[0].image;
    let center = largest.get_pixel(128, 128);
    assert!(center[3] >= 254, "center should be opaque, got {center:?}");
    assert!(center[0] >= 253, "center should be accent orange, got {center:?}");
    assert!(center[1].abs_diff(131) <= 2, "center should be accent orange, got {center:?}");
    assert!(center[2] <= 2, "center should be accent orange, got {center:?}");

    for frame in &frames[..2] {
        let max = frame.width - 1;
        for (x, y) in [(0, 0), (max, 0), (0, max), (max, max)] {
            assert_eq!(
                frame.image.get_pixel(x, y)[3],
                0,
                "corner ({x}, {y}) of the {}px frame should be transparent",
                frame.width
            );
        }
    }

    println!("✓ Icon generated with {} frames", frames.len());
}

/// Two runs over the same input must write identical bytes.
#[test]
fn test_icon_generation_is_deterministic() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    create_white_logo(root);
    let icon_path = root.join(OUTPUT_PATH);

    assert_success(&run_generator(root));
    let first = std::fs::read(&icon_path).expect("Failed to read first icon");

    assert_success(&run_generator(root));
    let second = std::fs::read(&icon_path).expect("Failed to read second icon");

    assert_eq!(first, second, "regenerated icon should be byte-identical");
}

/// A missing logo fails the run and leaves nothing behind.
#[test]
fn test_missing_logo_fails_without_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();

    let output = run_generator(root);
    assert!(!output.status.success(), "run without a logo should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load logo image"),
        "stderr should explain the failure: {stderr}"
    );

    let leftovers: Vec<_> = std::fs::read_dir(root)
        .expect("Failed to list temp directory")
        .collect();
    assert!(leftovers.is_empty(), "no files should be written: {leftovers:?}");
}

/// An output path that can't be replaced fails the run without stray temp files.
#[test]
fn test_unwritable_output_fails_without_leftovers() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    create_white_logo(root);

    // A non-empty directory where the icon should go
    let blocker = root.join(OUTPUT_PATH);
    std::fs::create_dir(&blocker).expect("Failed to create blocking directory");
    std::fs::write(blocker.join("keep.txt"), b"keep").expect("Failed to fill blocking directory");

    let output = run_generator(root);
    assert!(!output.status.success(), "run with a blocked output should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Can't write icon to"),
        "stderr should explain the failure: {stderr}"
    );

    let mut entries: Vec<String> = std::fs::read_dir(root)
        .expect("Failed to list temp directory")
        .map(|entry| {
            entry
                .expect("Failed to read directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["public".to_string(), OUTPUT_PATH.to_string()]);
    assert!(blocker.join("keep.txt").exists());
}

/// Running without arguments is the whole interface; stray flags are refused.
#[test]
fn test_unknown_flag_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    create_white_logo(root);

    let output = Command::new(env!("CARGO_BIN_EXE_launchpad-icon"))
        .current_dir(root)
        .arg("--root")
        .arg(".")
        .output()
        .expect("Failed to run launchpad-icon");

    assert!(!output.status.success(), "unknown flags should be rejected");
    assert!(!root.join(OUTPUT_PATH).exists());
}

/// The library entry point writes the same file the binary does.
#[test]
fn test_generate_icon_from_library() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    create_white_logo(root);

    let written = launchpad_icon::generate_icon(root).expect("generation should succeed");
    assert_eq!(written, root.join(OUTPUT_PATH));

    let from_binary = root.join("from_binary");
    std::fs::create_dir(&from_binary).expect("Failed to create second root");
    create_white_logo(&from_binary);
    assert_success(&run_generator(&from_binary));

    assert_eq!(
        std::fs::read(&written).expect("Failed to read library icon"),
        std::fs::read(from_binary.join(OUTPUT_PATH)).expect("Failed to read binary icon"),
    );
}

fn run_generator(root: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_launchpad-icon"))
        .current_dir(root)
        .output()
        .expect("Failed to run launchpad-icon")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("launchpad-icon command failed");
    }
}

/// Writes a solid white, fully opaque 256x256 logo under `root`.
fn create_white_logo(root: &Path) {
    let logo_path = root.join(LOGO_PATH);
    std::fs::create_dir_all(logo_path.parent().expect("logo path has a parent"))
        .expect("Failed to create logo directory");

    RgbaImage::from_pixel(256, 256, Rgba([255, 255, 255, 255]))
        .save(&logo_path)
        .expect("Failed to save logo");
}

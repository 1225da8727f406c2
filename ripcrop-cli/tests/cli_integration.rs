use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::path::PathBuf;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn ripcrop_cmd() -> Command {
    Command::cargo_bin("ripcrop").expect("Failed to find ripcrop binary")
}

#[test]
fn test_help_lists_commands() {
    ripcrop_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("crop"))
        .stdout(contains("inspect"))
        .stdout(contains("preview"));
}

#[test]
fn test_version() {
    ripcrop_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_crop_non_existent_input() {
    let non_existent_input = PathBuf::from("surely/this/does/not/exist/input.mkv");

    ripcrop_cmd()
        .arg("crop")
        .arg(&non_existent_input)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("No such file"));
}

#[test]
fn test_inspect_rejects_directory() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;

    ripcrop_cmd()
        .arg("inspect")
        .arg(input_dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Folder inputs are not supported"));

    Ok(())
}

#[test]
fn test_crop_invalid_format() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    let input_file = input_dir.path().join("movie.mkv");
    std::fs::write(&input_file, "dummy content")?;

    // Rejected by clap before any file access.
    ripcrop_cmd()
        .arg("crop")
        .arg(&input_file)
        .arg("--format")
        .arg("handbrake")
        .assert()
        .failure()
        .stderr(contains("invalid value"));

    Ok(())
}

#[test]
fn test_crop_unreadable_media_fails() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    let input_file = input_dir.path().join("not_a_video.mkv");
    std::fs::write(&input_file, "dummy content")?;

    // Fails either at the dependency check or when ffprobe rejects the file.
    ripcrop_cmd()
        .arg("crop")
        .arg(&input_file)
        .assert()
        .failure()
        .code(1)
        .stdout("");

    Ok(())
}

#[test]
fn test_preview_non_existent_input() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;

    ripcrop_cmd()
        .current_dir(work_dir.path())
        .arg("preview")
        .arg("surely/this/does/not/exist/input.mkv")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("No such file"));

    // Nothing is saved when detection never ran.
    assert!(!work_dir.path().join("crop.txt").exists());

    Ok(())
}

#[test]
fn test_missing_input_argument() {
    ripcrop_cmd().arg("inspect").assert().failure();
}

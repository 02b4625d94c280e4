//! Command line tests for the memsaver binary

use assert_cmd::Command;
use hound::{SampleFormat, WavSpec, WavWriter};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn write_wav(path: &Path, frames: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let spec = WavSpec { channels: 2, sample_rate: 44100, bits_per_sample: 16, sample_format: SampleFormat::Int };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let v = (i % 64) as i16 * 256;
        writer.write_sample(v).unwrap();
        writer.write_sample(v).unwrap();
    }
    writer.finalize().unwrap();
}

fn memsaver() -> Command {
    let mut cmd = Command::cargo_bin("memsaver").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_converts_directory_with_folder_structure() {
    let temp_dir = TempDir::new().unwrap();
    let samples = temp_dir.path().join("samples");
    let out = temp_dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    write_wav(&samples.join("drums").join("kick.wav"), 2205);
    write_wav(&samples.join("perc").join("kick.wav"), 2205);

    memsaver()
        .arg(&samples)
        .args(["--recursive", "--folder-structure", "-p", "ep_", "-r", "22050", "-w", "1"])
        .arg("-o").arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted: 2 file(s)"))
        .stdout(predicate::str::contains("[1/2] kick.wav"))
        .stdout(predicate::str::contains("Size change: -"));

    assert!(out.join("ep_drums-kick.wav").exists());
    assert!(out.join("ep_perc-kick.wav").exists());

    let reader = hound::WavReader::open(out.join("ep_drums-kick.wav")).unwrap();
    assert_eq!(reader.spec().sample_rate, 22050);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().bits_per_sample, 8);
}

#[test]
fn test_no_files_selected() {
    let temp_dir = TempDir::new().unwrap();

    memsaver()
        .arg("-o").arg(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No files selected"));
}

#[test]
fn test_no_output_folder_selected() {
    let temp_dir = TempDir::new().unwrap();
    let kick = temp_dir.path().join("kick.wav");
    write_wav(&kick, 100);

    memsaver()
        .arg(&kick)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No output folder selected"));
}

#[test]
fn test_warns_when_nothing_converted() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.wav");
    std::fs::write(&broken, b"garbage").unwrap();
    let out = temp_dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();

    memsaver()
        .arg(&broken)
        .arg("-o").arg(&out)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Skipped:"))
        .stderr(predicate::str::contains("no files were converted"));
}

#[test]
fn test_rejects_prefix_with_separator() {
    let temp_dir = TempDir::new().unwrap();
    let kick = temp_dir.path().join("kick.wav");
    write_wav(&kick, 100);

    memsaver()
        .arg(&kick)
        .args(["-p", "../escape_"])
        .arg("-o").arg(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("path separators"));
}

#[test]
fn test_init_config_writes_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("memsaver.toml");

    memsaver()
        .arg("--init-config").arg(&config_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("sample_rate = 44100"));
}

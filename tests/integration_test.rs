/// Integration tests for the run driver
mod common;

use std::fs::{self, File};
use std::io::Write;

use common::{MboxBuilder, Workspace};
use mbox2txt::store::{FILE_NUM_KEY, KvStore};
use mbox2txt::{InputSource, RunConfig, run};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn config(ws: &Workspace, input: InputSource) -> RunConfig {
    RunConfig { input, output_dir: ws.output_dir(), store_path: ws.store_path() }
}

#[test]
fn test_single_file_run() {
    let ws = Workspace::new();
    let mbox = MboxBuilder::new()
        .message("alice@example.com", "hello", &["Hello there", "second line"])
        .message("bob@example.com", "again", &["Reply text", "bye"])
        .build();
    let path = ws.add_input("inbox.mbox", &mbox);

    let summary = run(&config(&ws, InputSource::File(path))).unwrap();

    assert_eq!(summary.files_processed(), 1);
    assert_eq!(summary.totals.messages, 2);
    assert_eq!(ws.output_names(), vec!["0000000000000000.txt"]);

    let output = ws.read_output("0000000000000000.txt");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "From - alice@example.com Mon Jan  1 00:00:00 2001");
    assert_eq!(lines[6], "From - bob@example.com Mon Jan  1 00:00:00 2001");
}

#[test]
fn test_directory_run_one_output_per_input() {
    let ws = Workspace::new();
    for name in ["b.mbox", "a.mbox", "c.mbox"] {
        let mbox = MboxBuilder::new().message(name, "subject", &["Body text"]).build();
        ws.add_input(name, &mbox);
    }

    let summary = run(&config(&ws, InputSource::Directory(ws.input_dir()))).unwrap();

    assert_eq!(summary.files_processed(), 3);
    assert_eq!(
        ws.output_names(),
        vec!["0000000000000000.txt", "0000000000000001.txt", "0000000000000002.txt"]
    );
    // Inputs are processed in file name order
    assert!(ws.read_output("0000000000000000.txt").starts_with("From - a.mbox"));
    assert!(ws.read_output("0000000000000002.txt").starts_with("From - c.mbox"));
}

#[test]
fn test_counter_continues_across_runs() {
    let ws = Workspace::new();
    let path = ws.add_input("inbox", &MboxBuilder::new().message("a", "s", &["Body text"]).build());

    run(&config(&ws, InputSource::File(path.clone()))).unwrap();
    run(&config(&ws, InputSource::File(path))).unwrap();

    assert_eq!(ws.output_names(), vec!["0000000000000000.txt", "0000000000000001.txt"]);
    let store = KvStore::open(&ws.store_path()).unwrap();
    assert_eq!(store.get(FILE_NUM_KEY), Some("0000000000000002"));
}

#[test]
fn test_zip_archives_are_expanded() {
    let ws = Workspace::new();
    let mbox = MboxBuilder::new().message("zipped@example.com", "s", &["Body text"]).build();

    let file = File::create(ws.input_dir().join("archive.zip")).unwrap();
    let mut zip = ZipWriter::new(file);
    zip.start_file("from-zip.mbox", SimpleFileOptions::default()).unwrap();
    zip.write_all(mbox.as_bytes()).unwrap();
    zip.finish().unwrap();

    let summary = run(&config(&ws, InputSource::Directory(ws.input_dir()))).unwrap();

    assert_eq!(summary.files_processed(), 1);
    assert!(ws.input_dir().join("from-zip.mbox").exists());
    assert!(ws.read_output("0000000000000000.txt").starts_with("From - zipped@example.com"));
}

#[test]
fn test_empty_directory_writes_nothing() {
    let ws = Workspace::new();
    let summary = run(&config(&ws, InputSource::Directory(ws.input_dir()))).unwrap();

    assert_eq!(summary.files_processed(), 0);
    assert!(ws.output_names().is_empty());
}

#[test]
fn test_empty_input_still_gets_output_file() {
    let ws = Workspace::new();
    let path = ws.add_input("empty.mbox", "");

    run(&config(&ws, InputSource::File(path))).unwrap();

    assert_eq!(ws.output_names(), vec!["0000000000000000.txt"]);
    assert_eq!(ws.read_output("0000000000000000.txt"), "");
}

#[test]
fn test_corrupt_store_is_fatal() {
    let ws = Workspace::new();
    let path = ws.add_input("inbox", "From a\n");
    fs::write(ws.store_path(), "{ broken").unwrap();

    let err = run(&config(&ws, InputSource::File(path))).unwrap_err();
    assert!(err.to_string().contains("Failed to parse store file"));
    assert!(ws.output_names().is_empty());
}

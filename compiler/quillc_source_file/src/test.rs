use std::{io::Write, path::PathBuf};

use proptest::{prop_assert, prop_assert_eq, proptest};

use crate::{Error, SourceFile, TextSource};

#[test]
fn read_range_counts_characters() {
    let text = "héllo\nworld";

    assert_eq!(text.read_range(3, 1).unwrap(), "éll");
    assert_eq!(text.read_range(100, 6).unwrap(), "world");
    assert_eq!(text.read_range(4, 100).unwrap(), "");
}

#[test]
fn read_lines_keeps_empty_lines() {
    let text = String::from("first\n\nthird\nfourth");

    assert_eq!(text.read_lines(3).unwrap(), vec!["first", "", "third"]);
    assert_eq!(text.read_lines(10).unwrap().len(), 4);
    assert!(text.read_lines(0).unwrap().is_empty());
}

#[test]
fn load_source_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "let x = 1\nlet y = x\n").unwrap();

    let source = SourceFile::load(file.path()).unwrap();

    assert_eq!(source.full_path(), file.path());
    assert_eq!(source.content(), "let x = 1\nlet y = x\n");
    assert_eq!(source.read_lines(1).unwrap(), vec!["let x = 1"]);
    assert_eq!(source.read_range(5, 4).unwrap(), "x = 1");
}

#[test]
fn load_invalid_utf8() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0xff, 0xfe, 0xfd]).unwrap();

    assert!(matches!(SourceFile::load(file.path()), Err(Error::Utf8(_))));
}

#[test]
fn load_missing_file() {
    let directory = tempfile::tempdir().unwrap();

    assert!(matches!(
        SourceFile::load(directory.path().join("missing.ql")),
        Err(Error::Io(_))
    ));
}

proptest! {
    #[test]
    fn read_all_round_trips(content: String) {
        let source = SourceFile::new(content.clone(), PathBuf::from("test"));

        prop_assert_eq!(source.read_all().unwrap(), content);
    }

    #[test]
    fn read_range_is_bounded(
        content in ".*",
        count in 0usize..16,
        offset in 0usize..16,
    ) {
        let read = content.read_range(count, offset).unwrap();

        prop_assert!(read.chars().count() <= count);
        prop_assert!(content.contains(read.as_str()));
    }
}

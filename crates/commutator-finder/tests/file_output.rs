use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use commutator_finder::{
    CaseType, CommutatorFinder, FileSink, FinderConfig, OutputTarget, ResultSink,
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("commfinder-{}-{}", process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(output: OutputTarget) -> FinderConfig {
    FinderConfig {
        max_moves_part_b: 1,
        output,
        retry_delay: Duration::from_millis(1),
        ..FinderConfig::default()
    }
}

#[test_log::test]
fn test_single_file_output() {
    let dir = temp_dir("single");
    let path = dir.join("all.txt").to_string_lossy().into_owned();
    fs::write(&path, "left over from an earlier run\n").unwrap();

    let target = OutputTarget::from_path(&path).unwrap();
    let mut finder = CommutatorFinder::new(config(target), FileSink).unwrap();
    let count = finder.find().unwrap();
    assert!(count > 0);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("left over"));
    assert_eq!(contents.lines().count() as u64, count);
    assert!(contents.contains("[M', U2]\n"), "{contents}");

    fs::remove_dir_all(&dir).unwrap();
}

#[test_log::test]
fn test_directory_output() {
    let dir = temp_dir("split");
    let dir_path = format!("{}/", dir.to_string_lossy());
    let target = OutputTarget::from_path(&dir_path).unwrap();
    assert!(matches!(target, OutputTarget::Directory(_)));

    let mut finder = CommutatorFinder::new(config(target.clone()), FileSink).unwrap();
    let count = finder.find().unwrap();

    let e3_path = target.path_for(CaseType::E3Cycles, 1);
    assert!(e3_path.ends_with("e3cycles1moves.txt"));
    let e3 = FileSink.read_all(&e3_path).unwrap();
    assert!(e3.contains("[M', U2]"), "{e3}");

    let mut total = 0;
    for entry in fs::read_dir(&dir).unwrap() {
        let entry = entry.unwrap();
        let name = entry.file_name().to_string_lossy().into_owned();
        assert!(name.ends_with("1moves.txt"), "{name}");
        total += fs::read_to_string(entry.path()).unwrap().lines().count() as u64;
    }
    assert_eq!(total, count);

    // A second run starts from empty files
    let mut finder = CommutatorFinder::new(config(target), FileSink).unwrap();
    assert_eq!(finder.find().unwrap(), count);
    assert_eq!(FileSink.read_all(&e3_path).unwrap(), e3);

    fs::remove_dir_all(&dir).unwrap();
}

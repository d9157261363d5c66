use std::fs;
use std::io::Write;
use std::time::{Duration, Instant};

use logplot::data::loader::{read_log, read_log_until, wait_for_file};
use logplot::error::LogError;

#[test]
fn missing_file_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    assert!(read_log(&path, 10).unwrap().is_none());
}

#[test]
fn empty_and_header_only_files_are_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");

    fs::write(&path, "").unwrap();
    assert!(read_log(&path, 10).unwrap().is_none());

    fs::write(&path, "x(t), y(t)\n").unwrap();
    assert!(read_log(&path, 10).unwrap().is_none());
}

#[test]
fn returns_at_most_n_rows_with_trimmed_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "x(t), y(t), x_s(t), y_s(t)").unwrap();
    for i in 0..250 {
        writeln!(file, "{i}.000,{}.000,0.000,0.000", i * 2).unwrap();
    }
    drop(file);

    for n in [1, 100, 250, 1000] {
        let table = read_log(&path, n).unwrap().unwrap();
        assert_eq!(table.columns, vec!["x(t)", "y(t)", "x_s(t)", "y_s(t)"]);
        assert_eq!(table.column_data.len(), 4);
        assert_eq!(table.row_count(), n.min(250));
        let x = table.numeric_column("x(t)").unwrap();
        assert_eq!(*x.last().unwrap(), 249.0);
        assert_eq!(*table.index_column().last().unwrap(), 249.0);
    }
}

#[test]
fn growing_file_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    fs::write(&path, "a,b\n").unwrap();
    assert!(read_log(&path, 10).unwrap().is_none());

    let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
    write!(file, "1,2\n2,").unwrap();
    let table = read_log(&path, 10).unwrap().unwrap();
    assert_eq!(table.row_count(), 2);
    assert!(table.numeric_column("b").unwrap()[1].is_nan());

    writeln!(file, "3").unwrap();
    let table = read_log(&path, 10).unwrap().unwrap();
    assert_eq!(table.numeric_column("b"), Some(vec![2.0, 3.0]));
}

#[test]
fn blocking_read_times_out_with_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    fs::write(&path, "a,b\n").unwrap();

    let start = Instant::now();
    let result = read_log_until(
        &path,
        10,
        Duration::from_millis(50),
        Duration::from_millis(10),
    )
    .unwrap();
    assert!(result.is_none());
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn blocking_read_returns_existing_data_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    fs::write(&path, "a\n1\n").unwrap();
    let table = read_log_until(&path, 10, Duration::from_secs(5), Duration::from_secs(1))
        .unwrap()
        .unwrap();
    assert_eq!(table.row_count(), 1);
}

#[test]
fn waiting_for_a_file_that_never_appears() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.txt");
    let (timeout, poll) = (Duration::from_millis(30), Duration::from_millis(5));
    let err = wait_for_file(&path, timeout, poll).unwrap_err();
    assert!(matches!(err, LogError::FileNotYetPresent { .. }));

    fs::write(&path, "").unwrap();
    assert!(wait_for_file(&path, timeout, poll).is_ok());
}

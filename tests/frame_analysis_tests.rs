/// End-to-end tests for the frame-analysis command, driven through a
/// timing CSV produced the same way the timing-csv command writes it.
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use har_timing_tools::commands::frame_analysis;

/// Timing table: an HTML request at T0, then three png frames at
/// T0+1s/+2s/+4s. The third frame failed (403) and reports no
/// Content-Length or receive timing.
const TIMING_CSV: &str = "\
startedDateTime,request.method,request.url,response.status,response.content.size,response.content.mimeType,response.headers.contentLength,time,timings.blocked,timings.dns,timings.connect,timings.send,timings.wait,timings.receive,timings.ssl
2025-06-01T10:00:00.000+09:00,GET,https://e.com/index.html,200,512,text/html,512,100,1,-1,-1,0.2,80,18.8,-1
2025-06-01T10:00:01.000+09:00,GET,https://e.com/1.png,200,1000,image/png,1000,500,0.5,-1,-1,0.1,400,30,-1
2025-06-01T10:00:02.000+09:00,GET,https://e.com/2.png,200,3000,image/png,3000,400,0.5,-1,-1,0.1,300,50,-1
2025-06-01T10:00:04.000+09:00,GET,https://e.com/3.png,403,0,image/png,,200,0.5,-1,-1,0.1,150,-1,-1
";

fn write_timing_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("timings.csv");
    fs::write(&path, TIMING_CSV).unwrap();
    path
}

fn parse_rows(data: &str) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_frame_analysis_elapsed_and_summary_files() {
    let dir = TempDir::new().unwrap();
    let csv_path = write_timing_csv(&dir);
    let output = dir.path().join("frames.csv");

    let files = vec![csv_path.to_str().unwrap().to_string()];
    frame_analysis::run(&files, Some(output.to_str().unwrap()), &[1, 2, 5], "image/png").unwrap();

    let elapsed = fs::read_to_string(&output).unwrap();
    let header = elapsed.lines().next().unwrap();
    assert_eq!(
        header,
        "har_file,first_startedDateTime,1_frame_elapsed_seconds,2_frame_elapsed_seconds,5_frame_elapsed_seconds"
    );

    let rows = parse_rows(&elapsed);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row[0], "default");
    assert_eq!(row[1], "2025-06-01T10:00:00.000+09:00");
    // First frame: starts 1 s after the first request, takes 500 ms.
    assert!((row[2].parse::<f64>().unwrap() - 1.5).abs() < 1e-9);
    // Second frame: 2 s offset plus 400 ms.
    assert!((row[3].parse::<f64>().unwrap() - 2.4).abs() < 1e-9);
    // Only three frames exist, so the 5th is unavailable.
    assert_eq!(row[4], "");

    let summary_path = dir.path().join("frames_summary.csv");
    let summary = fs::read_to_string(&summary_path).unwrap();
    let rows = parse_rows(&summary);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    // har_file, frame_count, fail_count, total_content_length
    assert_eq!(row[0], "default");
    assert_eq!(row[1], "3");
    assert_eq!(row[2], "1");
    assert_eq!(row[3], "4000");
    // receive stats over {30, 50}: the -1 sentinel is excluded.
    assert_eq!(row[4], "40");
    assert_eq!(row[5], "40");
    assert_eq!(row[6], "30");
    assert_eq!(row[7], "50");
    assert_eq!(row[8], "10");
    // total_time: frames span 10:00:01 .. 10:00:04 + 200 ms.
    assert!((row[9].parse::<f64>().unwrap() - 3.2).abs() < 1e-9);
    // throughput: 4000 bytes over 3.2 s.
    assert!((row[10].parse::<f64>().unwrap() - 1250.0).abs() < 1e-9);
}

#[test]
fn test_frame_analysis_no_matching_frames() {
    let dir = TempDir::new().unwrap();
    let csv_path = write_timing_csv(&dir);
    let output = dir.path().join("frames.csv");

    let files = vec![csv_path.to_str().unwrap().to_string()];
    frame_analysis::run(
        &files,
        Some(output.to_str().unwrap()),
        &[1],
        "application/wasm",
    )
    .unwrap();

    let rows = parse_rows(&fs::read_to_string(&output).unwrap());
    assert_eq!(rows[0][2], "");

    let summary = fs::read_to_string(dir.path().join("frames_summary.csv")).unwrap();
    let rows = parse_rows(&summary);
    let row = &rows[0];
    assert_eq!(row[1], "0"); // frame_count
    assert_eq!(row[2], "0"); // fail_count
    assert_eq!(row[9], "0"); // total_time
    assert_eq!(row[10], ""); // throughput undefined
}

#[test]
fn test_frame_analysis_grouped_by_har_file_column() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("combined.csv");
    let combined = "\
startedDateTime,request.method,request.url,response.status,response.content.size,response.content.mimeType,response.headers.contentLength,time,timings.blocked,timings.dns,timings.connect,timings.send,timings.wait,timings.receive,timings.ssl,har_file
2025-06-01T10:00:00.000+09:00,GET,https://e.com/1.png,200,1000,image/png,1000,500,0.5,-1,-1,0.1,400,30,-1,a.har
2025-06-01T10:00:00.000+09:00,GET,https://e.com/1.png,200,1000,image/png,1000,250,0.5,-1,-1,0.1,200,20,-1,b.har
";
    fs::write(&csv_path, combined).unwrap();
    let output = dir.path().join("frames.csv");

    let files = vec![csv_path.to_str().unwrap().to_string()];
    frame_analysis::run(&files, Some(output.to_str().unwrap()), &[1], "image/png").unwrap();

    let rows = parse_rows(&fs::read_to_string(&output).unwrap());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "a.har");
    assert_eq!(rows[1][0], "b.har");
    assert!((rows[0][2].parse::<f64>().unwrap() - 0.5).abs() < 1e-9);
    assert!((rows[1][2].parse::<f64>().unwrap() - 0.25).abs() < 1e-9);
}

#[test]
fn test_frame_analysis_rejects_invalid_table() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("bogus.csv");
    fs::write(&csv_path, "this,is\nnot,a timing table\n").unwrap();

    let files = vec![csv_path.to_str().unwrap().to_string()];
    let result = frame_analysis::run(&files, None, &[1], "image/png");
    assert!(result.is_err());
}

#[test]
fn test_frame_analysis_sorts_rows_within_group() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("unsorted.csv");
    // Rows out of chronological order: the frame precedes the first
    // request in the file but not in time.
    let unsorted = "\
startedDateTime,request.method,request.url,response.status,response.content.size,response.content.mimeType,response.headers.contentLength,time,timings.blocked,timings.dns,timings.connect,timings.send,timings.wait,timings.receive,timings.ssl
2025-06-01T10:00:03.000+09:00,GET,https://e.com/1.png,200,1000,image/png,1000,1000,0.5,-1,-1,0.1,400,30,-1
2025-06-01T10:00:00.000+09:00,GET,https://e.com/index.html,200,512,text/html,512,100,1,-1,-1,0.2,80,18.8,-1
";
    fs::write(&csv_path, unsorted).unwrap();
    let output = dir.path().join("frames.csv");

    let files = vec![csv_path.to_str().unwrap().to_string()];
    frame_analysis::run(&files, Some(output.to_str().unwrap()), &[1], "image/png").unwrap();

    let rows = parse_rows(&fs::read_to_string(&output).unwrap());
    // First request overall is the HTML at 10:00:00; the frame completes
    // at 10:00:03 + 1 s.
    assert_eq!(rows[0][1], "2025-06-01T10:00:00.000+09:00");
    assert!((rows[0][2].parse::<f64>().unwrap() - 4.0).abs() < 1e-9);
}

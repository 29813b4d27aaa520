use chrono::NaiveDate;
use lifecal_core::{
    generate_calendar, CalendarError, CalendarRequest, DateInputError, Orientation, RenderError,
};
use lopdf::content::Content;
use lopdf::Document;
use std::path::PathBuf;

fn request(output_dir: PathBuf) -> CalendarRequest {
    CalendarRequest {
        birthdate: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
        today: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
        title: "A 90-Year Human Life in Weeks".to_string(),
        orientation: Orientation::Landscape,
        output_dir,
    }
}

#[test]
fn generate_writes_named_single_page_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let report = generate_calendar(&request(dir.path().to_path_buf())).unwrap();

    assert_eq!(
        report.output_path,
        dir.path().join("life_calendar_1990-05-15.pdf")
    );
    assert_eq!(report.weeks_lived, 1774);
    assert_eq!(report.total_weeks, 4680);
    assert_eq!(report.weeks_remaining, 4680 - 1774);
    assert!((report.percentage_lived - 1774.0 / 4680.0 * 100.0).abs() < 1e-9);

    let doc = Document::load(&report.output_path).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);

    let page_id = *pages.values().next().unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let filled = content
        .operations
        .iter()
        .filter(|op| op.operator == "B")
        .count();
    let cells = content
        .operations
        .iter()
        .filter(|op| op.operator == "re")
        .count();
    assert_eq!(cells, 4680);
    assert_eq!(filled, 1774);
}

#[test]
fn generate_is_repeatable_for_fixed_dates() {
    let dir = tempfile::tempdir().unwrap();
    let first = generate_calendar(&request(dir.path().to_path_buf())).unwrap();
    let first_bytes = std::fs::read(&first.output_path).unwrap();
    let second = generate_calendar(&request(dir.path().to_path_buf())).unwrap();
    let second_bytes = std::fs::read(&second.output_path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn ages_past_ninety_saturate_the_grid() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = request(dir.path().to_path_buf());
    req.birthdate = NaiveDate::from_ymd_opt(1920, 1, 1).unwrap();
    req.orientation = Orientation::Portrait;

    let report = generate_calendar(&req).unwrap();
    assert!(report.weeks_lived > 4680);
    assert_eq!(report.weeks_remaining, 0);
    assert_eq!(report.current_week, None);
    assert!(report.percentage_lived > 100.0);
    assert!(report.output_path.exists());
}

#[test]
fn future_birthdate_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = request(dir.path().to_path_buf());
    req.birthdate = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();

    let err = generate_calendar(&req).unwrap_err();
    assert!(matches!(
        err,
        CalendarError::Input(DateInputError::FutureDate { .. })
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_output_directory_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate_calendar(&request(dir.path().join("does-not-exist"))).unwrap_err();

    match err {
        CalendarError::Render(RenderError::Write { path, .. }) => {
            assert!(path.ends_with("life_calendar_1990-05-15.pdf"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn report_serializes_summary_fields() {
    let dir = tempfile::tempdir().unwrap();
    let report = generate_calendar(&request(dir.path().to_path_buf())).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["weeks_lived"], 1774);
    assert_eq!(json["total_weeks"], 4680);
    assert_eq!(json["lifespan"]["birthdate"], "1990-05-15");
    assert_eq!(json["lifespan"]["as_of"], "2024-05-15");
    assert_eq!(json["current_week"], serde_json::json!([6, 34]));

    let lines = report.summary_lines();
    assert_eq!(
        lines[0],
        "You have lived 1,774 weeks out of 4,680 possible weeks."
    );
    assert_eq!(lines[1], "That's 37.9% of a 90-year life.");
}

use super::*;

const HEADER: &str =
    "Name,Latitude,Longitude,Categories,State,LocationCity,Description,ImageURL,ImageAltText,Website";

fn names(feed: &NormalizedFeed) -> Vec<&str> {
    feed.records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn alpha_beta_feed_yields_one_record() {
    let text = "Name,Latitude,Longitude,Categories,State\n\
                Alpha,40.0,-75.0,\"Food, Drink\",NY\n\
                Beta,not-a-number,-75.0,Food,NY\n";
    let feed = normalize_feed(text);

    assert_eq!(names(&feed), vec!["Alpha"]);
    let alpha = &feed.records[0];
    assert!((alpha.latitude - 40.0).abs() < f64::EPSILON);
    assert!((alpha.longitude - (-75.0)).abs() < f64::EPSILON);
    assert_eq!(alpha.categories, vec!["Food", "Drink"]);
    assert_eq!(alpha.state.as_deref(), Some("NY"));
    assert!(alpha.city.is_empty());

    let categories: Vec<&str> = feed.categories.iter().map(String::as_str).collect();
    assert_eq!(categories, vec!["Drink", "Food"]);
    let states: Vec<&str> = feed.states.iter().map(String::as_str).collect();
    assert_eq!(states, vec!["NY"]);

    assert_eq!(feed.data_rows, 2);
    assert_eq!(
        feed.skipped,
        vec![SkippedRow {
            line: 3,
            reason: SkipReason::InvalidCoordinate {
                field: "Latitude",
                raw: "not-a-number".to_string(),
            },
        }]
    );
}

#[test]
fn all_columns_are_mapped() {
    let text = format!(
        "{HEADER}\n\
         Liberty Bell,39.9496,-75.1503,\"History, Landmark\",PA,Philadelphia,\"Cracked, famous\",https://img.example/bell.jpg,The bell,https://nps.gov/inde\n"
    );
    let feed = normalize_feed(&text);
    assert_eq!(feed.records.len(), 1);
    let r = &feed.records[0];
    assert_eq!(r.name, "Liberty Bell");
    assert_eq!(r.categories, vec!["History", "Landmark"]);
    assert_eq!(r.state.as_deref(), Some("PA"));
    assert_eq!(r.city, "Philadelphia");
    assert_eq!(r.description, "Cracked, famous");
    assert_eq!(r.image_url, "https://img.example/bell.jpg");
    assert_eq!(r.image_alt_text, "The bell");
    assert_eq!(r.website, "https://nps.gov/inde");
}

#[test]
fn quoted_name_with_comma_is_one_field() {
    let text = "Name,Latitude,Longitude\n\"Acme, Inc.\",1.5,2.5\n";
    let feed = normalize_feed(text);
    assert_eq!(names(&feed), vec!["Acme, Inc."]);
    assert!(feed.skipped.is_empty());
}

#[test]
fn column_mismatch_skips_row_and_continues() {
    let text = "Name,Latitude,Longitude\n\
                Alpha,1,2\n\
                Broken,1,2,extra\n\
                Gamma,3,4\n";
    let feed = normalize_feed(text);
    assert_eq!(names(&feed), vec!["Alpha", "Gamma"]);
    assert_eq!(
        feed.skipped,
        vec![SkippedRow {
            line: 3,
            reason: SkipReason::ColumnCount {
                expected: 3,
                found: 4
            },
        }]
    );
}

#[test]
fn blank_body_line_is_a_column_mismatch() {
    let text = "Name,Latitude,Longitude\nAlpha,1,2\n\nGamma,3,4";
    let feed = normalize_feed(text);
    assert_eq!(names(&feed), vec!["Alpha", "Gamma"]);
    assert_eq!(feed.data_rows, 3);
    assert!(matches!(
        feed.skipped[0].reason,
        SkipReason::ColumnCount {
            expected: 3,
            found: 1
        }
    ));
}

#[test]
fn header_only_or_empty_text_is_empty_not_error() {
    for text in ["", "   \n  ", "Name,Latitude,Longitude", "Name,Latitude,Longitude\n\n"] {
        let feed = normalize_feed(text);
        assert!(feed.records.is_empty(), "expected no records for {text:?}");
        assert!(feed.skipped.is_empty(), "expected no skips for {text:?}");
        assert_eq!(feed.data_rows, 0);
    }
}

#[test]
fn missing_name_is_rejected() {
    let text = "Name,Latitude,Longitude\n  ,1,2\n\"\",3,4\n";
    let feed = normalize_feed(text);
    assert!(feed.records.is_empty());
    assert_eq!(feed.skipped.len(), 2);
    assert!(feed
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::MissingName));
}

#[test]
fn non_finite_and_missing_coordinates_are_rejected() {
    let text = "Name,Latitude,Longitude\n\
                Inf,inf,2\n\
                NaN,1,NaN\n\
                Empty,,2\n\
                Partial,12abc,2\n\
                Ok,-0.5,1e1\n";
    let feed = normalize_feed(text);
    assert_eq!(names(&feed), vec!["Ok"]);
    assert!((feed.records[0].longitude - 10.0).abs() < f64::EPSILON);
    assert_eq!(feed.skipped.len(), 4);
    assert!(matches!(
        &feed.skipped[1].reason,
        SkipReason::InvalidCoordinate { field: "Longitude", raw } if raw == "NaN"
    ));
}

#[test]
fn missing_coordinate_columns_reject_every_row() {
    let text = "Name,State\nAlpha,NY\n";
    let feed = normalize_feed(text);
    assert!(feed.records.is_empty());
    assert!(matches!(
        &feed.skipped[0].reason,
        SkipReason::InvalidCoordinate { field: "Latitude", raw } if raw.is_empty()
    ));
}

#[test]
fn extra_columns_are_tolerated() {
    let text = "Name,Notes,Latitude,Longitude,Hours\nAlpha,\"quiet, shady\",1,2,9-5\n";
    let feed = normalize_feed(text);
    assert_eq!(names(&feed), vec!["Alpha"]);
}

#[test]
fn quoted_header_fields_are_cleaned() {
    let text = "\"Name\", \"Latitude\" ,Longitude\nAlpha,1,2\n";
    let feed = normalize_feed(text);
    assert_eq!(names(&feed), vec!["Alpha"]);
}

#[test]
fn later_duplicate_header_wins() {
    let text = "Name,Latitude,Longitude,Name\nFirst,1,2,Second\n";
    let feed = normalize_feed(text);
    assert_eq!(names(&feed), vec!["Second"]);
}

#[test]
fn empty_state_is_none_and_not_collected() {
    let text = "Name,Latitude,Longitude,State\nAlpha,1,2,\nBeta,3,4,TX\n";
    let feed = normalize_feed(text);
    assert_eq!(feed.records[0].state, None);
    assert_eq!(feed.records[1].state.as_deref(), Some("TX"));
    assert_eq!(feed.states.len(), 1);
}

#[test]
fn categories_are_trimmed_and_empty_entries_dropped() {
    let text = "Name,Latitude,Longitude,Categories\nAlpha,1,2,\" Park , ,Museum,, \"\n";
    let feed = normalize_feed(text);
    assert_eq!(feed.records[0].categories, vec!["Park", "Museum"]);
}

#[test]
fn rejected_rows_do_not_contribute_filter_values() {
    let text = "Name,Latitude,Longitude,Categories,State\n\
                ,1,2,Ghosts,ZZ\n\
                Alpha,1,2,Park,NY\n";
    let feed = normalize_feed(text);
    assert!(!feed.categories.contains("Ghosts"));
    assert!(!feed.states.contains("ZZ"));
    assert!(feed.categories.contains("Park"));
}

#[test]
fn windows_line_endings_are_handled() {
    let text = "Name,Latitude,Longitude,State\r\nAlpha,1,2,NY\r\nBeta,3,4,NJ\r\n";
    let feed = normalize_feed(text);
    assert_eq!(names(&feed), vec!["Alpha", "Beta"]);
    assert_eq!(feed.records[1].state.as_deref(), Some("NJ"));
}

#[test]
fn identical_coordinates_are_both_kept() {
    let text = "Name,Latitude,Longitude\nAlpha,1,2\nBeta,1.0,2.0\n";
    let feed = normalize_feed(text);
    assert_eq!(names(&feed), vec!["Alpha", "Beta"]);
    assert_eq!(
        feed.records[0].identity_key(),
        feed.records[1].identity_key()
    );
}

#[test]
fn accepted_records_are_bounded_and_valid() {
    let inputs = [
        "Name,Latitude,Longitude\nA,1,2\nB,x,2\nC,3,4,5\n\nD,5,6",
        "Name,Latitude,Longitude,Categories\n\"E, F\",1,2,\"a,b\"\n,1,2,c",
        "Latitude,Longitude\n1,2\n3,4",
    ];
    for text in inputs {
        let feed = normalize_feed(text);
        assert!(feed.records.len() <= feed.data_rows);
        assert_eq!(feed.records.len() + feed.skipped.len(), feed.data_rows);
        for r in &feed.records {
            assert!(!r.name.is_empty());
            assert!(r.latitude.is_finite() && r.longitude.is_finite());
        }
    }
}

#[test]
fn skip_reason_display() {
    assert_eq!(
        SkipReason::ColumnCount {
            expected: 10,
            found: 9
        }
        .to_string(),
        "mismatched number of columns: expected 10, got 9"
    );
    assert_eq!(SkipReason::MissingName.to_string(), "missing name");
    assert_eq!(
        SkipReason::InvalidCoordinate {
            field: "Longitude",
            raw: "west".to_string()
        }
        .to_string(),
        "invalid Longitude \"west\""
    );
}

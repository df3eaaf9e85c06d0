//! End-to-end behaviour of a session: search, filter, and structural edits.

use gigacsv_core::{CellPosition, FilterOutcome, FormatError, GridError, IndexError, Session};

const PEOPLE: &str = "id,name\n1,foo\n2,bar\n3,foobar\n";

fn rows(session: &Session) -> Vec<Vec<&str>> {
    session
        .rows()
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect()
}

fn assert_rectangular(session: &Session) {
    for row in session.rows() {
        assert_eq!(row.len(), session.column_count());
    }
}

#[test]
fn search_walks_matches_then_stops() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    assert_eq!(session.search("foo"), Some(CellPosition::new(0, 1)));
    assert_eq!(session.search("foo"), Some(CellPosition::new(2, 1)));
    assert_eq!(session.search("foo"), None);
}

#[test]
fn search_restarts_when_text_changes() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    session.search("foo");
    session.search("foo");
    assert_eq!(session.search("bar"), Some(CellPosition::new(1, 1)));
    assert_eq!(session.search("foo"), Some(CellPosition::new(0, 1)));
}

#[test]
fn search_visits_every_column_in_row_major_order() {
    let mut session = Session::from_csv("a,b,c\nx1,y,x2\nz,x3,z\n").unwrap();
    let hits: Vec<_> = std::iter::from_fn(|| session.search("x")).collect();
    assert_eq!(
        hits,
        vec![
            CellPosition::new(0, 0),
            CellPosition::new(0, 2),
            CellPosition::new(1, 1),
        ]
    );
}

#[test]
fn filter_then_clear_restores_rows() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    assert_eq!(session.apply_filter("foo"), FilterOutcome::Entered);
    assert_eq!(rows(&session), vec![vec!["1", "foo"], vec!["3", "foobar"]]);

    assert_eq!(session.apply_filter(""), FilterOutcome::Cleared);
    assert_eq!(
        rows(&session),
        vec![vec!["1", "foo"], vec!["2", "bar"], vec!["3", "foobar"]]
    );
}

#[test]
fn refilter_starts_from_full_body() {
    let mut direct = Session::from_csv(PEOPLE).unwrap();
    direct.apply_filter("ba");

    let mut chained = Session::from_csv(PEOPLE).unwrap();
    chained.apply_filter("foob");
    chained.apply_filter("ba");

    assert_eq!(rows(&chained), rows(&direct));
    assert_eq!(chained.row_count(), 2);
}

#[test]
fn search_runs_on_filtered_view() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    session.apply_filter("bar");
    assert_eq!(session.search("foo"), Some(CellPosition::new(1, 1)));
    assert_eq!(session.search("foo"), None);
}

#[test]
fn delete_column_drops_header_and_cells() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    assert_eq!(session.delete_column(0).unwrap(), "id");
    assert_eq!(session.header(), ["name"]);
    assert_eq!(
        rows(&session),
        vec![vec!["foo"], vec!["bar"], vec!["foobar"]]
    );
}

#[test]
fn delete_rows_uses_visible_indexes() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    assert_eq!(session.delete_rows(&[2, 0]).unwrap(), 2);
    assert_eq!(rows(&session), vec![vec!["2", "bar"]]);
    assert_rectangular(&session);
}

#[test]
fn out_of_range_edits_report_index_errors() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    let err = session.delete_rows(&[3]).unwrap_err();
    assert!(matches!(
        err,
        GridError::Index(IndexError::Row { index: 3, len: 3 })
    ));
    let err = session.cell_at(0, 2).unwrap_err();
    assert!(matches!(
        err,
        GridError::Index(IndexError::Column { index: 2, len: 2 })
    ));
    assert_eq!(session.row_count(), 3);
}

#[test]
fn rows_deleted_while_filtered_come_back_on_clear() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    session.apply_filter("foo");
    assert_eq!(session.row_action_label(), "Hide rows");
    session.delete_rows(&[0]).unwrap();
    assert_eq!(rows(&session), vec![vec!["3", "foobar"]]);

    session.clear_filter();
    assert_eq!(session.row_count(), 3);
}

#[test]
fn column_deleted_while_filtered_stays_deleted() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    session.apply_filter("bar");
    session.delete_column(0).unwrap();
    assert_rectangular(&session);

    session.clear_filter();
    assert_eq!(session.header(), ["name"]);
    assert_eq!(
        rows(&session),
        vec![vec!["foo"], vec!["bar"], vec!["foobar"]]
    );
    assert_rectangular(&session);
}

#[test]
fn save_writes_visible_rows() {
    let mut session = Session::from_csv("id,note\n1,\"a, b\"\n2,plain\n").unwrap();
    session.apply_filter("a, b");
    insta::assert_snapshot!(session.to_csv().unwrap(), @r#"
    id,note
    1,"a, b"
    "#);
}

#[test]
fn malformed_text_is_rejected() {
    assert!(matches!(
        Session::from_csv("a,b\n\"open,1\n"),
        Err(GridError::Format(_))
    ));
    assert!(matches!(
        Session::from_csv(""),
        Err(GridError::Format(_))
    ));
}

#[test]
fn ragged_body_is_rejected_before_it_reaches_the_grid() {
    let mut session = Session::from_csv(PEOPLE).unwrap();
    let err = session
        .load(vec!["a".into(), "b".into()], vec![vec!["1".into()]])
        .unwrap_err();
    assert!(matches!(
        err,
        GridError::Format(FormatError::RowWidth { row: 0, .. })
    ));

    assert_eq!(session.delete_column(1).unwrap(), "name");
    assert_rectangular(&session);
}

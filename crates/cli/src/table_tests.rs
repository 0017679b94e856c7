// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn render_to_string(table: &Table) -> String {
    let mut buf = Vec::new();
    table.render(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn empty_table_prints_nothing() {
    let table = Table::plain(vec![Column::left("NAME"), Column::left("STATUS")]);
    assert_eq!(render_to_string(&table), "");
}

#[test]
fn single_row_single_column() {
    let mut table = Table::plain(vec![Column::left("NAME")]);
    table.row(vec!["hello".into()]);
    let out = render_to_string(&table);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["NAME", "hello"]);
}

#[test]
fn columns_sized_to_widest_cell() {
    let mut table = Table::plain(vec![Column::left("NAME"), Column::status("STATUS")]);
    table.row(vec!["nightly-report".into(), "success".into()]);
    table.row(vec!["b".into(), "failed".into()]);
    let out = render_to_string(&table);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "NAME            STATUS");
    assert_eq!(lines[1], "nightly-report  success");
    assert_eq!(lines[2], "b               failed");
}

#[test]
fn missing_cells_render_blank() {
    let mut table = Table::plain(vec![Column::left("A"), Column::left("B")]);
    table.row(vec!["x".into()]);
    let out = render_to_string(&table);
    assert_eq!(out.lines().nth(1), Some("x  "));
}

#[test]
fn max_width_truncates_values() {
    let mut table = Table::plain(vec![Column::muted("REPO").with_max(6), Column::left("X")]);
    table.row(vec!["/home/dev/project".into(), "1".into()]);
    let out = render_to_string(&table);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "REPO    X");
    assert_eq!(lines[1], "/home/  1");
}

#[test]
fn truncation_respects_char_boundaries() {
    assert_eq!(truncate("héllo", Some(2)), "hé");
    assert_eq!(truncate("hi", Some(5)), "hi");
    assert_eq!(truncate("hi", None), "hi");
}

#[test]
fn colored_status_applied_after_padding() {
    let mut table = Table {
        columns: vec![Column::status("STATUS"), Column::left("N")],
        rows: Vec::new(),
        colorize: true,
    };
    table.row(vec!["failed".into(), "1".into()]);
    let out = render_to_string(&table);
    let row = out.lines().nth(1).unwrap();
    assert!(row.starts_with("\x1b[31mfailed\x1b[0m"), "got {row:?}");
}

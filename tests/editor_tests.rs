//! End-to-end tests for `GridEditor`, driven through pointer, keyboard and
//! clipboard input the way the browser binding drives it.

mod common;

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::common::{FakeClipboard, Harness};
    use figgrid::layout::Point;
    use figgrid::selection::{InteractionState, Key, Modifiers};
    use figgrid::{CellRange, CellValue, Dataset, EditorConfig};

    fn range(top: u32, left: u32, bottom: u32, right: u32) -> CellRange {
        CellRange {
            top,
            left,
            bottom,
            right,
        }
    }

    // ================================================================
    // Selection
    // ================================================================

    #[test]
    fn test_rectangle_is_normalized_regardless_of_drag_direction() {
        let mut h = Harness::blank(20, 10);
        h.drag_cells((5, 3), (2, 1));
        let backwards = h.editor.selection().effective_range(h.editor.grid());
        h.drag_cells((2, 1), (5, 3));
        let forwards = h.editor.selection().effective_range(h.editor.grid());
        assert_eq!(backwards, Some(range(2, 1, 5, 3)));
        assert_eq!(backwards, forwards);
    }

    #[test]
    fn test_pointer_up_ends_selection_drag() {
        let mut h = Harness::blank(20, 10);
        let (x, y) = h.center(1, 1);
        h.editor.pointer_down(x, y);
        assert_eq!(h.editor.selection().state(), InteractionState::SelectingCells);
        h.editor.pointer_up();
        assert_eq!(h.editor.selection().state(), InteractionState::Idle);
        // Later moves don't extend the selection
        let (x, y) = h.center(4, 4);
        h.editor.pointer_move(x, y, Modifiers::NONE);
        assert_eq!(
            h.editor.selection().effective_range(h.editor.grid()),
            Some(range(1, 1, 1, 1))
        );
    }

    #[test]
    fn test_column_header_drag_selects_whole_columns() {
        let mut h = Harness::blank(20, 10);
        let (x, _) = h.center(0, 2);
        h.editor.pointer_down(x, 12.0);
        let (x, _) = h.center(0, 4);
        h.editor.pointer_move(x, 12.0, Modifiers::NONE);
        h.editor.pointer_up();

        assert_eq!(
            h.editor.selection().effective_range(h.editor.grid()),
            Some(range(0, 2, 19, 4))
        );
        let overlay = h.editor.overlay();
        assert!(overlay.outline.is_none());
        assert!(overlay.fill_handle.is_none());
        assert!(overlay.is_col_highlighted(3));
        assert!(overlay.is_row_highlighted(19));
    }

    #[test]
    fn test_corner_header_selects_everything() {
        let mut h = Harness::blank(20, 10);
        h.editor.pointer_down(5.0, 5.0);
        h.editor.pointer_up();
        assert_eq!(
            h.editor.selection().effective_range(h.editor.grid()),
            Some(range(0, 0, 19, 9))
        );
    }

    // ================================================================
    // Growth
    // ================================================================

    #[test]
    fn test_command_drag_grows_grid_within_bounds() {
        let config = EditorConfig {
            max_rows: 30,
            max_cols: 12,
            ..EditorConfig::default()
        };
        let mut h = Harness::new(config);
        h.editor.init_blank(20, 10);
        h.clear_logs();

        let (x, y) = h.center(0, 0);
        h.editor.pointer_down(x, y);
        h.editor.pointer_move(5000.0, 5000.0, Modifiers::CTRL);
        h.editor.pointer_up();

        assert_eq!(h.editor.grid().row_count(), 30);
        assert_eq!(h.editor.grid().col_count(), 12);
        assert!(h
            .statuses()
            .contains(&"Grid expanded to 30 rows × 12 columns".to_string()));
        assert!(h.renders.borrow().iter().any(|r| r.grid && r.surface));
        assert_eq!(
            h.editor.selection().effective_range(h.editor.grid()),
            Some(range(0, 0, 29, 11))
        );

        // Dragging back never shrinks
        let (x, y) = h.center(1, 1);
        h.editor.pointer_down(x, y);
        h.editor.pointer_move(x, y, Modifiers::CTRL);
        h.editor.pointer_up();
        assert_eq!(h.editor.grid().row_count(), 30);
        assert_eq!(h.editor.grid().col_count(), 12);
    }

    #[test]
    fn test_plain_drag_is_clamped_to_grid() {
        let mut h = Harness::blank(20, 10);
        let (x, y) = h.center(0, 0);
        h.editor.pointer_down(x, y);
        h.editor.pointer_move(5000.0, 5000.0, Modifiers::NONE);
        h.editor.pointer_up();
        assert_eq!(h.editor.grid().row_count(), 20);
        assert_eq!(
            h.editor.selection().effective_range(h.editor.grid()),
            Some(range(0, 0, 19, 9))
        );
    }

    #[test]
    fn test_add_rows_and_columns_clamp_at_limits() {
        let config = EditorConfig {
            max_rows: 22,
            max_cols: 11,
            ..EditorConfig::default()
        };
        let mut h = Harness::new(config);
        h.editor.init_blank(20, 10);
        assert_eq!(h.editor.add_rows(5), 2);
        assert_eq!(h.editor.add_columns(5), 1);
        assert_eq!(h.editor.add_rows(1), 0);
        assert_eq!(
            h.last_status().as_deref(),
            Some("Grid limit reached at 22 rows × 11 columns")
        );
        // New columns get positional labels
        assert_eq!(h.editor.grid().columns().last().map(String::as_str), Some("11"));
    }

    // ================================================================
    // Editing
    // ================================================================

    #[test]
    fn test_typing_commits_number_and_moves_down() {
        let mut h = Harness::blank(20, 10);
        h.editor.select_cell(0, 0);
        h.type_text("42");
        assert!(h.editor.selection().is_editing());
        h.editor.key_down(Key::Enter, Modifiers::NONE);

        assert!(!h.editor.selection().is_editing());
        assert_eq!(h.editor.grid().cell(0, 0), Some(&CellValue::Number(42.0)));
        assert_eq!(
            h.editor.selection().focus(),
            Some(figgrid::CellCoord::new(1, 0))
        );
    }

    #[test]
    fn test_escape_discards_edit() {
        let mut h = Harness::blank(20, 10);
        let (x, y) = h.center(2, 2);
        h.editor.double_click(x, y);
        assert!(h.editor.edit_overlay().is_some());
        h.editor.set_edit_buffer("draft");
        h.editor.key_down(Key::Escape, Modifiers::NONE);

        assert_eq!(h.text(2, 2), "");
        assert!(h.editor.edit_overlay().is_none());
    }

    #[test]
    fn test_clicking_elsewhere_commits_open_edit() {
        let mut h = Harness::blank(20, 10);
        let (x, y) = h.center(3, 1);
        h.editor.double_click(x, y);
        h.editor.set_edit_buffer("label");
        let (x, y) = h.center(6, 6);
        h.editor.pointer_down(x, y);
        h.editor.pointer_up();
        assert_eq!(h.text(3, 1), "label");
    }

    #[test]
    fn test_tab_wraps_to_next_row() {
        let mut h = Harness::blank(20, 10);
        h.editor.select_cell(0, 9);
        h.type_text("x");
        h.editor.key_down(Key::Tab, Modifiers::NONE);
        assert_eq!(h.text(0, 9), "x");
        assert_eq!(
            h.editor.selection().focus(),
            Some(figgrid::CellCoord::new(1, 0))
        );
    }

    // ================================================================
    // Clipboard
    // ================================================================

    #[test]
    fn test_copy_then_paste_round_trips_with_coercion() {
        let mut h = Harness::blank(20, 10);
        for (row, col, text) in [(0, 0, "1"), (0, 1, "a"), (1, 0, "2.5"), (1, 1, " 7 ")] {
            h.editor.select_cell(row, col);
            h.type_text(text);
            h.editor.commit_edit();
        }
        h.drag_cells((0, 0), (1, 1));
        h.editor.key_down(Key::Char('c'), Modifiers::CTRL);
        assert_eq!(
            h.clipboard.text.borrow().as_deref(),
            Some("1\ta\n2.5\t7")
        );
        assert_eq!(h.last_status().as_deref(), Some("Copied 2 × 2 cells"));

        h.editor.select_cell(5, 5);
        h.editor.key_down(Key::Char('v'), Modifiers::CTRL);
        assert_eq!(h.editor.grid().cell(5, 5), Some(&CellValue::Number(1.0)));
        assert_eq!(h.editor.grid().cell(5, 6), Some(&CellValue::Text("a".into())));
        assert_eq!(h.editor.grid().cell(6, 5), Some(&CellValue::Number(2.5)));
        assert_eq!(h.editor.grid().cell(6, 6), Some(&CellValue::Number(7.0)));
        assert_eq!(
            h.last_status().as_deref(),
            Some("Pasted 2 × 2 cells at row 6, column 6")
        );
    }

    #[test]
    fn test_anchored_paste_grows_and_preserves_other_cells() {
        let config = EditorConfig {
            default_rows: 5,
            ..EditorConfig::default()
        };
        let mut h = Harness::new(config);
        h.editor.init_blank(11, 11);
        h.editor.select_cell(0, 0);
        h.type_text("keep");
        h.editor.commit_edit();
        h.editor.select_cell(10, 10);

        let outcome = h.editor.paste_text("a\tb\nc\td\ne\tf\n").unwrap();
        assert_eq!((outcome.rows, outcome.cols, outcome.replaced), (3, 2, false));
        assert_eq!(h.editor.grid().row_count(), 13);
        assert_eq!(h.editor.grid().col_count(), 12);
        assert_eq!(h.text(10, 10), "a");
        assert_eq!(h.text(12, 11), "f");
        assert_eq!(h.text(0, 0), "keep");
        assert_eq!(
            h.last_status().as_deref(),
            Some("Pasted 3 × 2 cells at row 11, column 11")
        );
    }

    #[test]
    fn test_paste_without_selection_replaces_table() {
        let mut h = Harness::blank(20, 10);
        let outcome = h.editor.paste_text("x,y,z\n1,2,3\r\n").unwrap();
        assert!(outcome.replaced);
        assert_eq!(h.editor.grid().row_count(), 2);
        assert_eq!(h.editor.grid().columns(), ["1", "2", "3"]);
        assert_eq!(h.editor.grid().cell(1, 2), Some(&CellValue::Number(3.0)));
        assert_eq!(
            h.last_status().as_deref(),
            Some("Replaced table with 2 rows × 3 columns")
        );
    }

    #[test]
    fn test_empty_paste_without_selection_keeps_table() {
        let mut h = Harness::blank(20, 10);
        let outcome = h.editor.paste_text("").unwrap();
        assert_eq!((outcome.rows, outcome.cols, outcome.replaced), (0, 0, false));
        assert_eq!(h.editor.grid().row_count(), 20);
        assert_eq!(h.editor.grid().col_count(), 10);
        assert_eq!(h.last_status().as_deref(), Some("Nothing to paste"));
    }

    #[test]
    fn test_clipboard_failure_is_reported() {
        let clipboard = FakeClipboard {
            deny: true,
            ..FakeClipboard::default()
        };
        let mut h = Harness::with_clipboard(EditorConfig::default(), clipboard);
        h.editor.init_blank(20, 10);
        h.editor.select_cell(0, 0);

        h.editor.copy();
        assert_eq!(
            h.last_status().as_deref(),
            Some("Copy failed: Clipboard unavailable: permission denied")
        );
        h.editor.paste();
        assert!(h
            .last_status()
            .is_some_and(|s| s.starts_with("Paste failed")));
    }

    // ================================================================
    // Fill
    // ================================================================

    #[test]
    fn test_fill_down_one_by_two_into_three_rows() {
        let mut h = Harness::blank(20, 10);
        h.editor.select_cell(0, 0);
        h.type_text("x");
        h.editor.key_down(Key::Tab, Modifiers::NONE);
        h.type_text("7");
        h.editor.commit_edit();
        h.drag_cells((0, 0), (0, 1));

        let handle = h.editor.overlay().fill_handle.unwrap();
        h.editor
            .pointer_down(handle.x + handle.width / 2.0, handle.y + handle.height / 2.0);
        assert!(h.editor.fill().is_active());
        let (x, y) = h.center(3, 1);
        h.editor.pointer_move(x, y, Modifiers::NONE);
        assert_eq!(h.editor.overlay().fill_preview.len(), 1);
        h.editor.pointer_up();

        for row in 1..=3 {
            assert_eq!(h.text(row, 0), "x");
            assert_eq!(h.editor.grid().cell(row, 1), Some(&CellValue::Number(7.0)));
        }
        assert_eq!(h.text(4, 0), "");
        assert_eq!(h.last_status().as_deref(), Some("Filled 6 cells down"));
        assert!(!h.editor.fill().is_active());
    }

    #[test]
    fn test_fill_released_inside_source_writes_nothing() {
        let mut h = Harness::blank(20, 10);
        h.editor.select_cell(0, 0);
        let handle = h.editor.overlay().fill_handle.unwrap();
        h.editor.pointer_down(handle.x, handle.y);
        h.editor.pointer_up();
        assert!(!h.editor.fill().is_active());
        assert!(h.statuses().iter().all(|s| !s.starts_with("Filled")));
    }

    // ================================================================
    // Columns
    // ================================================================

    #[test]
    fn test_border_drag_resizes_and_is_captured() {
        let mut h = Harness::blank(20, 10);
        let border_x = h.editor.layout().header_width() + 100.0;
        let down = h.editor.pointer_down(border_x, 12.0);
        assert!(down.stop_propagation);
        let moved = h.editor.pointer_move(border_x + 50.0, 12.0, Modifiers::NONE);
        assert!(moved.stop_propagation);
        let up = h.editor.pointer_up();
        assert!(up.stop_propagation);

        assert_eq!(h.editor.resizer().width(0), 150.0);
        assert_eq!(h.last_status().as_deref(), Some("Column \"1\" width: 150px"));
    }

    #[test]
    fn test_resize_never_goes_below_minimum() {
        let mut h = Harness::blank(20, 10);
        let border_x = h.editor.layout().header_width() + 100.0;
        h.editor.pointer_down(border_x, 12.0);
        h.editor.pointer_move(0.0, 12.0, Modifiers::NONE);
        h.editor.pointer_up();
        assert_eq!(h.editor.resizer().width(0), 30.0);
    }

    #[test]
    fn test_rename_to_same_label_preserves_data() {
        let mut h = Harness::blank(20, 10);
        h.editor.select_cell(4, 2);
        h.type_text("v");
        h.editor.commit_edit();

        h.editor.rename_column(2, "3");
        assert_eq!(h.editor.grid().columns()[2], "3");
        assert_eq!(h.text(4, 2), "v");
    }

    #[test]
    fn test_added_column_after_rename_is_independent() {
        let mut h = Harness::blank(20, 3);
        h.editor.select_cell(0, 0);
        h.type_text("keep");
        h.editor.commit_edit();
        h.editor.rename_column(0, "4");

        assert_eq!(h.editor.add_columns(1), 1);
        assert_eq!(h.editor.grid().columns(), ["4", "2", "3", "5"]);
        assert_eq!(h.text(0, 3), "");

        h.editor.select_cell(0, 3);
        h.editor.paste_text("overwritten");
        assert_eq!(h.text(0, 3), "overwritten");
        assert_eq!(h.text(0, 0), "keep");
    }

    #[test]
    fn test_rename_rekeys_rows() {
        let mut h = Harness::blank(20, 10);
        h.editor.select_cell(0, 1);
        h.type_text("9");
        h.editor.commit_edit();
        h.editor.rename_column(1, "width");

        let dataset: &Dataset = h.editor.dataset();
        assert_eq!(dataset.columns[1], "width");
        assert_eq!(dataset.rows[0].get("width"), Some(&CellValue::Number(9.0)));
        assert!(!dataset.rows[0].contains_key("2"));
    }

    // ================================================================
    // View transform
    // ================================================================

    #[test]
    fn test_zoom_stays_within_limits() {
        let mut h = Harness::blank(20, 10);
        let pointer = Point::new(200.0, 100.0);

        assert!(h.editor.wheel(0.0, -100_000.0, pointer, Modifiers::CTRL));
        h.editor.apply_frame();
        assert_eq!(h.editor.view().zoom(), 5.0);

        h.editor.wheel(0.0, 100_000.0, pointer, Modifiers::CTRL);
        h.editor.apply_frame();
        assert_eq!(h.editor.view().zoom(), 0.1);
    }

    #[test]
    fn test_zoom_keeps_point_under_pointer_fixed() {
        let mut h = Harness::blank(20, 10);
        let pointer = Point::new(300.0, 150.0);
        let before = h.editor.view().to_content(pointer);
        h.editor.wheel(0.0, -500.0, pointer, Modifiers::CTRL);
        h.editor.apply_frame();
        let after = h.editor.view().to_content(pointer);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert!(h.last_status().is_some_and(|s| s.starts_with("Zoom ")));
    }

    #[test]
    fn test_wheel_events_coalesce_into_one_frame() {
        let mut h = Harness::blank(20, 10);
        let pointer = Point::ORIGIN;
        assert!(h.editor.wheel(10.0, 20.0, pointer, Modifiers::NONE));
        assert!(!h.editor.wheel(5.0, 5.0, pointer, Modifiers::NONE));
        h.clear_logs();
        h.editor.apply_frame();

        let pan = h.editor.view().pan();
        assert_eq!((pan.x, pan.y), (-15.0, -25.0));
        let renders = h.renders.borrow();
        assert_eq!(renders.len(), 1);
        assert!(renders[0].surface);
        assert!(!renders[0].grid);
    }

    #[test]
    fn test_fit_resets_view() {
        let mut h = Harness::blank(20, 10);
        h.editor.ruler_pointer_down(Point::new(0.0, 0.0));
        h.editor.ruler_pointer_move(Point::new(40.0, 10.0), true);
        h.editor.pointer_up();
        let pan = h.editor.view().pan();
        assert!((pan.x - 4.0).abs() < 1e-9);
        assert!((pan.y - 1.0).abs() < 1e-9);

        h.editor.fit();
        assert_eq!(h.editor.view().zoom(), 1.0);
        assert_eq!(h.editor.view().pan(), Point::ORIGIN);
        assert_eq!(h.last_status().as_deref(), Some("Zoom 100%, pan (0, 0)"));
    }

    // ================================================================
    // History
    // ================================================================

    #[test]
    fn test_undo_shortcuts_report_unavailable() {
        let mut h = Harness::blank(20, 10);
        h.editor.key_down(Key::Char('z'), Modifiers::CTRL);
        assert_eq!(h.last_status().as_deref(), Some("Undo is not available"));
        h.editor.key_down(Key::Char('y'), Modifiers::CTRL);
        assert_eq!(h.last_status().as_deref(), Some("Redo is not available"));
    }
}

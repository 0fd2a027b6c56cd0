use super::*;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render_into(editor: &mut TextEditor, width: u16, height: u16) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let theme = UiTheme::default();
    terminal
        .draw(|frame| editor.render(frame, Rect::new(0, 0, width, height), &theme))
        .unwrap();
    terminal
}

fn buffer_row(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[test]
fn typing_inserts_at_cursor() {
    let mut editor = TextEditor::new("ac");
    editor.move_cursor(CursorMove::Right);
    assert!(editor.insert_char('b'));
    assert_eq!(editor.text(), "abc");
    assert_eq!(editor.cursor(), (0, 2));

    editor.move_cursor(CursorMove::End);
    editor.insert_newline();
    editor.insert_str("de");
    assert_eq!(editor.text(), "abc\nde");
    assert_eq!(editor.cursor(), (1, 2));
}

#[test]
fn backspace_joins_lines_and_removes_crlf_pairs() {
    let mut editor = TextEditor::new("ab\r\ncd");
    editor.move_cursor(CursorMove::Down);
    assert_eq!(editor.cursor(), (1, 0));

    assert!(editor.delete_backward());
    assert_eq!(editor.text(), "abcd");
    assert_eq!(editor.cursor(), (0, 2));

    let mut at_start = TextEditor::new("x");
    assert!(!at_start.delete_backward());
}

#[test]
fn delete_forward_removes_crlf_pairs() {
    let mut editor = TextEditor::new("ab\r\ncd");
    editor.move_cursor(CursorMove::End);
    assert!(editor.delete_forward());
    assert_eq!(editor.text(), "abcd");

    editor.move_cursor(CursorMove::End);
    editor.move_cursor(CursorMove::Right);
    assert!(!editor.delete_forward());
}

#[test]
fn lone_carriage_return_ends_line() {
    let mut editor = TextEditor::new("ab\rcd");
    assert_eq!(editor.len_lines(), 2);
    editor.move_cursor(CursorMove::End);
    assert_eq!(editor.cursor(), (0, 2));
    editor.move_cursor(CursorMove::Right);
    assert_eq!(editor.cursor(), (1, 0));
}

#[test]
fn vertical_moves_clamp_column() {
    let mut editor = TextEditor::new("long line\nab\nanother");
    editor.move_cursor(CursorMove::End);
    editor.move_cursor(CursorMove::Down);
    assert_eq!(editor.cursor(), (1, 2));
    editor.move_cursor(CursorMove::PageDown);
    assert_eq!(editor.cursor(), (2, 2));
    editor.move_cursor(CursorMove::Left);
    editor.move_cursor(CursorMove::Left);
    editor.move_cursor(CursorMove::Left);
    assert_eq!(editor.cursor(), (1, 2));
}

#[test]
fn sync_reloads_only_on_external_change() {
    let mut editor = TextEditor::new("one");
    editor.move_cursor(CursorMove::End);
    editor.insert_char('!');
    let published = editor.take_published();
    assert_eq!(published, "one!");

    assert!(!editor.sync("one!"));
    assert_eq!(editor.cursor(), (0, 4));

    assert!(editor.sync("x"));
    assert_eq!(editor.text(), "x");
    assert_eq!(editor.cursor(), (0, 1));
}

#[test]
fn render_scrolls_to_keep_cursor_visible() {
    let text = (0..10).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let mut editor = TextEditor::new(&text);
    render_into(&mut editor, 20, 3);

    for _ in 0..5 {
        editor.move_cursor(CursorMove::Down);
    }
    assert_eq!(editor.scroll_row(), 3);

    let terminal = render_into(&mut editor, 20, 3);
    assert_eq!(buffer_row(&terminal, 0), "line 3");
    assert_eq!(buffer_row(&terminal, 2), "line 5");
    assert_eq!(editor.cursor_screen_position(), Some((0, 2)));
}

#[test]
fn click_places_cursor() {
    let mut editor = TextEditor::new("hello\nworld");
    render_into(&mut editor, 20, 5);

    assert!(editor.click(3, 1));
    assert_eq!(editor.cursor(), (1, 3));
    assert!(editor.click(15, 0));
    assert_eq!(editor.cursor(), (0, 5));
    assert!(editor.click(2, 4), "rows past the end clamp to the last line");
    assert_eq!(editor.cursor(), (1, 2));
    assert!(!editor.click(25, 0));
}

#[test]
fn empty_buffer_shows_placeholder() {
    let mut editor = TextEditor::new("");
    let terminal = render_into(&mut editor, 20, 2);
    assert_eq!(buffer_row(&terminal, 0), "(empty)");
}

#[test]
fn scroll_by_clamps_to_buffer() {
    let mut editor = TextEditor::new("a\nb\nc");
    editor.scroll_by(10);
    assert_eq!(editor.scroll_row(), 2);
    editor.scroll_by(-10);
    assert_eq!(editor.scroll_row(), 0);
}

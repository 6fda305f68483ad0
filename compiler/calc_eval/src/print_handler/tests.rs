use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_handler_appends_newlines() {
    let handler = BufferPrintHandler::new();
    handler.println("a");
    handler.println("b c");
    assert_eq!(handler.output(), "a\nb c\n");
}

#[test]
fn take_drains_buffer() {
    let handler = buffer_handler();
    handler.println("once");
    assert_eq!(handler.take(), "once\n");
    assert_eq!(handler.output(), "");
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.output(), "");
    assert_eq!(stdout_handler().take(), "");
}

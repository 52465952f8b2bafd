use keychat_cli::setup_logging;

#[test]
fn setup_logging_can_be_called_repeatedly() {
    let result = std::panic::catch_unwind(|| {
        setup_logging();
        setup_logging();
    });
    assert!(result.is_ok(), "setup_logging should not panic");
}

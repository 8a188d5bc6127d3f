use moon_runner::platform::init_logging;
use tracing::info;

#[test]
fn test_reinstalling_logger_is_a_no_op() {
    init_logging("debug");
    assert!(!init_logging("info"));
    // The first subscriber still receives events
    info!("Logging survives a second install");
}

use switchcmd::cli::LogLevel;
use switchcmd::logging::parse_level;
use tracing::Level;

#[test]
fn env_values_parse_case_insensitively() {
    assert_eq!(parse_level("debug"), Some(Level::DEBUG));
    assert_eq!(parse_level(" WARN\n"), Some(Level::WARN));
    assert_eq!(parse_level("Trace"), Some(Level::TRACE));
    assert_eq!(parse_level("loud"), None);
    assert_eq!(parse_level(""), None);
}

#[test]
fn cli_levels_map_onto_tracing_levels() {
    assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
    assert_eq!(Level::from(LogLevel::Info), Level::INFO);
    assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
    assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
}

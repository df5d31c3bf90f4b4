use log::{Level, LevelFilter};
use tictactoe_server::{format_record, init_logging, init_logging_with, level_from};

#[test]
fn level_parsing_defaults_to_info() {
    assert_eq!(level_from(None), LevelFilter::Info);
    assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
    assert_eq!(level_from(Some("TRACE")), LevelFilter::Trace);
    assert_eq!(level_from(Some(" warn ")), LevelFilter::Warn);
    assert_eq!(level_from(Some("off")), LevelFilter::Off);
    assert_eq!(level_from(Some("chatty")), LevelFilter::Info);
}

#[test]
fn records_drop_the_crate_prefix() {
    let line = format_record(
        &log::Record::builder()
            .level(Level::Info)
            .target("tictactoe_server::session")
            .args(format_args!("Connection #0 joined as A"))
            .build(),
    );
    assert_eq!(line, "INFO  session: Connection #0 joined as A");

    let foreign = format_record(
        &log::Record::builder()
            .level(Level::Warn)
            .target("hyper::proto")
            .args(format_args!("eof"))
            .build(),
    );
    assert_eq!(foreign, "WARN  hyper::proto: eof");
}

#[test]
fn init_twice_is_harmless() {
    init_logging();
    init_logging_with(LevelFilter::Debug);
    assert_eq!(log::max_level(), LevelFilter::Debug);
}

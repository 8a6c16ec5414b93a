//! Integration tests for the builtin tornado echo server rule table

use tracespec::config::TraceConfig;
use tracespec::rule::{Action, Modifier};
use tracespec::table::SpecTable;

fn builtin_table() -> SpecTable {
    TraceConfig::builtin().unwrap().build_table().unwrap()
}

#[test]
fn test_builtin_table_shape() {
    let config = TraceConfig::builtin().unwrap();
    assert_eq!(config.spec.len(), 197);

    let table = config.build_table().unwrap();
    assert_eq!(table.exact_rules().len(), 116);
    assert_eq!(table.regex_rules().count(), 77);
    assert_eq!(table.len(), 193);
}

#[test]
fn test_builtin_shadowed_duplicates() {
    let table = builtin_table();
    let shadowed: Vec<(usize, usize, &str)> = table
        .shadowed()
        .iter()
        .map(|w| (w.first_index, w.shadowed_index, w.pattern.as_str()))
        .collect();

    assert_eq!(
        shadowed,
        vec![
            (99, 100, "tornado.http1connection.HTTP1Connection._finish_request"),
            (138, 139, "tornado.iostream.BaseIOStream._find_read_pos"),
            (141, 142, "tornado.iostream.BaseIOStream._maybe_add_error_listener"),
            (148, 149, "tornado.iostream.BaseIOStream._run_streaming_callback"),
        ]
    );
}

#[test]
fn test_builtin_exact_overrides_earlier_regex() {
    let table = builtin_table();

    // `.+[.]__setattr__` (rule #1) would trace it; the exact rule says skip
    let rule = table.lookup("tornado.httputil.HTTPServerRequest.__setattr__").unwrap();
    assert_eq!(rule.index, 124);
    assert_eq!(rule.action, Action::Skip);

    // Other `__setattr__` methods are traced by the regex rule
    let rule = table.lookup("tornado.web.Application.__setattr__").unwrap();
    assert_eq!(rule.index, 1);
    assert_eq!(rule.action, Action::Trace);
}

#[test]
fn test_builtin_dunder_methods_skipped_except_init_and_call() {
    let table = builtin_table();
    assert_eq!(table.decide("tornado.web.Application.__repr__").action(), Action::Skip);
    assert_eq!(table.decide("tornado.web.Application.__init__").action(), Action::Highlight);
    assert_eq!(table.decide("tornado.gen.Runner.__init__").action(), Action::Highlight);
    // `__call__` falls through to the module catch-all
    assert_eq!(table.decide("tornado.web.Application.__call__").action(), Action::Trace);
}

#[test]
fn test_builtin_hide_below_rules() {
    let table = builtin_table();
    for identifier in [
        "http.server.BaseHTTPRequestHandler.parse_request",
        "wsgiref.simple_server.WSGIServer.setup_environ",
        "wsgiref.simple_server.WSGIRequestHandler.get_environ",
    ] {
        let decision = table.decide(identifier);
        assert!(decision.highlight, "{} should be highlighted", identifier);
        assert!(decision.modifiers.contains(&Modifier::HideBelow));
    }
}

#[test]
fn test_builtin_socket_rules() {
    let table = builtin_table();
    assert_eq!(table.decide("socket.socket.connect").action(), Action::Highlight);
    assert_eq!(table.decide("socket.socket.recv_into").action(), Action::Highlight);
    assert_eq!(table.decide("socket.SocketIO.readable").action(), Action::Highlight);
    assert_eq!(table.decide("socket.socket.fileno").action(), Action::Skip);
    assert_eq!(table.decide("socket._intenum_converter").action(), Action::Skip);
    assert_eq!(table.decide("socket.SocketIO.seekable").action(), Action::Trace);
    assert_eq!(table.decide("socket.create_connection").action(), Action::Trace);
    assert_eq!(table.decide("socket").action(), Action::Trace);
    assert_eq!(table.decide("socketx").action(), Action::Skip);
}

#[test]
fn test_builtin_main_module() {
    let table = builtin_table();
    assert_eq!(table.decide("__main__.main").action(), Action::Highlight);
    assert_eq!(table.decide("__main__.CustomRequestHandler.post").action(), Action::Highlight);
    assert_eq!(table.decide("__main__.helper").action(), Action::Trace);
    assert!(table.lookup("aoiktracecall.trace.trace_calls_in_specs").is_some());
    assert_eq!(
        table.decide("aoiktracecall.trace.trace_calls_in_specs").action(),
        Action::Skip
    );
}

#[test]
fn test_builtin_unknown_module_passes_through() {
    let table = builtin_table();
    assert!(table.lookup("json.decoder.JSONDecoder.decode").is_none());
}

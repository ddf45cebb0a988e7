// Library root
// -----------
// This crate holds both halves of the widget registry system. The
// `widgetd` binary serves the HTTP API; the `widget-cli` binary is a
// console client that talks to it.
//
// Module responsibilities:
// - `registry`: The in-memory set of widget names, name validation and
//   the typed error kinds.
// - `server`: The axum router, handlers and shared state for the API.
// - `api`: Blocking HTTP client used by the console.
// - `ui`: The console read-eval-print loop that drives `api`.
//
// Keeping the router construction in the library (rather than the
// binary) lets the integration tests spin up the real server in-process.
pub mod api;
pub mod registry;
pub mod server;
pub mod ui;

//! Static browser dashboard served at `/`.
//!
//! Pure presentation: the page calls `/check` from the browser and renders the
//! labelled fields. Nothing is templated server-side.

pub const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

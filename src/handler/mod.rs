//! Request routing and the built-in behaviors.
//!
//! The router applies an ordered, first-match policy over (method, path);
//! `/echo` and `/files` match by prefix, `/` and `/user-agent` exactly.
//! Anything that falls through every rule gets a 404 with an empty body,
//! unrecognized methods included.

pub mod files;

use std::sync::Arc;

use crate::config::Config;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};

/// Selects and runs the handler for a parsed request.
pub async fn dispatch(req: &Request, cfg: &Arc<Config>) -> Response {
    match (&req.method, req.path.as_str()) {
        (Method::GET, "/") => root_probe(),
        (Method::GET, path) if path.starts_with("/echo") => echo(path),
        (Method::GET, "/user-agent") => user_agent(req),
        (Method::GET, path) if path.starts_with("/files") => files::read(path, cfg).await,
        (Method::POST, path) if path.starts_with("/files") => {
            files::write(path, &req.body, cfg).await
        }
        _ => Response::empty(StatusCode::NotFound),
    }
}

/// `GET /` — a bare success line with no headers and no body.
fn root_probe() -> Response {
    Response::bare(StatusCode::Ok)
}

/// `GET /echo/<s>` — echoes back the path remainder.
///
/// Prefix-strip semantics: if the literal `/echo/` prefix is absent (the
/// path is exactly `/echo`, say), the strip is a no-op and the whole path
/// becomes the body.
fn echo(path: &str) -> Response {
    let remainder = path.strip_prefix("/echo/").unwrap_or(path);
    Response::text(StatusCode::Ok, remainder.to_string())
}

/// `GET /user-agent` — reflects the User-Agent header value.
///
/// A request without the header gets a 400 rather than tearing down the
/// connection.
fn user_agent(req: &Request) -> Response {
    match req.header("User-Agent") {
        Some(agent) => Response::text(StatusCode::Ok, agent.to_string()),
        None => {
            tracing::warn!("user-agent request without User-Agent header");
            Response::text(StatusCode::BadRequest, "missing User-Agent header")
        }
    }
}

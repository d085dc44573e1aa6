//! The `/files` behaviors: serving and storing files under the configured
//! root directory.

use std::path::Path;

use tokio::fs;

use crate::config::Config;
use crate::http::response::{Response, StatusCode};

/// `GET /files/<name>` — serves a regular file from the root directory.
///
/// Only names present in the directory listing as regular files are served;
/// subdirectories and anything else non-regular are invisible and yield 404.
pub async fn read(path: &str, cfg: &Config) -> Response {
    let name = path.strip_prefix("/files/").unwrap_or(path);

    let names = match regular_files(&cfg.root_dir).await {
        Ok(names) => names,
        Err(e) => {
            tracing::error!("failed to list {}: {}", cfg.root_dir.display(), e);
            return Response::text(
                StatusCode::InternalServerError,
                format!("Error listing directory: {e}"),
            );
        }
    };

    if !names.iter().any(|n| n == name) {
        return Response::empty(StatusCode::NotFound);
    }

    match fs::read(cfg.root_dir.join(name)).await {
        Ok(content) => Response::octet_stream(content),
        Err(e) => {
            // Listed a moment ago but unreadable now
            tracing::error!("failed to read {}: {}", name, e);
            Response::text(
                StatusCode::InternalServerError,
                format!("Error reading file: {e}"),
            )
        }
    }
}

/// `POST /files/<name>` — writes the request body verbatim, creating or
/// truncating the file.
///
/// Concurrent writers to the same name race at the filesystem level; last
/// writer wins. Any failure comes back as a 500 with the error text.
pub async fn write(path: &str, body: &[u8], cfg: &Config) -> Response {
    let name = path.strip_prefix("/files/").unwrap_or(path);

    match fs::write(cfg.root_dir.join(name), body).await {
        Ok(()) => Response::empty(StatusCode::Created),
        Err(e) => {
            tracing::error!("failed to write {}: {}", name, e);
            Response::text(
                StatusCode::InternalServerError,
                format!("Error writing file: {e}"),
            )
        }
    }
}

/// Lists the names of the regular files directly under `dir`.
async fn regular_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(names)
}

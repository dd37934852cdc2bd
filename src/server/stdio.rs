// src/server/stdio.rs
//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! Stdout carries protocol messages only; logging goes to stderr and the
//! log file.

use super::{json_rpc_error, McpServer, PARSE_ERROR};
use crate::error::AppError;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Serves the process's stdin until it closes.
pub async fn run_stdio(server: &McpServer) -> Result<(), AppError> {
    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = tokio::io::stdout();
    serve(server, reader, &mut writer).await
}

/// Reads one message per line and writes one response per line.
///
/// A line that is not valid UTF-8 gets a parse error and the loop goes on.
pub async fn serve<R, W>(
    server: &McpServer,
    mut reader: R,
    writer: &mut W,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Message is not valid UTF-8: {}", e);
                let response = json_rpc_error(None, PARSE_ERROR, &format!("Parse error: {e}"));
                write_message(writer, &response).await?;
                continue;
            }
        };
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        if let Some(response) = server.handle_line(raw).await {
            write_message(writer, &response).await?;
        }
    }
    log::info!("Input closed, shutting down");
    Ok(())
}

async fn write_message<W>(writer: &mut W, message: &Value) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    let mut encoded = serde_json::to_vec(message)?;
    encoded.push(b'\n');
    writer.write_all(&encoded).await?;
    writer.flush().await?;
    Ok(())
}

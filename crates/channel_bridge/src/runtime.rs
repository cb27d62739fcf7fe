//! Async runtime that wires line-delimited JSON‑RPC traffic to a channel on a
//! [`BinaryMessenger`].
//!
//! Every request line gets exactly one response line, written before the
//! next request is read:
//! * value → `result`
//! * not implemented → error `-32601`
//! * handler panic → error `-32603`
//! * unparsable line (bad JSON or bad UTF-8) → error `-32700` with a null id
//! * JSON that is not a valid request → error `-32600`, keeping the id if readable
//!
//! Requests without an `id` are answered too, with a null id. Stray response
//! frames and blank lines are skipped.
//!
//! ```ignore
//! let messenger = BinaryMessenger::new();
//! let _handle = messenger.register("wiredash", BridgeDispatcher::<SystemHost>::default())?;
//! channel_bridge::runtime::run_stdio(&messenger, "wiredash").await?;
//! ```

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::{
    error::BridgeError,
    jsonrpc::{INTERNAL_ERROR, INVALID_REQUEST, Id, PARSE_ERROR, Request, Response},
    message::Invocation,
    messenger::BinaryMessenger,
};

/// Serve `channel` until `reader` hits EOF. Returns the number of responses written.
pub async fn serve<R, W>(
    messenger: &BinaryMessenger,
    channel: &str,
    mut reader: R,
    mut writer: W,
) -> Result<usize, BridgeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(%channel, "bridge runtime started");
    let mut buf = Vec::new();
    let mut answered = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match frame_response(messenger, channel, line) {
                    Some(response) => response,
                    None => continue,
                }
            }
            Err(e) => {
                warn!(error = %e, "frame is not valid UTF-8");
                parse_error(e.to_string())
            }
        };

        write_frame(&mut writer, &response).await?;
        answered += 1;
    }

    info!(%channel, answered, "bridge runtime reached end of input");
    Ok(answered)
}

/// Runs [`serve`] on process stdin/stdout.
///
/// Anything else writing to stdout will corrupt the protocol; keep log output
/// on stderr or in files.
pub async fn run_stdio(messenger: &BinaryMessenger, channel: &str) -> Result<usize, BridgeError> {
    let reader = BufReader::new(io::stdin());
    serve(messenger, channel, reader, io::stdout()).await
}

/// The answer to one non-blank line, or `None` for a response frame sent our way.
fn frame_response(messenger: &BinaryMessenger, channel: &str, line: &str) -> Option<Response> {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "unparsable frame");
            return Some(parse_error(e.to_string()));
        }
    };

    let is_response = value.get("method").is_none()
        && (value.get("result").is_some() || value.get("error").is_some());
    if is_response {
        warn!(id = ?value.get("id"), "ignoring response frame sent to the bridge");
        return None;
    }

    match Request::deserialize(&value) {
        Ok(req) => Some(answer(messenger, channel, req)),
        Err(e) => {
            let id = value
                .get("id")
                .and_then(|id| Id::deserialize(id).ok())
                .unwrap_or(Id::Null);
            warn!(?id, error = %e, "invalid request");
            Some(Response::fail(
                id,
                INVALID_REQUEST,
                "Invalid Request",
                Some(json!(e.to_string())),
            ))
        }
    }
}

fn parse_error(detail: String) -> Response {
    Response::fail(Id::Null, PARSE_ERROR, "Parse error", Some(json!(detail)))
}

fn answer(messenger: &BinaryMessenger, channel: &str, req: Request) -> Response {
    let id = req.id.unwrap_or(Id::Null);
    let invocation = Invocation {
        method: req.method,
        arguments: req.params,
    };
    debug!(?id, method = %invocation.method, "request");

    match messenger.invoke(channel, &invocation) {
        Ok(rsp) => Response::from_method_response(id, &invocation.method, rsp),
        Err(err) => {
            error!(error = %err, "handler failed");
            Response::fail(id, INTERNAL_ERROR, "Internal error", Some(json!(err.to_string())))
        }
    }
}

async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
) -> Result<(), BridgeError> {
    let mut frame = serde_json::to_string(response)?;
    frame.push('\n');
    writer.write_all(frame.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

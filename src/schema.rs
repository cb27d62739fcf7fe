use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use channel_bridge::{
    Invocation, MethodResponse,
    jsonrpc::{Request, Response},
};
use schemars::{JsonSchema, schema_for};
use tracing::info;

/// Write JSON schemas for everything that crosses the channel into `out_dir`.
/// Returns the files written.
pub fn write_schema(out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create schema directory {}", out_dir.display()))?;

    let written = vec![
        write_one::<Invocation>(out_dir, "invocation")?,
        write_one::<MethodResponse>(out_dir, "method-response")?,
        write_one::<Request>(out_dir, "jsonrpc-request")?,
        write_one::<Response>(out_dir, "jsonrpc-response")?,
    ];
    info!(dir = %out_dir.display(), count = written.len(), "schemas written");
    Ok(written)
}

fn write_one<T: JsonSchema>(out_dir: &Path, name: &str) -> Result<PathBuf> {
    let schema = schema_for!(T);
    let path = out_dir.join(format!("{name}.schema.json"));
    fs::write(&path, serde_json::to_string_pretty(&schema)?)
        .with_context(|| format!("could not write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn writes_all_schemas() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("schemas");
        let files = write_schema(&out).unwrap();
        assert_eq!(files.len(), 4);

        let raw = fs::read_to_string(out.join("invocation.schema.json")).unwrap();
        let invocation: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(invocation["title"], "Invocation");
        assert!(invocation["properties"]["method"].is_object());
        assert!(out.join("jsonrpc-response.schema.json").is_file());
    }
}

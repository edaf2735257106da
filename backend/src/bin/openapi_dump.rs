//! Print the OpenAPI document as JSON.
//!
//! Pass `--yaml` to emit YAML instead.

use std::io::Write;

use careandcure::ApiDoc;
use color_eyre::eyre::{Context, Result};
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let doc = ApiDoc::openapi();
    let rendered = if std::env::args().any(|arg| arg == "--yaml") {
        doc.to_yaml().context("failed to render OpenAPI YAML")?
    } else {
        doc.to_pretty_json()
            .context("failed to render OpenAPI JSON")?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write OpenAPI document")?;
    Ok(())
}

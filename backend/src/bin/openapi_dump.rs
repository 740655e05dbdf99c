//! Print the OpenAPI document as pretty-printed JSON.
//!
//! ```text
//! cargo run --bin openapi-dump > openapi.json
//! ```

use std::io::{self, Write};

use user_registry::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|error| io::Error::other(format!("failed to serialise OpenAPI document: {error}")))?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{document}")
}

use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Lectern configuration
[server]
host = "127.0.0.1"
port = 8080
allowed_origins = []

[store]
path = "data/documents.json"

[llm]
provider = "openai"
model = ""
api_key = ""
"#;

/// Initialize a new config file
pub fn run_init(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config already exists at {:?}", path);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    println!("Created config at {:?}", path);
    Ok(())
}

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use template_interface::Kind;

use super::Sources;

/// Name of the unnamed root every source file is associated with
const ROOT: &str = "";

pub struct RenderCommand;

impl RenderCommand {
    /// Load the templates, then write the selected one to stdout
    pub fn execute(
        kind: Kind,
        sources: &Sources,
        data_path: Option<&Path>,
        template: Option<&str>,
        delims: Option<Vec<String>>,
    ) -> Result<()> {
        let data = load_data(data_path)?;

        let mut root = kind.new_template(ROOT);
        if let Some([left, right]) = delims.as_deref() {
            root = root.delims(left, right);
        }
        let root = sources.load(root.as_ref())?;

        let entry = match template {
            Some(name) => name.to_string(),
            None => sources
                .default_entry(root.as_ref())
                .context("No template to execute")?,
        };
        tracing::info!(%kind, template = %entry, "rendering");

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        root.execute_template(&mut out, &entry, &data)
            .with_context(|| format!("Failed to render template: {}", entry))?;
        out.flush().context("Failed to flush output")?;

        Ok(())
    }
}

/// Read render data; `.json` files as JSON, anything else as YAML
fn load_data(path: Option<&Path>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::Object(Default::default()));
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {:?}", path))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON data: {:?}", path))
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML data: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_data_defaults_to_empty_object() {
        assert_eq!(load_data(None).unwrap(), json!({}));
    }

    #[test]
    fn test_load_data_by_extension() {
        let dir = TempDir::new().unwrap();
        let json_path = dir.path().join("data.json");
        let yaml_path = dir.path().join("data.yaml");
        std::fs::write(&json_path, r#"{"name": "Ada"}"#).unwrap();
        std::fs::write(&yaml_path, "name: Grace\ntags:\n  - a\n  - b\n").unwrap();

        assert_eq!(load_data(Some(&json_path)).unwrap(), json!({"name": "Ada"}));
        assert_eq!(
            load_data(Some(&yaml_path)).unwrap(),
            json!({"name": "Grace", "tags": ["a", "b"]})
        );
    }

    #[test]
    fn test_load_data_reports_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_data(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON data"));
    }
}

//! Persona/job configuration loading.
//!
//! Missing optional fields are filled by serde defaults on
//! `PersonaContext`; a missing file falls back to a generic research
//! persona rather than failing the run.

use anyhow::{Context, Result};
use shared_types::{JobToBeDone, Persona, PersonaContext};
use std::path::Path;

/// Load the persona context, or the default when no path is given or
/// the file does not exist.
pub fn load_persona(path: Option<&Path>) -> Result<PersonaContext> {
    let Some(path) = path else {
        return Ok(default_context());
    };
    if !path.exists() {
        tracing::warn!(
            "config {} not found, using the default persona",
            path.display()
        );
        return Ok(default_context());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    match serde_json::from_str(&raw) {
        Ok(ctx) => Ok(ctx),
        Err(error) => {
            tracing::warn!(
                "config {} is malformed ({}), using the default persona",
                path.display(),
                error
            );
            Ok(default_context())
        }
    }
}

fn default_context() -> PersonaContext {
    PersonaContext {
        persona: Persona {
            role: "Research Analyst".to_string(),
            domain: String::new(),
            expertise: Vec::new(),
            information_needs: Vec::new(),
        },
        job: JobToBeDone {
            task_description: "Extract key insights and findings from documents".to_string(),
            expected_output: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_missing_path_uses_default_persona() {
        let ctx = load_persona(None).unwrap();
        assert_eq!(ctx.persona.role, "Research Analyst");
    }

    #[test]
    fn test_nonexistent_file_uses_default_persona() {
        let ctx = load_persona(Some(Path::new("/nonexistent/config.json"))).unwrap();
        assert_eq!(ctx.persona.role, "Research Analyst");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "persona": {{"role": "Investor", "domain": "Finance"}},
                "job_to_be_done": {{"task_description": "assess growth"}}
            }}"#
        )
        .unwrap();

        let ctx = load_persona(Some(file.path())).unwrap();
        assert_eq!(ctx.persona.role, "Investor");
        assert!(ctx.persona.expertise.is_empty());
        assert!(ctx.job.expected_output.is_empty());
    }

    #[test]
    fn test_malformed_config_falls_back_to_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        let ctx = load_persona(Some(file.path())).unwrap();
        assert_eq!(ctx.persona.role, "Research Analyst");
    }
}

use serde::{Deserialize, Serialize};

/// The end-user role and domain for whom relevance is judged.
///
/// `expertise` and `information_needs` are optional in the input
/// config and default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
    pub domain: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub information_needs: Vec<String>,
}

/// The task the persona aims to accomplish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task_description: String,
    #[serde(default)]
    pub expected_output: Vec<String>,
}

/// Persona plus job-to-be-done, immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaContext {
    pub persona: Persona,
    #[serde(rename = "job_to_be_done")]
    pub job: JobToBeDone,
}

impl Persona {
    /// Flat text rendering used for query construction, archetype
    /// detection, and the output metadata.
    pub fn describe(&self) -> String {
        if self.domain.is_empty() {
            self.role.clone()
        } else {
            format!("{} in {}", self.role, self.domain)
        }
    }
}

impl JobToBeDone {
    pub fn describe(&self) -> &str {
        &self.task_description
    }
}

impl PersonaContext {
    /// Every persona/job text field, in a fixed order. Keyword
    /// extraction for the boost rules draws from this.
    pub fn text_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.persona.role.as_str(),
            self.persona.domain.as_str(),
            self.job.task_description.as_str(),
        ];
        fields.extend(self.persona.expertise.iter().map(String::as_str));
        fields.extend(self.persona.information_needs.iter().map(String::as_str));
        fields.extend(self.job.expected_output.iter().map(String::as_str));
        fields
    }
}

//! Scenarios: ordered lists of API calls played through a session.
//!
//! # Example
//! ```toml
//! name = "profile"
//!
//! [[step]]
//! path = "/user"
//!
//! [[step]]
//! method = "PATCH"
//! path = "/user"
//! body = '{"bio": "Edited by wiretrace"}'
//! ```

pub mod runner;

pub use runner::{play_scenario, StepOutcome};

use crate::utils::error::ScenarioError;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A named, ordered list of steps
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One API call
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    #[serde(default = "default_method")]
    pub method: String,

    /// Path and query, starting with `/`
    pub path: String,

    /// JSON request body, as text
    #[serde(default)]
    pub body: Option<String>,

    /// Required status; any 2xx when absent
    #[serde(default)]
    pub expect_status: Option<u16>,
}

fn default_name() -> String {
    "scenario".to_string()
}

fn default_method() -> String {
    "GET".to_string()
}

impl Step {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: None,
            expect_status: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(default_method(), path)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn expecting(mut self, status: u16) -> Self {
        self.expect_status = Some(status);
        self
    }

    /// Parsed JSON body
    pub fn json_body(&self) -> Result<Option<Value>, serde_json::Error> {
        self.body.as_deref().map(serde_json::from_str).transpose()
    }
}

impl Scenario {
    /// Parse and validate a scenario from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read-only tour of the API: the authenticated user, another user, two
    /// organizations and a repository.
    pub fn default_reads() -> Self {
        Self {
            name: "default-reads".to_string(),
            steps: vec![
                Step::get("/user"),
                Step::get("/users/jacquev6"),
                Step::get("/orgs/github"),
                Step::get("/orgs/BeaverSoftware"),
                Step::get("/repos/jacquev6/PyGithub"),
            ],
        }
    }

    /// User-level writes, each undone by the next step except the bio, which
    /// is left set to a fixed marker.
    pub fn default_writes() -> Self {
        Self {
            name: "default-writes".to_string(),
            steps: vec![
                Step::new("PATCH", "/user").with_body(r#"{"bio":"Edited by wiretrace"}"#),
                Step::new("DELETE", "/user/following/jacquev6").expecting(204),
                Step::new("PUT", "/user/following/jacquev6").expecting(204),
                Step::new("DELETE", "/user/starred/jacquev6/PyGithub").expecting(204),
                Step::new("PUT", "/user/starred/jacquev6/PyGithub").expecting(204),
            ],
        }
    }

    /// Built-in scenario: the read tour, optionally followed by the writes
    pub fn builtin(include_writes: bool) -> Self {
        let mut scenario = Self::default_reads();
        if include_writes {
            scenario.name = "default-reads-and-writes".to_string();
            scenario.steps.extend(Self::default_writes().steps);
        }
        scenario
    }

    /// Check every step before any request is issued
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (index, step) in self.steps.iter().enumerate() {
            let invalid = |reason: String| ScenarioError::InvalidStep {
                index: index + 1,
                reason,
            };

            if step.method.is_empty() || !step.method.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(invalid(format!(
                    "method must be an upper-case verb, got {:?}",
                    step.method
                )));
            }
            if !step.path.starts_with('/') {
                return Err(invalid(format!("path must start with '/', got {:?}", step.path)));
            }
            if step.path.chars().any(char::is_whitespace) {
                return Err(invalid("path must not contain whitespace".to_string()));
            }
            if let Err(e) = step.json_body() {
                return Err(invalid(format!("body is not valid JSON: {}", e)));
            }
        }
        Ok(())
    }
}

/// Load a scenario file
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    debug!("Loading scenario from: {}", path.display());

    let text = fs::read_to_string(path)?;
    Scenario::from_toml(&text)
}

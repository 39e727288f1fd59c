//! Plays a scenario through an API client.

use super::Scenario;
use crate::api::client::{expect_success, ApiClient};
use crate::transport::Transport;
use crate::utils::error::ApiError;
use log::info;
use serde_json::Value;

/// What one step returned
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub method: String,
    pub path: String,
    pub status: u16,
    /// Short label pulled from the JSON body (`full_name`, `login` or `name`)
    pub label: Option<String>,
}

/// Run every step in order, stopping at the first failure.
///
/// A step fails when the transport fails (including replay mismatches) or
/// when the status differs from `expect_status` (any 2xx by default).
pub fn play_scenario<T: Transport>(
    client: &mut ApiClient<T>,
    scenario: &Scenario,
) -> Result<Vec<StepOutcome>, ApiError> {
    info!(
        "Playing scenario '{}' ({} steps)",
        scenario.name,
        scenario.steps.len()
    );

    let mut outcomes = Vec::with_capacity(scenario.steps.len());

    for step in &scenario.steps {
        let body = step.json_body()?;
        let response = client.send(&step.method, &step.path, body.as_ref())?;

        let response = match step.expect_status {
            Some(expected) if response.status == expected => response,
            Some(_) => {
                return Err(ApiError::Status {
                    method: step.method.clone(),
                    path: step.path.clone(),
                    status: response.status,
                    body: response.body,
                })
            }
            None => expect_success(&step.method, &step.path, response)?,
        };

        outcomes.push(StepOutcome {
            method: step.method.clone(),
            path: step.path.clone(),
            status: response.status,
            label: label_for(&response.body),
        });
    }

    Ok(outcomes)
}

fn label_for(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["full_name", "login", "name"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_for() {
        assert_eq!(label_for(r#"{"login":"alice","name":"Alice"}"#), Some("alice".to_string()));
        assert_eq!(
            label_for(r#"{"full_name":"jacquev6/PyGithub","name":"PyGithub"}"#),
            Some("jacquev6/PyGithub".to_string())
        );
        assert_eq!(label_for("[]"), None);
        assert_eq!(label_for(""), None);
    }
}

//! Pipeline type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents a pipeline definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: u32,

    pub name: String,

    /// Folder path within the project
    #[serde(default)]
    pub folder: Option<String>,

    #[serde(default)]
    pub configuration: Option<PipelineConfiguration>,
}

/// How a pipeline is defined
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfiguration {
    /// "yaml" for YAML-defined pipelines, "designerJson" etc. otherwise
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Path of the YAML file within its repository
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub repository: Option<ConfigurationRepository>,
}

impl PipelineConfiguration {
    pub fn is_yaml(&self) -> bool {
        self.kind.as_deref().is_some_and(|k| k.eq_ignore_ascii_case("yaml"))
    }
}

/// Repository holding a pipeline's YAML definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationRepository {
    #[serde(default)]
    pub id: Option<String>,
}

/// Represents one run of a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub id: u32,

    #[serde(default)]
    pub name: Option<String>,

    /// inProgress, completed, canceling, ...
    #[serde(default)]
    pub state: Option<String>,

    /// succeeded, failed, canceled; absent while running
    #[serde(default)]
    pub result: Option<String>,

    #[serde(default)]
    pub created_date: Option<String>,

    #[serde(default)]
    pub finished_date: Option<String>,
}

/// Request body for queueing a pipeline run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPipelineRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<RunResources>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub template_parameters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResources {
    pub repositories: BTreeMap<String, RunRepositoryResource>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRepositoryResource {
    pub ref_name: String,
}

impl RunPipelineRequest {
    /// Run on a branch with the given template parameters.
    pub fn new(branch: Option<&str>, parameters: BTreeMap<String, String>) -> Self {
        let resources = branch.map(|b| {
            let ref_name = if b.starts_with("refs/") {
                b.to_string()
            } else {
                format!("refs/heads/{}", b)
            };
            let mut repositories = BTreeMap::new();
            repositories.insert("self".to_string(), RunRepositoryResource { ref_name });
            RunResources { repositories }
        });
        Self {
            resources,
            template_parameters: parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_request_branch_normalization() {
        let req = RunPipelineRequest::new(Some("main"), BTreeMap::new());
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v["resources"]["repositories"]["self"]["refName"],
            "refs/heads/main"
        );

        let req = RunPipelineRequest::new(Some("refs/tags/v1"), BTreeMap::new());
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v["resources"]["repositories"]["self"]["refName"],
            "refs/tags/v1"
        );
    }

    #[test]
    fn test_run_request_omits_empty_sections() {
        let req = RunPipelineRequest::new(None, BTreeMap::new());
        let v = serde_json::to_value(&req).unwrap();
        assert!(v.get("resources").is_none());
        assert!(v.get("templateParameters").is_none());
    }

    #[test]
    fn test_configuration_is_yaml() {
        let yaml: PipelineConfiguration =
            serde_json::from_str(r#"{ "type": "yaml", "path": "ci.yml" }"#).unwrap();
        assert!(yaml.is_yaml());

        let designer: PipelineConfiguration =
            serde_json::from_str(r#"{ "type": "designerJson" }"#).unwrap();
        assert!(!designer.is_yaml());
    }
}

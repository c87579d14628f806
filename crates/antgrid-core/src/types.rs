//! Problem manifests: the nodes to pack onto and the workloads to pack.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ColonyConfig;

/// Resource request of one container inside a workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// CPU request in millicores.
    #[serde(default)]
    pub cpu_millis: u64,
    /// Memory request in bytes.
    #[serde(default)]
    pub memory_bytes: u64,
}

/// A workload (pod) made of one or more containers, placed as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    pub name: String,
    #[serde(default)]
    pub containers: Vec<ContainerRequest>,
}

/// A machine with fixed allocatable capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    /// Allocatable CPU in millicores.
    pub cpu_millis: u64,
    /// Allocatable memory in bytes.
    pub memory_bytes: u64,
}

/// A complete packing problem, optionally carrying its own colony settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default)]
    pub colony: ColonyConfig,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub workloads: Vec<WorkloadSpec>,
}

impl Problem {
    /// Load a problem from a `.json` file, or TOML for any other extension.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let problem = if is_json {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        Ok(problem)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// A small runnable problem: two 4-core/4GiB nodes, three 2-core/2GiB workloads.
    pub fn scaffold() -> Self {
        const GIB: u64 = 1024 * 1024 * 1024;

        let nodes = (1..=2)
            .map(|i| NodeSpec {
                name: format!("node-{i}"),
                cpu_millis: 4000,
                memory_bytes: 4 * GIB,
            })
            .collect();

        let workloads = (1..=3)
            .map(|i| WorkloadSpec {
                name: format!("web-{i}"),
                containers: vec![
                    ContainerRequest {
                        name: Some("app".to_string()),
                        cpu_millis: 1500,
                        memory_bytes: GIB + GIB / 2,
                    },
                    ContainerRequest {
                        name: Some("sidecar".to_string()),
                        cpu_millis: 500,
                        memory_bytes: GIB / 2,
                    },
                ],
            })
            .collect();

        Problem {
            colony: ColonyConfig::default(),
            nodes,
            workloads,
        }
    }
}

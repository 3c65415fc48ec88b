//! Core conversion engine for dashboard to ConfigMap transformation

use crate::cli::path_mapping;
use crate::conversion::config::ConversionConfig;
use crate::conversion::writer;
use crate::conversion::ConversionResult;
use crate::formatter::{embed_dashboard, JsonStyle};
use crate::parser::{load_dashboard, Dashboard};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Labels grafana's dashboard sidecar looks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMapLabels {
    pub grafana_dashboard: String,
}

impl Default for ConfigMapLabels {
    fn default() -> Self {
        Self {
            grafana_dashboard: "1".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMapMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub labels: ConfigMapLabels,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Kubernetes ConfigMap carrying one dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    pub api_version: String,
    pub kind: String,
    pub metadata: ConfigMapMetadata,
    pub data: BTreeMap<String, String>,
}

impl ConfigMap {
    /// Build the envelope around already encoded dashboard text.
    ///
    /// `data` always holds exactly one entry keyed by `data_key`.
    pub fn for_dashboard(
        data_key: &str,
        name: &str,
        dashboard_text: String,
        config: &ConversionConfig,
    ) -> Self {
        let namespace = (!config.namespace.is_empty()).then(|| config.namespace.clone());

        Self {
            api_version: "v1".to_string(),
            kind: "ConfigMap".to_string(),
            metadata: ConfigMapMetadata {
                name: name.to_string(),
                namespace,
                labels: ConfigMapLabels::default(),
                annotations: config.annotations.clone(),
            },
            data: BTreeMap::from([(data_key.to_string(), dashboard_text)]),
        }
    }
}

/// Serialized manifest plus what we know about how it was produced
#[derive(Debug, Clone)]
pub struct ManifestData {
    pub content: String,
    pub metadata: ConversionMetadata,
}

impl ManifestData {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Metadata about the conversion process
#[derive(Debug, Clone)]
pub struct ConversionMetadata {
    pub configmap_name: String,
    pub dashboard: String,
    pub input_size: u64,
    pub output_size: u64,
    pub processing_time_ms: u64,
}

/// Main conversion engine
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Build the ConfigMap for a loaded dashboard
    pub fn build_configmap(&self, dashboard: &Dashboard, name: &str) -> ConversionResult<ConfigMap> {
        let style = JsonStyle::from_compact(self.config.compact);
        let text = embed_dashboard(&dashboard.data, style)?;
        let data_key = path_mapping::data_key(&dashboard.source);

        Ok(ConfigMap::for_dashboard(&data_key, name, text, &self.config))
    }

    /// Build and serialize the manifest for a loaded dashboard
    pub fn convert(&self, dashboard: &Dashboard, name: &str) -> ConversionResult<ManifestData> {
        let start_time = Instant::now();

        let configmap = self.build_configmap(dashboard, name)?;
        let content = writer::to_yaml(&configmap)?;

        let metadata = ConversionMetadata {
            configmap_name: name.to_string(),
            dashboard: dashboard.description(),
            input_size: dashboard.source_size,
            output_size: content.len() as u64,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(ManifestData { content, metadata })
    }

    /// Run the whole pipeline for one file: load, build, write
    pub fn convert_file(
        &self,
        input_path: &Path,
        output_path: &Path,
        name: &str,
    ) -> ConversionResult<ManifestData> {
        let dashboard = load_dashboard(input_path)?;
        let manifest = self.convert(&dashboard, name)?;
        writer::write_manifest(output_path, &manifest.content)?;

        debug!(
            input = %input_path.display(),
            output = %output_path.display(),
            configmap = name,
            bytes = manifest.len(),
            "wrote configmap manifest"
        );

        Ok(manifest)
    }
}

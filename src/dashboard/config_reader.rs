use crate::dashboard::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "surveyTitle")]
    pub survey_title: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "label")]
    _label: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl SourceFile {
    /// Builds a source for a file named on the command line.
    pub fn from_path(
        path: &str,
        provider: Option<String>,
        excel_worksheet_name: Option<String>,
    ) -> SourceFile {
        SourceFile {
            provider,
            file_path: path.to_string(),
            _label: None,
            excel_worksheet_name,
        }
    }

    /// The provider, falling back on the file extension.
    pub fn provider(&self) -> String {
        match &self.provider {
            Some(provider) => provider.clone(),
            None if self.file_path.to_lowercase().ends_with(".xlsx") => "xlsx".to_string(),
            None => "csv".to_string(),
        }
    }

    /// The display label. Strings pass through and numbers are rendered
    /// (a bare year is a common label in configurations).
    pub fn label(&self) -> DashResult<Option<String>> {
        match &self._label {
            None => Ok(None),
            Some(JSValue::String(s)) => Ok(Some(s.clone())),
            Some(JSValue::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(DashboardError::ParsingJsonLabel {}),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "sourceFiles", default)]
    pub source_files: Vec<SourceFile>,
    #[serde(rename = "hallFilter")]
    pub hall_filter: Option<String>,
    #[serde(rename = "trendIndex")]
    pub trend_index: Option<String>,
    #[serde(rename = "includeDemoData")]
    pub include_demo_data: Option<bool>,
}

/// The configuration used when no file is passed: no sources, no filter,
/// everything left to the command-line flags.
pub fn default_config() -> DashboardConfig {
    DashboardConfig {
        output_settings: OutputSettings {
            survey_title: "Residence Life Survey".to_string(),
            output_path: None,
        },
        source_files: Vec::new(),
        hall_filter: None,
        trend_index: None,
        include_demo_data: None,
    }
}

pub fn read_config(path: &str) -> DashResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> DashResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configs_parse_with_string_and_numeric_labels() {
        let raw = r#"{
            "outputSettings": { "surveyTitle": "ResLife", "outputPath": "out.json" },
            "sourceFiles": [
                { "filePath": "a.csv", "label": "Fall 2025" },
                { "provider": "xlsx", "filePath": "b.xlsx", "label": 2026 }
            ],
            "hallFilter": "Pine Hall",
            "trendIndex": "belonging"
        }"#;
        let config: DashboardConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.output_settings.survey_title, "ResLife");
        assert_eq!(config.source_files.len(), 2);
        assert_eq!(
            config.source_files[0].label().unwrap(),
            Some("Fall 2025".to_string())
        );
        assert_eq!(
            config.source_files[1].label().unwrap(),
            Some("2026".to_string())
        );
        assert_eq!(config.hall_filter.as_deref(), Some("Pine Hall"));
        assert_eq!(config.include_demo_data, None);
    }

    #[test]
    fn providers_fall_back_on_the_file_extension() {
        let source = SourceFile::from_path("surveys/Spring.XLSX", None, None);
        assert_eq!(source.provider(), "xlsx");
        let source = SourceFile::from_path("surveys/spring.csv", None, None);
        assert_eq!(source.provider(), "csv");
        let source = SourceFile::from_path("surveys/spring.csv", Some("xlsx".to_string()), None);
        assert_eq!(source.provider(), "xlsx");
    }

    #[test]
    fn labels_reject_other_json_types() {
        let raw = r#"{ "filePath": "a.csv", "label": true }"#;
        let source: SourceFile = serde_json::from_str(raw).unwrap();
        assert!(source.label().is_err());
    }

    #[test]
    fn configs_without_sources_parse() {
        let raw = r#"{ "outputSettings": { "surveyTitle": "ResLife" } }"#;
        let config: DashboardConfig = serde_json::from_str(raw).unwrap();
        assert!(config.source_files.is_empty());
        assert_eq!(config.output_settings.output_path, None);
    }
}

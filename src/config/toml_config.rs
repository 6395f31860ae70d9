use crate::core::cost::{CostRates, DEFAULT_USAGE_HOURS};
use crate::core::estimator::SizingRatios;
use crate::core::report::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SizingError};
use crate::utils::validation::{validate_path, validate_usage_hours, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    pub estimation: Option<EstimationConfig>,
    pub pricing: Option<PricingConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimationConfig {
    pub ram_per_user_gb: Option<f64>,
    pub ram_per_core_gb: Option<f64>,
    pub storage_per_user_mb: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    pub storage_cost_per_gb_month: Option<f64>,
    pub days_per_month: Option<f64>,
    pub default_usage_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SizingError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SizingError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_PATH})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn catalog_path(&self) -> &str {
        &self.catalog.path
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn default_usage_hours(&self) -> f64 {
        self.pricing
            .as_ref()
            .and_then(|p| p.default_usage_hours)
            .unwrap_or(DEFAULT_USAGE_HOURS)
    }

    /// 未設定的欄位沿用預設比例
    pub fn sizing_ratios(&self) -> SizingRatios {
        let defaults = SizingRatios::default();
        let estimation = self.estimation.clone().unwrap_or_default();
        SizingRatios {
            ram_per_user_gb: estimation.ram_per_user_gb.unwrap_or(defaults.ram_per_user_gb),
            ram_per_core_gb: estimation.ram_per_core_gb.unwrap_or(defaults.ram_per_core_gb),
            storage_per_user_mb: estimation
                .storage_per_user_mb
                .unwrap_or(defaults.storage_per_user_mb),
        }
    }

    pub fn cost_rates(&self) -> CostRates {
        let defaults = CostRates::default();
        let pricing = self.pricing.clone().unwrap_or_default();
        CostRates {
            storage_cost_per_gb_month: pricing
                .storage_cost_per_gb_month
                .unwrap_or(defaults.storage_cost_per_gb_month),
            days_per_month: pricing.days_per_month.unwrap_or(defaults.days_per_month),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("catalog.path", &self.catalog.path)?;
        self.sizing_ratios().validate()?;
        self.cost_rates().validate()?;
        validate_usage_hours("pricing.default_usage_hours", self.default_usage_hours())?;

        if let Some(path) = self.output_path() {
            validate_path("output.path", path)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog.path
    }

    fn default_usage_hours(&self) -> f64 {
        self.default_usage_hours()
    }

    fn sizing_ratios(&self) -> SizingRatios {
        self.sizing_ratios()
    }

    fn cost_rates(&self) -> CostRates {
        self.cost_rates()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[catalog]
path = "data/instancetypes.csv"

[estimation]
ram_per_user_gb = 0.05
ram_per_core_gb = 4.0
storage_per_user_mb = 200.0

[pricing]
storage_cost_per_gb_month = 0.1
days_per_month = 31.0
default_usage_hours = 12.0

[output]
format = "json"
path = "reports/sizing.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog_path(), "data/instancetypes.csv");
        assert_eq!(config.sizing_ratios().ram_per_user_gb, 0.05);
        assert_eq!(config.sizing_ratios().storage_per_user_mb, 200.0);
        assert_eq!(config.cost_rates().days_per_month, 31.0);
        assert_eq!(config.default_usage_hours(), 12.0);
        assert_eq!(config.output_format(), Some(OutputFormat::Json));
        assert_eq!(config.output_path(), Some("reports/sizing.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[catalog]\npath = \"catalog.csv\"\n").unwrap();

        assert_eq!(config.sizing_ratios(), SizingRatios::default());
        assert_eq!(config.cost_rates(), CostRates::default());
        assert_eq!(config.default_usage_hours(), 24.0);
        assert_eq!(config.output_format(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SIZER_TEST_CATALOG", "/srv/catalog/instancetypes.csv");

        let toml_content = r#"
[catalog]
path = "${SIZER_TEST_CATALOG}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog_path(), "/srv/catalog/instancetypes.csv");

        std::env::remove_var("SIZER_TEST_CATALOG");
    }

    #[test]
    fn test_undefined_env_var_left_verbatim() {
        let toml_content = r#"
[catalog]
path = "${SIZER_TEST_UNDEFINED_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog_path(), "${SIZER_TEST_UNDEFINED_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let zero_ratio = r#"
[catalog]
path = "catalog.csv"

[estimation]
ram_per_core_gb = 0.0
"#;
        let config = TomlConfig::from_toml_str(zero_ratio).unwrap();
        assert!(config.validate().is_err());

        let bad_hours = r#"
[catalog]
path = "catalog.csv"

[pricing]
default_usage_hours = 30.0
"#;
        let config = TomlConfig::from_toml_str(bad_hours).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        let toml_content = r#"
[catalog]
path = "catalog.csv"

[output]
format = "xml"
"#;
        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(SizingError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\npath = \"file-test.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog_path(), "file-test.csv");
    }
}

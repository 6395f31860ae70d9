use crate::core::SizingReport;
use crate::utils::error::{Result, SizingError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

pub const NO_INSTANCES_MESSAGE: &str = "No instances found that meet the requirements.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub const VALUES: [&'static str; 3] = ["text", "json", "csv"];
}

impl FromStr for OutputFormat {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(SizingError::InvalidConfigValue {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: format!("Unsupported format. Valid formats: {}", Self::VALUES.join(", ")),
            }),
        }
    }
}

pub fn render(report: &SizingReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => render_csv(report),
    }
}

/// 主控台輸出，金額固定兩位小數
pub fn render_text(report: &SizingReport) -> String {
    let instance = &report.instance;
    let cost = &report.cost;
    let mut out = String::new();

    // String 的 fmt::Write 不會失敗
    let _ = writeln!(
        out,
        "The instance with the lowest cost and at least {:.2} GB RAM and {:.2} CPU cores:\n",
        report.requirement.ram_gb, report.requirement.cpu_cores
    );
    let _ = writeln!(out, "Instance type            {}", instance.name);
    let _ = writeln!(out, "vCPUs                    {}", instance.vcpus);
    let _ = writeln!(out, "Cores                    {}", instance.cores);
    let _ = writeln!(out, "Memory (GiB)             {}", instance.memory_gib);
    let _ = writeln!(out, "On-Demand Linux pricing  {}", instance.hourly_price_raw);
    let _ = writeln!(out, "Cost of instance per month: ${:.2}", cost.instance_cost_per_month);
    let _ = writeln!(out, "Cost of storage per month: ${:.2}", cost.storage_cost_per_month);
    let _ = write!(
        out,
        "\nTotal cost of all services per month: ${:.2}",
        cost.total_cost_per_month
    );
    out
}

#[derive(Serialize)]
struct CsvRow<'a> {
    generated_at: String,
    num_users: i64,
    usage_hours: f64,
    required_ram_gb: f64,
    required_cpu_cores: f64,
    required_storage_gb: f64,
    instance_type: &'a str,
    vcpus: u32,
    cores: u32,
    memory_gib: f64,
    hourly_price: &'a str,
    instance_cost_per_month: String,
    storage_cost_per_month: String,
    total_cost_per_month: String,
}

pub fn render_csv(report: &SizingReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(CsvRow {
        generated_at: report.generated_at.to_rfc3339(),
        num_users: report.num_users,
        usage_hours: report.usage_hours,
        required_ram_gb: report.requirement.ram_gb,
        required_cpu_cores: report.requirement.cpu_cores,
        required_storage_gb: report.requirement.storage_gb,
        instance_type: &report.instance.name,
        vcpus: report.instance.vcpus,
        cores: report.instance.cores,
        memory_gib: report.instance.memory_gib,
        hourly_price: &report.instance.hourly_price_raw,
        instance_cost_per_month: format!("{:.2}", report.cost.instance_cost_per_month),
        storage_cost_per_month: format!("{:.2}", report.cost.storage_cost_per_month),
        total_cost_per_month: format!("{:.2}", report.cost.total_cost_per_month),
    })?;

    let data = writer
        .into_inner()
        .map_err(|e| SizingError::Io(e.into_error()))?;
    String::from_utf8(data).map_err(|e| {
        SizingError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CostBreakdown, InstanceRecord, ResourceRequirement};
    use chrono::{TimeZone, Utc};

    fn report() -> SizingReport {
        SizingReport {
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            num_users: 100,
            usage_hours: 24.0,
            requirement: ResourceRequirement {
                ram_gb: 2.5,
                cpu_cores: 1.0,
                storage_gb: 9.765625,
            },
            instance: InstanceRecord {
                name: "c5.large".to_string(),
                vcpus: 2,
                cores: 1,
                memory_gib: 4.0,
                hourly_price_raw: "0.10 USD".to_string(),
            },
            cost: CostBreakdown {
                instance_cost_per_month: 72.00000000000001,
                storage_cost_per_month: 0.625,
                total_cost_per_month: 72.62500000000001,
            },
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&report());
        assert!(text.contains("at least 2.50 GB RAM and 1.00 CPU cores"));
        assert!(text.contains("c5.large"));
        assert!(text.contains("Cost of instance per month: $72.00"));
        // 0.625 恰為二進位可表示的中點，四捨六入五成雙
        assert!(text.contains("Cost of storage per month: $0.62\n"));
        assert!(text.ends_with("Total cost of all services per month: $72.63"));
    }

    #[test]
    fn test_render_json() {
        let json = render(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["instance"]["Instance type"], "c5.large");
        assert_eq!(value["num_users"], 100);
        assert_eq!(value["cost"]["storage_cost_per_month"], 0.625);
    }

    #[test]
    fn test_render_csv() {
        let csv = render(&report(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("generated_at,num_users,usage_hours"));
        assert!(lines[1].contains("c5.large"));
        assert!(lines[1].contains(",72.00,"));
        assert!(lines[1].ends_with(",72.63"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}

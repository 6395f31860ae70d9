use crate::core::pricing::parse_price;
use crate::core::{CatalogSource, InstanceRecord, Storage};
use crate::utils::error::{Result, SizingError};
use async_trait::async_trait;

pub const COLUMN_INSTANCE_TYPE: &str = "Instance type";
pub const COLUMN_VCPUS: &str = "vCPUs";
pub const COLUMN_CORES: &str = "Cores";
pub const COLUMN_MEMORY: &str = "Memory (GiB)";
pub const COLUMN_PRICE: &str = "On-Demand Linux pricing";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    COLUMN_INSTANCE_TYPE,
    COLUMN_VCPUS,
    COLUMN_CORES,
    COLUMN_MEMORY,
    COLUMN_PRICE,
];

/// 載入後不可變的機型目錄
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<InstanceRecord>,
}

impl Catalog {
    pub fn new(records: Vec<InstanceRecord>) -> Self {
        Self { records }
    }

    /// 解析 CSV 內容；缺少必要欄位或欄位型別不符時回傳 `CatalogLoad`
    ///
    /// 只修剪標頭。價格欄位保留原始字串，前置空白會影響排序。
    pub fn from_csv_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(data);

        let headers = reader
            .headers()
            .map_err(|e| SizingError::catalog_load(format!("cannot read header row: {}", e)))?
            .clone();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(SizingError::catalog_load(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<InstanceRecord>().enumerate() {
            // 第 1 行為標頭
            let line = index + 2;
            let record = row.map_err(|e| {
                SizingError::catalog_load(format!("invalid catalog row at line {}: {}", line, e))
            })?;

            if parse_price(&record.hourly_price_raw).is_err() {
                tracing::warn!(
                    "⚠️ Catalog line {} ({}) has an unparsable price: {:?}",
                    line,
                    record.name,
                    record.hourly_price_raw
                );
            }
            records.push(record);
        }

        tracing::info!("📦 Loaded {} instance types from catalog", records.len());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[InstanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 透過 `Storage` 讀取 CSV 目錄（本機檔案或 S3）
#[derive(Debug, Clone)]
pub struct StorageCatalogSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> StorageCatalogSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> CatalogSource for StorageCatalogSource<S> {
    async fn load(&self) -> Result<Catalog> {
        tracing::debug!("Reading catalog from: {}", self.path);
        let data = self.storage.read_file(&self.path).await.map_err(|e| {
            SizingError::catalog_load(format!("cannot read catalog '{}': {}", self.path, e))
        })?;
        Catalog::from_csv_bytes(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const SAMPLE: &str = "\
Instance type,vCPUs,Cores,Memory (GiB),On-Demand Linux pricing
t3.micro,2,1,1,0.0104 USD
t3.medium,2,1,4,0.0416 USD
m5.large,2,1,8,0.096 USD
";

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                SizingError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "File not found",
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_csv_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);

        let m5 = &catalog.records()[2];
        assert_eq!(m5.name, "m5.large");
        assert_eq!(m5.vcpus, 2);
        assert_eq!(m5.cores, 1);
        assert_eq!(m5.memory_gib, 8.0);
        assert_eq!(m5.hourly_price_raw, "0.096 USD");
    }

    #[test]
    fn test_extra_columns_and_column_order() {
        let csv = "\
On-Demand Linux pricing,Memory (GiB),Network,Cores,vCPUs,Instance type
0.192 USD,16,Up to 10 Gigabit,2,4,m5.xlarge
";
        let catalog = Catalog::from_csv_bytes(csv.as_bytes()).unwrap();
        let record = &catalog.records()[0];
        assert_eq!(record.name, "m5.xlarge");
        assert_eq!(record.vcpus, 4);
        assert_eq!(record.memory_gib, 16.0);
    }

    #[test]
    fn test_missing_columns_reported() {
        let csv = "Instance type,vCPUs,Memory (GiB)\nt3.micro,2,1\n";
        let err = Catalog::from_csv_bytes(csv.as_bytes()).unwrap_err();
        match err {
            SizingError::CatalogLoad { message } => {
                assert!(message.contains("Cores"));
                assert!(message.contains("On-Demand Linux pricing"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_type_mismatch_reports_line() {
        let csv = "\
Instance type,vCPUs,Cores,Memory (GiB),On-Demand Linux pricing
t3.micro,2,1,1,0.0104 USD
t3.weird,two,1,4,0.0416 USD
";
        let err = Catalog::from_csv_bytes(csv.as_bytes()).unwrap_err();
        match err {
            SizingError::CatalogLoad { message } => assert!(message.contains("line 3")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_price_cell_keeps_leading_space() {
        let csv = "\
Instance type , vCPUs,Cores,Memory (GiB),On-Demand Linux pricing
d.large, 4 , 2 , 16 , 0.90 USD
";
        let catalog = Catalog::from_csv_bytes(csv.as_bytes()).unwrap();
        let record = &catalog.records()[0];
        assert_eq!(record.name, "d.large");
        assert_eq!(record.vcpus, 4);
        assert_eq!(record.cores, 2);
        assert_eq!(record.memory_gib, 16.0);
        assert_eq!(record.hourly_price_raw, " 0.90 USD");
        assert_eq!(parse_price(&record.hourly_price_raw).unwrap(), 0.90);
    }

    #[test]
    fn test_unparsable_price_is_kept() {
        let csv = "\
Instance type,vCPUs,Cores,Memory (GiB),On-Demand Linux pricing
odd.large,2,1,8,unavailable
";
        let catalog = Catalog::from_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_header_only_catalog_is_empty() {
        let csv = "Instance type,vCPUs,Cores,Memory (GiB),On-Demand Linux pricing\n";
        let catalog = Catalog::from_csv_bytes(csv.as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_storage_catalog_source() {
        let storage = MockStorage::with_file("instancetypes.csv", SAMPLE);
        let source = StorageCatalogSource::new(storage, "instancetypes.csv");

        let catalog = source.load().await.unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[tokio::test]
    async fn test_storage_catalog_source_missing_file() {
        let storage = MockStorage::with_file("other.csv", SAMPLE);
        let source = StorageCatalogSource::new(storage, "instancetypes.csv");

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SizingError::CatalogLoad { .. }));
    }
}

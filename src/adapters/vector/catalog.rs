//! Product catalog sources: the built-in sample catalog or a JSON file.

use std::path::Path;

use crate::domain::retrieval::CatalogRecord;
use crate::ports::SearchError;

fn record(
    id: &str,
    name: &str,
    category: &str,
    description: &str,
    price: f64,
) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        price: Some(price),
    }
}

/// Sample catalog used when no catalog file is configured.
pub fn builtin_catalog() -> Vec<CatalogRecord> {
    vec![
        record(
            "lap-001",
            "Aero 14",
            "laptop",
            "Lightweight 14-inch laptop with 16GB RAM, 512GB SSD and 12-hour battery life",
            899.0,
        ),
        record(
            "lap-002",
            "Titan 16 Pro",
            "laptop",
            "Gaming laptop with RTX graphics, 32GB RAM and a 240Hz display",
            1799.0,
        ),
        record(
            "lap-003",
            "Scholar 13",
            "laptop",
            "Budget student laptop with 8GB RAM and a fanless design",
            549.0,
        ),
        record(
            "phn-001",
            "Pixel 8",
            "phone",
            "Android phone with excellent camera, 7 years of updates and compact size",
            699.0,
        ),
        record(
            "phn-002",
            "Galaxy S24",
            "phone",
            "Android flagship phone with bright display, zoom camera and fast charging",
            799.0,
        ),
        record(
            "phn-003",
            "iPhone 15",
            "phone",
            "iOS phone with USB-C, strong video recording and long software support",
            799.0,
        ),
        record(
            "aud-001",
            "QuietWave 700",
            "headphones",
            "Over-ear noise cancelling headphones with 30-hour battery",
            349.0,
        ),
        record(
            "aud-002",
            "BudsLite",
            "earbuds",
            "Wireless earbuds with transparency mode and water resistance",
            129.0,
        ),
        record(
            "tab-001",
            "Slate 11",
            "tablet",
            "11-inch tablet with stylus support for notes and drawing",
            449.0,
        ),
        record(
            "wch-001",
            "Pulse Watch 3",
            "smartwatch",
            "Fitness smartwatch with GPS, heart rate and sleep tracking",
            249.0,
        ),
    ]
}

/// Loads a catalog from a JSON array of records.
pub async fn load_catalog(path: &Path) -> Result<Vec<CatalogRecord>, SearchError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SearchError::InvalidInput(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| SearchError::parse(format!("{}: {}", path.display(), e)))
}

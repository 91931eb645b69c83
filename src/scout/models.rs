//! Wire models for the Poe2Scout API
//!
//! Two item families share the same paged envelope: currency-like
//! categories and unique-equipment categories. Both expose an identifier,
//! a display text and a current price; uniques additionally carry nested
//! item metadata. The API uses camelCase keys except inside `itemMetadata`,
//! which is snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Paged envelope returned by every category endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub current_page: u32,
}

/// One point of price history; the API pads gaps with nulls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceLog {
    pub price: f64,
    pub time: DateTime<Utc>,
    pub quantity: i64,
}

/// Entry in a currency-family category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyItem {
    pub id: u64,
    #[serde(default)]
    pub api_id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub category_api_id: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub price_logs: Vec<Option<PriceLog>>,
    #[serde(default)]
    pub current_price: f64,
}

/// Entry in a unique-equipment category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueItem {
    pub id: u64,
    #[serde(default)]
    pub item_id: u64,
    pub text: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category_api_id: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub item_metadata: Option<ItemMetadata>,
    #[serde(default)]
    pub price_logs: Vec<Option<PriceLog>>,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub is_chanceable: Option<bool>,
}

/// Descriptive metadata for unique items (snake_case keys on the wire)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub item_level: Option<u32>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub implicit_mods: Vec<String>,
    #[serde(default)]
    pub explicit_mods: Vec<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub requirements: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_item_deserializes_with_nulls() {
        let json = r#"{
            "id": 7,
            "apiId": "divine",
            "text": "Divine Orb",
            "categoryApiId": "currency",
            "iconUrl": null,
            "priceLogs": [null, {"price": 180.5, "time": "2026-08-01T00:00:00Z", "quantity": 12}],
            "currentPrice": 180.5
        }"#;

        let item: CurrencyItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.text, "Divine Orb");
        assert_eq!(item.icon_url, None);
        assert_eq!(item.price_logs.len(), 2);
        assert!(item.price_logs[0].is_none());
        let log = item.price_logs[1].as_ref().unwrap();
        assert!((log.price - 180.5).abs() < f64::EPSILON);
        assert_eq!(log.quantity, 12);
        assert!((item.current_price - 180.5).abs() < f64::EPSILON);
    }

    #[test]
    fn currency_item_deserializes_minimal() {
        let item: CurrencyItem = serde_json::from_str(r#"{"id": 1, "text": "Exalted Orb"}"#).unwrap();
        assert_eq!(item.text, "Exalted Orb");
        assert!(item.price_logs.is_empty());
        assert_eq!(item.current_price, 0.0);
    }

    #[test]
    fn unique_item_deserializes_with_snake_case_metadata() {
        let json = r#"{
            "id": 42,
            "itemId": 9001,
            "text": "Headhunter",
            "name": "Headhunter",
            "categoryApiId": "accessory",
            "iconUrl": "https://example.com/hh.png",
            "itemMetadata": {
                "name": "Headhunter",
                "base_type": "Leather Belt",
                "item_level": 84,
                "explicit_mods": ["When you Kill a Rare monster, you gain its Modifiers"],
                "requirements": {"Level": 40}
            },
            "priceLogs": [],
            "currentPrice": 321.0,
            "type": "belt",
            "isChanceable": true
        }"#;

        let item: UniqueItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_id, 9001);
        let metadata = item.item_metadata.unwrap();
        assert_eq!(metadata.base_type.as_deref(), Some("Leather Belt"));
        assert_eq!(metadata.item_level, Some(84));
        assert_eq!(metadata.explicit_mods.len(), 1);
        assert_eq!(metadata.requirements["Level"], serde_json::json!(40));
        assert_eq!(item.item_type.as_deref(), Some("belt"));
        assert_eq!(item.is_chanceable, Some(true));
    }

    #[test]
    fn paged_envelope_defaults_missing_fields() {
        let paged: Paged<CurrencyItem> = serde_json::from_str("{}").unwrap();
        assert!(paged.items.is_empty());
        assert_eq!(paged.total, 0);
        assert_eq!(paged.pages, 0);
        assert_eq!(paged.current_page, 0);
    }

    #[test]
    fn paged_envelope_carries_page_counters() {
        let json = r#"{
            "items": [{"id": 1, "text": "Chaos Orb", "currentPrice": 1.0}],
            "total": 510,
            "pages": 3,
            "currentPage": 2
        }"#;

        let paged: Paged<CurrencyItem> = serde_json::from_str(json).unwrap();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.total, 510);
        assert_eq!(paged.pages, 3);
        assert_eq!(paged.current_page, 2);
    }

    #[test]
    fn items_survive_backup_roundtrip() {
        let item: CurrencyItem =
            serde_json::from_str(r#"{"id": 3, "text": "Vaal Orb", "currentPrice": 0.5}"#).unwrap();
        let json = serde_json::to_string(&vec![item]).unwrap();
        let restored: Vec<CurrencyItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].text, "Vaal Orb");
    }
}

//! Item entity model and DTOs.

use chrono::Timelike;
use itemstore_core::types::{DbId, LocalTimestamp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use validator::Validate;

/// An item row from the `items` table, as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Item {
    pub id: DbId,
    pub title: String,
    pub weight: f64,
    #[serde(serialize_with = "serialize_released")]
    pub released: Option<LocalTimestamp>,
    pub user_id: DbId,
}

/// DTO for creating a new item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItem {
    /// Explicit primary key. Assigned by the sequence when omitted.
    #[serde(default)]
    pub id: Option<DbId>,
    #[validate(length(max = 40, message = "must be at most 40 characters"))]
    pub title: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub released: Option<LocalTimestamp>,
    /// Owning user. Must reference an existing row.
    pub user_id: DbId,
}

/// DTO for partially updating an item.
///
/// Omitted fields keep their stored value and unknown fields are ignored.
/// `released` distinguishes "absent" (`None`) from an explicit `null`
/// (`Some(None)`), which clears the timestamp.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateItem {
    #[validate(length(max = 40, message = "must be at most 40 characters"))]
    pub title: Option<String>,
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub released: Option<Option<LocalTimestamp>>,
    pub user_id: Option<DbId>,
}

/// Any value that is present in the payload, `null` included, becomes `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Whole seconds carry no fraction, anything else carries all six
/// microsecond digits, so `.120000` is echoed back as sent.
fn serialize_released<S>(value: &Option<LocalTimestamp>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) if ts.nanosecond() == 0 => {
            serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S"))
        }
        Some(ts) => serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.6f")),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn create_item_weight_defaults_to_zero() {
        let dto: CreateItem =
            serde_json::from_value(json!({"title": "box", "user_id": 3})).unwrap();
        assert_eq!(dto.weight, 0.0);
        assert!(dto.released.is_none());
        assert!(dto.id.is_none());
    }

    #[test]
    fn update_item_distinguishes_null_from_absent() {
        let absent: UpdateItem = serde_json::from_value(json!({"weight": 1.5})).unwrap();
        assert_eq!(absent.released, None);
        assert_eq!(absent.weight, Some(1.5));

        let cleared: UpdateItem = serde_json::from_value(json!({"released": null})).unwrap();
        assert_eq!(cleared.released, Some(None));

        let set: UpdateItem =
            serde_json::from_value(json!({"released": "2024-03-01T10:20:30.123456"})).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_micro_opt(10, 20, 30, 123_456)
            .unwrap();
        assert_eq!(set.released, Some(Some(expected)));
    }

    #[test]
    fn update_item_ignores_unknown_fields() {
        let dto: UpdateItem =
            serde_json::from_value(json!({"some_field_dont_exist": 666.0})).unwrap();
        assert!(dto.title.is_none());
        assert!(dto.weight.is_none());
        assert!(dto.released.is_none());
        assert!(dto.user_id.is_none());
    }

    #[test]
    fn released_serializes_as_naive_iso_string() {
        let item = Item {
            id: 1,
            title: "box".into(),
            weight: 2.5,
            released: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_micro_opt(10, 20, 30, 123_456),
            user_id: 7,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["released"], "2024-03-01T10:20:30.123456");
    }

    #[test]
    fn released_keeps_all_microsecond_digits() {
        let at = |micro| {
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_micro_opt(10, 20, 30, micro)
        };
        let item = |released| Item {
            id: 1,
            title: "box".into(),
            weight: 0.0,
            released,
            user_id: 7,
        };

        let millis = serde_json::to_value(item(at(120_000))).unwrap();
        assert_eq!(millis["released"], "2024-03-01T10:20:30.120000");

        let whole = serde_json::to_value(item(at(0))).unwrap();
        assert_eq!(whole["released"], "2024-03-01T10:20:30");

        let unset = serde_json::to_value(item(None)).unwrap();
        assert!(unset["released"].is_null());
    }

    #[test]
    fn empty_title_is_valid() {
        let dto: CreateItem = serde_json::from_value(json!({"title": "", "user_id": 3})).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn overlong_title_fails_validation() {
        let dto = UpdateItem {
            title: Some("x".repeat(41)),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}

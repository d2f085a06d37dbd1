//! Frontend Models
//!
//! Data structures matching backend entities.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of field types a template can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Unit,
    File,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Unit,
        FieldType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Unit => "unit",
            FieldType::File => "file",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed field value, serialized as `{"type": ..., "value": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    String(String),
    Number(f64),
    Unit { amount: f64, unit: String },
    File(String),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::String(_) => FieldType::String,
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::Unit { .. } => FieldType::Unit,
            FieldValue::File(_) => FieldType::File,
        }
    }

    /// Text shown in an input box for this value
    pub fn to_input(&self) -> String {
        match self {
            FieldValue::String(s) | FieldValue::File(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Unit { amount, unit } => format!("{} {}", amount, unit),
        }
    }

    /// Parse user input into a value of the given type
    pub fn from_input(kind: FieldType, input: &str) -> Result<Self, String> {
        match kind {
            FieldType::String => Ok(FieldValue::String(input.to_string())),
            FieldType::File => Ok(FieldValue::File(input.to_string())),
            FieldType::Number => input
                .trim()
                .parse::<f64>()
                .map(FieldValue::Number)
                .map_err(|_| format!("'{}' is not a number", input)),
            FieldType::Unit => {
                let trimmed = input.trim();
                let split = trimmed
                    .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
                    .unwrap_or(trimmed.len());
                let (amount, unit) = trimmed.split_at(split);
                let amount = amount
                    .parse::<f64>()
                    .map_err(|_| format!("'{}' does not start with a number", input))?;
                let unit = unit.trim();
                if unit.is_empty() {
                    return Err(format!("'{}' is missing a unit", input));
                }
                Ok(FieldValue::Unit {
                    amount,
                    unit: unit.to_string(),
                })
            }
        }
    }

    /// Plain JSON used when rendering a naming template
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) | FieldValue::File(s) => serde_json::Value::String(s.clone()),
            FieldValue::Number(n) => serde_json::json!(n),
            FieldValue::Unit { .. } => serde_json::Value::String(self.to_input()),
        }
    }
}

/// Container node, as embedded in page props
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    #[serde(default)]
    pub children: Vec<u32>,
    #[serde(default)]
    pub parent: Option<u32>,
}

/// Reference to another template
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// Template (schema) data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldType>,
    #[serde(rename = "ownFields", default)]
    pub own_fields: Vec<String>,
    #[serde(default)]
    pub parent: TemplateRef,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            id: -1,
            name: "Not loaded yet".to_string(),
            item_name: String::new(),
            fields: BTreeMap::new(),
            own_fields: Vec::new(),
            parent: TemplateRef::default(),
        }
    }
}

/// Template as resolved for an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldType>,
}

impl Default for ItemTemplate {
    fn default() -> Self {
        Self {
            id: -1,
            name: "Not loaded yet".to_string(),
            item_name: String::new(),
            fields: BTreeMap::new(),
        }
    }
}

/// Item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub category: i64,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub template: ItemTemplate,
}

/// Row of a server-rendered item listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedItem {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub amount: serde_json::Value,
    #[serde(default)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl ListedItem {
    /// Cell text for a column, `---` when the item lacks the key
    pub fn cell(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(serde_json::Value::Null) => "---".to_string(),
            Some(serde_json::Value::String(s)) if s.is_empty() => "---".to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn amount_text(&self) -> String {
        match &self.amount {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_wire_format() {
        let unit = FieldValue::Unit {
            amount: 4.7,
            unit: "kOhm".to_string(),
        };
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "unit", "value": {"amount": 4.7, "unit": "kOhm"}})
        );

        let file: FieldValue =
            serde_json::from_value(serde_json::json!({"type": "file", "value": "datasheets/a.pdf"})).unwrap();
        assert_eq!(file, FieldValue::File("datasheets/a.pdf".to_string()));
    }

    #[test]
    fn test_from_input() {
        assert_eq!(
            FieldValue::from_input(FieldType::Number, " 12.5 "),
            Ok(FieldValue::Number(12.5))
        );
        assert!(FieldValue::from_input(FieldType::Number, "twelve").is_err());
        assert_eq!(
            FieldValue::from_input(FieldType::Unit, "10 mm"),
            Ok(FieldValue::Unit { amount: 10.0, unit: "mm".to_string() })
        );
        assert_eq!(
            FieldValue::from_input(FieldType::Unit, "3.3V"),
            Ok(FieldValue::Unit { amount: 3.3, unit: "V".to_string() })
        );
        assert!(FieldValue::from_input(FieldType::Unit, "12").is_err());
    }

    #[test]
    fn test_item_deserializes_with_template() {
        let item: Item = serde_json::from_value(serde_json::json!({
            "id": 3,
            "category": 1,
            "fields": {"name": {"type": "string", "value": "Widget"}},
            "template": {"id": 1, "name": "Part", "fields": {"name": "string", "weight": "unit"}}
        }))
        .unwrap();
        assert_eq!(item.template.fields.get("weight"), Some(&FieldType::Unit));
        assert_eq!(item.fields["name"].to_input(), "Widget");
    }

    #[test]
    fn test_listed_item_cells() {
        let row: ListedItem = serde_json::from_value(serde_json::json!({
            "name": "Resistor", "url": "/item/1", "amount": 5,
            "fields": {"color": "red", "ohm": 100}
        }))
        .unwrap();
        assert_eq!(row.cell("color"), "red");
        assert_eq!(row.cell("ohm"), "100");
        assert_eq!(row.cell("size"), "---");
        assert_eq!(row.amount_text(), "5");
    }
}

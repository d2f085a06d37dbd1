//! Edit Drafts
//!
//! In-memory edit buffers of the item and template editors. Every change
//! goes through a named command and yields a new snapshot, so the views
//! never patch nested state by hand.

use std::collections::BTreeMap;

use crate::error::DraftError;
use crate::models::{FieldType, FieldValue, Item, ItemTemplate, Template};

/// One field as it is being edited: declared type plus raw input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftField {
    pub kind: FieldType,
    pub input: String,
}

/// Item editor commands
#[derive(Debug, Clone, PartialEq)]
pub enum ItemCommand {
    SetValue { key: String, input: String },
    AddField { key: String, kind: FieldType },
    RemoveField { key: String },
}

/// Draft of an item's fields against its template schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDraft {
    pub id: i64,
    pub category: i64,
    pub template: ItemTemplate,
    pub fields: BTreeMap<String, DraftField>,
}

impl ItemDraft {
    /// Fresh draft from the authoritative server copy
    pub fn from_item(item: &Item) -> Self {
        let fields = item
            .fields
            .iter()
            .map(|(key, value)| {
                let field = DraftField {
                    kind: value.field_type(),
                    input: value.to_input(),
                };
                (key.clone(), field)
            })
            .collect();
        Self {
            id: item.id,
            category: item.category,
            template: item.template.clone(),
            fields,
        }
    }

    pub fn is_schema_field(&self, key: &str) -> bool {
        self.template.fields.contains_key(key)
    }

    /// Type of a field: its own if present, otherwise the template's
    pub fn kind_of(&self, key: &str) -> FieldType {
        self.fields
            .get(key)
            .map(|f| f.kind)
            .or_else(|| self.template.fields.get(key).copied())
            .unwrap_or_default()
    }

    pub fn input(&self, key: &str) -> String {
        self.fields.get(key).map(|f| f.input.clone()).unwrap_or_default()
    }

    /// Template fields, in schema order
    pub fn schema_fields(&self) -> Vec<String> {
        self.template.fields.keys().cloned().collect()
    }

    /// Fields present on the item but absent from the schema
    pub fn extension_fields(&self) -> Vec<String> {
        self.fields
            .keys()
            .filter(|key| !self.is_schema_field(key))
            .cloned()
            .collect()
    }

    /// Whether `AddField` would be accepted
    pub fn can_add(&self, key: &str, kind: FieldType) -> bool {
        !key.trim().is_empty() && self.fields.get(key).map_or(true, |f| f.kind != kind)
    }

    pub fn apply(&self, command: ItemCommand) -> Result<Self, DraftError> {
        let mut next = self.clone();
        match command {
            ItemCommand::SetValue { key, input } => {
                let schema = self.is_schema_field(&key);
                if !schema && !self.fields.contains_key(&key) {
                    return Err(DraftError::UnknownField(key));
                }
                let kind = self.kind_of(&key);
                if input.is_empty() && schema {
                    // An emptied schema field is simply unset
                    next.fields.remove(&key);
                } else {
                    next.fields.insert(key, DraftField { kind, input });
                }
            }
            ItemCommand::AddField { key, kind } => {
                let key = key.trim().to_string();
                if key.is_empty() {
                    return Err(DraftError::EmptyName);
                }
                if !self.can_add(&key, kind) {
                    return Err(DraftError::FieldExists(key));
                }
                next.fields.insert(key, DraftField { kind, input: String::new() });
            }
            ItemCommand::RemoveField { key } => {
                if self.is_schema_field(&key) {
                    return Err(DraftError::NotRemovable(key));
                }
                if next.fields.remove(&key).is_none() {
                    return Err(DraftError::UnknownField(key));
                }
            }
        }
        Ok(next)
    }

    /// Convert every field to a typed value, collecting per-field errors.
    /// Numeric fields not filled in yet are left out of the payload.
    pub fn to_payload(&self) -> Result<BTreeMap<String, FieldValue>, BTreeMap<String, String>> {
        let mut values = BTreeMap::new();
        let mut errors = BTreeMap::new();
        for (key, field) in &self.fields {
            if field.input.trim().is_empty() && matches!(field.kind, FieldType::Number | FieldType::Unit) {
                continue;
            }
            match FieldValue::from_input(field.kind, &field.input) {
                Ok(value) => {
                    values.insert(key.clone(), value);
                }
                Err(message) => {
                    errors.insert(key.clone(), message);
                }
            }
        }
        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }

    /// Record handed to the naming template: `{"data": {field: value}}`
    pub fn format_context(&self) -> serde_json::Value {
        let data: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(key, field)| {
                let value = FieldValue::from_input(field.kind, &field.input)
                    .map(|v| v.to_json())
                    .unwrap_or_else(|_| serde_json::Value::String(field.input.clone()));
                (key.clone(), value)
            })
            .collect();
        serde_json::json!({ "data": data })
    }

    /// Page heading: the rendered naming template, or the template name
    pub fn title(&self) -> String {
        if self.template.item_name.is_empty() {
            self.template.name.clone()
        } else {
            crate::format::format(&self.template.item_name, &self.format_context())
        }
    }
}

/// Template editor commands
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateCommand {
    SetItemName(String),
    AddField { name: String, kind: FieldType },
    RemoveField { name: String },
}

/// Draft of a template's naming pattern and own fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateDraft {
    pub template: Template,
}

impl TemplateDraft {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Fields inherited from ancestors
    pub fn parent_fields(&self) -> Vec<String> {
        self.template
            .fields
            .keys()
            .filter(|name| !self.template.own_fields.contains(name))
            .cloned()
            .collect()
    }

    pub fn own_fields(&self) -> &[String] {
        &self.template.own_fields
    }

    pub fn can_add(&self, name: &str) -> bool {
        !name.trim().is_empty() && !self.template.fields.contains_key(name.trim())
    }

    pub fn apply(&self, command: TemplateCommand) -> Result<Self, DraftError> {
        let mut next = self.clone();
        match command {
            TemplateCommand::SetItemName(item_name) => {
                next.template.item_name = item_name;
            }
            TemplateCommand::AddField { name, kind } => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(DraftError::EmptyName);
                }
                if self.template.fields.contains_key(&name) {
                    return Err(DraftError::FieldExists(name));
                }
                next.template.fields.insert(name.clone(), kind);
                next.template.own_fields.push(name);
            }
            TemplateCommand::RemoveField { name } => {
                if !self.template.own_fields.contains(&name) {
                    return if self.template.fields.contains_key(&name) {
                        Err(DraftError::NotRemovable(name))
                    } else {
                        Err(DraftError::UnknownField(name))
                    };
                }
                next.template.fields.remove(&name);
                next.template.own_fields.retain(|own| own != &name);
            }
        }
        Ok(next)
    }

    /// Own fields only; inherited ones stay with the ancestors
    pub fn own_field_types(&self) -> BTreeMap<&str, FieldType> {
        self.template
            .own_fields
            .iter()
            .filter_map(|name| self.template.fields.get(name).map(|kind| (name.as_str(), *kind)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemplateRef;

    fn sample_item() -> Item {
        Item {
            id: 7,
            category: 2,
            fields: BTreeMap::from([
                ("value".to_string(), FieldValue::Unit { amount: 10.0, unit: "kOhm".to_string() }),
                ("note".to_string(), FieldValue::String("spare".to_string())),
            ]),
            template: ItemTemplate {
                id: 2,
                name: "Resistor".to_string(),
                item_name: "{data[value]} Resistor".to_string(),
                fields: BTreeMap::from([
                    ("value".to_string(), FieldType::Unit),
                    ("tolerance".to_string(), FieldType::Number),
                ]),
            },
        }
    }

    #[test]
    fn test_extension_fields_exclude_schema() {
        let draft = ItemDraft::from_item(&sample_item());
        assert_eq!(draft.extension_fields(), vec!["note".to_string()]);
        assert_eq!(draft.schema_fields(), vec!["tolerance".to_string(), "value".to_string()]);
    }

    #[test]
    fn test_set_value_on_schema_field_uses_template_type() {
        let draft = ItemDraft::from_item(&sample_item());
        let next = draft
            .apply(ItemCommand::SetValue { key: "tolerance".into(), input: "5".into() })
            .unwrap();
        assert_eq!(next.fields["tolerance"].kind, FieldType::Number);
        // The previous snapshot is untouched
        assert!(!draft.fields.contains_key("tolerance"));
    }

    #[test]
    fn test_emptied_schema_field_is_unset_but_extension_kept() {
        let draft = ItemDraft::from_item(&sample_item());
        let next = draft
            .apply(ItemCommand::SetValue { key: "value".into(), input: String::new() })
            .unwrap()
            .apply(ItemCommand::SetValue { key: "note".into(), input: String::new() })
            .unwrap();
        assert!(!next.fields.contains_key("value"));
        assert_eq!(next.input("note"), "");
        assert!(next.fields.contains_key("note"));
    }

    #[test]
    fn test_add_field_rules() {
        let draft = ItemDraft::from_item(&sample_item());
        assert_eq!(
            draft.apply(ItemCommand::AddField { key: "note".into(), kind: FieldType::String }),
            Err(DraftError::FieldExists("note".into()))
        );
        let retyped = draft
            .apply(ItemCommand::AddField { key: "note".into(), kind: FieldType::Number })
            .unwrap();
        assert_eq!(retyped.fields["note"], DraftField { kind: FieldType::Number, input: String::new() });
        assert_eq!(
            draft.apply(ItemCommand::AddField { key: "  ".into(), kind: FieldType::String }),
            Err(DraftError::EmptyName)
        );
    }

    #[test]
    fn test_only_extension_fields_are_removable() {
        let draft = ItemDraft::from_item(&sample_item());
        assert_eq!(
            draft.apply(ItemCommand::RemoveField { key: "value".into() }),
            Err(DraftError::NotRemovable("value".into()))
        );
        let next = draft.apply(ItemCommand::RemoveField { key: "note".into() }).unwrap();
        assert!(next.extension_fields().is_empty());
        assert_eq!(
            next.apply(ItemCommand::RemoveField { key: "note".into() }),
            Err(DraftError::UnknownField("note".into()))
        );
    }

    #[test]
    fn test_payload_reports_bad_inputs_per_field() {
        let draft = ItemDraft::from_item(&sample_item())
            .apply(ItemCommand::SetValue { key: "tolerance".into(), input: "five".into() })
            .unwrap();
        let errors = draft.to_payload().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("tolerance"));

        let ok = ItemDraft::from_item(&sample_item()).to_payload().unwrap();
        assert_eq!(ok["value"], FieldValue::Unit { amount: 10.0, unit: "kOhm".to_string() });
    }

    #[test]
    fn test_blank_numeric_field_does_not_block_save() {
        let draft = ItemDraft::from_item(&sample_item())
            .apply(ItemCommand::AddField { key: "weight".into(), kind: FieldType::Unit })
            .unwrap()
            .apply(ItemCommand::AddField { key: "count".into(), kind: FieldType::Number })
            .unwrap()
            .apply(ItemCommand::AddField { key: "label".into(), kind: FieldType::String })
            .unwrap();
        let payload = draft.to_payload().unwrap();
        assert!(!payload.contains_key("weight"));
        assert!(!payload.contains_key("count"));
        assert_eq!(payload["label"], FieldValue::String(String::new()));
        // The fields stay in the draft for the user to fill in
        assert!(draft.fields.contains_key("weight"));
    }

    #[test]
    fn test_title_renders_naming_template() {
        let draft = ItemDraft::from_item(&sample_item());
        assert_eq!(draft.title(), "10 kOhm Resistor");
    }

    fn sample_template() -> Template {
        Template {
            id: 4,
            name: "Capacitor".to_string(),
            item_name: "{data[capacity]} Capacitor".to_string(),
            fields: BTreeMap::from([
                ("name".to_string(), FieldType::String),
                ("capacity".to_string(), FieldType::Unit),
            ]),
            own_fields: vec!["capacity".to_string()],
            parent: TemplateRef { id: 1, name: "Part".to_string() },
        }
    }

    #[test]
    fn test_template_parent_and_own_fields() {
        let draft = TemplateDraft::new(sample_template());
        assert_eq!(draft.parent_fields(), vec!["name".to_string()]);
        assert_eq!(draft.own_field_types(), BTreeMap::from([("capacity", FieldType::Unit)]));
    }

    #[test]
    fn test_template_commands() {
        let draft = TemplateDraft::new(sample_template());
        assert_eq!(
            draft.apply(TemplateCommand::AddField { name: "name".into(), kind: FieldType::String }),
            Err(DraftError::FieldExists("name".into()))
        );
        assert_eq!(
            draft.apply(TemplateCommand::RemoveField { name: "name".into() }),
            Err(DraftError::NotRemovable("name".into()))
        );

        let next = draft
            .apply(TemplateCommand::AddField { name: "voltage".into(), kind: FieldType::Unit })
            .unwrap()
            .apply(TemplateCommand::RemoveField { name: "capacity".into() })
            .unwrap()
            .apply(TemplateCommand::SetItemName("{data[voltage]} Cap".into()))
            .unwrap();
        assert_eq!(next.own_fields(), &["voltage".to_string()]);
        assert!(!next.template.fields.contains_key("capacity"));
        assert_eq!(next.template.item_name, "{data[voltage]} Cap");
    }
}

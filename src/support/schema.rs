use std::sync::Arc;

use serde_json::{Map, Value};

use crate::tool_definitions::{ParamDef, ParamType};

/// Builder for creating JSON schemas for tool registration
pub struct SchemaBuilder {
    properties: Map<String, Value>,
    required:   Vec<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            properties: Map::new(),
            required:   Vec::new(),
        }
    }

    fn insert(mut self, name: &str, prop: Map<String, Value>, required: bool) -> Self {
        self.properties.insert(name.to_string(), prop.into());

        if required {
            self.required.push(name.to_string());
        }

        self
    }

    /// Add a string property to the schema
    pub fn add_string_property(self, name: &str, description: &str, required: bool) -> Self {
        let mut prop = Map::new();
        prop.insert("type".to_string(), "string".into());
        prop.insert("description".to_string(), description.into());
        self.insert(name, prop, required)
    }

    /// Add a string property that must hold an e-mail address
    pub fn add_email_property(self, name: &str, description: &str, required: bool) -> Self {
        let mut prop = Map::new();
        prop.insert("type".to_string(), "string".into());
        prop.insert("format".to_string(), "email".into());
        prop.insert("description".to_string(), description.into());
        self.insert(name, prop, required)
    }

    /// Add a string array property to the schema
    pub fn add_string_array_property(self, name: &str, description: &str, required: bool) -> Self {
        let mut prop = Map::new();
        prop.insert("type".to_string(), "array".into());

        let mut items = Map::new();
        items.insert("type".to_string(), "string".into());
        prop.insert("items".to_string(), items.into());

        prop.insert("description".to_string(), description.into());
        self.insert(name, prop, required)
    }

    /// Add an integer property with optional bounds and default
    pub fn add_integer_property(
        self,
        name: &str,
        description: &str,
        range: Option<(u64, u64)>,
        default: Option<&Value>,
        required: bool,
    ) -> Self {
        let mut prop = Map::new();
        prop.insert("type".to_string(), "integer".into());
        prop.insert("description".to_string(), description.into());

        if let Some((min, max)) = range {
            prop.insert("minimum".to_string(), min.into());
            prop.insert("maximum".to_string(), max.into());
        }
        if let Some(default_value) = default {
            prop.insert("default".to_string(), default_value.clone());
        }

        self.insert(name, prop, required)
    }

    /// Add a boolean property to the schema
    pub fn add_boolean_property(self, name: &str, description: &str, required: bool) -> Self {
        let mut prop = Map::new();
        prop.insert("type".to_string(), "boolean".into());
        prop.insert("description".to_string(), description.into());
        self.insert(name, prop, required)
    }

    /// Add an enum property to the schema
    pub fn add_enum_property(
        self,
        name: &str,
        description: &str,
        values: &[&str],
        default: Option<&Value>,
        required: bool,
    ) -> Self {
        let mut prop = Map::new();
        prop.insert("type".to_string(), "string".into());
        prop.insert("enum".to_string(), values.into());
        prop.insert("description".to_string(), description.into());

        if let Some(default_value) = default {
            prop.insert("default".to_string(), default_value.clone());
        }

        self.insert(name, prop, required)
    }

    /// Add the property described by a parameter definition
    pub fn add_param(self, param: &ParamDef) -> Self {
        let ParamDef {
            name,
            description,
            required,
            ..
        } = *param;

        match (param.param_type, &param.allowed_values) {
            (ParamType::String, Some(allowed)) => self.add_enum_property(
                name,
                description,
                allowed.values,
                param.default.as_ref(),
                required,
            ),
            (ParamType::String, None) => self.add_string_property(name, description, required),
            (ParamType::Email, _) => self.add_email_property(name, description, required),
            (ParamType::Integer, _) => self.add_integer_property(
                name,
                description,
                param.range,
                param.default.as_ref(),
                required,
            ),
            (ParamType::Boolean, _) => self.add_boolean_property(name, description, required),
            (ParamType::StringArray, _) => {
                self.add_string_array_property(name, description, required)
            }
        }
    }

    /// Build the final schema
    pub fn build(self) -> Arc<Map<String, Value>> {
        let mut schema = Map::new();
        schema.insert("type".to_string(), "object".into());
        schema.insert("properties".to_string(), self.properties.into());

        if !self.required.is_empty() {
            schema.insert("required".to_string(), self.required.into());
        }

        Arc::new(schema)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_enum_with_default() {
        let param = ParamDef::string("format", "Rendering")
            .one_of(&["text", "markdown", "html"])
            .with_default("markdown");
        let schema = SchemaBuilder::new().add_param(&param).build();

        assert_eq!(
            Value::Object((*schema).clone()),
            json!({
                "type": "object",
                "properties": {
                    "format": {
                        "type": "string",
                        "enum": ["text", "markdown", "html"],
                        "description": "Rendering",
                        "default": "markdown"
                    }
                }
            })
        );
    }

    #[test]
    fn test_required_and_bounded_integer() {
        let schema = SchemaBuilder::new()
            .add_param(&ParamDef::string("roomId", "Room").required())
            .add_param(
                &ParamDef::integer("max", "Page size")
                    .bounded(1, 1000)
                    .with_default(50_u64),
            )
            .build();

        assert_eq!(schema["required"], json!(["roomId"]));
        assert_eq!(
            schema["properties"]["max"],
            json!({
                "type": "integer",
                "description": "Page size",
                "minimum": 1,
                "maximum": 1000,
                "default": 50
            })
        );
    }

    #[test]
    fn test_no_params_has_no_required_list() {
        let schema = SchemaBuilder::new().build();
        assert!(schema.get("required").is_none());
        assert_eq!(schema["properties"], json!({}));
    }
}

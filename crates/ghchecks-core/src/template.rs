use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A synthesized CloudFormation template. Maps are ordered so that identical
/// inputs always render byte-identical JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: &'static str,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Parameters", skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Value>,
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, Resource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(rename = "Properties")]
    pub properties: Value,
    #[serde(rename = "Metadata", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Resource {
    pub fn new(kind: impl Into<String>, properties: Value) -> Self {
        Self {
            kind: kind.into(),
            depends_on: Vec::new(),
            properties,
            metadata: None,
        }
    }

    pub fn depends_on(mut self, logical_id: impl Into<String>) -> Self {
        self.depends_on.push(logical_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl Template {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            format_version: "2010-09-09",
            description: description.into(),
            parameters: BTreeMap::new(),
            resources: BTreeMap::new(),
        }
    }

    pub fn parameter(&mut self, name: impl Into<String>, definition: Value) {
        self.parameters.insert(name.into(), definition);
    }

    pub fn resource(&mut self, logical_id: impl Into<String>, resource: Resource) {
        self.resources.insert(logical_id.into(), resource);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_format_version_and_description() {
        let t = Template::new("test stack");
        let rendered = t.to_json().unwrap();
        assert!(rendered.contains("\"AWSTemplateFormatVersion\": \"2010-09-09\""));
        assert!(rendered.contains("\"Description\": \"test stack\""));
    }

    #[test]
    fn empty_depends_on_and_metadata_are_omitted() {
        let mut t = Template::new("test");
        t.resource("Thing", Resource::new("AWS::SNS::Topic", json!({})));
        let rendered = t.to_json().unwrap();
        assert!(!rendered.contains("DependsOn"));
        assert!(!rendered.contains("Metadata"));
        assert!(!rendered.contains("Parameters"));
    }

    #[test]
    fn resources_render_in_logical_id_order() {
        let mut t = Template::new("test");
        t.resource("Zebra", Resource::new("AWS::SNS::Topic", json!({})));
        t.resource("Alpha", Resource::new("AWS::SNS::Topic", json!({})));
        let rendered = t.to_json().unwrap();
        let alpha = rendered.find("Alpha").unwrap();
        let zebra = rendered.find("Zebra").unwrap();
        assert!(alpha < zebra);
    }

    #[test]
    fn depends_on_renders_as_list() {
        let mut t = Template::new("test");
        t.resource(
            "Thing",
            Resource::new("AWS::SNS::Topic", json!({})).depends_on("Other"),
        );
        let rendered: serde_json::Value = serde_json::from_str(&t.to_json().unwrap()).unwrap();
        assert_eq!(rendered["Resources"]["Thing"]["DependsOn"], json!(["Other"]));
    }
}

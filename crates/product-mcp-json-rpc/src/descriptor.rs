//! Method descriptors: the parameter contract of each dispatch entry and the source of the
//! capability listing.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::request::RequestParams;

/// JSON type advertised for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescriptor {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
}

impl ParamDescriptor {
    pub fn required(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
            required: true,
        }
    }

    pub fn optional(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, param_type, description)
        }
    }

    fn to_schema(&self) -> Value {
        json!({
            "type": self.param_type,
            "description": self.description,
            "required": self.required,
        })
    }
}

/// Name, description and ordered parameter list of a dispatchable method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamDescriptor>,
    /// Unadvertised methods are dispatchable but left out of the capability listing
    pub advertised: bool,
}

impl MethodDescriptor {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params: Vec::new(),
            advertised: true,
        }
    }

    pub fn with_param(mut self, param: ParamDescriptor) -> Self {
        self.params.push(param);
        self
    }

    pub fn unadvertised(mut self) -> Self {
        self.advertised = false;
        self
    }

    /// Required parameter names in declaration order
    pub fn required_params(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    /// First required parameter that is absent or blank, in declaration order
    pub fn first_missing_param(&self, params: &RequestParams) -> Option<&str> {
        self.required_params().find(|name| !params.has_value(name))
    }

    /// Capability entry: `{name, description, parameters: {<param>: {type, description, required}}}`
    pub fn to_capability(&self) -> Value {
        let parameters: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.to_schema()))
            .collect();

        json!({
            "name": self.name,
            "description": self.description,
            "parameters": parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> MethodDescriptor {
        MethodDescriptor::new("lookup", "Look something up")
            .with_param(ParamDescriptor::required("first", ParamType::String, "First"))
            .with_param(ParamDescriptor::optional("filter", ParamType::String, "Filter"))
            .with_param(ParamDescriptor::required("second", ParamType::String, "Second"))
    }

    #[test]
    fn test_required_params_keep_declaration_order() {
        let descriptor = lookup();
        let required: Vec<&str> = descriptor.required_params().collect();
        assert_eq!(required, vec!["first", "second"]);
    }

    #[test]
    fn test_first_missing_param_reports_only_the_first() {
        let descriptor = lookup();
        let none: RequestParams = serde_json::from_value(json!({})).unwrap();
        let only_first: RequestParams = serde_json::from_value(json!({"first": "x"})).unwrap();
        let blank_first: RequestParams =
            serde_json::from_value(json!({"first": null, "second": "y"})).unwrap();
        let both: RequestParams =
            serde_json::from_value(json!({"first": "x", "second": "y"})).unwrap();

        assert_eq!(descriptor.first_missing_param(&none), Some("first"));
        assert_eq!(descriptor.first_missing_param(&only_first), Some("second"));
        assert_eq!(descriptor.first_missing_param(&blank_first), Some("first"));
        assert_eq!(descriptor.first_missing_param(&both), None);
    }

    #[test]
    fn test_capability_entry() {
        let capability = lookup().to_capability();

        assert_eq!(capability["name"], "lookup");
        assert_eq!(capability["description"], "Look something up");
        assert_eq!(capability["parameters"]["first"]["type"], "string");
        assert_eq!(capability["parameters"]["first"]["required"], true);
        assert_eq!(capability["parameters"]["filter"]["required"], false);
    }

    #[test]
    fn test_unadvertised() {
        assert!(lookup().advertised);
        assert!(!lookup().unadvertised().advertised);
    }
}

use crate::error::FormResult;
use formwork_marshal::MarshalOptions;
use serde::{Deserialize, Serialize};

/// Parameter whose value names the submitted form's prefix
pub const DEFAULT_PREFIX_PARAM: &str = "__prefix__";

/// Separators accepted between a prefix and an action name, in precedence order
pub const DEFAULT_SEPARATORS: [char; 3] = ['.', '_', '-'];

/// Configuration shared by every instance of a form definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    /// Namespace for this form's parameters; `None` means always submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Name of the parameter that carries the prefix as its value
    #[serde(default = "default_prefix_param")]
    pub prefix_param: String,

    /// Separators tried after the prefix, first match wins
    #[serde(default = "default_separators")]
    pub separators: Vec<char>,

    /// Options handed to the marshaller
    #[serde(default)]
    pub marshal: MarshalOptions,
}

fn default_prefix_param() -> String {
    DEFAULT_PREFIX_PARAM.to_string()
}

fn default_separators() -> Vec<char> {
    DEFAULT_SEPARATORS.to_vec()
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            prefix_param: default_prefix_param(),
            separators: default_separators(),
            marshal: MarshalOptions::default(),
        }
    }
}

impl FormOptions {
    /// Parse options from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_marshal(mut self, marshal: MarshalOptions) -> Self {
        self.marshal = marshal;
        self
    }
}

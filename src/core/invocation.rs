//! Tool-invocation records: the JSON payload describing a pending file write
//! or edit that the hook inspects before it reaches disk.

use serde_json::{Map, Value};

use crate::error::Result;

/// The two operation kinds the hook validates. Each carries its content
/// under a different field name; everything else is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Write,
    Edit,
}

impl PayloadKind {
    pub fn from_tool_name(name: &str) -> Option<Self> {
        match name {
            "Write" => Some(Self::Write),
            "Edit" => Some(Self::Edit),
            _ => None,
        }
    }

    pub fn content_field(&self) -> &'static str {
        match self {
            Self::Write => "content",
            Self::Edit => "new_content",
        }
    }
}

/// A parsed invocation record.
///
/// Wraps the raw JSON value so fields this tool does not understand survive
/// the round trip when the corrected record is re-serialized.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    value: Value,
}

impl ToolInvocation {
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Self { value })
    }

    pub fn tool_name(&self) -> &str {
        self.value
            .get("tool_name")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn payload_kind(&self) -> Option<PayloadKind> {
        PayloadKind::from_tool_name(self.tool_name())
    }

    pub fn file_path(&self) -> &str {
        self.tool_input_field("file_path")
    }

    pub fn content(&self, kind: PayloadKind) -> &str {
        self.tool_input_field(kind.content_field())
    }

    pub fn set_content(&mut self, kind: PayloadKind, content: &str) {
        let input = self
            .value
            .as_object_mut()
            .map(|obj| {
                obj.entry("tool_input")
                    .or_insert_with(|| Value::Object(Map::new()))
            })
            .and_then(Value::as_object_mut);

        if let Some(input) = input {
            input.insert(
                kind.content_field().to_string(),
                Value::String(content.to_string()),
            );
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.value)?)
    }

    fn tool_input_field(&self, field: &str) -> &str {
        self.value
            .get("tool_input")
            .and_then(|input| input.get(field))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

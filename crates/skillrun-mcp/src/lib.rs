//! # skillrun-mcp
//!
//! Tool-protocol (MCP) server surface. Exposes the same pipeline the CLI
//! uses as three tools over stdio: `run_skill`, `list_skills`, and
//! `show_skill`. Skill failures are reported as tool results with
//! `is_error` set, so callers can read the message; protocol-level problems
//! (unknown tool, malformed arguments) become protocol errors.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, InitializeResult, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, Tool, ToolAnnotations,
};
use rmcp::{transport::stdio, ServerHandler, ServiceExt};
use serde_json::{json, Map as JsonMap, Value};
use tracing::{info, warn};

use skillrun_config::SkillrunConfig;
use skillrun_core::{Result, SkillError};
use skillrun_engine::Dispatcher;

/// MCP server wrapping a [`Dispatcher`].
#[derive(Clone)]
pub struct SkillService {
    dispatcher: Arc<Dispatcher>,
}

impl SkillService {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    async fn run_skill(
        &self,
        name: &str,
        overrides: &HashMap<String, String>,
    ) -> Result<CallToolResult> {
        let outcome = self.dispatcher.run(name, overrides, None).await?;
        Ok(CallToolResult {
            content: vec![Content::text(outcome.text.clone())],
            structured_content: Some(json!({
                "skill": outcome.skill,
                "text": outcome.text,
            })),
            is_error: Some(false),
            meta: None,
        })
    }

    fn list_skills(&self) -> Result<CallToolResult> {
        let skills = self.dispatcher.list()?;
        let text = if skills.is_empty() {
            "no skills found".to_string()
        } else {
            skills
                .iter()
                .map(|s| format!("{} — {}", s.name, s.description))
                .collect::<Vec<_>>()
                .join("\n")
        };
        Ok(CallToolResult {
            content: vec![Content::text(text)],
            structured_content: Some(json!({ "skills": skills })),
            is_error: Some(false),
            meta: None,
        })
    }

    fn show_skill(&self, name: &str) -> Result<CallToolResult> {
        let skill = self.dispatcher.show(name)?;
        let text = format!("{}: {}", skill.name, skill.description);
        Ok(CallToolResult {
            content: vec![Content::text(text)],
            structured_content: Some(skill.to_json()),
            is_error: Some(false),
            meta: None,
        })
    }
}

fn skill_name_arg(args: &JsonMap<String, Value>) -> std::result::Result<&str, rmcp::ErrorData> {
    args.get("skill_name")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            rmcp::ErrorData::invalid_params("missing required argument 'skill_name'", None)
        })
}

fn inputs_arg(
    args: &JsonMap<String, Value>,
) -> std::result::Result<HashMap<String, String>, rmcp::ErrorData> {
    let mut overrides = HashMap::new();
    if let Some(inputs) = args.get("inputs") {
        let map = inputs.as_object().ok_or_else(|| {
            rmcp::ErrorData::invalid_params("'inputs' must be an object of strings", None)
        })?;
        for (key, value) in map {
            let text = value.as_str().ok_or_else(|| {
                rmcp::ErrorData::invalid_params(format!("input '{key}' must be a string"), None)
            })?;
            overrides.insert(key.clone(), text.to_string());
        }
    }
    Ok(overrides)
}

/// A skill failure rendered as a tool result rather than a protocol error.
fn error_result(err: &SkillError) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(err.to_string())],
        structured_content: Some(json!({
            "error": err.kind(),
            "message": err.to_string(),
        })),
        is_error: Some(true),
        meta: None,
    }
}

fn tool_descriptors() -> Vec<Tool> {
    // Some clients reject input schemas without an explicit JSON Schema
    // "type", so even the parameterless tool declares an empty object.
    let mut empty_schema = JsonMap::new();
    empty_schema.insert("type".into(), json!("object"));
    empty_schema.insert("properties".into(), json!({}));
    empty_schema.insert("additionalProperties".into(), json!(false));

    let mut run_schema = JsonMap::new();
    run_schema.insert("type".into(), json!("object"));
    run_schema.insert(
        "properties".into(),
        json!({
            "skill_name": {
                "type": "string",
                "description": "Name of the skill to run"
            },
            "inputs": {
                "type": "object",
                "additionalProperties": { "type": "string" },
                "description": "Explicit input values; omitted inputs are auto-gathered or defaulted"
            }
        }),
    );
    run_schema.insert("required".into(), json!(["skill_name"]));
    run_schema.insert("additionalProperties".into(), json!(false));

    let mut show_schema = JsonMap::new();
    show_schema.insert("type".into(), json!("object"));
    show_schema.insert(
        "properties".into(),
        json!({
            "skill_name": {
                "type": "string",
                "description": "Name of the skill to describe"
            }
        }),
    );
    show_schema.insert("required".into(), json!(["skill_name"]));
    show_schema.insert("additionalProperties".into(), json!(false));

    vec![
        Tool {
            name: "run_skill".into(),
            title: Some("Run a skill".into()),
            description: Some(
                "Resolve a skill's inputs, render its prompt, and return the model's response"
                    .into(),
            ),
            input_schema: Arc::new(run_schema),
            output_schema: None,
            annotations: Some(ToolAnnotations::default()),
            icons: None,
            meta: None,
        },
        Tool {
            name: "list_skills".into(),
            title: Some("List available skills".into()),
            description: Some("List every discoverable skill with its description".into()),
            input_schema: Arc::new(empty_schema),
            output_schema: None,
            annotations: Some(ToolAnnotations::default()),
            icons: None,
            meta: None,
        },
        Tool {
            name: "show_skill".into(),
            title: Some("Show a skill's definition".into()),
            description: Some(
                "Return a skill's description, declared inputs, and template without running it"
                    .into(),
            ),
            input_schema: Arc::new(show_schema),
            output_schema: None,
            annotations: Some(ToolAnnotations::default()),
            icons: None,
            meta: None,
        },
    ]
}

impl ServerHandler for SkillService {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = std::result::Result<ListToolsResult, rmcp::ErrorData>>
           + Send
           + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: tool_descriptors(),
            next_cursor: None,
            meta: Default::default(),
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = std::result::Result<CallToolResult, rmcp::ErrorData>>
           + Send
           + '_ {
        Box::pin(async move {
            let args = request.arguments.clone().unwrap_or_default();
            // Argument shape problems fail at the protocol level; once the
            // arguments parse, any skill failure comes back as a tool result
            // the caller can read.
            let result = match request.name.as_ref() {
                "run_skill" => {
                    let name = skill_name_arg(&args)?;
                    let overrides = inputs_arg(&args)?;
                    self.run_skill(name, &overrides).await
                }
                "list_skills" => self.list_skills(),
                "show_skill" => self.show_skill(skill_name_arg(&args)?),
                other => {
                    return Err(rmcp::ErrorData::invalid_params(
                        format!("unknown tool {other}"),
                        None,
                    ))
                }
            };
            Ok(result.unwrap_or_else(|err| error_result(&err)))
        })
    }

    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some(
                "Runs declarative SKILL.md prompt skills. Use list_skills to discover skills, \
                 show_skill to inspect one, and run_skill to execute it."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

/// Serve the tool protocol over stdin/stdout until the client disconnects.
///
/// The backend is built lazily from configuration; when no credentials are
/// present the server still starts, with `list_skills` and `show_skill`
/// functional and `run_skill` reporting the configuration problem.
pub async fn serve_stdio(config: SkillrunConfig) -> Result<()> {
    let backend = match skillrun_backend::from_config(&config.backend) {
        Ok(backend) => Some(backend),
        Err(e) => {
            warn!(error = %e, "no inference backend; run_skill will be unavailable");
            None
        }
    };
    let dispatcher = Arc::new(Dispatcher::from_config(&config, backend)?);
    let service = SkillService::new(dispatcher);

    info!("tool-protocol server listening on stdio");
    let running = service
        .serve(stdio())
        .await
        .map_err(|e| SkillError::Other(anyhow::anyhow!("serve failed: {e}")))?;
    running
        .waiting()
        .await
        .map_err(|e| SkillError::Other(anyhow::anyhow!("server task failed: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_cover_all_three_tools() {
        let tools = tool_descriptors();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, vec!["run_skill", "list_skills", "show_skill"]);
    }

    #[test]
    fn every_schema_declares_an_object_type() {
        for tool in tool_descriptors() {
            assert_eq!(
                tool.input_schema.get("type").and_then(|v| v.as_str()),
                Some("object"),
                "tool {} lacks an object schema",
                tool.name
            );
        }
    }

    #[test]
    fn run_skill_requires_the_skill_name() {
        let tools = tool_descriptors();
        let run = tools.iter().find(|t| t.name == "run_skill").unwrap();
        let required = run.input_schema.get("required").unwrap();
        assert_eq!(required, &json!(["skill_name"]));
    }

    #[test]
    fn skill_name_arg_rejects_missing_and_empty() {
        let empty = JsonMap::new();
        assert!(skill_name_arg(&empty).is_err());

        let mut blank = JsonMap::new();
        blank.insert("skill_name".into(), json!(""));
        assert!(skill_name_arg(&blank).is_err());

        let mut ok = JsonMap::new();
        ok.insert("skill_name".into(), json!("greeter"));
        assert_eq!(skill_name_arg(&ok).unwrap(), "greeter");
    }

    #[test]
    fn error_results_carry_the_error_kind() {
        let result = error_result(&SkillError::NotFound("nope".into()));
        assert_eq!(result.is_error, Some(true));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["error"], "not_found");
    }
}

//! Canned-response assistant
//!
//! Replies are chosen by keyword from an ordered rule list and rendered from
//! embedded templates. Nothing is generated; the same question in the same
//! context always gets the same answer.

use clap::ValueEnum;
use miette::Diagnostic;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tera::Tera;
use thiserror::Error;
use tracing::debug;

#[derive(Embed)]
#[folder = "templates/responses/"]
struct ResponseTemplates;

/// Screen the assistant is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatContext {
    Dashboard,
    Pipeline,
    Analytics,
    #[default]
    General,
}

impl ChatContext {
    pub fn title(&self) -> &'static str {
        match self {
            ChatContext::Dashboard => "Dashboard",
            ChatContext::Pipeline => "Pipeline",
            ChatContext::Analytics => "Analytics",
            ChatContext::General => "General",
        }
    }

    pub fn welcome_message(&self) -> &'static str {
        match self {
            ChatContext::Dashboard => {
                "Welcome to your RFP Analytics Assistant! I can provide insights on KPIs, \
                 conversion rates, revenue, team performance and strategic recommendations. \
                 What metrics would you like to explore?"
            }
            ChatContext::Pipeline => {
                "Hello! I'm your Pipeline Intelligence Assistant. I can analyze RFP statuses, \
                 spot bottlenecks and delays, and suggest follow-ups. What pipeline insights \
                 do you need?"
            }
            ChatContext::Analytics => {
                "Hi! I'm your Advanced Analytics Companion. I can dig into performance trends \
                 and forecasting. What analysis would you like me to perform?"
            }
            ChatContext::General => {
                "Welcome! I'm your RFP Management Assistant. I can help with data analysis, \
                 planning and performance questions. How can I help you today?"
            }
        }
    }
}

impl std::fmt::Display for ChatContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatContext::Dashboard => write!(f, "dashboard"),
            ChatContext::Pipeline => write!(f, "pipeline"),
            ChatContext::Analytics => write!(f, "analytics"),
            ChatContext::General => write!(f, "general"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum AssistantError {
    #[error("failed to load response template {name}: {message}")]
    #[diagnostic(code(rfp::assistant::template))]
    Template { name: String, message: String },

    #[error("failed to render response {name}: {message}")]
    #[diagnostic(code(rfp::assistant::render))]
    Render { name: String, message: String },
}

struct Rule {
    /// `None` applies in every context
    context: Option<ChatContext>,
    keywords: &'static [&'static str],
    template: &'static str,
}

impl Rule {
    fn matches(&self, context: ChatContext, input: &str) -> bool {
        self.context.is_none_or(|c| c == context) && self.keywords.iter().any(|k| input.contains(k))
    }
}

const RULES: &[Rule] = &[
    Rule {
        context: Some(ChatContext::Dashboard),
        keywords: &["conversion", "rate"],
        template: "conversion.md.tera",
    },
    Rule {
        context: Some(ChatContext::Dashboard),
        keywords: &["revenue", "value", "money"],
        template: "revenue.md.tera",
    },
    Rule {
        context: Some(ChatContext::Dashboard),
        keywords: &["team", "performance"],
        template: "team.md.tera",
    },
    Rule {
        context: Some(ChatContext::Pipeline),
        keywords: &["status", "rfp", "pipeline"],
        template: "pipeline_status.md.tera",
    },
    Rule {
        context: Some(ChatContext::Pipeline),
        keywords: &["delay", "late", "overdue"],
        template: "delays.md.tera",
    },
    Rule {
        context: Some(ChatContext::Analytics),
        keywords: &["trend", "forecast", "prediction"],
        template: "trends.md.tera",
    },
    Rule {
        context: None,
        keywords: &["help", "what can you do"],
        template: "help.md.tera",
    },
];

const DEFAULT_TEMPLATE: &str = "default.md.tera";

pub struct Assistant {
    tera: Tera,
}

impl Assistant {
    pub fn new() -> Result<Self, AssistantError> {
        let mut tera = Tera::default();

        for file in ResponseTemplates::iter() {
            let name = file.as_ref();
            let Some(content) = ResponseTemplates::get(name) else {
                continue;
            };
            let source = std::str::from_utf8(&content.data).map_err(|e| AssistantError::Template {
                name: name.to_string(),
                message: e.to_string(),
            })?;
            tera.add_raw_template(name, source)
                .map_err(|e| AssistantError::Template {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self { tera })
    }

    /// Template that answers `input`, first matching rule wins
    pub fn select_template(context: ChatContext, input: &str) -> &'static str {
        let lowered = input.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.matches(context, &lowered))
            .map_or(DEFAULT_TEMPLATE, |rule| rule.template)
    }

    /// Reply to `input`; blank input gets no reply
    pub fn respond(&self, context: ChatContext, input: &str) -> Result<Option<String>, AssistantError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let name = Self::select_template(context, input);
        debug!(%context, template = name, "assistant reply");

        let mut ctx = tera::Context::new();
        ctx.insert("input", input);
        ctx.insert("context_title", context.title());

        self.tera
            .render(name, &ctx)
            .map(|reply| Some(reply.trim_end().to_string()))
            .map_err(|e| AssistantError::Render {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

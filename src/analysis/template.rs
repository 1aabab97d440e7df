//! Prompt templates with named placeholders

use std::collections::HashMap;

use crate::error::{Error, Result};

/// A prompt template with a fixed set of named placeholders
///
/// Binding is fail-closed: rendering errors out when any declared
/// variable is unbound instead of interpolating a blank.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Template name, used in error messages
    name: String,
    /// Template text with `{placeholder}` markers
    template: String,
    /// Placeholders that must be bound at render time
    input_variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a template from text and its required placeholders
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        input_variables: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            input_variables: input_variables.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared placeholder names
    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    /// Substitute variables into the template text
    pub fn render(&self, variables: &HashMap<String, String>) -> Result<String> {
        let mut rendered = self.template.clone();
        for name in &self.input_variables {
            let value = variables.get(name).ok_or_else(|| Error::MissingVariable {
                template: self.name.clone(),
                variable: name.clone(),
            })?;
            rendered = rendered.replace(&format!("{{{}}}", name), value);
        }
        Ok(rendered)
    }

    /// Summary over retrieved document context
    pub fn summary() -> Self {
        Self::new(
            "summary",
            r#"Please provide a comprehensive summary of the following documents, focusing on key points,
important dates, and relevant financial information:

{documents}

Summary:"#,
            &["documents"],
        )
    }

    /// Recommendations grounded in document context and prior conversation
    pub fn recommendation() -> Self {
        Self::new(
            "recommendation",
            r#"Based on the following documents and previous conversation context, provide specific recommendations
for the given query. Focus on actionable insights and relevant data points:

Documents:
{documents}

Query: {query}

Previous Conversation:
{chat_history}

Recommendations:"#,
            &["documents", "query", "chat_history"],
        )
    }

    /// Five-section analysis of a single document
    pub fn document_analysis() -> Self {
        Self::new(
            "document_analysis",
            r#"Analyze the following document and provide:
1. Key points and main arguments
2. Important dates and deadlines
3. Financial implications
4. Risk factors
5. Action items

Document:
{document}

Analysis:"#,
            &["document"],
        )
    }
}

//! Official-spelling rules for technical product names.
//!
//! Each rule carries a vendor dictionary; ASCII keys match
//! case-insensitively at word boundaries and the canonical spelling itself
//! is never flagged.

use kousei_text::Token;

use crate::{AdvancedDiagnostic, AdvancedRulesConfig, ErrorKind, Rule, RuleContext, Severity};

use super::notation::correction_diagnostics;
use super::support::scan_text_map;

fn term_diagnostics(
    rule_name: &'static str,
    kind: ErrorKind,
    entries: &[(&str, &str)],
    text: &str,
) -> Vec<AdvancedDiagnostic> {
    correction_diagnostics(
        rule_name,
        kind,
        Severity::Information,
        "表記が公式の製品名と異なります",
        scan_text_map(text, entries),
    )
}

const WEB_TERMS: &[(&str, &str)] = &[
    ("github", "GitHub"),
    ("gitlab", "GitLab"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("node.js", "Node.js"),
    ("nodejs", "Node.js"),
    ("graphql", "GraphQL"),
    ("websocket", "WebSocket"),
    ("oauth", "OAuth"),
];

/// Checks web-development product names against their official spellings.
pub struct WebTermsRule;

impl Rule for WebTermsRule {
    fn name(&self) -> &'static str {
        "web-terms"
    }

    fn description(&self) -> &'static str {
        "Web関連用語の公式表記を検査します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.web_terms
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        term_diagnostics(self.name(), ErrorKind::WebTerms, WEB_TERMS, ctx.text)
    }
}

const GENERATIVE_AI_TERMS: &[(&str, &str)] = &[
    ("chatgpt", "ChatGPT"),
    ("openai", "OpenAI"),
    ("claude", "Claude"),
    ("gemini", "Gemini"),
    ("copilot", "Copilot"),
    ("llm", "LLM"),
    ("rag", "RAG"),
];

/// Checks generative-AI product names against their official spellings.
pub struct GenerativeAiTermsRule;

impl Rule for GenerativeAiTermsRule {
    fn name(&self) -> &'static str {
        "generative-ai-terms"
    }

    fn description(&self) -> &'static str {
        "生成AI関連用語の公式表記を検査します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.generative_ai_terms
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        term_diagnostics(
            self.name(),
            ErrorKind::GenerativeAiTerms,
            GENERATIVE_AI_TERMS,
            ctx.text,
        )
    }
}

const AWS_TERMS: &[(&str, &str)] = &[
    ("aws", "AWS"),
    ("ec2", "EC2"),
    ("s3", "S3"),
    ("dynamodb", "DynamoDB"),
    ("cloudfront", "CloudFront"),
    ("cloudwatch", "CloudWatch"),
    ("iam", "IAM"),
];

/// Checks AWS service names against their official spellings.
pub struct AwsTermsRule;

impl Rule for AwsTermsRule {
    fn name(&self) -> &'static str {
        "aws-terms"
    }

    fn description(&self) -> &'static str {
        "AWSサービス名の公式表記を検査します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.aws_terms
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        term_diagnostics(self.name(), ErrorKind::AwsTerms, AWS_TERMS, ctx.text)
    }
}

const AZURE_TERMS: &[(&str, &str)] = &[
    ("azure", "Azure"),
    ("microsoft", "Microsoft"),
    ("entra id", "Entra ID"),
    ("cosmosdb", "Cosmos DB"),
    ("cosmos db", "Cosmos DB"),
    ("aks", "AKS"),
];

/// Checks Azure service names against their official spellings.
pub struct AzureTermsRule;

impl Rule for AzureTermsRule {
    fn name(&self) -> &'static str {
        "azure-terms"
    }

    fn description(&self) -> &'static str {
        "Azureサービス名の公式表記を検査します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.azure_terms
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        term_diagnostics(self.name(), ErrorKind::AzureTerms, AZURE_TERMS, ctx.text)
    }
}

const GCP_TERMS: &[(&str, &str)] = &[
    ("google cloud", "Google Cloud"),
    ("bigquery", "BigQuery"),
    ("kubernetes", "Kubernetes"),
    ("gke", "GKE"),
    ("firebase", "Firebase"),
    ("cloud run", "Cloud Run"),
];

/// Checks Google Cloud service names against their official spellings.
pub struct GcpTermsRule;

impl Rule for GcpTermsRule {
    fn name(&self) -> &'static str {
        "gcp-terms"
    }

    fn description(&self) -> &'static str {
        "Google Cloudサービス名の公式表記を検査します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.gcp_terms
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        term_diagnostics(self.name(), ErrorKind::GcpTerms, GCP_TERMS, ctx.text)
    }
}

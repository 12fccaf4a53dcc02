use crate::domain::lead::LeadIssue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceIcon {
    Code,
    Cloud,
    Database,
    FileText,
    Smartphone,
    Layout,
    PenTool,
    Video,
    Film,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub icon: ServiceIcon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub id: u32,
    pub title: String,
    pub client: String,
    pub category: String,
    pub problem: String,
    pub approach: String,
    pub outcomes: String,
    pub tech_stack: Vec<String>,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub value: String,
    pub label: String,
}

/// Option lists rendered by the contact and work pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteOptions {
    pub work_filters: Vec<String>,
    pub budget_ranges: Vec<BudgetRange>,
    pub service_interests: Vec<String>,
}

/// Plaintext notification handed to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// What happened to the notification for an accepted lead. Never shown to
/// the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub message: String,
    pub delivery: DeliveryOutcome,
}

/// JSON body of every `/api/lead` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<Vec<LeadIssue>>,
}

impl ResponseEnvelope {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn invalid(errors: Vec<LeadIssue>) -> Self {
        Self {
            success: false,
            message: None,
            errors: Some(errors),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            errors: None,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Caller-supplied description of a carpentry job.
///
/// Only `projectType` is required, and that is enforced at the HTTP boundary
/// rather than by serde so the handler can answer with the expected
/// `{error, message}` envelope instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub skill_level: Option<String>,
    #[serde(default)]
    pub additional_requirements: Option<String>,
}

/// Requested dimensions; every axis is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub unit: Option<String>,
}

/// Fully normalized project plan returned to the caller.
///
/// Every field is guaranteed present after normalization; sequences are
/// always proper sequences even when the model omitted or mistyped them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    pub project_name: String,
    pub overview: String,
    pub estimated_total_cost: f64,
    pub currency: String,
    pub estimated_total_time: String,
    pub steps: Vec<Step>,
    pub parts: Vec<Part>,
    pub tools: Vec<String>,
    pub tips: Vec<String>,
}

/// One build step. `step_number` is execution order, 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub step_number: u32,
    pub title: String,
    pub description: String,
    pub tools: Vec<String>,
    pub materials: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    pub warnings: Vec<String>,
}

/// A purchasable part, optionally with alternative choices. Alternatives are
/// tree-shaped: the type is recursive but alternatives rarely nest further.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub currency: String,
    pub link: String,
    pub description: String,
    pub alternatives: Vec<Part>,
}

//! Coercion of raw model output into a fully populated [`ProjectPlan`].
//!
//! Parsing the text as JSON is the only hard failure. Past that point every
//! field goes through an explicit, total coercion rule: wrong-kind scalars
//! fall back to their documented default, non-sequences become empty
//! sequences, and malformed list elements are defaulted field-by-field rather
//! than dropped. The declared total cost is reconciled against the parts list
//! at the end.

use serde_json::Value;

use super::PlanError;
use crate::domain::{Part, ProjectPlan, ProjectRequest, Step};

/// Currency applied when the model left a price untagged.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Absolute difference (in currency units) the declared total may deviate
/// from the computed part sum before it is overwritten. Within this band the
/// model's own rounding is trusted.
const COST_TOLERANCE: f64 = 1.0;

/// Parse raw model text and normalize it into a plan.
///
/// The request is used only for fallback naming when the model omitted the
/// project name. Fails only when `raw` is not valid JSON.
pub fn normalize_plan(raw: &str, request: &ProjectRequest) -> Result<ProjectPlan, PlanError> {
    let parsed: Value = serde_json::from_str(raw)?;
    Ok(normalize_value(&parsed, request))
}

fn normalize_value(raw: &Value, request: &ProjectRequest) -> ProjectPlan {
    let fallback_name = if request.project_type.is_empty() {
        "Carpentry Project"
    } else {
        request.project_type.as_str()
    };

    let mut plan = ProjectPlan {
        project_name: string_or(raw, "projectName", fallback_name),
        overview: string_or(raw, "overview", "A custom carpentry project"),
        estimated_total_cost: non_negative_or(raw, "estimatedTotalCost", 0.0),
        currency: string_or(raw, "currency", DEFAULT_CURRENCY),
        estimated_total_time: string_or(raw, "estimatedTotalTime", "Unknown"),
        steps: seq(raw, "steps")
            .iter()
            .enumerate()
            .map(|(index, step)| normalize_step(step, index))
            .collect(),
        parts: seq(raw, "parts").iter().map(normalize_part).collect(),
        tools: string_seq(raw, "tools"),
        tips: string_seq(raw, "tips"),
    };

    reconcile_total_cost(&mut plan);
    plan
}

/// Steps keep their source order; `index` is the element's 0-based position,
/// used for the step-number and title fallbacks.
fn normalize_step(raw: &Value, index: usize) -> Step {
    let position = (index + 1) as u32;
    Step {
        step_number: positive_int_or(raw, "stepNumber", position),
        title: string_or(raw, "title", &format!("Step {position}")),
        description: string_or(raw, "description", ""),
        tools: string_seq(raw, "tools"),
        materials: string_seq(raw, "materials"),
        estimated_time: opt_string(raw, "estimatedTime"),
        warnings: string_seq(raw, "warnings"),
    }
}

/// Alternatives recurse through the same rules as top-level parts. The raw
/// value is tree-shaped and serde_json bounds its depth, so the recursion is
/// finite.
fn normalize_part(raw: &Value) -> Part {
    Part {
        name: string_or(raw, "name", "Unknown Part"),
        quantity: positive_int_or(raw, "quantity", 1),
        price: non_negative_or(raw, "price", 0.0),
        currency: string_or(raw, "currency", DEFAULT_CURRENCY),
        link: string_or(raw, "link", ""),
        description: string_or(raw, "description", ""),
        alternatives: seq(raw, "alternatives").iter().map(normalize_part).collect(),
    }
}

/// Overwrite the declared total with `Σ price × quantity` over top-level
/// parts when the declared value is exactly zero or off by more than the
/// tolerance. Alternatives never contribute.
fn reconcile_total_cost(plan: &mut ProjectPlan) {
    if plan.parts.is_empty() {
        return;
    }

    let computed: f64 = plan
        .parts
        .iter()
        .map(|part| part.price * f64::from(part.quantity))
        .sum();

    let declared = plan.estimated_total_cost;
    if declared == 0.0 || (declared - computed).abs() > COST_TOLERANCE {
        plan.estimated_total_cost = computed;
    }
}

// Per-field coercion rules. Each is total over arbitrary JSON: a missing key,
// a wrong-kind value, or (for strings) an empty value yields the default.

fn string_or(raw: &Value, key: &str, default: &str) -> String {
    match raw.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

fn opt_string(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_negative_or(raw: &Value, key: &str, default: f64) -> f64 {
    match raw.get(key).and_then(Value::as_f64) {
        Some(n) if n.is_finite() && n >= 0.0 => n,
        _ => default,
    }
}

fn positive_int_or(raw: &Value, key: &str, default: u32) -> u32 {
    raw.get(key)
        .and_then(Value::as_u64)
        .filter(|&n| n >= 1)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default)
}

fn seq<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Sequence of strings; a malformed element becomes an empty string rather
/// than being dropped, so element count is preserved.
fn string_seq(raw: &Value, key: &str) -> Vec<String> {
    seq(raw, key)
        .iter()
        .map(|v| v.as_str().unwrap_or_default().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(project_type: &str) -> ProjectRequest {
        ProjectRequest {
            project_type: project_type.to_string(),
            ..Default::default()
        }
    }

    fn normalize(raw: serde_json::Value) -> ProjectPlan {
        normalize_plan(&raw.to_string(), &request("bookshelf")).unwrap()
    }

    #[test]
    fn malformed_json_is_a_hard_failure() {
        let err = normalize_plan("not json {", &request("bookshelf")).unwrap_err();
        assert!(matches!(err, PlanError::MalformedJson(_)));

        let err = normalize_plan("", &request("bookshelf")).unwrap_err();
        assert!(matches!(err, PlanError::MalformedJson(_)));
    }

    #[test]
    fn empty_object_normalizes_to_full_defaults() {
        let plan = normalize(json!({}));

        assert_eq!(plan.project_name, "bookshelf");
        assert_eq!(plan.overview, "A custom carpentry project");
        assert_eq!(plan.estimated_total_cost, 0.0);
        assert_eq!(plan.currency, "USD");
        assert_eq!(plan.estimated_total_time, "Unknown");
        assert!(plan.steps.is_empty());
        assert!(plan.parts.is_empty());
        assert!(plan.tools.is_empty());
        assert!(plan.tips.is_empty());
    }

    #[test]
    fn missing_project_type_falls_back_to_generic_label() {
        let plan = normalize_plan("{}", &request("")).unwrap();
        assert_eq!(plan.project_name, "Carpentry Project");
    }

    #[test]
    fn wrong_kind_scalars_fall_back_to_defaults() {
        let plan = normalize(json!({
            "projectName": 42,
            "overview": null,
            "estimatedTotalCost": "expensive",
            "currency": false,
            "estimatedTotalTime": [],
        }));

        assert_eq!(plan.project_name, "bookshelf");
        assert_eq!(plan.overview, "A custom carpentry project");
        assert_eq!(plan.estimated_total_cost, 0.0);
        assert_eq!(plan.currency, "USD");
        assert_eq!(plan.estimated_total_time, "Unknown");
    }

    #[test]
    fn non_sequences_coerce_to_empty() {
        let plan = normalize(json!({
            "steps": "not-an-array",
            "parts": null,
            "tools": {"hammer": true},
            "tips": 7,
        }));

        assert!(plan.steps.is_empty());
        assert!(plan.parts.is_empty());
        assert!(plan.tools.is_empty());
        assert!(plan.tips.is_empty());
    }

    #[test]
    fn step_numbering_falls_back_to_position() {
        let plan = normalize(json!({
            "steps": [
                {"title": "Cut boards"},
                {"stepNumber": 0, "title": "Sand edges"},
                {"stepNumber": 7, "title": "Assemble"},
            ]
        }));

        assert_eq!(plan.steps[0].step_number, 1);
        assert_eq!(plan.steps[1].step_number, 2);
        assert_eq!(plan.steps[2].step_number, 7);
    }

    #[test]
    fn malformed_step_elements_are_defaulted_not_dropped() {
        let plan = normalize(json!({
            "steps": [
                "garbage",
                {"tools": "table saw", "materials": null, "warnings": [true, "wear goggles"]},
            ]
        }));

        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].title, "Step 1");
        assert_eq!(plan.steps[0].description, "");
        assert!(plan.steps[0].tools.is_empty());
        assert!(plan.steps[0].estimated_time.is_none());

        assert!(plan.steps[1].tools.is_empty());
        assert!(plan.steps[1].materials.is_empty());
        assert_eq!(plan.steps[1].warnings, vec!["", "wear goggles"]);
    }

    #[test]
    fn step_order_is_preserved_as_given() {
        let plan = normalize(json!({
            "steps": [
                {"stepNumber": 3, "title": "Finish"},
                {"stepNumber": 1, "title": "Cut"},
                {"stepNumber": 2, "title": "Join"},
            ]
        }));

        let titles: Vec<&str> = plan.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Finish", "Cut", "Join"]);
    }

    #[test]
    fn part_defaults_apply_fieldwise() {
        let plan = normalize(json!({
            "parts": [{
                "quantity": -2,
                "price": -10.0,
                "alternatives": [{"name": "Pine board", "price": 4.5}],
            }]
        }));

        let part = &plan.parts[0];
        assert_eq!(part.name, "Unknown Part");
        assert_eq!(part.quantity, 1);
        assert_eq!(part.price, 0.0);
        assert_eq!(part.currency, "USD");
        assert_eq!(part.link, "");

        let alt = &part.alternatives[0];
        assert_eq!(alt.name, "Pine board");
        assert_eq!(alt.quantity, 1);
        assert_eq!(alt.price, 4.5);
        assert_eq!(alt.currency, "USD");
        assert!(alt.alternatives.is_empty());
    }

    #[test]
    fn zero_total_is_recomputed_from_parts() {
        let plan = normalize(json!({
            "estimatedTotalCost": 0,
            "parts": [
                {"name": "Plywood", "price": 10.0, "quantity": 2},
                {"name": "Screws", "price": 5.0, "quantity": 1},
            ]
        }));

        assert_eq!(plan.estimated_total_cost, 25.0);
    }

    #[test]
    fn total_within_tolerance_is_kept() {
        let plan = normalize(json!({
            "estimatedTotalCost": 25.5,
            "parts": [
                {"name": "Plywood", "price": 10.0, "quantity": 2},
                {"name": "Screws", "price": 5.0, "quantity": 1},
            ]
        }));

        assert_eq!(plan.estimated_total_cost, 25.5);
    }

    #[test]
    fn total_outside_tolerance_is_recomputed() {
        let plan = normalize(json!({
            "estimatedTotalCost": 100.0,
            "parts": [
                {"name": "Plywood", "price": 10.0, "quantity": 2},
                {"name": "Screws", "price": 5.0, "quantity": 1},
            ]
        }));

        assert_eq!(plan.estimated_total_cost, 25.0);
    }

    #[test]
    fn alternatives_do_not_participate_in_reconciliation() {
        let plan = normalize(json!({
            "estimatedTotalCost": 0,
            "parts": [{
                "name": "Oak board",
                "price": 20.0,
                "quantity": 1,
                "alternatives": [{"name": "Pine board", "price": 8.0, "quantity": 1}],
            }]
        }));

        assert_eq!(plan.estimated_total_cost, 20.0);
    }

    #[test]
    fn declared_total_without_parts_is_kept() {
        let plan = normalize(json!({"estimatedTotalCost": 40.0}));
        assert_eq!(plan.estimated_total_cost, 40.0);
    }

    #[test]
    fn tool_duplicates_are_tolerated() {
        let plan = normalize(json!({"tools": ["drill", "drill", "saw"]}));
        assert_eq!(plan.tools, vec!["drill", "drill", "saw"]);
    }

    #[test]
    fn estimated_time_passes_through_when_present() {
        let plan = normalize(json!({
            "steps": [{"title": "Cut", "estimatedTime": "30 minutes"}]
        }));
        assert_eq!(plan.steps[0].estimated_time.as_deref(), Some("30 minutes"));
    }
}

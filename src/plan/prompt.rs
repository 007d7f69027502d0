//! Deterministic prompt construction for the plan-generation model call.
//!
//! The prompt restates every populated request field in a fixed order, then
//! appends a literal description of the JSON shape the model must produce.
//! No randomness and no clock reads: identical requests yield byte-identical
//! prompts.

use crate::domain::ProjectRequest;

/// System message fixing the assistant's persona for every request.
pub const SYSTEM_PROMPT: &str = "You are an expert carpenter and woodworking instructor. \
Your task is to provide detailed, accurate, and safe step-by-step instructions for building \
carpentry projects. You must also provide accurate part lists with realistic prices and \
purchase links. Always prioritize safety in your instructions.";

/// Unit used for dimensions the caller left unlabeled.
const DEFAULT_DIMENSION_UNIT: &str = "in";

/// Target schema description plus authoring rules, appended verbatim to every
/// prompt so the model constrains itself to one parseable JSON object.
const RESPONSE_FORMAT: &str = r#"
Please provide a comprehensive response in JSON format with the following structure:
{
  "projectName": "Name of the project",
  "overview": "Brief overview of the project",
  "estimatedTotalCost": 0.00,
  "currency": "USD",
  "estimatedTotalTime": "X hours/days",
  "steps": [
    {
      "stepNumber": 1,
      "title": "Step title",
      "description": "Detailed description of what to do in this step",
      "tools": ["list", "of", "tools", "needed"],
      "materials": ["list", "of", "materials", "needed"],
      "estimatedTime": "X minutes/hours",
      "warnings": ["any safety warnings or important notes"]
    }
  ],
  "parts": [
    {
      "name": "Part name",
      "quantity": 1,
      "price": 0.00,
      "currency": "USD",
      "link": "https://example.com/product-link",
      "description": "Description of the part",
      "alternatives": [
        {
          "name": "Alternative part name",
          "quantity": 1,
          "price": 0.00,
          "currency": "USD",
          "link": "https://example.com/alternative-link",
          "description": "Description of alternative"
        }
      ]
    }
  ],
  "tools": ["list", "of", "all", "tools", "needed"],
  "tips": ["helpful tips for the project"]
}

Important requirements:
1. Provide realistic prices in USD for all parts (use current market prices)
2. Include actual purchase links to reputable retailers (Home Depot, Lowe's, Amazon, etc.)
3. Ensure all steps are clear, safe, and actionable
4. Include safety warnings where appropriate
5. Provide alternatives for major parts (like PC Part Picker does)
6. Make sure the total cost matches the sum of all parts
7. Be specific about quantities needed
8. Include all necessary hardware (screws, nails, glue, etc.)"#;

/// Render the user prompt for a project request.
///
/// Absent optional fields contribute no clause at all; the prompt simply gets
/// sparser as the request gets emptier.
pub fn build_prompt(request: &ProjectRequest) -> String {
    let mut prompt =
        String::from("Create a detailed carpentry project plan for the following request:\n\n");

    prompt.push_str(&format!("Project Type: {}\n", request.project_type));

    if let Some(dims) = &request.dimensions {
        let unit = dims.unit.as_deref().unwrap_or(DEFAULT_DIMENSION_UNIT);
        let mut rendered: Vec<String> = Vec::new();
        if let Some(length) = dims.length {
            rendered.push(format!("Length: {length}{unit}"));
        }
        if let Some(width) = dims.width {
            rendered.push(format!("Width: {width}{unit}"));
        }
        if let Some(height) = dims.height {
            rendered.push(format!("Height: {height}{unit}"));
        }
        if !rendered.is_empty() {
            prompt.push_str(&format!("Dimensions: {}\n", rendered.join(", ")));
        }
    }

    if let Some(material) = &request.material {
        prompt.push_str(&format!("Preferred Material: {material}\n"));
    }

    if let Some(budget) = request.budget {
        prompt.push_str(&format!("Budget: ${budget}\n"));
    }

    if let Some(skill_level) = &request.skill_level {
        prompt.push_str(&format!("Skill Level: {skill_level}\n"));
    }

    if let Some(additional) = &request.additional_requirements {
        prompt.push_str(&format!("Additional Requirements: {additional}\n"));
    }

    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

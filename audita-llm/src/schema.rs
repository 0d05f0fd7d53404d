//! The structured output schema, declared once.
//!
//! [`analysis_schema`] is the single source of truth for the shape of an
//! audit: [`Schema::to_gemini`] renders it as the provider's
//! `responseSchema` descriptor, and [`Schema::validate`] walks a parsed
//! response against the same tree so a payload missing any required field is
//! rejected before typed deserialization ever runs (fail-closed, never a
//! partial result).

use serde_json::{json, Map, Value};

/// A minimal JSON-schema dialect: exactly what the provider's structured
/// output mode understands.
#[derive(Debug, Clone)]
pub enum Schema {
    Object {
        properties: Vec<(&'static str, Schema)>,
        required: &'static [&'static str],
    },
    Array(Box<Schema>),
    String,
    Number,
}

impl Schema {
    /// Render the provider-side `responseSchema` descriptor.
    pub fn to_gemini(&self) -> Value {
        match self {
            Schema::Object {
                properties,
                required,
            } => {
                let mut props = Map::new();
                for (name, sub) in properties {
                    props.insert((*name).to_string(), sub.to_gemini());
                }
                let mut obj = json!({ "type": "OBJECT", "properties": props });
                if !required.is_empty() {
                    obj["required"] = json!(required);
                }
                obj
            }
            Schema::Array(items) => json!({ "type": "ARRAY", "items": items.to_gemini() }),
            Schema::String => json!({ "type": "STRING" }),
            Schema::Number => json!({ "type": "NUMBER" }),
        }
    }

    /// Check a parsed payload against this schema.
    ///
    /// Returns the dotted path of the first violation: a required field that
    /// is absent, or a node whose JSON type does not match the declaration.
    /// Optional fields are validated only when present.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        self.validate_at(value, "")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), String> {
        let label = if path.is_empty() { "<root>" } else { path };
        match self {
            Schema::Object {
                properties,
                required,
            } => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| format!("field `{label}` expected an object"))?;
                for (name, sub) in properties {
                    let child_path = join(path, name);
                    match obj.get(*name) {
                        Some(child) => sub.validate_at(child, &child_path)?,
                        None if required.contains(name) => {
                            return Err(format!("missing required field `{child_path}`"));
                        }
                        None => {}
                    }
                }
                Ok(())
            }
            Schema::Array(items) => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| format!("field `{label}` expected an array"))?;
                for (idx, element) in arr.iter().enumerate() {
                    items.validate_at(element, &format!("{label}[{idx}]"))?;
                }
                Ok(())
            }
            Schema::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("field `{label}` expected a string"))
                }
            }
            Schema::Number => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(format!("field `{label}` expected a number"))
                }
            }
        }
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn string_array() -> Schema {
    Schema::Array(Box::new(Schema::String))
}

/// The audit output contract, field for field.
///
/// Required-ness is deliberate: inside `contact` only `website` is required;
/// every other declared field is required at its own level.
pub fn analysis_schema() -> Schema {
    let contact = Schema::Object {
        properties: vec![
            ("phone", Schema::String),
            ("email", Schema::String),
            ("website", Schema::String),
            ("mainLink", Schema::String),
        ],
        required: &["website"],
    };

    let basic_info = Schema::Object {
        properties: vec![
            ("handle", Schema::String),
            ("businessName", Schema::String),
            ("category", Schema::String),
            ("bio", Schema::String),
            ("services", string_array()),
            ("location", Schema::String),
            ("targetAudience", Schema::String),
            ("uniqueValueProp", Schema::String),
            ("contact", contact),
        ],
        required: &[
            "handle",
            "businessName",
            "category",
            "bio",
            "services",
            "location",
            "targetAudience",
            "uniqueValueProp",
            "contact",
        ],
    };

    let content_type = Schema::Object {
        properties: vec![("type", Schema::String), ("percentage", Schema::Number)],
        required: &["type", "percentage"],
    };
    let quality_score = Schema::Object {
        properties: vec![("visual", Schema::Number), ("copywriting", Schema::Number)],
        required: &["visual", "copywriting"],
    };
    let content_metrics = Schema::Object {
        properties: vec![
            ("postFrequency", Schema::String),
            ("contentTypes", Schema::Array(Box::new(content_type))),
            ("themes", string_array()),
            ("tone", Schema::String),
            ("visualStyle", Schema::String),
            ("engagementLevel", Schema::String),
            ("brandConsistency", Schema::Number),
            ("qualityScore", quality_score),
        ],
        required: &[
            "postFrequency",
            "contentTypes",
            "themes",
            "tone",
            "visualStyle",
            "engagementLevel",
            "brandConsistency",
            "qualityScore",
        ],
    };

    let competitor_metrics = Schema::Object {
        properties: vec![
            ("presence", Schema::Number),
            ("consistency", Schema::Number),
            ("professionalism", Schema::Number),
            ("engagement", Schema::Number),
        ],
        required: &["presence", "consistency", "professionalism", "engagement"],
    };
    let competitor = Schema::Object {
        properties: vec![
            ("name", Schema::String),
            ("strengths", string_array()),
            ("weaknesses", string_array()),
            ("practices", string_array()),
            ("metrics", competitor_metrics),
        ],
        required: &["name", "strengths", "weaknesses", "practices", "metrics"],
    };

    let opportunity = Schema::Object {
        properties: vec![
            ("area", Schema::String),
            ("priority", Schema::String),
            ("advice", Schema::String),
        ],
        required: &["area", "priority", "advice"],
    };
    let diagnosis = Schema::Object {
        properties: vec![
            ("overallScore", Schema::Number),
            ("executiveSummary", Schema::String),
            ("opportunities", Schema::Array(Box::new(opportunity))),
            ("gapsVsCompetitors", string_array()),
        ],
        required: &[
            "overallScore",
            "executiveSummary",
            "opportunities",
            "gapsVsCompetitors",
        ],
    };

    let solution = Schema::Object {
        properties: vec![
            ("webDesign", Schema::String),
            ("chatbot", Schema::String),
            ("bookingSystem", Schema::String),
            ("socialOptimization", Schema::String),
        ],
        required: &["webDesign", "chatbot", "bookingSystem", "socialOptimization"],
    };
    let projected_benefit = Schema::Object {
        properties: vec![("metric", Schema::String), ("improvement", Schema::String)],
        required: &["metric", "improvement"],
    };
    let commercial_proposal = Schema::Object {
        properties: vec![
            ("introduction", Schema::String),
            ("painPoints", string_array()),
            ("solution", solution),
            ("projectedBenefits", Schema::Array(Box::new(projected_benefit))),
        ],
        required: &["introduction", "painPoints", "solution", "projectedBenefits"],
    };

    Schema::Object {
        properties: vec![
            ("basicInfo", basic_info),
            ("contentMetrics", content_metrics),
            ("competitors", Schema::Array(Box::new(competitor))),
            ("diagnosis", diagnosis),
            ("commercialProposal", commercial_proposal),
        ],
        required: &[
            "basicInfo",
            "contentMetrics",
            "competitors",
            "diagnosis",
            "commercialProposal",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_descriptor_marks_only_website_required_in_contact() {
        let descriptor = analysis_schema().to_gemini();
        let contact = &descriptor["properties"]["basicInfo"]["properties"]["contact"];
        assert_eq!(contact["required"], json!(["website"]));
        assert!(contact["properties"].get("phone").is_some());
        assert!(contact["properties"].get("mainLink").is_some());
    }

    #[test]
    fn request_descriptor_requires_all_five_sections() {
        let descriptor = analysis_schema().to_gemini();
        assert_eq!(
            descriptor["required"],
            json!([
                "basicInfo",
                "contentMetrics",
                "competitors",
                "diagnosis",
                "commercialProposal"
            ])
        );
        assert_eq!(descriptor["properties"]["competitors"]["type"], "ARRAY");
    }

    #[test]
    fn validate_reports_missing_nested_required_field() {
        let schema = Schema::Object {
            properties: vec![(
                "diagnosis",
                Schema::Object {
                    properties: vec![("overallScore", Schema::Number)],
                    required: &["overallScore"],
                },
            )],
            required: &["diagnosis"],
        };
        let err = schema
            .validate(&json!({ "diagnosis": {} }))
            .unwrap_err();
        assert_eq!(err, "missing required field `diagnosis.overallScore`");
    }

    #[test]
    fn validate_skips_absent_optional_fields() {
        let schema = Schema::Object {
            properties: vec![("phone", Schema::String), ("website", Schema::String)],
            required: &["website"],
        };
        assert!(schema.validate(&json!({ "website": "https://x.example" })).is_ok());
    }

    #[test]
    fn validate_rejects_wrong_node_types() {
        let schema = Schema::Object {
            properties: vec![("services", Schema::Array(Box::new(Schema::String)))],
            required: &["services"],
        };
        let err = schema
            .validate(&json!({ "services": "not-a-list" }))
            .unwrap_err();
        assert_eq!(err, "field `services` expected an array");

        let err = schema
            .validate(&json!({ "services": ["ok", 3] }))
            .unwrap_err();
        assert_eq!(err, "field `services[1]` expected a string");
    }
}

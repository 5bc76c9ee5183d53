//! Fixed model catalog.
//!
//! Every model the tester offers is listed in [`MODEL_CATALOG`] with an
//! explicit family tag. Identifiers outside the catalog fall back to
//! [`family_for_model_id`], the only place the reasoning prefixes live.

use serde::Serialize;

/// Model families that accept different request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// Accepts temperature, top_p and `max_tokens`.
    Standard,
    /// Only accepts `max_completion_tokens`; sampling controls are fixed.
    Reasoning,
}

impl ModelFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::Standard => "standard",
            ModelFamily::Reasoning => "reasoning",
        }
    }

    /// Notice shown to users whose sampling settings will not be sent.
    pub fn parameter_notice(&self) -> Option<&'static str> {
        match self {
            ModelFamily::Standard => None,
            ModelFamily::Reasoning => Some(
                "O-series models only support default temperature (1.0) and top_p (1.0). \
                 These settings will be ignored.",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub family: ModelFamily,
}

/// Static catalog row: (id, display_name, description, family)
pub type CatalogEntry = (&'static str, &'static str, &'static str, ModelFamily);

/// Identifier prefixes of the reasoning family.
const REASONING_PREFIXES: &[&str] = &["o3", "o4-mini", "o1"];

pub const DEFAULT_MODEL: &str = "gpt-4o";

pub const MODEL_CATALOG: &[CatalogEntry] = &[
    (
        "gpt-4o",
        "GPT-4o",
        "GPT-4o (\u{201c}o\u{201d} for \u{201c}omni\u{201d}) is our versatile, high-intelligence flagship model. \
         It accepts both text and image inputs, and produces text outputs (including Structured Outputs). \
         It is the best model for most tasks, and is our most capable model outside of our o-series models.",
        ModelFamily::Standard,
    ),
    (
        "o4-mini",
        "o4-mini",
        "o4-mini is our latest small o-series model. It's optimized for fast, effective reasoning \
         with exceptionally efficient performance in coding and visual tasks.",
        ModelFamily::Reasoning,
    ),
    (
        "gpt-4.1",
        "GPT-4.1",
        "GPT-4.1 is our flagship model for complex tasks. It is well suited for problem solving across domains.",
        ModelFamily::Standard,
    ),
    (
        "o3",
        "o3",
        "o3 is a well-rounded and powerful model across domains. It sets a new standard for math, \
         science, coding, and visual reasoning tasks. It also excels at technical writing and \
         instruction-following. Use it to think through multi-step problems that involve analysis \
         across text, code, and images.",
        ModelFamily::Reasoning,
    ),
];

/// Infer a model family from its identifier.
pub fn family_for_model_id(model_id: &str) -> ModelFamily {
    if REASONING_PREFIXES
        .iter()
        .any(|prefix| model_id.starts_with(prefix))
    {
        ModelFamily::Reasoning
    } else {
        ModelFamily::Standard
    }
}

/// All catalog entries in display order.
pub fn catalog() -> Vec<ModelDescriptor> {
    MODEL_CATALOG.iter().map(descriptor_from_entry).collect()
}

/// Look up a catalog entry by exact identifier.
pub fn lookup(model_id: &str) -> Option<ModelDescriptor> {
    MODEL_CATALOG
        .iter()
        .find(|(id, ..)| *id == model_id)
        .map(descriptor_from_entry)
}

/// Catalog entry for `model_id`, or a descriptor whose family is inferred
/// from the identifier when the model is not in the catalog.
pub fn descriptor_for(model_id: &str) -> ModelDescriptor {
    lookup(model_id).unwrap_or_else(|| {
        let family = family_for_model_id(model_id);
        tracing::debug!(
            model = model_id,
            family = family.as_str(),
            "Model not in catalog, inferring family from identifier"
        );
        ModelDescriptor {
            id: model_id.to_string(),
            display_name: model_id.to_string(),
            description: String::new(),
            family,
        }
    })
}

fn descriptor_from_entry(entry: &CatalogEntry) -> ModelDescriptor {
    let (id, display_name, description, family) = *entry;
    ModelDescriptor {
        id: id.to_string(),
        display_name: display_name.to_string(),
        description: description.to_string(),
        family,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_two_models_per_family() {
        let models = catalog();
        assert_eq!(models.len(), 4);
        let reasoning = models
            .iter()
            .filter(|m| m.family == ModelFamily::Reasoning)
            .count();
        assert_eq!(reasoning, 2);
    }

    #[test]
    fn test_catalog_order_starts_with_default() {
        assert_eq!(catalog()[0].id, DEFAULT_MODEL);
    }

    #[test]
    fn test_catalog_tags_agree_with_prefix_rule() {
        for model in catalog() {
            assert_eq!(
                family_for_model_id(&model.id),
                model.family,
                "family tag for {} disagrees with prefix rule",
                model.id
            );
        }
    }

    #[test]
    fn test_family_prefix_rule() {
        assert_eq!(family_for_model_id("o3"), ModelFamily::Reasoning);
        assert_eq!(family_for_model_id("o3-mini"), ModelFamily::Reasoning);
        assert_eq!(family_for_model_id("o4-mini"), ModelFamily::Reasoning);
        assert_eq!(family_for_model_id("o1-preview"), ModelFamily::Reasoning);
        assert_eq!(family_for_model_id("gpt-4o"), ModelFamily::Standard);
        assert_eq!(family_for_model_id("gpt-4.1"), ModelFamily::Standard);
        // "o4" alone is not in the prefix set
        assert_eq!(family_for_model_id("o4"), ModelFamily::Standard);
        assert_eq!(family_for_model_id(""), ModelFamily::Standard);
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let o3 = lookup("o3").expect("o3 is in the catalog");
        assert_eq!(o3.display_name, "o3");
        assert_eq!(o3.family, ModelFamily::Reasoning);
        assert!(lookup("gpt-3.5-turbo").is_none());
    }

    #[test]
    fn test_descriptor_for_unknown_model_infers_family() {
        let descriptor = descriptor_for("o1-mini");
        assert_eq!(descriptor.id, "o1-mini");
        assert_eq!(descriptor.family, ModelFamily::Reasoning);
        assert!(descriptor.description.is_empty());

        let descriptor = descriptor_for("gpt-4o-mini");
        assert_eq!(descriptor.family, ModelFamily::Standard);
    }

    #[test]
    fn test_parameter_notice_only_for_reasoning() {
        assert!(ModelFamily::Standard.parameter_notice().is_none());
        assert!(ModelFamily::Reasoning
            .parameter_notice()
            .is_some_and(|notice| notice.contains("top_p")));
    }
}

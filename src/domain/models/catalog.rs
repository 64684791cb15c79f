#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

use rand::seq::SliceRandom;
use rand::Rng;

use super::Location;

/// Query parameter carrying the selected model in the shareable location.
pub const LLM_PARAM: &str = "llm";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

pub static MODEL_CATALOG: [ModelDescriptor; 5] = [
    ModelDescriptor {
        id: "openai_gpt_3_5_turbo",
        display_name: "GPT-3.5-Turbo",
        description: "OpenAI GPT-3.5 Turbo",
    },
    ModelDescriptor {
        id: "anthropic_claude_3_haiku",
        display_name: "Claude 3 Haiku",
        description: "Anthropic Claude 3 Haiku",
    },
    ModelDescriptor {
        id: "google_gemini_pro",
        display_name: "Google Gemini Pro",
        description: "Google Gemini Pro",
    },
    ModelDescriptor {
        id: "fireworks_mixtral",
        display_name: "Mixtral (via Fireworks.ai)",
        description: "Mixtral 8x7B Instruct hosted by Fireworks.ai",
    },
    ModelDescriptor {
        id: "cohere_command",
        display_name: "Cohere",
        description: "Cohere Command",
    },
];

/// The one model selection of a chat window. It is read from the location at
/// mount, written back to it on change, and sent with every question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSelection {
    id: String,
}

impl ModelSelection {
    pub fn new(id: &str) -> ModelSelection {
        return ModelSelection { id: id.to_string() };
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> ModelSelection {
        let descriptor = MODEL_CATALOG.choose(rng).unwrap_or(&MODEL_CATALOG[0]);
        return ModelSelection::new(descriptor.id);
    }

    pub fn from_location<R: Rng + ?Sized>(location: &Location, rng: &mut R) -> ModelSelection {
        if let Some(llm) = location.get_param(LLM_PARAM) {
            return ModelSelection::new(&llm);
        }

        return ModelSelection::random(rng);
    }

    pub fn id(&self) -> &str {
        return &self.id;
    }

    pub fn descriptor(&self) -> Option<&'static ModelDescriptor> {
        return MODEL_CATALOG.iter().find(|e| return e.id == self.id);
    }

    /// Position in the catalog, used to highlight the dropdown entry.
    pub fn catalog_index(&self) -> Option<usize> {
        return MODEL_CATALOG.iter().position(|e| return e.id == self.id);
    }

    pub fn display_name(&self) -> String {
        if let Some(descriptor) = self.descriptor() {
            return descriptor.display_name.to_string();
        }

        return self.id.to_string();
    }
}

//! Reply generation for the chat endpoint.
//!
//! [`ResponseGenerator`] is the seam where a real retrieval-augmented
//! generator would plug in. The default [`TemplateResponder`] only fills in
//! canned per-language templates.

use anyhow::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Produces a reply for a user message.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn respond(&self, message: &str, language: &str) -> Result<String>;
}

/// Canned replies in English, Spanish, and French.
///
/// The template is picked from a hash of the message, so the same message
/// always gets the same reply. Unsupported languages fall back to English.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateResponder;

const EN: [&str; 4] = [
    "I understand your question about: {message}",
    "Based on the available information, I can help you with that.",
    "That's an interesting question. Let me provide some insights.",
    "I'm here to assist you with your inquiry about: {message}",
];

const ES: [&str; 4] = [
    "Entiendo tu pregunta sobre: {message}",
    "Basado en la información disponible, puedo ayudarte con eso.",
    "Esa es una pregunta interesante. Permíteme darte algunas ideas.",
    "Estoy aquí para ayudarte con tu consulta sobre: {message}",
];

const FR: [&str; 4] = [
    "Je comprends votre question sur: {message}",
    "Basé sur les informations disponibles, je peux vous aider avec cela.",
    "C'est une question intéressante. Permettez-moi de vous donner quelques idées.",
    "Je suis là pour vous aider avec votre demande sur: {message}",
];

impl TemplateResponder {
    /// Templates for `language`, matched on its primary subtag (`fr-CA` → `fr`).
    fn templates(language: &str) -> &'static [&'static str; 4] {
        let primary = language
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "es" => &ES,
            "fr" => &FR,
            _ => &EN,
        }
    }

    fn pick(message: &str, count: usize) -> usize {
        let digest = Sha256::digest(message.as_bytes());
        digest[0] as usize % count
    }
}

#[async_trait]
impl ResponseGenerator for TemplateResponder {
    async fn respond(&self, message: &str, language: &str) -> Result<String> {
        let templates = Self::templates(language);
        let template = templates[Self::pick(message, templates.len())];
        Ok(template.replace("{message}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deterministic_reply() {
        let responder = TemplateResponder;
        let a = responder.respond("What is Rust?", "en").await.unwrap();
        let b = responder.respond("What is Rust?", "en").await.unwrap();
        assert_eq!(a, b);
        assert!(EN.iter().any(|t| t.replace("{message}", "What is Rust?") == a));
    }

    #[tokio::test]
    async fn test_language_selection() {
        let responder = TemplateResponder;
        let es = responder.respond("hola", "es").await.unwrap();
        assert!(ES.iter().any(|t| t.replace("{message}", "hola") == es));

        let fr = responder.respond("bonjour", "fr-CA").await.unwrap();
        assert!(FR.iter().any(|t| t.replace("{message}", "bonjour") == fr));
    }

    #[tokio::test]
    async fn test_unknown_language_falls_back_to_english() {
        let responder = TemplateResponder;
        let reply = responder.respond("hallo", "de").await.unwrap();
        assert!(EN.iter().any(|t| t.replace("{message}", "hallo") == reply));
    }
}

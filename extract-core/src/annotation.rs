//! # Anotações Tipadas
//!
//! Uma anotação é um trecho de texto com um tipo (documento, sentença, token,
//! menção de entidade) e atributos nomeados opcionais (ex: o tipo NER de uma
//! menção). As anotações são criadas por quem lê o corpus; o subsistema de
//! extração apenas as consulta, nunca as modifica.
//!
//! ## Por que um enum fechado de tipos?
//!
//! Em vez de referências dinâmicas a "qualquer tipo de anotação", usamos o
//! enum [`AnnotationKind`]: o conjunto de tipos suportados é conhecido em
//! tempo de compilação, e a configuração dos extratores passa a ser validada
//! pelo compilador (e pelo serde, na superfície JSON) em vez de falhar em
//! tempo de execução.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Tipos de anotação suportados pelo subsistema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// O documento inteiro (um span cobrindo todo o texto da unidade).
    Document,
    /// Uma sentença — o escopo típico da extração.
    Sentence,
    /// Um token — a entrada típica dos extratores de texto e caracteres.
    Token,
    /// Uma menção de entidade nomeada, portadora do atributo `ner_type`.
    EntityMention,
}

impl AnnotationKind {
    /// Nome do tipo como string (o mesmo usado na superfície de configuração).
    pub fn name(&self) -> &'static str {
        match self {
            AnnotationKind::Document => "document",
            AnnotationKind::Sentence => "sentence",
            AnnotationKind::Token => "token",
            AnnotationKind::EntityMention => "entity_mention",
        }
    }
}

/// Uma anotação: tipo + span + atributos nomeados.
///
/// Atributos ausentes representam valores não definidos (ex: uma menção sem
/// `ner_type`); `attribute` devolve `None` nesses casos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// O tipo desta anotação.
    pub kind: AnnotationKind,
    /// O intervalo de texto endereçado.
    pub span: Span,
    /// Atributos nomeados (ex: `"ner_type" -> "ORG"`).
    attributes: HashMap<String, String>,
}

impl Annotation {
    /// Cria uma anotação sem atributos.
    pub fn new(kind: AnnotationKind, span: Span) -> Self {
        Self {
            kind,
            span,
            attributes: HashMap::new(),
        }
    }

    /// Adiciona um atributo nomeado (estilo builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Consulta um atributo; `None` se nunca foi definido.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let mention = Annotation::new(AnnotationKind::EntityMention, Span::new(0, 2))
            .with_attribute("ner_type", "ORG");
        assert_eq!(mention.attribute("ner_type"), Some("ORG"));
        // Atributo nunca definido → None, não erro
        assert_eq!(mention.attribute("coref"), None);
    }

    #[test]
    fn test_kind_names_match_config_surface() {
        assert_eq!(AnnotationKind::Sentence.name(), "sentence");
        assert_eq!(AnnotationKind::EntityMention.name(), "entity_mention");
        // O serde usa os mesmos nomes na superfície JSON
        let parsed: AnnotationKind = serde_json::from_str("\"entity_mention\"").unwrap();
        assert_eq!(parsed, AnnotationKind::EntityMention);
    }
}

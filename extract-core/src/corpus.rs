//! # Corpus Anotado em Formato BIO
//!
//! Sentenças anotadas palavra a palavra no formato BIO, usadas como dados de
//! demonstração e de teste, e a conversão delas para um [`AnnotationStore`]
//! completo (documento, sentenças, tokens e menções de entidade).
//!
//! ## Formato BIO
//!
//! - **B-TYPE**: início de uma entidade do tipo TYPE.
//! - **I-TYPE**: continuação de uma entidade do tipo TYPE.
//! - **O**: fora de qualquer entidade.
//!
//! Os leitores de corpus reais (CoNLL etc.) vivem fora deste crate; este
//! módulo cumpre o papel deles para os testes, produzindo exatamente a
//! estrutura de anotações que os extratores consomem.

use crate::annotation::{Annotation, AnnotationKind};
use crate::span::Span;
use crate::store::AnnotationStore;

/// Nome do atributo que carrega o tipo NER de uma menção de entidade.
pub const NER_TYPE: &str = "ner_type";

/// Uma sentença anotada no formato BIO.
pub struct AnnotatedSentence {
    /// Domínio temático (para análises por área).
    pub domain: &'static str,
    /// Pares (palavra, tag_BIO).
    /// Exemplo: `[("Lula", "B-PER"), ("viajou", "O")]`
    pub annotations: &'static [(&'static str, &'static str)],
}

/// Retorna um pequeno corpus anotado em PT-BR.
pub fn get_corpus() -> Vec<AnnotatedSentence> {
    vec![
        AnnotatedSentence {
            domain: "saúde",
            annotations: &[
                ("A", "O"),
                ("Fiocruz", "B-ORG"),
                ("desenvolveu", "O"),
                ("a", "O"),
                ("vacina", "O"),
                ("contra", "O"),
                ("a", "O"),
                ("dengue", "B-MISC"),
                (".", "O"),
            ],
        },
        AnnotatedSentence {
            domain: "política",
            annotations: &[
                ("O", "O"),
                ("Supremo", "B-ORG"),
                ("Tribunal", "I-ORG"),
                ("Federal", "I-ORG"),
                ("fica", "O"),
                ("em", "O"),
                ("Brasília", "B-LOC"),
                (".", "O"),
            ],
        },
        AnnotatedSentence {
            domain: "esportes",
            annotations: &[
                ("Pelé", "B-PER"),
                ("marcou", "O"),
                ("mil", "O"),
                ("gols", "O"),
                ("pelo", "O"),
                ("Santos", "B-ORG"),
                (".", "O"),
            ],
        },
        AnnotatedSentence {
            domain: "economia",
            annotations: &[
                ("A", "O"),
                ("Petrobras", "B-ORG"),
                ("opera", "O"),
                ("na", "O"),
                ("bacia", "O"),
                ("de", "O"),
                ("Campos", "B-LOC"),
                ("desde", "O"),
                ("1977", "O"),
                (".", "O"),
            ],
        },
        AnnotatedSentence {
            domain: "cultura",
            annotations: &[
                ("Machado", "B-PER"),
                ("de", "I-PER"),
                ("Assis", "I-PER"),
                ("fundou", "O"),
                ("a", "O"),
                ("Academia", "B-ORG"),
                ("Brasileira", "I-ORG"),
                ("de", "I-ORG"),
                ("Letras", "I-ORG"),
                (".", "O"),
            ],
        },
    ]
}

/// Converte sentenças BIO em um [`AnnotationStore`] completo.
///
/// O texto é reconstruído juntando palavras com espaços simples (e sentenças
/// idem), o que torna os offsets determinísticos. São registrados:
///
/// - uma anotação `Document` cobrindo o texto inteiro;
/// - uma anotação `Sentence` por sentença;
/// - uma anotação `Token` por palavra;
/// - uma anotação `EntityMention` por trecho `B-X (I-X)*`, com o atributo
///   [`NER_TYPE`] igual a `X`.
pub fn build_store(sentences: &[AnnotatedSentence]) -> AnnotationStore {
    let mut text = String::new();
    let mut annotations: Vec<Annotation> = Vec::new();

    for (si, sentence) in sentences.iter().enumerate() {
        if si > 0 {
            text.push(' ');
        }
        let sentence_begin = text.len();

        let mut token_spans = Vec::with_capacity(sentence.annotations.len());
        for (wi, (word, _)) in sentence.annotations.iter().enumerate() {
            if wi > 0 {
                text.push(' ');
            }
            let begin = text.len();
            text.push_str(word);
            token_spans.push(Span::new(begin, text.len()));
        }
        let sentence_end = text.len();

        annotations.push(Annotation::new(
            AnnotationKind::Sentence,
            Span::new(sentence_begin, sentence_end),
        ));
        for span in &token_spans {
            annotations.push(Annotation::new(AnnotationKind::Token, *span));
        }
        annotations.extend(mentions_from_bio(sentence.annotations, &token_spans));
    }

    let mut store = AnnotationStore::new(text.clone());
    store.add(Annotation::new(
        AnnotationKind::Document,
        Span::new(0, text.len()),
    ));
    for annotation in annotations {
        store.add(annotation);
    }
    store
}

/// Máquina de estados B/I que reconstrói menções a partir das tags BIO.
///
/// Um `I-X` órfão (sem `B-X` imediatamente antes, ou de outra categoria) é
/// tratado como novo início — a convenção usual ao ler corpora ruidosos.
fn mentions_from_bio(
    annotations: &[(&str, &str)],
    token_spans: &[Span],
) -> Vec<Annotation> {
    let mut mentions = Vec::new();
    // (byte de início, rótulo, índice do último token incluído)
    let mut current: Option<(usize, String, usize)> = None;

    for (i, (_, tag)) in annotations.iter().enumerate() {
        if let Some(label) = tag.strip_prefix("B-") {
            if let Some((begin, l, last)) = current.take() {
                mentions.push(mention(begin, token_spans[last].end, &l));
            }
            current = Some((token_spans[i].begin, label.to_string(), i));
        } else if let Some(label) = tag.strip_prefix("I-") {
            let continues = matches!(&current, Some((_, l, _)) if l == label);
            if continues {
                if let Some((_, _, last)) = current.as_mut() {
                    *last = i;
                }
            } else {
                if let Some((begin, l, last)) = current.take() {
                    mentions.push(mention(begin, token_spans[last].end, &l));
                }
                current = Some((token_spans[i].begin, label.to_string(), i));
            }
        } else if let Some((begin, l, last)) = current.take() {
            mentions.push(mention(begin, token_spans[last].end, &l));
        }
    }
    if let Some((begin, l, last)) = current.take() {
        mentions.push(mention(begin, token_spans[last].end, &l));
    }
    mentions
}

fn mention(begin: usize, end: usize, label: &str) -> Annotation {
    Annotation::new(AnnotationKind::EntityMention, Span::new(begin, end))
        .with_attribute(NER_TYPE, label)
}

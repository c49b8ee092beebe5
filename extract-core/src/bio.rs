//! # Alinhamento de Tags BIO
//!
//! Projeta anotações de entidade em nível de span (ex: menções `ORG`/`LOC`)
//! sobre as entradas base (ex: tokens) de um escopo, produzindo uma tag por
//! entrada no esquema **BIO**:
//!
//! - `B`: a entrada inicia uma menção (Begin)
//! - `I`: a entrada continua a menção (Inside)
//! - `O`: a entrada está fora de qualquer menção (Outside)
//!
//! O elemento de vocabulário é o **par** `(valor_do_atributo, marcador)` —
//! por exemplo `(Some("ORG"), Begin)` ou `(None, Outside)` — e não suas
//! partes separadas, de modo que `id2element` sobre um id extraído recupera
//! o par exato.
//!
//! ## Desempate de menções sobrepostas
//!
//! Se mais de uma menção contém a mesma entrada base, vence a primeira na
//! ordem de consulta (início crescente, fim crescente, ordem de registro).
//! É um desempate documentado, não uma condição de erro; um corpus que
//! produz sobreposições genuinamente ambíguas é um problema de qualidade de
//! dados, não deste algoritmo.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::annotation::{Annotation, AnnotationKind};
use crate::error::{ExtractError, Result};
use crate::extractor::{required, Extractor, ExtractorConfig, TaggingStrategy};
use crate::feature::Feature;
use crate::store::AnnotationStore;
use crate::vocabulary::Vocabulary;

/// Marcador posicional do esquema BIO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BioMarker {
    /// Primeira entrada base contida na menção.
    Begin,
    /// Entradas seguintes dentro da mesma menção.
    Inside,
    /// Fora de qualquer menção.
    Outside,
}

impl BioMarker {
    /// Símbolo de uma letra usado nos formatos de corpus ("B", "I", "O").
    pub fn symbol(&self) -> &'static str {
        match self {
            BioMarker::Begin => "B",
            BioMarker::Inside => "I",
            BioMarker::Outside => "O",
        }
    }
}

impl std::fmt::Display for BioMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// O par (valor do atributo, marcador) — o elemento do vocabulário de tags.
///
/// O valor é `None` exatamente quando o marcador é `Outside`.
pub type BioTag = (Option<String>, BioMarker);

/// Extrator de sequências de tags BIO.
///
/// Para cada entrada base (tipo `based_on`, tipicamente token) contida no
/// escopo, deriva um [`BioTag`] a partir das menções (tipo `entry_type`,
/// tipicamente menção de entidade) que a contêm, lendo o atributo nomeado
/// em `attribute` (tipicamente `ner_type`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BioSeqTaggingExtractor {
    scope: AnnotationKind,
    entry_type: AnnotationKind,
    based_on: AnnotationKind,
    attribute: String,
    strategy: TaggingStrategy,
    vocab: Vocabulary<BioTag>,
}

impl BioSeqTaggingExtractor {
    /// Constrói a partir da configuração.
    ///
    /// Exige as cinco chaves `scope`, `entry_type`, `based_on`, `attribute`
    /// e `strategy`; uma `strategy` diferente de `"BIO"` falha com
    /// [`ExtractError::UnsupportedStrategy`].
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let strategy = TaggingStrategy::parse(&required(config.strategy.clone(), "strategy")?)?;
        Ok(Self {
            scope: required(config.scope, "scope")?,
            entry_type: required(config.entry_type, "entry_type")?,
            based_on: required(config.based_on, "based_on")?,
            attribute: required(config.attribute.clone(), "attribute")?,
            strategy,
            vocab: Vocabulary::new(),
        })
    }

    /// Constrói a partir de um valor JSON dinâmico.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::new(&ExtractorConfig::from_value(value)?)
    }

    /// Acesso de leitura ao vocabulário de pares de tag.
    pub fn vocab(&self) -> &Vocabulary<BioTag> {
        &self.vocab
    }

    /// A estratégia de alinhamento configurada.
    pub fn strategy(&self) -> TaggingStrategy {
        self.strategy
    }

    /// O algoritmo de alinhamento: uma tag por entrada base, em ordem de span.
    ///
    /// 1. Consulta as menções contidas no escopo (ordem de span fixa o
    ///    desempate de sobreposição).
    /// 2. Consulta as entradas base na mesma ordem — isso fixa o
    ///    comprimento e a ordem da saída.
    /// 3. Para cada entrada, a primeira menção que a contém define valor e
    ///    marcador: `B` na primeira entrada contida na menção, `I` nas
    ///    seguintes, `O` sem menção.
    pub fn align(&self, store: &AnnotationStore, instance: &Annotation) -> Vec<BioTag> {
        let mentions = store.entries_in(&instance.span, self.entry_type);
        let based = store.entries_in(&instance.span, self.based_on);

        let mut tags = Vec::with_capacity(based.len());
        // Índice da menção usada pela entrada anterior: distingue B de I
        let mut previous: Option<usize> = None;
        for entry in based {
            let hit = mentions.iter().position(|m| m.span.contains(&entry.span));
            match hit {
                None => {
                    tags.push((None, BioMarker::Outside));
                    previous = None;
                }
                Some(m) => {
                    let value = mentions[m].attribute(&self.attribute).map(str::to_string);
                    let marker = if previous == Some(m) {
                        BioMarker::Inside
                    } else {
                        BioMarker::Begin
                    };
                    tags.push((value, marker));
                    previous = Some(m);
                }
            }
        }
        tags
    }

    fn do_update_vocab(&mut self, store: &AnnotationStore, instance: &Annotation) -> Result<()> {
        for tag in self.align(store, instance) {
            self.vocab.add(tag)?;
        }
        Ok(())
    }

    fn do_extract(&self, store: &AnnotationStore, instance: &Annotation) -> Result<Feature> {
        if !self.vocab.is_frozen() {
            return Err(ExtractError::VocabNotBuilt);
        }
        let ids = self
            .align(store, instance)
            .iter()
            .map(|tag| self.vocab.element2id(tag))
            .collect::<Result<Vec<usize>>>()?;
        Ok(Feature::flat(ids))
    }
}

impl Extractor for BioSeqTaggingExtractor {
    fn scope(&self) -> AnnotationKind {
        self.scope
    }

    fn update_vocab(&mut self, store: &AnnotationStore, instance: &Annotation) -> Result<()> {
        self.do_update_vocab(store, instance)
    }

    fn freeze_vocab(&mut self) {
        self.vocab.freeze();
    }

    fn extract(&self, store: &AnnotationStore, instance: &Annotation) -> Result<Feature> {
        self.do_extract(store, instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{build_store, AnnotatedSentence};
    use crate::extractor::build_vocab;
    use crate::span::Span;
    use serde_json::json;

    /// A sentença clássica do CoNLL-2003.
    const CONLL: &[AnnotatedSentence] = &[AnnotatedSentence {
        domain: "conll03",
        annotations: &[
            ("EU", "B-ORG"),
            ("rejects", "O"),
            ("German", "B-MISC"),
            ("call", "O"),
            ("to", "O"),
            ("boycott", "O"),
            ("British", "B-MISC"),
            ("lamb", "I-MISC"),
            (".", "O"),
        ],
    }];

    fn bio_config() -> ExtractorConfig {
        ExtractorConfig {
            scope: Some(AnnotationKind::Sentence),
            entry_type: Some(AnnotationKind::EntityMention),
            attribute: Some("ner_type".to_string()),
            based_on: Some(AnnotationKind::Token),
            strategy: Some("BIO".to_string()),
            ..ExtractorConfig::default()
        }
    }

    fn tag(value: Option<&str>, marker: BioMarker) -> BioTag {
        (value.map(str::to_string), marker)
    }

    #[test]
    fn test_bio_alignment_conll_scenario() {
        let store = build_store(CONLL);
        let mut extractor = BioSeqTaggingExtractor::new(&bio_config()).unwrap();
        build_vocab(&mut extractor, &store).unwrap();

        let expected = vec![
            tag(Some("ORG"), BioMarker::Begin),
            tag(None, BioMarker::Outside),
            tag(Some("MISC"), BioMarker::Begin),
            tag(None, BioMarker::Outside),
            tag(None, BioMarker::Outside),
            tag(None, BioMarker::Outside),
            tag(Some("MISC"), BioMarker::Begin),
            tag(Some("MISC"), BioMarker::Inside),
            tag(None, BioMarker::Outside),
        ];

        let sentence = store.all_of(AnnotationKind::Sentence)[0];
        let feature = extractor.extract(&store, sentence).unwrap();
        let recovered: Vec<BioTag> = feature
            .data()
            .iter()
            .map(|&id| extractor.vocab().id2element(id).unwrap().clone())
            .collect();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn test_vocab_holds_pairs_not_components() {
        let store = build_store(CONLL);
        let mut extractor = BioSeqTaggingExtractor::new(&bio_config()).unwrap();
        build_vocab(&mut extractor, &store).unwrap();

        // (ORG, B), (None, O), (MISC, B), (MISC, I) — na ordem de primeira ocorrência
        let vocab = extractor.vocab();
        assert_eq!(vocab.len(), 4);
        assert_eq!(
            vocab.id2element(0).unwrap(),
            &tag(Some("ORG"), BioMarker::Begin)
        );
        assert_eq!(
            vocab.id2element(1).unwrap(),
            &tag(None, BioMarker::Outside)
        );
    }

    #[test]
    fn test_overlapping_mentions_first_wins() {
        // Duas menções contêm o mesmo token: vence a primeira na ordem de
        // consulta (início menor; empate por fim menor)
        let mut store = AnnotationStore::new("Banco Central do Brasil");
        store.add(Annotation::new(AnnotationKind::Sentence, Span::new(0, 23)));
        for (begin, end) in [(0, 5), (6, 13), (14, 16), (17, 23)] {
            store.add(Annotation::new(AnnotationKind::Token, Span::new(begin, end)));
        }
        // Menção larga ORG cobre tudo; menção LOC cobre só "Brasil"
        store.add(
            Annotation::new(AnnotationKind::EntityMention, Span::new(0, 23))
                .with_attribute("ner_type", "ORG"),
        );
        store.add(
            Annotation::new(AnnotationKind::EntityMention, Span::new(17, 23))
                .with_attribute("ner_type", "LOC"),
        );

        let mut extractor = BioSeqTaggingExtractor::new(&bio_config()).unwrap();
        build_vocab(&mut extractor, &store).unwrap();
        let sentence = store.all_of(AnnotationKind::Sentence)[0];
        let tags = extractor.align(&store, sentence);

        // "Brasil" está nas duas; a ORG (início 0) vem antes e vence
        assert_eq!(
            tags,
            vec![
                tag(Some("ORG"), BioMarker::Begin),
                tag(Some("ORG"), BioMarker::Inside),
                tag(Some("ORG"), BioMarker::Inside),
                tag(Some("ORG"), BioMarker::Inside),
            ]
        );
    }

    #[test]
    fn test_adjacent_mentions_restart_begin() {
        // Menções encostadas: a segunda recomeça com B, não continua com I
        let mut store = AnnotationStore::new("Rio Branco Parana");
        store.add(Annotation::new(AnnotationKind::Sentence, Span::new(0, 17)));
        for (begin, end) in [(0, 3), (4, 10), (11, 17)] {
            store.add(Annotation::new(AnnotationKind::Token, Span::new(begin, end)));
        }
        store.add(
            Annotation::new(AnnotationKind::EntityMention, Span::new(0, 10))
                .with_attribute("ner_type", "LOC"),
        );
        store.add(
            Annotation::new(AnnotationKind::EntityMention, Span::new(11, 17))
                .with_attribute("ner_type", "LOC"),
        );

        let mut extractor = BioSeqTaggingExtractor::new(&bio_config()).unwrap();
        build_vocab(&mut extractor, &store).unwrap();
        let sentence = store.all_of(AnnotationKind::Sentence)[0];
        assert_eq!(
            extractor.align(&store, sentence),
            vec![
                tag(Some("LOC"), BioMarker::Begin),
                tag(Some("LOC"), BioMarker::Inside),
                tag(Some("LOC"), BioMarker::Begin),
            ]
        );
    }

    #[test]
    fn test_extract_before_vocab_built_fails() {
        let store = build_store(CONLL);
        let extractor = BioSeqTaggingExtractor::new(&bio_config()).unwrap();
        let sentence = store.all_of(AnnotationKind::Sentence)[0];
        assert_eq!(
            extractor.extract(&store, sentence).unwrap_err(),
            ExtractError::VocabNotBuilt
        );
    }

    #[test]
    fn test_empty_scope_yields_empty_feature() {
        let mut store = AnnotationStore::new("     ");
        store.add(Annotation::new(AnnotationKind::Sentence, Span::new(0, 5)));

        let mut extractor = BioSeqTaggingExtractor::new(&bio_config()).unwrap();
        build_vocab(&mut extractor, &store).unwrap();
        let sentence = store.all_of(AnnotationKind::Sentence)[0];
        let feature = extractor.extract(&store, sentence).unwrap();
        assert!(feature.is_empty());
    }

    #[test]
    fn test_config_validation() {
        // strategy ausente
        let mut config = bio_config();
        config.strategy = None;
        assert!(matches!(
            BioSeqTaggingExtractor::new(&config).unwrap_err(),
            ExtractError::Config(_)
        ));

        // strategy não suportada
        let value = json!({
            "scope": "sentence",
            "entry_type": "entity_mention",
            "attribute": "ner_type",
            "based_on": "token",
            "strategy": "BILOU",
        });
        assert_eq!(
            BioSeqTaggingExtractor::from_value(&value).unwrap_err(),
            ExtractError::UnsupportedStrategy("BILOU".to_string())
        );

        // attribute ausente
        let mut config = bio_config();
        config.attribute = None;
        assert!(matches!(
            BioSeqTaggingExtractor::new(&config).unwrap_err(),
            ExtractError::Config(_)
        ));
    }
}

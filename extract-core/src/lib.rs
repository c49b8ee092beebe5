//! # extract-core — Extração de Features e Vocabulário para Rotulagem de Sequências
//!
//! Este crate converte anotações hierárquicas de texto (documento → sentença →
//! token → menção de entidade) em sequências numéricas consumíveis por modelos
//! de rotulagem de sequências (NER). Ele foi projetado para ser didático,
//! modular e determinístico: a mesma travessia do corpus produz sempre os
//! mesmos ids.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui pelos seguintes estágios, com duas passadas sobre o corpus
//! (construção de vocabulário e extração):
//!
//! 1.  **Anotações** ([`store`]): o leitor de corpus (externo) registra
//!     anotações com spans de bytes em um [`AnnotationStore`]; a relação
//!     escopo/entrada é resolvida por consultas de continência de spans.
//! 2.  **Construção de vocabulário** ([`vocabulary`]): cada extrator percorre
//!     o corpus uma vez alimentando seu vocabulário ([`extractor::build_vocab`]),
//!     que é então congelado — ids estáveis são pré-condição de reprodutibilidade.
//! 3.  **Extração** ([`extractor`], [`bio`]): uma segunda passada mapeia cada
//!     unidade pelo vocabulário congelado e produz [`Feature`]s, planas (ids de
//!     palavras, ids de tags BIO) ou aninhadas (ids de caracteres por token).
//! 4.  **Saída**: as [`Feature`]s vão para a camada de batching do modelo, que
//!     usa `unroll()` para aplicar padding retangular.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use extract_core::corpus::{build_store, AnnotatedSentence};
//! use extract_core::extractor::{build_vocab, extract_corpus};
//! use extract_core::{AnnotationKind, ExtractorConfig, TextExtractor};
//!
//! // 1. Corpus anotado (normalmente viria de um leitor CoNLL externo)
//! let corpus = [AnnotatedSentence {
//!     domain: "política",
//!     annotations: &[("Lula", "B-PER"), ("visitou", "O"), ("Brasília", "B-LOC")],
//! }];
//! let store = build_store(&corpus);
//!
//! // 2. Configura o extrator: ids de palavra por token, escopo de sentença
//! let config = ExtractorConfig {
//!     scope: Some(AnnotationKind::Sentence),
//!     entry_type: Some(AnnotationKind::Token),
//!     ..ExtractorConfig::default()
//! };
//! let mut extractor = TextExtractor::new(&config).unwrap();
//!
//! // 3. Passada de vocabulário (congela ao final) + passada de extração
//! build_vocab(&mut extractor, &store).unwrap();
//! let features = extract_corpus(&extractor, &store).unwrap();
//!
//! assert_eq!(features[0].data().len(), 3); // um id por token
//! ```
//!
//! ## Módulos Principais
//!
//! - [`span`]: intervalos semiabertos de bytes, a primitiva de endereçamento.
//! - [`store`]: contêiner de anotações com consultas de continência indexadas.
//! - [`vocabulary`]: mapeamento bidirecional elemento↔id com fases
//!   construção/congelado.
//! - [`extractor`]: extratores de texto e de caracteres + passadas de corpus.
//! - [`bio`]: alinhamento de tags BIO a partir de menções em nível de span.
//! - [`feature`]: o contêiner de saída, com visão plana e desenrolada.
//! - [`corpus`]: sentenças BIO de demonstração e a conversão para anotações.

pub mod annotation;
pub mod bio;
pub mod corpus;
pub mod error;
pub mod extractor;
pub mod feature;
pub mod span;
pub mod store;
pub mod vocabulary;

pub use annotation::{Annotation, AnnotationKind};
pub use bio::{BioMarker, BioSeqTaggingExtractor, BioTag};
pub use error::{ExtractError, Result};
pub use extractor::{CharExtractor, Extractor, ExtractorConfig, TaggingStrategy, TextExtractor};
pub use feature::Feature;
pub use span::Span;
pub use store::AnnotationStore;
pub use vocabulary::{VocabState, Vocabulary};

//! # Extratores de Texto e de Caracteres
//!
//! Um extrator é uma transformação sem estado próprio de predição: dado um
//! store de anotações e uma instância de escopo (ex: uma sentença), produz
//! uma [`Feature`] numérica. Todos os extratores seguem o mesmo protocolo de
//! duas fases:
//!
//! 1. **Construção de vocabulário**: uma passada sequencial pelo corpus
//!    chamando `update_vocab` para cada instância de escopo, seguida do
//!    congelamento do vocabulário.
//! 2. **Extração**: uma segunda passada chamando `extract`, que re-consulta
//!    as entradas na mesma ordem de continência e mapeia cada unidade pelo
//!    vocabulário já congelado.
//!
//! A fase de extração só lê estado compartilhado, então paralelizar entre
//! instâncias de escopo independentes é seguro — é o que [`extract_corpus`]
//! faz com `rayon`. A fase de construção permanece sequencial: a ordem de
//! primeira ocorrência define os ids, e ela precisa ser reprodutível.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

use crate::annotation::{Annotation, AnnotationKind};
use crate::error::{ExtractError, Result};
use crate::feature::Feature;
use crate::store::AnnotationStore;
use crate::vocabulary::Vocabulary;

/// Estratégias de alinhamento de tags suportadas.
///
/// Hoje apenas o esquema BIO; o enum fechado deixa a adição de IOBES ou
/// BILOU explícita no tipo em vez de escondida em strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaggingStrategy {
    /// Begin / Inside / Outside por token.
    Bio,
}

impl TaggingStrategy {
    /// Interpreta o valor da chave `strategy` da configuração.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "BIO" => Ok(TaggingStrategy::Bio),
            other => Err(ExtractError::UnsupportedStrategy(other.to_string())),
        }
    }
}

/// Superfície de configuração dos extratores.
///
/// Todos os campos são opcionais na leitura; cada extrator valida suas
/// chaves obrigatórias na construção e falha com [`ExtractError::Config`]
/// se alguma faltar. Chaves não reconhecidas na superfície JSON são
/// ignoradas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Tipo da anotação de escopo (ex: `sentence`).
    #[serde(default)]
    pub scope: Option<AnnotationKind>,
    /// Tipo da anotação de entrada consultada dentro do escopo.
    #[serde(default)]
    pub entry_type: Option<AnnotationKind>,
    /// Nome do atributo carregado pelas entradas (somente BIO).
    #[serde(default)]
    pub attribute: Option<String>,
    /// Tipo da anotação que fixa o comprimento da saída (somente BIO).
    #[serde(default)]
    pub based_on: Option<AnnotationKind>,
    /// Estratégia de alinhamento de tags (somente BIO; ex: `"BIO"`).
    #[serde(default)]
    pub strategy: Option<String>,
    /// Reserva o id 0 do vocabulário para padding (padrão: sim).
    #[serde(default)]
    pub use_pad: Option<bool>,
    /// Reserva um id do vocabulário para elementos desconhecidos (padrão: sim).
    #[serde(default)]
    pub use_unk: Option<bool>,
}

impl ExtractorConfig {
    /// Lê a configuração de um valor JSON dinâmico, ignorando chaves não
    /// reconhecidas.
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| ExtractError::Config(e.to_string()))
    }
}

/// Falha padronizada para chave obrigatória ausente.
pub(crate) fn required<T>(field: Option<T>, name: &str) -> Result<T> {
    field.ok_or_else(|| ExtractError::Config(format!("chave obrigatória ausente: {name}")))
}

/// O protocolo de duas fases comum aos extratores.
pub trait Extractor {
    /// Tipo da anotação de escopo sobre a qual o extrator opera.
    fn scope(&self) -> AnnotationKind;

    /// Alimenta o vocabulário com as unidades de uma instância de escopo.
    fn update_vocab(&mut self, store: &AnnotationStore, instance: &Annotation) -> Result<()>;

    /// Congela o vocabulário; deve ocorrer antes de qualquer `extract`.
    fn freeze_vocab(&mut self);

    /// Produz a feature de uma instância de escopo.
    fn extract(&self, store: &AnnotationStore, instance: &Annotation) -> Result<Feature>;
}

/// Passada de construção de vocabulário sobre o corpus inteiro.
///
/// Percorre as instâncias de escopo em ordem de span — a travessia
/// totalmente especificada que torna os ids reprodutíveis — e congela o
/// vocabulário ao final.
pub fn build_vocab<E: Extractor>(extractor: &mut E, store: &AnnotationStore) -> Result<()> {
    for instance in store.all_of(extractor.scope()) {
        extractor.update_vocab(store, instance)?;
    }
    extractor.freeze_vocab();
    Ok(())
}

/// Passada de extração sobre o corpus inteiro, em paralelo.
///
/// Seguro porque só ocorre leitura: o vocabulário já está congelado e cada
/// instância de escopo é independente. As features voltam na ordem de span
/// das instâncias.
pub fn extract_corpus<E: Extractor + Sync>(
    extractor: &E,
    store: &AnnotationStore,
) -> Result<Vec<Feature>> {
    store
        .all_of(extractor.scope())
        .par_iter()
        .map(|instance| extractor.extract(store, instance))
        .collect()
}

/// Extrator de texto: um id de vocabulário por entrada (ex: um id por token).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextExtractor {
    scope: AnnotationKind,
    entry_type: AnnotationKind,
    vocab: Vocabulary<String>,
}

impl TextExtractor {
    /// Constrói a partir da configuração; exige `scope` e `entry_type`.
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        Ok(Self {
            scope: required(config.scope, "scope")?,
            entry_type: required(config.entry_type, "entry_type")?,
            vocab: Vocabulary::with_specials(
                config.use_pad.unwrap_or(true),
                config.use_unk.unwrap_or(true),
            ),
        })
    }

    /// Constrói a partir de um valor JSON dinâmico.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::new(&ExtractorConfig::from_value(value)?)
    }

    /// Acesso de leitura ao vocabulário de palavras.
    pub fn vocab(&self) -> &Vocabulary<String> {
        &self.vocab
    }

    fn do_update_vocab(&mut self, store: &AnnotationStore, instance: &Annotation) -> Result<()> {
        for entry in store.entries_in(&instance.span, self.entry_type) {
            self.vocab.add(store.text_of(&entry.span).to_string())?;
        }
        Ok(())
    }

    fn do_extract(&self, store: &AnnotationStore, instance: &Annotation) -> Result<Feature> {
        if !self.vocab.is_frozen() {
            return Err(ExtractError::VocabNotBuilt);
        }
        let ids = store
            .entries_in(&instance.span, self.entry_type)
            .iter()
            .map(|entry| self.vocab.element2id(&store.text_of(&entry.span).to_string()))
            .collect::<Result<Vec<usize>>>()?;
        Ok(Feature::flat(ids))
    }
}

impl Extractor for TextExtractor {
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

/// Extrator de caracteres: uma sequência de ids por entrada (profundidade 2).
///
/// A unidade de caractere é o *grapheme cluster* estendido, então a
/// concatenação das unidades de uma entrada reconstrói exatamente o texto
/// original — inclusive para acentos combinantes e emoji.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharExtractor {
    scope: AnnotationKind,
    entry_type: AnnotationKind,
    vocab: Vocabulary<String>,
}

impl CharExtractor {
    /// Constrói a partir da configuração; exige `scope` e `entry_type`.
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        Ok(Self {
            scope: required(config.scope, "scope")?,
            entry_type: required(config.entry_type, "entry_type")?,
            vocab: Vocabulary::with_specials(
                config.use_pad.unwrap_or(true),
                config.use_unk.unwrap_or(true),
            ),
        })
    }

    /// Constrói a partir de um valor JSON dinâmico.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::new(&ExtractorConfig::from_value(value)?)
    }

    /// Acesso de leitura ao vocabulário de caracteres.
    pub fn vocab(&self) -> &Vocabulary<String> {
        &self.vocab
    }

    fn do_update_vocab(&mut self, store: &AnnotationStore, instance: &Annotation) -> Result<()> {
        for entry in store.entries_in(&instance.span, self.entry_type) {
            for grapheme in store.text_of(&entry.span).graphemes(true) {
                self.vocab.add(grapheme.to_string())?;
            }
        }
        Ok(())
    }

    fn do_extract(&self, store: &AnnotationStore, instance: &Annotation) -> Result<Feature> {
        if !self.vocab.is_frozen() {
            return Err(ExtractError::VocabNotBuilt);
        }
        let mut groups = Vec::new();
        for entry in store.entries_in(&instance.span, self.entry_type) {
            // Entrada de comprimento zero → grupo interno vazio
            let ids = store
                .text_of(&entry.span)
                .graphemes(true)
                .map(|g| self.vocab.element2id(&g.to_string()))
                .collect::<Result<Vec<usize>>>()?;
            groups.push(ids);
        }
        Ok(Feature::nested(groups))
    }
}

impl Extractor for CharExtractor {
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

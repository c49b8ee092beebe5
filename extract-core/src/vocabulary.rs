//! # Vocabulário — Mapeamento Bidirecional Elemento ↔ Id
//!
//! Converte elementos discretos (palavras, caracteres, pares de tag BIO) em
//! ids inteiros densos consumíveis por modelos, e de volta. O ciclo de vida
//! tem duas fases explícitas:
//!
//! 1. **Construção** (`Building`): uma única passada sequencial pelo corpus
//!    chama [`Vocabulary::add`]; os ids são atribuídos na ordem da primeira
//!    ocorrência, começando em 0 (ou após os slots reservados).
//! 2. **Congelado** (`Frozen`): a transição é unidirecional e idempotente;
//!    depois dela `add` falha e só leituras ocorrem.
//!
//! O congelamento antes da primeira extração é um invariante de corretude:
//! os ids precisam ser estáveis ao longo de uma passada completa do corpus
//! para que treino e predição sejam reprodutíveis.
//!
//! ## Slots reservados
//!
//! Opcionalmente o vocabulário reserva o id 0 para *padding* e o id seguinte
//! para *desconhecido* (unknown). Slots reservados não correspondem a nenhum
//! elemento do corpus: `id2element` neles falha com `UnknownId`, e o id de
//! desconhecido é devolvido por `element2id` para elementos nunca vistos.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Estado do ciclo de vida do vocabulário. Transição única: `Building → Frozen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabState {
    /// Aceitando novos elementos via `add`.
    Building,
    /// Imutável; apenas consultas.
    Frozen,
}

/// Mapeamento bijetivo entre elementos e ids densos, com fase de construção.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary<T: Eq + Hash + Clone> {
    element2id: HashMap<T, usize>,
    /// Elementos na ordem de primeira ocorrência; o elemento de id `i` fica
    /// em `elements[i - reserved]`.
    elements: Vec<T>,
    state: VocabState,
    /// Quantidade de slots reservados no início do espaço de ids.
    reserved: usize,
    pad_id: Option<usize>,
    unk_id: Option<usize>,
}

impl<T: Eq + Hash + Clone + Debug> Vocabulary<T> {
    /// Vocabulário sem slots reservados; ids começam em 0.
    pub fn new() -> Self {
        Self::with_specials(false, false)
    }

    /// Vocabulário com slots reservados opcionais.
    ///
    /// Com ambos habilitados, padding recebe o id 0 e desconhecido o id 1,
    /// e os elementos do corpus começam no id 2.
    pub fn with_specials(use_pad: bool, use_unk: bool) -> Self {
        let mut reserved = 0;
        let pad_id = use_pad.then(|| {
            reserved += 1;
            reserved - 1
        });
        let unk_id = use_unk.then(|| {
            reserved += 1;
            reserved - 1
        });
        Self {
            element2id: HashMap::new(),
            elements: Vec::new(),
            state: VocabState::Building,
            reserved,
            pad_id,
            unk_id,
        }
    }

    /// Registra um elemento e devolve seu id (novo ou pré-existente).
    ///
    /// Falha com [`ExtractError::VocabFrozen`] após o congelamento.
    pub fn add(&mut self, element: T) -> Result<usize> {
        if self.state == VocabState::Frozen {
            return Err(ExtractError::VocabFrozen(format!("{element:?}")));
        }
        if let Some(&id) = self.element2id.get(&element) {
            return Ok(id);
        }
        let id = self.reserved + self.elements.len();
        self.elements.push(element.clone());
        self.element2id.insert(element, id);
        Ok(id)
    }

    /// Id de um elemento já visto; para elementos desconhecidos devolve o
    /// slot de desconhecido se houver, senão falha com
    /// [`ExtractError::UnknownElement`].
    pub fn element2id(&self, element: &T) -> Result<usize> {
        if let Some(&id) = self.element2id.get(element) {
            return Ok(id);
        }
        self.unk_id
            .ok_or_else(|| ExtractError::UnknownElement(format!("{element:?}")))
    }

    /// Elemento de um id; falha com [`ExtractError::UnknownId`] para ids
    /// fora do intervalo ou slots reservados.
    pub fn id2element(&self, id: usize) -> Result<&T> {
        id.checked_sub(self.reserved)
            .and_then(|i| self.elements.get(i))
            .ok_or(ExtractError::UnknownId(id))
    }

    /// Congela o vocabulário. Idempotente; não há caminho de volta.
    pub fn freeze(&mut self) {
        self.state = VocabState::Frozen;
    }

    /// Verifica se o vocabulário já foi congelado.
    pub fn is_frozen(&self) -> bool {
        self.state == VocabState::Frozen
    }

    /// Tamanho total do espaço de ids (slots reservados inclusos).
    pub fn len(&self) -> usize {
        self.reserved + self.elements.len()
    }

    /// Verifica se nenhum elemento do corpus foi registrado ainda.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Id do slot de padding, se reservado.
    pub fn pad_id(&self) -> Option<usize> {
        self.pad_id
    }

    /// Id do slot de desconhecido, se reservado.
    pub fn unk_id(&self) -> Option<usize> {
        self.unk_id
    }
}

impl<T: Eq + Hash + Clone + Debug> Default for Vocabulary<T> {
    fn default() -> Self {
        Self::new()
    }
}

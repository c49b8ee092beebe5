//! # AnnotationStore — Contêiner de Anotações por Unidade de Texto
//!
//! Guarda o texto original de uma unidade (tipicamente um documento) e todas
//! as suas anotações, respondendo à consulta central do subsistema:
//! *"todas as anotações do tipo T cujo span está contido no span de A"*,
//! em ordem de início de span (empate por fim crescente, depois ordem de
//! inserção).
//!
//! ## Índice por tipo
//!
//! A relação escopo/entrada é recomputada a cada consulta — não há grafo
//! persistente de pais/filhos para invalidar. Para evitar varreduras
//! quadráticas do corpus, o store mantém um índice por tipo ordenado por
//! `(begin, end, inserção)`; a consulta faz busca binária pelo primeiro
//! início possível e varre até sair do span do contêiner.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, AnnotationKind};
use crate::span::Span;

/// Contêiner de texto + anotações com consultas de continência.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationStore {
    /// O texto original da unidade.
    text: String,
    /// Todas as anotações, na ordem de inserção.
    annotations: Vec<Annotation>,
    /// Índice por tipo: posições em `annotations`, ordenadas por span.
    index: HashMap<AnnotationKind, Vec<usize>>,
}

impl AnnotationStore {
    /// Cria um store vazio sobre o texto dado.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// O texto original completo.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Número total de anotações registradas.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Verifica se o store não possui anotações.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Registra uma anotação, mantendo o índice do seu tipo ordenado.
    ///
    /// A posição de inserção é *após* todos os spans iguais, preservando a
    /// ordem de registro como último critério de desempate das consultas.
    pub fn add(&mut self, annotation: Annotation) {
        let kind = annotation.kind;
        let span = annotation.span;
        let pos = self.annotations.len();
        self.annotations.push(annotation);

        let ids = self.index.entry(kind).or_default();
        let at = ids.partition_point(|&i| self.annotations[i].span <= span);
        ids.insert(at, pos);
    }

    /// Todas as anotações de um tipo, em ordem de span.
    pub fn all_of(&self, kind: AnnotationKind) -> Vec<&Annotation> {
        self.index
            .get(&kind)
            .map(|ids| ids.iter().map(|&i| &self.annotations[i]).collect())
            .unwrap_or_default()
    }

    /// Consulta de continência: anotações do tipo `kind` cujo span está
    /// contido em `container`, em ordem `(begin, end, inserção)`.
    ///
    /// Busca binária pelo primeiro início `>= container.begin`; a varredura
    /// para assim que os inícios ultrapassam `container.end` (o índice está
    /// ordenado por início). Entradas que começam dentro mas terminam fora
    /// são filtradas.
    pub fn entries_in(&self, container: &Span, kind: AnnotationKind) -> Vec<&Annotation> {
        let Some(ids) = self.index.get(&kind) else {
            return Vec::new();
        };
        let start = ids.partition_point(|&i| self.annotations[i].span.begin < container.begin);
        ids[start..]
            .iter()
            .map(|&i| &self.annotations[i])
            .take_while(|a| a.span.begin <= container.end)
            .filter(|a| a.span.end <= container.end)
            .collect()
    }

    /// Texto endereçado por um span.
    ///
    /// Spans fora do texto (ou que cortam um caractere multi-byte) devolvem
    /// a string vazia: as anotações devem ter sido criadas sobre o texto
    /// deste store.
    pub fn text_of(&self, span: &Span) -> &str {
        self.text.get(span.begin..span.end).unwrap_or("")
    }
}

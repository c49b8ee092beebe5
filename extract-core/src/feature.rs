//! # Feature — Contêiner de Saída dos Extratores
//!
//! Guarda as sequências de ids produzidas pela extração, junto com metadados
//! de forma suficientes para reconstruir o aninhamento original. A camada de
//! batching do modelo consome a visão "desenrolada" (`unroll`) para aplicar
//! padding retangular sem perder as fronteiras originais das entradas.
//!
//! Profundidades:
//! - **1**: sequência plana (ids de palavras, ids de tags), uma posição por
//!   entrada do escopo.
//! - **2**: sequência de sequências (ids de caracteres por token), um grupo
//!   por entrada.
//!
//! Uma `Feature` é imutável após a construção e pertence exclusivamente a
//! quem pediu a extração.

use serde::{Deserialize, Serialize};

/// Sequência de ids, possivelmente aninhada, com metadados de forma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Os ids em formato plano, na ordem das entradas.
    data: Vec<usize>,
    /// Comprimento de cada segmento de `data` (um segmento por entrada na
    /// profundidade 2; um único segmento na profundidade 1).
    lengths: Vec<usize>,
    /// Profundidade do aninhamento (1 ou 2).
    depth: usize,
}

impl Feature {
    /// Feature plana (profundidade 1): um id por entrada.
    pub fn flat(data: Vec<usize>) -> Self {
        let lengths = vec![data.len()];
        Self {
            data,
            lengths,
            depth: 1,
        }
    }

    /// Feature aninhada (profundidade 2): um grupo de ids por entrada.
    ///
    /// Grupos vazios são legais (entradas de comprimento zero).
    pub fn nested(groups: Vec<Vec<usize>>) -> Self {
        let lengths: Vec<usize> = groups.iter().map(Vec::len).collect();
        let data: Vec<usize> = groups.into_iter().flatten().collect();
        Self {
            data,
            lengths,
            depth: 2,
        }
    }

    /// Visão plana dos ids.
    pub fn data(&self) -> &[usize] {
        &self.data
    }

    /// Profundidade do aninhamento (1 ou 2).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Número de entradas representadas.
    pub fn num_entries(&self) -> usize {
        match self.depth {
            1 => self.data.len(),
            _ => self.lengths.len(),
        }
    }

    /// Verifica se a feature não contém nenhuma entrada.
    pub fn is_empty(&self) -> bool {
        self.num_entries() == 0
    }

    /// Reconstrói o aninhamento original: `(grupos, comprimentos)`.
    ///
    /// Cada grupo corresponde a um segmento de `data` na ordem original; os
    /// comprimentos permitem à camada de batching re-aplicar padding
    /// retangular preservando as fronteiras das entradas.
    pub fn unroll(&self) -> (Vec<Vec<usize>>, Vec<usize>) {
        let mut groups = Vec::with_capacity(self.lengths.len());
        let mut offset = 0;
        for &len in &self.lengths {
            groups.push(self.data[offset..offset + len].to_vec());
            offset += len;
        }
        (groups, self.lengths.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_feature() {
        let feat = Feature::flat(vec![3, 1, 4, 1]);
        assert_eq!(feat.depth(), 1);
        assert_eq!(feat.num_entries(), 4);
        assert_eq!(feat.data(), &[3, 1, 4, 1]);
        let (groups, lengths) = feat.unroll();
        assert_eq!(groups, vec![vec![3, 1, 4, 1]]);
        assert_eq!(lengths, vec![4]);
    }

    #[test]
    fn test_nested_unroll_preserves_boundaries() {
        let groups = vec![vec![0, 1], vec![2], vec![], vec![3, 4, 5]];
        let feat = Feature::nested(groups.clone());
        assert_eq!(feat.depth(), 2);
        assert_eq!(feat.num_entries(), 4);
        assert_eq!(feat.data(), &[0, 1, 2, 3, 4, 5]);

        let (unrolled, lengths) = feat.unroll();
        assert_eq!(unrolled, groups);
        assert_eq!(lengths, vec![2, 1, 0, 3]);
    }

    #[test]
    fn test_empty_feature() {
        let flat = Feature::flat(vec![]);
        assert!(flat.is_empty());
        let nested = Feature::nested(vec![]);
        assert!(nested.is_empty());
        assert_eq!(nested.unroll().0.len(), 0);
    }
}

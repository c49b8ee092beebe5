//! # Span — Intervalo de Texto
//!
//! O `Span` é a primitiva de endereçamento de todo o sistema de anotações:
//! um intervalo semiaberto `[begin, end)` de bytes sobre o texto original.
//! Sentenças, tokens e menções de entidade são todos localizados por spans,
//! e a relação estrutural entre eles (qual token pertence a qual sentença)
//! é definida exclusivamente por **continência de spans**, nunca por
//! ponteiros explícitos de pai/filho.

use serde::{Deserialize, Serialize};

/// Intervalo semiaberto `[begin, end)` de bytes no texto original.
///
/// # Invariantes
/// - `begin <= end` sempre.
/// - Spans de comprimento zero (`begin == end`) são legais e representam
///   anotações vazias.
///
/// A ordem derivada (`Ord`) compara `(begin, end)` lexicograficamente, que é
/// exatamente a ordem das consultas de continência: início crescente, com
/// empate resolvido por fim crescente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Índice de byte inicial (inclusivo).
    pub begin: usize,
    /// Índice de byte final (exclusivo).
    pub end: usize,
}

impl Span {
    /// Cria um span `[begin, end)`.
    ///
    /// # Panics
    /// Em builds de debug, falha se `begin > end` (violação de invariante
    /// de construção, sempre um erro de programação do chamador).
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "span invertido: [{begin}, {end})");
        Self { begin, end }
    }

    /// Comprimento do intervalo em bytes.
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Verifica se o span é vazio (`begin == end`).
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Testa se `other` está contido neste span.
    ///
    /// A continência é inclusiva nas duas bordas:
    /// `self.begin <= other.begin && other.end <= self.end`.
    /// Esta é a única relação estrutural entre escopos (ex: sentença) e
    /// entradas (ex: token, menção de entidade).
    pub fn contains(&self, other: &Span) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }
}

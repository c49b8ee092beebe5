//! # Erros do Subsistema de Extração
//!
//! Todas as falhas são locais e síncronas, sinalizadas no ponto do uso
//! indevido — nada é re-tentado internamente, porque uso indevido é erro de
//! programação do chamador, não falha transitória. Não existe modo de falha
//! parcial: a extração de uma instância de escopo completa ou falha inteira.

use thiserror::Error;

/// Alias de resultado para as operações do crate.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Taxonomia de erros da extração de features.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// `add` chamado em um vocabulário já congelado.
    #[error("vocabulário congelado: não é possível adicionar {0}")]
    VocabFrozen(String),

    /// `extract` chamado antes do vocabulário ser construído e congelado.
    #[error("vocabulário não construído: chame update_vocab e congele antes de extrair")]
    VocabNotBuilt,

    /// Id fora do intervalo do vocabulário (ou slot reservado sem elemento).
    #[error("id {0} fora do intervalo do vocabulário")]
    UnknownId(usize),

    /// Elemento nunca visto e sem slot de desconhecido reservado.
    #[error("elemento desconhecido no vocabulário: {0}")]
    UnknownElement(String),

    /// Configuração de extrator com chave obrigatória ausente ou inválida.
    #[error("configuração inválida do extrator: {0}")]
    Config(String),

    /// Valor de `strategy` não suportado.
    #[error("estratégia de tagging não suportada: {0:?}")]
    UnsupportedStrategy(String),
}

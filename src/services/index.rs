//! Symbol index
//!
//! Read-only snapshot built once per compilation: an arena of declaration
//! pieces plus a symbol-to-piece-range mapping. Each symbol's pieces are
//! stored contiguously in (file, offset) order.

use std::collections::HashMap;

use crate::error::ResolveError;
use crate::models::{DeclarationPiece, DeclarationRole, Symbol, SymbolId, SymbolKind};
use crate::services::doc_id::parameter_signature;

#[derive(Debug, Default)]
pub struct SymbolIndex {
    symbols: Vec<Symbol>,
    pieces: Vec<DeclarationPiece>,
}

impl SymbolIndex {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (SymbolId(i as u32), symbol))
    }

    /// Members declared directly in a type, in index order
    pub fn members_of(&self, container: SymbolId) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.iter()
            .filter(move |(_, symbol)| symbol.container == Some(container))
    }

    /// Declaration pieces of a symbol in (file, offset) order.
    ///
    /// A live symbol always has at least one piece; zero pieces is an
    /// invariant violation reported as [`ResolveError::SymbolHasNoDeclarations`].
    pub fn collect(&self, id: SymbolId) -> Result<&[DeclarationPiece], ResolveError> {
        let symbol = self
            .symbol(id)
            .ok_or(ResolveError::UnknownSymbol(id.index()))?;
        let pieces = self.pieces.get(symbol.pieces.clone()).unwrap_or_default();
        if pieces.is_empty() {
            return Err(ResolveError::SymbolHasNoDeclarations {
                symbol: symbol.name.clone(),
            });
        }
        Ok(pieces)
    }
}

/// Identity used to group declarations into symbols
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SymbolKey {
    Type {
        container: Option<SymbolId>,
        namespace: Option<String>,
        name: String,
        arity: usize,
    },
    Member {
        container: SymbolId,
        kind: SymbolKind,
        name: String,
        arity: usize,
        /// Parameter types in documentation ID encoding
        parameters: String,
    },
}

#[derive(Debug)]
struct PendingSymbol {
    symbol: Symbol,
    pieces: Vec<DeclarationPiece>,
}

/// Accumulates declarations while syntax trees are walked
#[derive(Debug, Default)]
pub(crate) struct SymbolIndexBuilder {
    symbols: Vec<PendingSymbol>,
    by_key: HashMap<SymbolKey, SymbolId>,
}

impl SymbolIndexBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn key(&self, symbol: &Symbol) -> SymbolKey {
        match symbol.container {
            Some(container) if !symbol.kind.is_type() => SymbolKey::Member {
                container,
                kind: symbol.kind,
                name: symbol.name.clone(),
                arity: symbol.arity(),
                parameters: parameter_signature(
                    &symbol.parameters,
                    self.outer_type_parameters(container),
                    &symbol.type_parameters,
                ),
            },
            container => SymbolKey::Type {
                container,
                namespace: symbol.namespace.clone(),
                name: symbol.name.clone(),
                arity: symbol.arity(),
            },
        }
    }

    /// Type parameters of a type and its containing types, outermost first
    fn outer_type_parameters(&self, id: SymbolId) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(pending) = current.and_then(|id| self.symbols.get(id.index())) {
            chain.push(&pending.symbol.type_parameters);
            current = pending.symbol.container;
        }
        chain.into_iter().rev().flatten().cloned().collect()
    }

    /// Register a symbol with no pieces yet
    pub(crate) fn declare(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        let key = self.key(&symbol);
        self.by_key.insert(key, id);
        self.symbols.push(PendingSymbol {
            symbol,
            pieces: Vec::new(),
        });
        id
    }

    /// Add one declaration of a symbol.
    ///
    /// Returns the symbol the piece was attached to, or `None` when the
    /// declaration conflicts with an earlier one and was skipped.
    pub(crate) fn add(&mut self, symbol: Symbol, piece: DeclarationPiece) -> Option<SymbolId> {
        let key = self.key(&symbol);
        let Some(&existing) = self.by_key.get(&key) else {
            let id = self.declare(symbol);
            self.symbols[id.index()].pieces.push(piece);
            return Some(id);
        };

        let pending = &mut self.symbols[existing.index()];
        if !(pending.symbol.is_partial && symbol.is_partial) {
            tracing::warn!(
                "Skipping duplicate declaration of {} '{}' at {}:{}",
                symbol.kind,
                symbol.name,
                piece.position.line + 1,
                piece.position.column + 1
            );
            return None;
        }

        let role_taken = matches!(
            piece.role,
            DeclarationRole::Defining | DeclarationRole::Implementing
        ) && pending.pieces.iter().any(|p| p.role == piece.role);
        if role_taken {
            tracing::warn!(
                "Skipping second {} declaration of partial method '{}'",
                piece.role,
                symbol.name
            );
            return None;
        }

        pending.pieces.push(piece);
        Some(existing)
    }

    pub(crate) fn build(self) -> SymbolIndex {
        let mut symbols = Vec::with_capacity(self.symbols.len());
        let mut pieces = Vec::new();

        for PendingSymbol {
            mut symbol,
            pieces: mut own,
        } in self.symbols
        {
            own.sort_by_key(|piece| piece.position);
            let start = pieces.len();
            pieces.extend(own);
            symbol.pieces = start..pieces.len();
            symbols.push(symbol);
        }

        tracing::debug!(
            "Built symbol index: {} symbols, {} declaration pieces",
            symbols.len(),
            pieces.len()
        );
        SymbolIndex { symbols, pieces }
    }
}

//! Algorithm registry and the inclusion/exclusion policy
//!
//! The registry is built fresh once per invocation from the caller's
//! criteria, is immutable afterwards, and dies with the invocation. Names
//! are always canonical upper-case; registration order is preserved because
//! the engine reports digests in that order.

use crate::digest::{
    DigesterFactory, LengthDigester, register_checksums, register_contributed, register_git,
    register_standard,
};

/// Case-insensitive name-fragment filter controlling which algorithms are
/// active.
///
/// An algorithm is accepted iff its name contains at least one include
/// fragment (or no includes were given) and contains no exclude fragment.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl Criteria {
    /// Build criteria from raw fragments; fragments are upper-cased here so
    /// matching is case-insensitive for the caller.
    pub fn new<I, S>(includes: I, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            includes: includes
                .into_iter()
                .map(|f| f.as_ref().to_uppercase())
                .collect(),
            excludes: excludes
                .into_iter()
                .map(|f| f.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// Pure acceptance test; idempotent and independent of registration
    /// order.
    pub fn accepts(&self, algo: &str) -> bool {
        let included =
            self.includes.is_empty() || self.includes.iter().any(|f| algo.contains(f.as_str()));
        let excluded =
            !self.excludes.is_empty() && self.excludes.iter().any(|f| algo.contains(f.as_str()));
        included && !excluded
    }
}

/// Ordered mapping from canonical algorithm name to digester factory.
pub struct DigesterRegistry {
    criteria: Criteria,
    entries: Vec<(String, DigesterFactory)>,
}

fn is_canonical(algo: &str) -> bool {
    !algo.is_empty() && !algo.chars().any(|c| c.is_ascii_lowercase())
}

impl DigesterRegistry {
    /// Run every registration pass in its fixed priority order: LENGTH,
    /// general-purpose digests, contributed digests, git object digests,
    /// and (optionally) the checksum table. Earlier passes own their names;
    /// later passes never overwrite them.
    pub fn collect(criteria: Criteria, include_checksums: bool) -> Self {
        let mut registry = Self {
            criteria,
            entries: Vec::new(),
        };

        registry.register_if_accepted(
            "LENGTH",
            Box::new(|declared_len| -> Box<dyn crate::digest::Digester> {
                Box::new(LengthDigester::new(declared_len))
            }),
        );
        register_standard(&mut registry);
        register_contributed(&mut registry);
        register_git(&mut registry);
        if include_checksums {
            register_checksums(&mut registry);
        }

        debug_assert!(registry.names().all(is_canonical));
        registry
    }

    /// Pure acceptance test for `algo` against the criteria.
    ///
    /// Sources whose factory construction is non-trivial (the checksum
    /// table) consult this before building anything.
    pub fn is_accepted(&self, algo: &str) -> bool {
        assert!(is_canonical(algo), "algorithm name not upper-case: {algo}");
        self.criteria.accepts(algo)
    }

    /// Register `factory` under `algo` if the criteria accept it and no
    /// earlier pass claimed the name. Panics on a non-canonical name.
    pub fn register_if_accepted(&mut self, algo: &str, factory: DigesterFactory) {
        assert!(is_canonical(algo), "algorithm name not upper-case: {algo}");
        if self.contains(algo) || !self.criteria.accepts(algo) {
            return;
        }
        self.entries.push((algo.to_string(), factory));
    }

    pub fn contains(&self, algo: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == algo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DigesterFactory)> {
        self.entries
            .iter()
            .map(|(name, factory)| (name.as_str(), factory))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

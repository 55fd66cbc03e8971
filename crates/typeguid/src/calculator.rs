// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! GUID calculator: entry point of the crate.

use crate::canon::Canonicalizer;
use crate::config::{GuidConfig, GUID_LEN};
use crate::descriptor::{Describe, TypeRef, TypeRegistry};
use crate::error::Result;
use crate::guid::Guid;
use sha2::{Digest, Sha256};

/// Computes GUIDs for nodes of one registry.
///
/// Each call owns a fresh SHA-256 state and a fresh visited set, so a
/// calculator can be shared and used from several threads at once.
#[derive(Debug, Clone, Copy)]
pub struct GuidCalculator<'r> {
    registry: &'r TypeRegistry,
    config: GuidConfig,
}

impl<'r> GuidCalculator<'r> {
    /// Calculator producing the published digest family.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_config(registry, GuidConfig::default())
    }

    pub fn with_config(registry: &'r TypeRegistry, config: GuidConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &GuidConfig {
        &self.config
    }

    /// SHA-256 of the canonical token stream of `root`.
    ///
    /// # Errors
    ///
    /// Fails if the graph reaches an unsupported kind or an incomplete node.
    /// No digest is produced in that case.
    pub fn calculate(&self, root: TypeRef) -> Result<Guid> {
        let mut canon = Canonicalizer::new(self.registry, self.config, Sha256::new());
        canon.recurse_type(root)?;
        let count = canon.token_count();
        let hash = canon.into_sink().finalize();

        let mut bytes = [0u8; GUID_LEN];
        bytes.copy_from_slice(&hash);
        let guid = Guid::from_bytes(bytes);

        log::debug!(
            "[GuidCalculator] {} {:?}: {} tokens -> {}",
            self.registry.get(root).kind(),
            self.registry.get(root).name(),
            count,
            guid
        );
        Ok(guid)
    }

    /// The canonical token stream of `root`, without delimiters.
    ///
    /// Two parties whose GUIDs disagree can diff these to find the
    /// diverging member.
    pub fn canonical_tokens(&self, root: TypeRef) -> Result<Vec<String>> {
        let mut canon = Canonicalizer::new(self.registry, self.config, Vec::new());
        canon.recurse_type(root)?;
        Ok(canon.into_sink())
    }
}

/// GUID of `T` with the default configuration.
///
/// ```ignore
/// #[typeguid::interface]
/// trait Sensor {
///     fn read(&self, channel: u8) -> f64;
/// }
///
/// let guid = typeguid::calculate::<dyn Sensor>()?;
/// println!("{guid}");
/// ```
pub fn calculate<T: Describe + ?Sized>() -> Result<Guid> {
    calculate_with::<T>(GuidConfig::default())
}

/// GUID of `T` with an explicit configuration.
pub fn calculate_with<T: Describe + ?Sized>(config: GuidConfig) -> Result<Guid> {
    let mut registry = TypeRegistry::new();
    let root = registry.describe::<T>();
    GuidCalculator::with_config(&registry, config).calculate(root)
}

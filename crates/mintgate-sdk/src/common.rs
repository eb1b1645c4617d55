use mintgate_core::schema::config::HashScheme;

/// Common configuration for building an allowlist.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonConfig {
    /// Hash function for leaves and nodes.
    pub hash_scheme: HashScheme,
    /// Allowlist epoch recorded in the published configuration.
    pub epoch: u64,
}

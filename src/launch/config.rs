//! Configuration for einsum execution.

/// Strategy for evaluating a matrix chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainStrategy {
    /// Plan the cheapest parenthesization before multiplying.
    #[default]
    Optimize,
    /// Multiply left to right without planning.
    LeftFold,
}

/// Configuration options for einsum execution.
#[derive(Debug, Clone)]
pub struct EinsumConfig {
    /// Whether to reuse compiled kernels across calls with equivalent
    /// notations. Only effective with the `std` feature; without it every
    /// call recompiles.
    pub cache_kernels: bool,
    /// Strategy for `matmul_chain`.
    pub chain_strategy: ChainStrategy,
}

impl Default for EinsumConfig {
    fn default() -> Self {
        Self {
            cache_kernels: true,
            chain_strategy: ChainStrategy::Optimize,
        }
    }
}

impl EinsumConfig {
    /// Creates a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the kernel cache.
    pub fn with_kernel_cache(mut self, enabled: bool) -> Self {
        self.cache_kernels = enabled;
        self
    }

    /// Sets the chain evaluation strategy.
    pub fn with_chain_strategy(mut self, strategy: ChainStrategy) -> Self {
        self.chain_strategy = strategy;
        self
    }
}

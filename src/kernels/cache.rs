//! Process-wide cache of compiled kernels.
//!
//! Keyed by the normalized notation, so notations that differ only in
//! label spelling resolve to one shared kernel. The table is populated on
//! first use and read-mostly afterwards.

use alloc::sync::Arc;
use std::sync::{Mutex, OnceLock};

use hashbrown::HashMap;

use super::compiler::CompiledKernel;
use crate::notation::NormalizedNotation;

static KERNELS: OnceLock<Mutex<HashMap<NormalizedNotation, Arc<CompiledKernel>>>> =
    OnceLock::new();

/// Returns the compiled kernel for a notation, building it on first use.
pub fn kernel_for(notation: &NormalizedNotation) -> Arc<CompiledKernel> {
    let cache = KERNELS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut table = match cache.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(kernel) = table.get(notation) {
        return kernel.clone();
    }
    let kernel = Arc::new(CompiledKernel::compile(notation.clone()));
    table.insert(notation.clone(), kernel.clone());
    kernel
}

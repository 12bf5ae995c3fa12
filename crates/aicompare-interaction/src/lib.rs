//! Backend implementations of [`aicompare_core::ComparisonApi`].

pub mod http_api;
pub mod simulated;

use std::sync::Arc;

use aicompare_core::{ComparisonApi, Result};
use aicompare_infrastructure::ClientConfig;

pub use http_api::HttpComparisonApi;
pub use simulated::SimulatedComparisonApi;

/// Builds the backend selected by `config`.
pub fn backend_from_config(config: &ClientConfig) -> Result<Arc<dyn ComparisonApi>> {
    if config.offline {
        tracing::info!("Using simulated answers (offline mode)");
        return Ok(Arc::new(
            SimulatedComparisonApi::new().with_latency(config.simulated_latency()),
        ));
    }

    tracing::info!(base_url = %config.base_url, "Using HTTP backend");
    Ok(Arc::new(HttpComparisonApi::from_config(config)?))
}

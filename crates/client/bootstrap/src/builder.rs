//! Builds the gateway and runtime bundle used by front-ends.
use std::sync::Arc;

use anyhow::{Context, Result};
use client_gateway_core::Gateway;
use client_gateway_http::HttpGateway;
use runtime::Runtime;

use crate::config::ClientConfig;

/// Builder that assembles the gateway, runtime and configuration for clients.
pub struct RuntimeBuilder {
    config: ClientConfig,
    gateway: Option<Arc<dyn Gateway>>,
}

impl RuntimeBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            gateway: None,
        }
    }

    /// Provide a custom gateway instead of the HTTP one built from config.
    pub fn gateway(mut self, gateway: Arc<dyn Gateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<RuntimeSetup> {
        let gateway = match self.gateway {
            Some(gateway) => gateway,
            None => {
                self.config
                    .gateway
                    .validate()
                    .context("gateway configuration rejected")?;
                Arc::new(HttpGateway::new(self.config.gateway.clone())) as Arc<dyn Gateway>
            }
        };

        tracing::info!(
            gateway = gateway.name(),
            endpoint = gateway.endpoint(),
            "Bootstrapping runtime"
        );

        let runtime = Runtime::builder()
            .config(self.config.runtime.clone())
            .gateway(Arc::clone(&gateway))
            .build()
            .context("failed to build runtime")?;

        Ok(RuntimeSetup {
            config: self.config,
            gateway,
            runtime,
        })
    }
}

pub struct RuntimeSetup {
    pub config: ClientConfig,
    pub gateway: Arc<dyn Gateway>,
    pub runtime: Runtime,
}

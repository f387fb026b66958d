use crate::{
    registry::{ClusterHandle, ClusterRegistry},
    server,
};
use anyhow::Result;
use clap::Parser;
use gateway_console_k8s_index::KubeInventory;
use kube::{
    config::{Config, KubeConfigOptions},
    Client,
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[clap(
    name = "gateway-console",
    about = "A read-only console for Gateway API resources"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "gateway_console=info,warn",
        env = "GATEWAY_CONSOLE_LOG"
    )]
    log_level: String,

    #[clap(long, default_value = "0.0.0.0:8080")]
    listen_addr: SocketAddr,

    /// Kubeconfig context to serve, as `name` or `name=region`. May be
    /// repeated; the first context becomes the default cluster. When absent,
    /// the ambient (in-cluster or current kubeconfig) context is served as a
    /// single cluster named `default`.
    #[clap(long = "cluster-context")]
    cluster_contexts: Vec<ClusterContext>,
}

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            log_level,
            listen_addr,
            cluster_contexts,
        } = self;

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(&log_level))
            .with(tracing_subscriber::fmt::layer())
            .init();

        let registry = if cluster_contexts.is_empty() {
            let client = Client::try_default().await?;
            ClusterRegistry::new(vec![ClusterHandle {
                name: "default".to_string(),
                region: String::new(),
                inventory: Arc::new(KubeInventory::new(client)),
            }])
        } else {
            let mut clusters = Vec::with_capacity(cluster_contexts.len());
            for context in cluster_contexts {
                let options = KubeConfigOptions {
                    context: Some(context.name.clone()),
                    ..Default::default()
                };
                let config = Config::from_kubeconfig(&options).await?;
                let client = Client::try_from(config)?;
                clusters.push(ClusterHandle {
                    name: context.name,
                    region: context.region,
                    inventory: Arc::new(KubeInventory::new(client)),
                });
            }
            ClusterRegistry::new(clusters)
        };

        let app = server::app(Arc::new(registry));
        let listener = tokio::net::TcpListener::bind(listen_addr).await?;
        info!(%listen_addr, "serving");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct ClusterContext {
    name: String,
    region: String,
}

impl FromStr for ClusterContext {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((name, region)) if !name.is_empty() => Ok(Self {
                name: name.to_string(),
                region: region.to_string(),
            }),
            None if !s.is_empty() => Ok(Self {
                name: s.to_string(),
                region: String::new(),
            }),
            _ => anyhow::bail!("cluster context must be `name` or `name=region`"),
        }
    }
}

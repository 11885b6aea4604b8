// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use xpcrawl::config::settings::Settings;
use xpcrawl::presentation::routes;
use xpcrawl::utils::telemetry;
use xpcrawl::{CrawlService, Crawler};

#[derive(Parser)]
#[command(
    name = "xpcrawld",
    about = "HTTP daemon executing declarative XPath crawl jobs",
    version
)]
struct Cli {
    /// Host to bind to (overrides server.host).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides server.port).
    #[arg(long)]
    port: Option<u16>,

    /// Per-request timeout in seconds (overrides crawler.timeout_secs).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

/// 主函数
///
/// 加载配置、创建爬取服务并启动HTTP服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    telemetry::init_telemetry(cli.json_logs);
    info!("Starting xpcrawld...");

    // 2. Load configuration, flags win over files and environment
    let mut settings = Settings::new()?;
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        settings.crawler.timeout_secs = timeout_secs;
    }
    info!("Configuration loaded: {:?}", settings);

    // 3. Build the crawler
    let crawler: Arc<dyn Crawler> = Arc::new(CrawlService::new(settings.crawler_options())?);

    // 4. Start HTTP server
    let app = routes::routes(crawler);
    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

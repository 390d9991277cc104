use skillrun_config::SkillrunConfig;
use tracing::info;

pub(super) async fn cmd_serve(config: SkillrunConfig) -> skillrun_core::Result<()> {
    info!("starting tool-protocol server");
    skillrun_mcp::serve_stdio(config).await
}

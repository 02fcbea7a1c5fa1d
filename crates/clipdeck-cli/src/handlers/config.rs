use crate::output;
use clipdeck_core::EngineConfig;

pub fn handle(config: &EngineConfig) -> anyhow::Result<()> {
    output::output_success(config)
}

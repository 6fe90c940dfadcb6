use crate::output::print_json;
use anyhow::Context;
use ghchecks_core::config::AppConfig;
use ghchecks_core::env::DeployEnv;
use ghchecks_core::stack::LambdaStack;
use ghchecks_core::io;
use std::path::Path;

pub fn run(
    config_path: &Path,
    out: &Path,
    account: Option<String>,
    region: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let env = DeployEnv::from_vars(account, region)?;
    tracing::debug!(account = %env.account, region = %env.region, "resolved deployment target");

    let config = AppConfig::load(config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    // Hard stop on config errors; warnings alone don't block a synth.
    let errors: Vec<_> = config
        .validate()
        .into_iter()
        .filter(|w| w.level == ghchecks_core::config::WarnLevel::Error)
        .collect();
    if let Some(first) = errors.first() {
        anyhow::bail!("invalid config: {}", first.message);
    }

    let stack = LambdaStack::new(env, &config)?;
    let template = stack.synth()?;
    let rendered = template.to_json()?;

    let resource_count = template.resources.len();
    if out == Path::new("-") {
        println!("{rendered}");
        return Ok(());
    }
    io::atomic_write(out, rendered.as_bytes())
        .with_context(|| format!("failed to write {}", out.display()))?;

    if json {
        print_json(&serde_json::json!({
            "out": out,
            "resources": resource_count,
        }))?;
    } else {
        println!("Wrote {} ({resource_count} resources).", out.display());
    }
    Ok(())
}

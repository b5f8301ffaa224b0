use battle_assistant::messages::Locale;
use battle_assistant::{run, CliOptions, OutputFormat};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: battle-assistant [--battle battle.json] [--party party.json] [--session] \
[--config weights.json] [--locale pt|en] [--format text|json]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut battle_path = PathBuf::from("battle.json");
    let mut party_path = PathBuf::from("party.json");
    let mut session = false;
    let mut config_path = None;
    let mut locale = None;
    let mut format = OutputFormat::Text;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--battle" => {
                battle_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--battle requires a path (e.g. --battle battle.json)")
                })?;
            }
            "--party" => {
                party_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--party requires a path (e.g. --party party.json)")
                })?;
            }
            "--session" => session = true,
            "--config" => {
                config_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--config requires a path (e.g. --config weights.json)")
                })?);
            }
            "--locale" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--locale requires pt or en"))?;
                locale = Some(val.parse::<Locale>()?);
            }
            "--format" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--format requires text or json"))?;
                format = match val.to_ascii_lowercase().as_str() {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    other => anyhow::bail!("Unknown format {other} (use text or json)"),
                };
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        battle_path,
        party_path,
        session,
        config_path,
        locale,
        format,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let opts = parse_args()?;
    run(opts)
}

// nativecli - commands/config.rs
//
// `nativecli config [key] [value] [--global]`:
//   no key      print the whole configuration as JSON
//   init        create the file with defaults
//   key         print one value
//   key value   set and save
//
// Without --global, reads show the global file merged with the project's
// (project keys win); writes only touch the project file.

use super::Context;
use crate::platform::config::{CompiledConfig, UserConfig};
use crate::util::error::{ConfigError, Result};
use clap::Args;
use serde_json::Value;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// The configuration key (dotted, e.g. updates.check), or `init`
    key: Option<String>,

    /// The configuration value
    value: Option<String>,

    /// Use the global configuration instead of the project's
    #[arg(short = 'g', long)]
    global: bool,
}

pub fn run(ctx: &Context, args: ConfigArgs) -> Result<()> {
    let mut config = if args.global {
        UserConfig::global(ctx.paths.as_ref())?
    } else {
        UserConfig::local(&ctx.project_dir)?
    };

    if args.key.as_deref() == Some("init") {
        config.init()?;
        println!("Configuration file created.");
        return Ok(());
    }

    if let (Some(key), Some(value)) = (args.key.as_deref(), args.value.as_deref()) {
        config.set(key, value).save()?;
        return Ok(());
    }

    let view = if args.global {
        CompiledConfig::from(&config)
    } else {
        match ctx.paths.as_ref() {
            Some(paths) => CompiledConfig::new(&UserConfig::global(Some(paths))?, &config),
            None => CompiledConfig::from(&config),
        }
    };

    let Some(key) = args.key else {
        let all = Value::Object(view.values().clone());
        println!("{}", to_pretty(&config, &all)?);
        return Ok(());
    };

    match view.get(&key) {
        Some(Value::String(s)) => println!("{s}"),
        Some(value) => println!("{}", to_pretty(&config, value)?),
        None => println!("Configuration key not found."),
    }

    Ok(())
}

fn to_pretty(config: &UserConfig, value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ConfigError::JsonParse {
            path: config.path().to_path_buf(),
            source: e,
        }
        .into()
    })
}

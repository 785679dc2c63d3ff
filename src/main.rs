// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;

use eircode_kit::config::Config;
use eircode_kit::{
    Country, EircodeApi, FindAddressRequest, Language, Result, VERSION, VERSION_NUMBER, logging,
    transaction_log,
};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "eircode")]
#[command(about = "Look up Irish addresses and Eircodes via Autoaddress")]
#[command(version = VERSION)]
#[command(styles = STYLES)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, help = "Developer key (overrides config)")]
    key: Option<String>,

    #[arg(long, global = true, help = "API base URL (overrides config)")]
    base_url: Option<String>,

    #[arg(long, global = true, help = "Result language: en or ga")]
    language: Option<Language>,

    #[arg(long, global = true, help = "Search country: ie or gb")]
    country: Option<Country>,

    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        value_name = "PATH",
        help = "Append API exchanges to a JSON-lines file (--log-transactions=PATH)"
    )]
    log_transactions: Option<Option<PathBuf>>,

    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity"
    )]
    verbose: u8,

    #[arg(long, global = true, help = "Print JSON on a single line")]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find an address
    Find {
        /// Address or postcode to search for
        address: String,

        #[arg(long, help = "Address id from an ECAD lookup")]
        address_id: Option<String>,

        #[arg(long, help = "Maximum number of results (service default: 20)")]
        limit: Option<u32>,

        #[arg(long, help = "Return the vanity address if one exists")]
        vanity: bool,

        #[arg(long, help = "Address profile used to reformat the result")]
        profile: Option<String>,
    },
    /// Look up a postcode
    Lookup {
        /// Eircode to look up
        postcode: String,
    },
    /// Verify an address against a postcode
    Verify {
        postcode: String,
        /// Comma separated address
        address: String,
    },
    /// Get Eircode Address Database data for an ECAD id
    Ecad { ecad_id: String },
    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Store a developer key
    SetKey { key: String },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let document = match &args.command {
        Command::Version => {
            println!("eircode-kit {}", VERSION);
            println!("version number: {}", VERSION_NUMBER);
            return Ok(());
        }
        Command::Config { command } => return handle_config_command(command),
        Command::Find {
            address,
            address_id,
            limit,
            vanity,
            profile,
        } => {
            let mut request = FindAddressRequest::new(address.clone()).include_vanity(*vanity);
            request.address_id = address_id.clone();
            request.limit = *limit;
            request.address_profile_name = profile.clone();
            client(&args)?.find_address(&request).await?
        }
        Command::Lookup { postcode } => client(&args)?.postcode_lookup(postcode).await?,
        Command::Verify { postcode, address } => {
            client(&args)?
                .verify_address(postcode, address, None)
                .await?
        }
        Command::Ecad { ecad_id } => client(&args)?.get_ecad_data(ecad_id).await?,
    };

    let output = if args.compact {
        serde_json::to_string(&document)?
    } else {
        serde_json::to_string_pretty(&document)?
    };
    println!("{}", output);
    Ok(())
}

fn client(args: &Args) -> Result<EircodeApi> {
    EircodeApi::from_config(&effective_config(args)?)
}

/// Config file, then environment, then command line.
fn effective_config(args: &Args) -> Result<Config> {
    let mut config = Config::load()?;
    config.apply_env();

    if let Some(key) = &args.key {
        config.developer_key = Some(key.clone());
    }
    if let Some(url) = &args.base_url {
        config.base_url = Some(url.clone());
    }
    if args.language.is_some() {
        config.language = args.language;
    }
    if args.country.is_some() {
        config.country = args.country;
    }
    match &args.log_transactions {
        Some(Some(path)) => config.transaction_log = Some(path.clone()),
        Some(None) => {
            config.transaction_log = Some(PathBuf::from(transaction_log::DEFAULT_PATH))
        }
        None => {}
    }
    Ok(config)
}

fn handle_config_command(command: &ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let path = Config::config_path()?;
            let mut config = Config::load()?;
            config.apply_env();
            if let Some(key) = &config.developer_key {
                config.developer_key = Some(mask_key(key));
            }
            println!("{} {}", "Config file:".cyan().bold(), path.display());
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| eircode_kit::Error::Config(e.to_string()))?;
            if rendered.trim().is_empty() {
                println!("(empty)");
            } else {
                print!("{}", rendered);
            }
        }
        ConfigCommand::SetKey { key } => {
            let mut config = Config::load()?;
            config.set_developer_key(key.trim().to_string());
            config.developer_key()?;
            config.save()?;
            println!(
                "✓ Developer key saved to {}",
                Config::config_path()?.display()
            );
        }
    }
    Ok(())
}

fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let visible: String = key.chars().skip(count - 4).collect();
    format!("****{}", visible)
}

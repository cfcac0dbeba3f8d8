use std::io::Write;

use anyhow::Context;
use colored::Colorize;
use guestlist_server::{GuestServer, ServerConfig};
use guestlist_store::{CsvGuestStore, Guest, GuestRepository};

use crate::cli::*;

/// Layer the configuration: defaults, then the TOML file, then flags and
/// environment.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(file) = &cli.file {
        config.store.path = file.clone();
    }
    if let Command::Serve(ServeArgs { bind: Some(bind) }) = &cli.command {
        config.bind_addr = *bind;
    }
    config.debug |= cli.verbose;
    Ok(config)
}

pub fn run_command(cli: Cli, config: ServerConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(_) => cmd_serve(config),
        Command::List => cmd_list(&open_store(&config)?, cli.format, out),
        Command::Show(args) => cmd_show(&open_store(&config)?, args, cli.format, out),
        Command::Add(args) => cmd_add(&open_store(&config)?, args, out),
        Command::Remove(args) => cmd_remove(&open_store(&config)?, args, out),
    }
}

fn open_store(config: &ServerConfig) -> anyhow::Result<CsvGuestStore> {
    CsvGuestStore::from_config(&config.store)
        .with_context(|| format!("cannot open guest file {}", config.store.path.display()))
}

fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    let server = GuestServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn write_guest(out: &mut impl Write, guest: &Guest) -> std::io::Result<()> {
    let plus_one = if guest.plus_one() { " +1".green().to_string() } else { String::new() };
    writeln!(
        out,
        "  {}  {} {}{}",
        guest.id().yellow(),
        guest.name().bold(),
        guest.last_name().bold(),
        plus_one
    )
}

fn cmd_list(store: &impl GuestRepository, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let guests = store.get_all()?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&guests)?)?,
        OutputFormat::Text if guests.is_empty() => writeln!(out, "No guests.")?,
        OutputFormat::Text => {
            let attending = guests.len() + guests.iter().filter(|g| g.plus_one()).count();
            writeln!(out, "{} guests ({} attending)", guests.len().to_string().bold(), attending)?;
            for guest in &guests {
                write_guest(out, guest)?;
            }
        }
    }
    Ok(())
}

fn cmd_show(
    store: &impl GuestRepository,
    args: ShowArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let guest = store.get(&args.id)?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&guest)?)?,
        OutputFormat::Text => write_guest(out, &guest)?,
    }
    Ok(())
}

fn cmd_add(store: &impl GuestRepository, args: AddArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let guest = Guest::new(args.name, args.last_name).with_plus_one(args.plus_one);
    let id = guest.id();
    store.save(guest)?;
    writeln!(out, "{} Saved guest {}", "✓".green().bold(), id.yellow())?;
    Ok(())
}

fn cmd_remove(store: &impl GuestRepository, args: RemoveArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let removed = store.delete(&args.id)?;
    if removed == 0 {
        writeln!(out, "No guest with id {}", args.id.yellow())?;
    } else {
        writeln!(out, "{} Removed guest {}", "✓".green().bold(), args.id.yellow())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use guestlist_store::StoreError;
    use std::path::Path;
    use tempfile::TempDir;

    fn run(path: &Path, args: &[&str]) -> anyhow::Result<String> {
        colored::control::set_override(false);
        let mut argv = vec!["guestlist", "--file", path.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let config = resolve_config(&cli)?;
        let mut out = Vec::new();
        run_command(cli, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn resolve_config_layers_flags_over_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("guestlist.toml");
        std::fs::write(
            &config_path,
            "bind_addr = \"0.0.0.0:8080\"\n[store]\npath = \"from-config.csv\"\n",
        )
        .unwrap();
        let config_arg = config_path.to_str().unwrap();

        let cli = Cli::try_parse_from(["guestlist", "--config", config_arg, "serve"]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.store.path, Path::new("from-config.csv"));
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());

        let cli = Cli::try_parse_from([
            "guestlist", "--config", config_arg, "--file", "flag.csv", "serve", "--bind", "127.0.0.1:9000", "-v",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.store.path, Path::new("flag.csv"));
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert!(config.debug);
    }

    #[test]
    fn add_list_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guests.csv");

        assert_eq!(run(&path, &["list"]).unwrap(), "No guests.\n");

        let out = run(&path, &["add", "Jaime", "Vaquero", "--plus-one"]).unwrap();
        assert_eq!(out, "✓ Saved guest Jaime:Vaquero\n");
        run(&path, &["add", "Ignacio", "Vaquero"]).unwrap();

        let out = run(&path, &["list"]).unwrap();
        assert_eq!(
            out,
            "2 guests (3 attending)\n  Jaime:Vaquero  Jaime Vaquero +1\n  Ignacio:Vaquero  Ignacio Vaquero\n"
        );

        let out = run(&path, &["remove", "Jaime:Vaquero"]).unwrap();
        assert_eq!(out, "✓ Removed guest Jaime:Vaquero\n");
        let out = run(&path, &["remove", "Jaime:Vaquero"]).unwrap();
        assert_eq!(out, "No guest with id Jaime:Vaquero\n");
    }

    #[test]
    fn add_duplicate_fails_with_conflict() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guests.csv");
        run(&path, &["add", "Jaime", "Vaquero"]).unwrap();
        let err = run(&path, &["add", "Jaime", "Vaquero"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Conflict { .. })
        ));
    }

    #[test]
    fn show_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guests.csv");
        run(&path, &["add", "Ana", "Ruiz"]).unwrap();
        let out = run(&path, &["show", "Ana:Ruiz", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["id"], "Ana:Ruiz");
        assert_eq!(value["plus_one"], false);

        let err = run(&path, &["show", "missing"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::NotFound { .. })
        ));
    }
}

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap::{Parser, Subcommand};
use mailvet_lib::{DEFAULT_CONCURRENCY, VerificationResult, Verifier, VerifyOptions};

use std::io::{self, BufRead};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "mailvet-cli")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    stdin: bool,

    /// fichier CSV d'entrée avec une colonne 'email' (feature `with-csv`)
    #[cfg(feature = "with-csv")]
    #[arg(long)]
    input: Option<String>,

    /// write report to file (JSON/CSV selon --format)
    #[arg(long)]
    out: Option<String>,

    /// format: human|json|csv
    #[arg(long, default_value = "human")]
    format: String,

    /// nombre de vérifications simultanées
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// timeout réseau par opération (ms)
    #[arg(long = "timeout", default_value_t = 10_000)]
    timeout_ms: u64,

    /// nom annoncé dans HELO
    #[arg(long)]
    helo: Option<String>,

    /// enveloppe MAIL FROM
    #[arg(long = "from")]
    mail_from: Option<String>,

    /// sonde aussi les domaines grand public (gmail, yahoo, ...)
    #[arg(long)]
    probe_public: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// vérifie une seule adresse
    Verify { email: String },
}

fn verify_options(cli: &Cli) -> VerifyOptions {
    let mut options = VerifyOptions::default();
    options.classify_domains = !cli.probe_public;
    options.dns_timeout = Duration::from_millis(cli.timeout_ms);
    options.probe.timeout_ms = cli.timeout_ms;
    if let Some(helo) = &cli.helo {
        options.probe.helo_host = helo.clone();
    }
    if let Some(from) = &cli.mail_from {
        options.probe.mail_from = from.clone();
    }
    options
}

fn gather_addresses(cli: &Cli) -> Result<Vec<String>> {
    let mut addresses = Vec::new();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                addresses.push(trimmed.to_string());
            }
        }
        return Ok(addresses);
    }

    if let Some(Commands::Verify { email }) = &cli.cmd {
        addresses.push(email.clone());
        return Ok(addresses);
    }

    #[cfg(feature = "with-csv")]
    if let Some(path) = &cli.input {
        let file = std::fs::File::open(path).with_context(|| format!("open {path}"))?;
        addresses = mailvet_lib::read_addresses(file).with_context(|| format!("parse {path}"))?;
    }

    Ok(addresses)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verifier = Verifier::new(verify_options(&cli));

    let addresses = gather_addresses(&cli)?;
    if addresses.is_empty() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let results: Vec<VerificationResult> = verifier.verify_batch(addresses, cli.concurrency);

    // sortie
    match cli.format.as_str() {
        "human" => {
            let rendered = render_human(&results);
            if let Some(path) = &cli.out {
                write_all_atomically(path, rendered.as_bytes())?;
            } else {
                print!("{rendered}");
            }
        }
        "json" => {
            #[cfg(feature = "with-serde")]
            {
                let s = serde_json::to_string_pretty(&results)?;
                if let Some(path) = &cli.out {
                    write_all_atomically(path, s.as_bytes())?;
                } else {
                    println!("{s}");
                }
            }
            #[cfg(not(feature = "with-serde"))]
            {
                eprintln!("format=json nécessite la feature 'with-serde'");
                std::process::exit(1);
            }
        }
        "csv" => {
            #[cfg(feature = "with-csv")]
            {
                if let Some(path) = &cli.out {
                    let mut buf = Vec::new();
                    mailvet_lib::write_report(&mut buf, &results)?;
                    write_all_atomically(path, &buf)?;
                } else {
                    mailvet_lib::write_report(std::io::stdout(), &results)?;
                }
            }
            #[cfg(not(feature = "with-csv"))]
            {
                eprintln!("format=csv nécessite la feature 'with-csv'");
                std::process::exit(1);
            }
        }
        other => {
            eprintln!("unknown --format '{}', use: human|json|csv", other);
            std::process::exit(1);
        }
    }

    // codes de sortie : 0 OK, 2 au moins une adresse NOT ACTIVE, 1 fatal
    let any_not_active = results.iter().any(|r| !r.status.is_active());
    if any_not_active {
        std::process::exit(2);
    }
    Ok(())
}

fn render_human(results: &[VerificationResult]) -> String {
    let mut out = String::new();
    for r in results {
        out.push_str(&format!("[{}] {}\n", r.status, r.email));
    }
    out
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;
    let tmp = format!("{}.tmp", path);
    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}

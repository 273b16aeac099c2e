//! Catalog browsing commands: read-only views over the signature tables
//! and the correction engine.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use crate::core::catalog::{self, Signature, SignatureKind};
use crate::core::correction;
use crate::core::error::NirmanakayaError;
use crate::core::status::Status;
use crate::core::tui::{self, BoxStyle};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindFilter {
    Archetype,
    Bound,
    Agent,
}

impl KindFilter {
    fn matches(&self, kind: SignatureKind) -> bool {
        matches!(
            (self, kind),
            (KindFilter::Archetype, SignatureKind::Archetype)
                | (KindFilter::Bound, SignatureKind::Bound)
                | (KindFilter::Agent, SignatureKind::Agent)
        )
    }
}

#[derive(Parser, Debug)]
pub struct CatalogCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: CatalogCommand,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Show one signature by ID (0..77).
    Show { id: u8 },
    /// List signatures, optionally one kind.
    List {
        #[clap(long, value_enum)]
        kind: Option<KindFilter>,
    },
    /// Bounds and Agents tied to an Archetype.
    Associated { id: u8 },
    /// The pinned correction for a signature and status code (1..=4).
    Correction { id: u8, status: u8 },
}

fn signature_json(sig: &Signature) -> serde_json::Value {
    let mut v = serde_json::json!({
        "id": sig.id(),
        "kind": sig.kind().as_str(),
        "name": sig.name(),
        "traditional": sig.traditional(),
        "description": sig.description(),
    });
    match sig {
        Signature::Archetype(a) => {
            v["house"] = a.house.as_str().into();
            if let Some(c) = a.channel {
                v["channel"] = c.as_str().into();
            }
            v["function"] = a.function.into();
        }
        Signature::Bound(b) => {
            v["channel"] = b.channel.as_str().into();
            v["number"] = b.number.into();
            v["polarity"] = b.polarity().into();
            v["archetype"] = b.archetype.into();
        }
        Signature::Agent(a) => {
            v["channel"] = a.channel.as_str().into();
            v["role"] = a.role.as_str().into();
            v["archetype"] = a.archetype.into();
        }
    }
    v
}

fn print_signature(sig: &Signature) -> Result<(), NirmanakayaError> {
    tui::render_box(
        &format!("{} — {}", sig.id(), sig.name()),
        sig.traditional(),
        BoxStyle::Info,
    );
    match sig {
        Signature::Archetype(a) => {
            let channel = match a.channel {
                Some(c) => format!("   Channel: {}", c),
                None => String::new(),
            };
            println!("Kind: Archetype   House: {}{}", a.house, channel);
            println!("Function: {}", a.function);
        }
        Signature::Bound(b) => {
            println!(
                "Kind: Bound   Channel: {}   Number: {} ({})",
                b.channel,
                b.number,
                b.polarity()
            );
            println!(
                "Expresses: {} ({})",
                catalog::archetype(b.archetype)?.name,
                b.archetype
            );
        }
        Signature::Agent(a) => {
            println!("Kind: Agent   Channel: {}   Role: {}", a.channel, a.role);
            println!(
                "Embodies: {} ({})",
                catalog::archetype(a.archetype)?.name,
                a.archetype
            );
        }
    }
    println!();
    println!("{}", sig.description());
    Ok(())
}

pub fn run_catalog_cli(cli: CatalogCli) -> Result<(), NirmanakayaError> {
    match &cli.command {
        CatalogCommand::Show { id } => {
            let sig = catalog::signature(*id)?;
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&signature_json(&sig))?);
                }
                OutputFormat::Text => print_signature(&sig)?,
            }
        }
        CatalogCommand::List { kind } => {
            let listed: Vec<Signature> = catalog::all_signatures()
                .filter(|s| kind.map(|k| k.matches(s.kind())).unwrap_or(true))
                .collect();
            match cli.format {
                OutputFormat::Json => {
                    let rows: Vec<serde_json::Value> =
                        listed.iter().map(signature_json).collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
                OutputFormat::Text => {
                    for sig in &listed {
                        println!(
                            "{:>2}  {:<9}  {:<16}  {}",
                            sig.id(),
                            sig.kind().as_str(),
                            sig.name(),
                            sig.traditional().bright_black()
                        );
                    }
                }
            }
        }
        CatalogCommand::Associated { id } => {
            let archetype = catalog::archetype(*id)?;
            let (bounds, agents) = catalog::associated_cards(*id)?;
            match cli.format {
                OutputFormat::Json => {
                    let bound_rows: Vec<serde_json::Value> = bounds
                        .iter()
                        .map(|&b| signature_json(&Signature::Bound(b)))
                        .collect();
                    let agent_rows: Vec<serde_json::Value> = agents
                        .iter()
                        .map(|&a| signature_json(&Signature::Agent(a)))
                        .collect();
                    let v = serde_json::json!({
                        "archetype": signature_json(&catalog::signature(*id)?),
                        "bounds": bound_rows,
                        "agents": agent_rows,
                    });
                    println!("{}", serde_json::to_string_pretty(&v)?);
                }
                OutputFormat::Text => {
                    println!(
                        "{} ({}) — {} house",
                        archetype.name.bold(),
                        archetype.id,
                        archetype.house
                    );
                    if bounds.is_empty() && agents.is_empty() {
                        println!("No bounds or agents reference this archetype.");
                    }
                    if !bounds.is_empty() {
                        println!("Expressed by:");
                        for b in &bounds {
                            println!("  {:>2}  {} ({} {})", b.id, b.name, b.channel, b.number);
                        }
                    }
                    if !agents.is_empty() {
                        println!("Embodied by:");
                        for a in &agents {
                            println!("  {:>2}  {} ({} of {})", a.id, a.name, a.role, a.channel);
                        }
                    }
                }
            }
        }
        CatalogCommand::Correction { id, status } => {
            let status = Status::try_from(*status)
                .map_err(NirmanakayaError::OutOfRange)?;
            let sig = catalog::signature(*id)?;
            let correction = correction::compute_correction(*id, status)?;
            match cli.format {
                OutputFormat::Json => {
                    let v = serde_json::json!({
                        "signature": *id,
                        "name": sig.name(),
                        "status": u8::from(status),
                        "correction": correction,
                    });
                    println!("{}", serde_json::to_string_pretty(&v)?);
                }
                OutputFormat::Text => {
                    println!("{}", status.phrase(sig.name()).bold());
                    match correction {
                        Some(corr) => {
                            if let Some(sentence) = correction::correction_text(&corr) {
                                println!("Correction: {}", sentence);
                            }
                            if let (Some(mirror), Some(cross)) =
                                (&corr.number_mirror, &corr.channel_cross)
                            {
                                println!("Mirror: {}   Cross: {}", mirror, cross);
                            }
                        }
                        None => {
                            if status.is_imbalanced() {
                                println!("No correction path from here.");
                            } else {
                                println!("No correction needed (Balanced)");
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

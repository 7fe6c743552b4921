use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::contacts::{
    DEFAULT_PLATFORM, Resolution, ResolutionSource, load_directory, resolve_for_platform,
};
use crate::models::{Directory, QueryFilter, ResolvedMessage};
use crate::store::{DEFAULT_OVER_FETCH_FACTOR, QueryOptions, ensure_access, query_history_with};
use crate::utils::{default_contacts_path, format_path_with_tilde, get_chat_db_path, to_display_line};

/// Timestamp format of the thread view
const THREAD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Parser)]
#[command(name = "message-history-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Read iMessage history for a contact", long_about = None)]
pub struct Cli {
    /// Path to the Messages database (default: ~/Library/Messages/chat.db)
    #[arg(long, global = true, env = "MESSAGE_HISTORY_DB")]
    pub db: Option<PathBuf>,

    /// Path to contacts.yaml used to resolve names and nicknames
    #[arg(long, global = true, env = "MESSAGE_HISTORY_CONTACTS")]
    pub contacts_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show recent messages with a contact
    Read(ReadArgs),
    /// Show which address a name or nickname resolves to
    Resolve {
        /// Contact name, nickname, phone number or email
        #[arg(short, long)]
        contact: String,

        /// Platform whose address to use
        #[arg(long, default_value = DEFAULT_PLATFORM)]
        platform: String,
    },
    /// Check that the Messages database is readable
    Check,
}

#[derive(Args)]
pub struct ReadArgs {
    /// Contact phone number, email, or name (resolved from contacts.yaml)
    #[arg(short, long)]
    pub contact: String,

    /// Number of recent messages to retrieve
    #[arg(short = 'n', long, default_value_t = QueryFilter::DEFAULT_LIMIT as u32,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub recent: u32,

    /// Only show messages containing this keyword (case-insensitive)
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Only show messages since this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub since: Option<String>,

    /// Rows fetched per requested message, to cover rows without recoverable text
    #[arg(long, default_value_t = DEFAULT_OVER_FETCH_FACTOR as u32,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub over_fetch: u32,

    /// Platform whose address to use when resolving names
    #[arg(long, default_value = DEFAULT_PLATFORM)]
    pub platform: String,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

/// JSON shape of the `read` command
#[derive(Serialize)]
struct ConversationOutput<'a> {
    contact_name: &'a str,
    contact_id: &'a str,
    message_count: usize,
    messages: &'a [ResolvedMessage],
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Read(args)) => {
            read_messages(&cli, args)?;
        }
        Some(Commands::Resolve { contact, platform }) => {
            show_resolution(&cli, contact, platform)?;
        }
        Some(Commands::Check) => {
            check_store(&cli)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn store_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.db {
        Some(path) => Ok(path.clone()),
        None => get_chat_db_path(),
    }
}

fn load_contacts(cli: &Cli) -> Result<Directory> {
    match cli.contacts_file.clone().or_else(default_contacts_path) {
        Some(path) => load_directory(&path),
        None => Ok(Directory::default()),
    }
}

fn read_messages(cli: &Cli, args: &ReadArgs) -> Result<()> {
    let store = store_path(cli)?;
    let directory = load_contacts(cli)?;
    let resolution = resolve_for_platform(&args.contact, &directory, &args.platform);

    let mut filter = QueryFilter::new(resolution.address.clone(), args.recent as usize);
    if let Some(keyword) = &args.keyword {
        filter = filter.with_keyword(keyword);
    }
    if let Some(since) = &args.since {
        filter = filter.with_since(since);
    }
    let options = QueryOptions::with_over_fetch_factor(args.over_fetch as usize);

    let messages = query_history_with(&store, &filter, &options)?;

    if args.json {
        let output = ConversationOutput {
            contact_name: &resolution.display_name,
            contact_id: &resolution.address,
            message_count: messages.len(),
            messages: &messages,
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize messages")?;
        println!("{}", json);
    } else {
        println!("{}", format_thread(&resolution, &args.platform, &messages));
    }

    Ok(())
}

/// Display name of a platform key, e.g. `imessage` -> `iMessage`
pub fn platform_label(platform: &str) -> String {
    match platform.to_lowercase().as_str() {
        "imessage" => "iMessage".to_string(),
        "sms" => "SMS".to_string(),
        _ => to_display_line(platform),
    }
}

/// Render messages as a conversational thread, most recent first
pub fn format_thread(resolution: &Resolution, platform: &str, messages: &[ResolvedMessage]) -> String {
    let name = to_display_line(&resolution.display_name);
    let address = to_display_line(&resolution.address);

    if messages.is_empty() {
        return format!("No messages found with {} ({})", name, address);
    }

    let mut lines = vec![
        format!("Conversation with {} ({}) via {}", name, address, platform_label(platform)),
        format!("Showing {} messages (most recent first):", messages.len()),
        String::new(),
    ];

    for message in messages {
        let sender = if message.is_from_me { "Me" } else { name.as_str() };
        lines.push(format!(
            "[{}] {}: {}",
            message.date.format(THREAD_TIME_FORMAT),
            sender,
            to_display_line(&message.text)
        ));
    }

    lines.join("\n")
}

fn describe_source(source: ResolutionSource) -> &'static str {
    match source {
        ResolutionSource::PassThrough => "already an address",
        ResolutionSource::ExactName => "matched name",
        ResolutionSource::Nickname => "matched nickname",
        ResolutionSource::Unresolved => "not in contacts, using as given",
    }
}

fn show_resolution(cli: &Cli, contact: &str, platform: &str) -> Result<()> {
    let directory = load_contacts(cli)?;
    let resolution = resolve_for_platform(contact, &directory, platform);

    println!(
        "{} -> {} ({})",
        to_display_line(&resolution.display_name),
        to_display_line(&resolution.address),
        describe_source(resolution.source)
    );

    Ok(())
}

fn check_store(cli: &Cli) -> Result<()> {
    let store = store_path(cli)?;
    ensure_access(&store)?;
    println!("Message store is readable: {}", format_path_with_tilde(&store));
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;

    fn resolution() -> Resolution {
        Resolution {
            display_name: "James Doe".to_string(),
            address: "+61400000000".to_string(),
            source: ResolutionSource::ExactName,
        }
    }

    fn message(text: &str, is_from_me: bool) -> ResolvedMessage {
        ResolvedMessage {
            text: text.to_string(),
            is_from_me,
            date: Local.with_ymd_and_hms(2025, 12, 26, 21, 38, 0).unwrap(),
            store_timestamp: 0,
            contact: "+61400000000".to_string(),
        }
    }

    #[test]
    fn test_format_thread_empty() {
        assert_eq!(
            format_thread(&resolution(), DEFAULT_PLATFORM, &[]),
            "No messages found with James Doe (+61400000000)"
        );
    }

    #[test]
    fn test_format_thread_lines() {
        let output = format_thread(
            &resolution(),
            DEFAULT_PLATFORM,
            &[message("see you\nthen", false), message("call me", true)],
        );
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Conversation with James Doe (+61400000000) via iMessage");
        assert_eq!(lines[1], "Showing 2 messages (most recent first):");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "[2025-12-26 21:38] James Doe: see you ↵ then");
        assert_eq!(lines[4], "[2025-12-26 21:38] Me: call me");
    }

    #[test]
    fn test_format_thread_names_the_platform() {
        let output = format_thread(&resolution(), "whatsapp", &[message("hi", false)]);
        assert!(output.starts_with("Conversation with James Doe (+61400000000) via whatsapp"));
    }

    #[test]
    fn test_platform_label() {
        assert_eq!(platform_label("imessage"), "iMessage");
        assert_eq!(platform_label("iMessage"), "iMessage");
        assert_eq!(platform_label("sms"), "SMS");
        assert_eq!(platform_label("signal"), "signal");
    }

    #[test]
    fn test_format_thread_strips_escape_sequences() {
        let output = format_thread(&resolution(), DEFAULT_PLATFORM, &[message("\x1b[2Jgotcha", false)]);
        assert!(output.ends_with("James Doe: gotcha"));
    }

    #[test]
    fn test_conversation_output_json_shape() {
        let resolution = resolution();
        let messages = vec![message("call me", true)];
        let output = ConversationOutput {
            contact_name: &resolution.display_name,
            contact_id: &resolution.address,
            message_count: messages.len(),
            messages: &messages,
        };
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["contact_name"], "James Doe");
        assert_eq!(value["message_count"], 1);
        assert_eq!(value["messages"][0]["text"], "call me");
        assert_eq!(value["messages"][0]["is_from_me"], true);
        assert_eq!(value["messages"][0]["date"], "2025-12-26 21:38:00");
        assert_eq!(value["messages"][0]["contact"], "+61400000000");
        assert!(value["messages"][0].get("store_timestamp").is_none());
    }
}

//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // Navigation commands
    Collections,
    Recents,
    Open(u64),
    Connect(String),

    // Dashboard commands
    Refresh,
    Filter(Option<String>),
    Unfilter(Option<String>),
    AddFilter,
    Edit,
    Save,
    Cancel,
    Rename(String),
    Describe(String),

    // Sharing commands
    Share,
    Unshare,
    Embed(Option<bool>),
    Domains(Option<String>),

    // Admin commands
    Permissions,

    // Misc
    Export(Option<String>),
    Bookmark,
    Mock,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim().to_string());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "collections" | "cols" | "browse" => Command::Collections,
        "recents" | "recent" => Command::Recents,
        "open" | "o" | "dash" => {
            if let Some(id) = args.as_deref().and_then(|s| s.parse().ok()) {
                Command::Open(id)
            } else {
                Command::Unknown(input.to_string())
            }
        }
        "connect" | "conn" => {
            if let Some(url) = args {
                Command::Connect(url)
            } else {
                Command::Unknown(input.to_string())
            }
        }

        // Dashboard
        "refresh" | "reload" => Command::Refresh,
        "filter" | "f" => Command::Filter(args),
        "unfilter" | "clearfilter" | "uf" => Command::Unfilter(args),
        "addfilter" | "newfilter" => Command::AddFilter,
        "edit" | "e" => Command::Edit,
        "save" | "w" => Command::Save,
        "cancel" | "discard" => Command::Cancel,
        "rename" => {
            if let Some(name) = args.filter(|s| !s.is_empty()) {
                Command::Rename(name)
            } else {
                Command::Unknown(input.to_string())
            }
        }
        "desc" | "describe" => Command::Describe(args.unwrap_or_default()),

        // Sharing
        "share" | "publish" => Command::Share,
        "unshare" | "unpublish" => Command::Unshare,
        "embed" => match args.as_deref() {
            Some("on") | Some("true") => Command::Embed(Some(true)),
            Some("off") | Some("false") => Command::Embed(Some(false)),
            None => Command::Embed(None),
            Some(_) => Command::Unknown(input.to_string()),
        },
        "domains" | "origins" => Command::Domains(args),

        // Admin
        "perms" | "permissions" => Command::Permissions,

        // Misc
        "export" | "exp" => Command::Export(args),
        "bookmark" | "bm" | "pin" => Command::Bookmark,
        "mock" | "offline" => Command::Mock,
        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

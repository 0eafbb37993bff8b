use crate::vfs::TransferMode;

pub const DEFAULT_HEAD_LINES: usize = 10;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ls,
    Cd(String),
    Pwd,
    Uptime,
    Exit,
    Head { file: String, lines: usize },
    Transfer { src: String, dest: String, mode: TransferMode },
    Chown { owner: String, file: String },
    /// A known verb with the wrong arguments; carries the message to show.
    Usage(String),
    Unknown(String),
}

impl Command {
    /// Parses a line of input. Returns `None` for blank lines.
    /// Verbs are case-insensitive, arguments are split on whitespace.
    pub fn parse(line: &str) -> Option<Command> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (verb.as_str(), args.as_slice()) {
            ("ls", _) => Command::Ls,
            ("pwd", _) => Command::Pwd,
            ("uptime", _) => Command::Uptime,
            ("exit", _) => Command::Exit,
            ("cd", [path, ..]) => Command::Cd(path.to_string()),
            ("cd", []) => Command::Usage("cd: missing argument".into()),
            ("head", [file]) => Command::Head {
                file: file.to_string(),
                lines: DEFAULT_HEAD_LINES,
            },
            ("head", [file, count]) => match count.parse() {
                Ok(lines) => Command::Head {
                    file: file.to_string(),
                    lines,
                },
                Err(_) => Command::Usage(format!("head: invalid number of lines: {count}")),
            },
            ("head", _) => Command::Usage("head: usage: head <file> [n]".into()),
            ("cp" | "mv", [src, dest]) => Command::Transfer {
                src: src.to_string(),
                dest: dest.to_string(),
                mode: if verb == "cp" {
                    TransferMode::Copy
                } else {
                    TransferMode::Move
                },
            },
            ("cp" | "mv", _) => Command::Usage(format!("{verb}: usage: {verb} <src> <dst>")),
            ("chown", [owner, file]) => Command::Chown {
                owner: owner.to_string(),
                file: file.to_string(),
            },
            ("chown", _) => Command::Usage("chown: usage: chown <owner> <file>".into()),
            _ => Command::Unknown(verb),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   \t "), None);
    }

    #[test]
    fn test_simple_verbs() {
        assert_eq!(Command::parse("ls"), Some(Command::Ls));
        assert_eq!(Command::parse("  PWD  "), Some(Command::Pwd));
        assert_eq!(Command::parse("Uptime"), Some(Command::Uptime));
        assert_eq!(Command::parse("exit"), Some(Command::Exit));
        assert_eq!(Command::parse("cd dir1"), Some(Command::Cd("dir1".into())));
    }

    #[test]
    fn test_head_arguments() {
        assert_eq!(
            Command::parse("head notes.txt"),
            Some(Command::Head {
                file: "notes.txt".into(),
                lines: DEFAULT_HEAD_LINES
            })
        );
        assert_eq!(
            Command::parse("head notes.txt 3"),
            Some(Command::Head {
                file: "notes.txt".into(),
                lines: 3
            })
        );
        assert!(matches!(Command::parse("head notes.txt many"), Some(Command::Usage(_))));
        assert!(matches!(Command::parse("head"), Some(Command::Usage(_))));
    }

    #[test]
    fn test_transfer_and_chown() {
        assert_eq!(
            Command::parse("mv a.txt dir1"),
            Some(Command::Transfer {
                src: "a.txt".into(),
                dest: "dir1".into(),
                mode: TransferMode::Move
            })
        );
        assert!(matches!(
            Command::parse("cp a.txt"),
            Some(Command::Usage(msg)) if msg.starts_with("cp:")
        ));
        assert_eq!(
            Command::parse("chown root a.txt"),
            Some(Command::Chown {
                owner: "root".into(),
                file: "a.txt".into()
            })
        );
        assert!(matches!(Command::parse("cd"), Some(Command::Usage(_))));
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(Command::parse("rm -rf /"), Some(Command::Unknown("rm".into())));
    }
}

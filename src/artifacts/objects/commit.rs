//! Commit object
//!
//! Commits record a snapshot of the repository at a point in time. They contain:
//! - A tree object ID (directory snapshot)
//! - An optional parent commit ID (for history)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The `parent` line is omitted for a root commit.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{StoreError, StoreResult};
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use derive_new::new;

/// Author or committer information
///
/// Contains name, email, and timestamp with its UTC offset.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create an author stamped with the current local time
    pub fn now(name: String, email: String) -> Self {
        Author::new(name, email, chrono::Local::now().fixed_offset())
    }

    /// Format complete author info including timestamp
    ///
    /// # Returns
    ///
    /// String in format "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Load author information from environment variables
    ///
    /// Reads GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL, and optionally GIT_AUTHOR_DATE.
    /// If no date is provided, uses current time.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("GIT_AUTHOR_NAME").context("GIT_AUTHOR_NAME not set")?;
        let email = std::env::var("GIT_AUTHOR_EMAIL").context("GIT_AUTHOR_EMAIL not set")?;

        Self::with_env_date(name, email, "GIT_AUTHOR_DATE")
    }

    /// Load committer information, falling back to the author's identity
    ///
    /// Reads GIT_COMMITTER_NAME, GIT_COMMITTER_EMAIL and GIT_COMMITTER_DATE.
    pub fn load_committer_from_env(author: &Author) -> anyhow::Result<Self> {
        let name = std::env::var("GIT_COMMITTER_NAME").unwrap_or_else(|_| author.name.clone());
        let email = std::env::var("GIT_COMMITTER_EMAIL").unwrap_or_else(|_| author.email.clone());

        match std::env::var("GIT_COMMITTER_DATE") {
            Ok(_) => Self::with_env_date(name, email, "GIT_COMMITTER_DATE"),
            Err(_) => Ok(Author::new(name, email, author.timestamp)),
        }
    }

    fn with_env_date(name: String, email: String, date_var: &str) -> anyhow::Result<Self> {
        match std::env::var(date_var) {
            Ok(date_str) => {
                let timestamp = DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .with_context(|| format!("Invalid {}: {}", date_var, date_str))?;
                Ok(Author::new(name, email, timestamp))
            }
            Err(_) => Ok(Author::now(name, email)),
        }
    }
}

/// Parse a `+HHMM` / `-HHMM` UTC offset
fn parse_offset(timezone: &str) -> Option<FixedOffset> {
    let (sign, digits) = match timezone.split_at_checked(1)? {
        ("+", digits) => (1, digits),
        ("-", digits) => (-1, digits),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl TryFrom<&str> for Author {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let malformed = |reason: &str| StoreError::MalformedObject(format!("{}: {:?}", reason, value));

        // Format: "name <email> timestamp timezone"
        // Split from right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(malformed("invalid author line"));
        }

        let offset = parse_offset(parts[0]).ok_or_else(|| malformed("invalid timezone"))?;
        let seconds = parts[1]
            .parse::<i64>()
            .map_err(|_| malformed("invalid timestamp"))?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| malformed("missing '<'"))?;
        let email_end = name_email_part
            .rfind('>')
            .filter(|&end| end > email_start)
            .ok_or_else(|| malformed("missing '>'"))?;

        let name = name_email_part[..email_start].trim_end().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let timestamp = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| malformed("timestamp out of range"))?
            .with_timezone(&offset);

        Ok(Author::new(name, email, timestamp))
    }
}

/// History node pointing at a tree snapshot
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Commit {
    tree_oid: ObjectId,
    /// `None` for a root commit
    parent: Option<ObjectId>,
    author: Author,
    committer: Author,
    message: String,
}

impl Packable for Commit {
    fn body(&self) -> Bytes {
        Bytes::from(self.display())
    }
}

impl Unpackable for Commit {
    fn deserialize(body: &[u8]) -> StoreResult<Self> {
        let content = std::str::from_utf8(body)
            .map_err(|_| StoreError::MalformedObject("commit is not valid UTF-8".into()))?;

        let (headers, message) = content.split_once("\n\n").ok_or_else(|| {
            StoreError::MalformedObject("commit has no blank line before the message".into())
        })?;
        let mut lines = headers.lines().peekable();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .ok_or_else(|| StoreError::MalformedObject("missing tree line".into()))?;
        let tree_oid = ObjectId::try_parse(tree_oid)?;

        let parent = match lines.next_if(|line| line.starts_with("parent ")) {
            Some(line) => Some(ObjectId::try_parse(&line["parent ".len()..])?),
            None => None,
        };

        let author = lines
            .next()
            .and_then(|line| line.strip_prefix("author "))
            .ok_or_else(|| StoreError::MalformedObject("missing author line".into()))?;
        let author = Author::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .ok_or_else(|| StoreError::MalformedObject("missing committer line".into()))?;
        let committer = Author::try_from(committer)?;

        if let Some(line) = lines.next() {
            return Err(StoreError::MalformedObject(format!(
                "unexpected commit header {:?}",
                line
            )));
        }

        Ok(Self::new(
            tree_oid,
            parent,
            author,
            committer,
            message.to_string(),
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid));
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

//! Frontmatter block extraction for SKILL.md files.

use thiserror::Error;

pub const DELIMITER: &str = "---";

/// Keys every SKILL.md must declare.
pub const BASE_FIELDS: [&str; 2] = ["name", "description"];

/// Keys required for skills owned by a plugin or nested in a skill package.
pub const NESTED_FIELDS: [&str; 3] = ["name", "description", "model"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontmatterError {
    #[error("missing frontmatter")]
    MissingDelimiter,
}

/// The text between the opening delimiter and the next delimiter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    block: &'a str,
}

impl<'a> Frontmatter<'a> {
    /// Locate the frontmatter block of `content`.
    ///
    /// The content must start with `---`. The block runs to the next line that
    /// is exactly `---` (ignoring surrounding whitespace), or to the end of the
    /// content when no closing delimiter exists.
    pub fn parse(content: &'a str) -> Result<Self, FrontmatterError> {
        let rest = content
            .strip_prefix(DELIMITER)
            .ok_or(FrontmatterError::MissingDelimiter)?;

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if offset > 0 && line.trim() == DELIMITER {
                return Ok(Self {
                    block: &rest[..offset],
                });
            }
            offset += line.len();
        }

        Ok(Self { block: rest })
    }

    pub fn block(&self) -> &'a str {
        self.block
    }

    /// True when some line of the block starts with `<key>:`.
    pub fn has_key(&self, key: &str) -> bool {
        self.block.lines().any(|line| {
            line.trim_start()
                .strip_prefix(key)
                .is_some_and(|rest| rest.starts_with(':'))
        })
    }

    /// Keys from `required` that the block does not declare, in order.
    pub fn missing_keys<'k>(&self, required: &[&'k str]) -> Vec<&'k str> {
        required
            .iter()
            .copied()
            .filter(|key| !self.has_key(key))
            .collect()
    }
}

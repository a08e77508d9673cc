//! Output file names for packages.
//!
//! Renders a user-configured [upon] template into the archive's file name.
//! The only variable is `primary`, the package's primary name, and the
//! `slug` formatter turns it into something safe for any filesystem:
//!
//! ```
//! use tablepack_organize::ArchiveNamer;
//!
//! let namer: ArchiveNamer = "{{ primary|slug }}-package".parse().unwrap();
//! assert_eq!(namer.render("Attack From Mars (1995)").unwrap(), "attack-from-mars-1995-package.zip");
//! ```

use crate::error::{Error, ErrorKind, Result};
use exn::ResultExt;
use std::str::FromStr;
use tracing::instrument;
use upon::{Engine, Template};

pub const ARCHIVE_EXTENSION: &str = "zip";

/// Compiled archive name template.
///
/// Compiled eagerly by [`FromStr`] so syntax errors surface when the
/// configuration is loaded rather than at the end of a build.
pub struct ArchiveNamer {
    engine: Engine<'static>,
    template: Template<'static>,
}

impl FromStr for ArchiveNamer {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let template = engine.compile(s.to_string()).or_raise(|| ErrorKind::ArchiveName)?;
        Ok(Self { engine, template })
    }
}

impl ArchiveNamer {
    /// Renders the file name for `primary`, appending `.zip` unless the
    /// template already ends with it.
    ///
    /// # Errors
    /// [`ErrorKind::ArchiveName`] if rendering fails, the result has no stem,
    /// or it contains a path separator.
    #[instrument(skip(self))]
    pub fn render(&self, primary: &str) -> Result<String> {
        let rendered = self
            .template
            .render(&self.engine, upon::value! { primary: primary })
            .to_string()
            .or_raise(|| ErrorKind::ArchiveName)?;
        let name = rendered.trim();
        if name.contains(['/', '\\']) {
            exn::bail!(ErrorKind::ArchiveName);
        }
        let stem = match name.rsplit_once('.') {
            Some((stem, ext)) if ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION) => stem,
            _ => name,
        };
        if stem.trim().is_empty() {
            exn::bail!(ErrorKind::ArchiveName);
        }
        Ok(format!("{stem}.{ARCHIVE_EXTENSION}"))
    }
}

/// Custom [`upon`] extensions for filename-safe strings.
mod addons {
    use rslug::slugify;
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Converts strings to slugs, dropping quotation marks first so they
    /// don't turn into stray hyphens.
    fn slug_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => {
                let marks = ['\'', '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '`'];
                let stripped: String = s.chars().filter(|c| !marks.contains(c)).collect();
                write!(f, "{}", slugify!(&stripped))?
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("slug", slug_formatter);
    }
}

use crate::{Migration, Result, Rewrite};
use regex::{Captures, Regex};

/// We use this migration when a record literal changes shape in a source file.  Every
/// non-overlapping match of `pattern` is replaced by `template`, which may refer to the pattern's
/// capture groups with `$1` or `${name}`.  Captured text is copied verbatim.
///
/// Matching is lexical, not structural; anything the pattern doesn't describe is left alone.
pub struct ReshapeRecordMigration<'a> {
    pub pattern: &'a Regex,
    pub template: &'a str,
}

impl Migration for ReshapeRecordMigration<'_> {
    fn rewrite(&mut self, input: &str) -> Result<Rewrite> {
        let mut records = 0;
        let content = self
            .pattern
            .replace_all(input, |caps: &Captures<'_>| {
                records += 1;
                let mut reshaped = String::new();
                caps.expand(self.template, &mut reshaped);
                reshaped
            })
            .into_owned();
        trace!("{} matches for {}", records, self.pattern.as_str());

        Ok(Rewrite { content, records })
    }
}

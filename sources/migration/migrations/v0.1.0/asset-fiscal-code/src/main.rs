#![deny(rust_2018_idioms)]

use lazy_static::lazy_static;
use migration_helpers::common_migrations::ReshapeRecordMigration;
use migration_helpers::{migrate, Result};
use regex::Regex;
use std::process;

/// The file holding the asset list, relative to the directory the migration is run from.
const TARGET_FILE: &str = "constants.ts";

/// Value given to the new `patrimony` field; the old records have no patrimony number.
const PATRIMONY_PLACEHOLDER: &str = "-";

lazy_static! {
    /// Matches an asset record in the old `{ code, description }` shape.  Values can't contain
    /// double quotes; a record with an escaped quote is skipped or truncated.
    static ref ASSET_RECORD_RE: Regex = Regex::new(
        r#"\{\s*code:\s*"(?P<code>[^"]*)",\s*description:\s*"(?P<description>[^"]*)"\s*\}"#
    )
    .unwrap();

    /// The new `{ fiscalCode, patrimony, description }` shape.
    static ref ASSET_RECORD_TEMPLATE: String = format!(
        r#"{{ fiscalCode: "${{code}}", patrimony: "{}", description: "${{description}}" }}"#,
        PATRIMONY_PLACEHOLDER
    );
}

/// Asset records used to be keyed by `code`.  They're now keyed by `fiscalCode` and carry a
/// `patrimony` number, which we don't know for existing records, so they get a placeholder.
fn asset_migration() -> ReshapeRecordMigration<'static> {
    ReshapeRecordMigration {
        pattern: &ASSET_RECORD_RE,
        template: &ASSET_RECORD_TEMPLATE,
    }
}

fn run() -> Result<()> {
    migrate(asset_migration(), TARGET_FILE)?;
    Ok(())
}

// Returning a Result from main makes it print a Debug representation of the error, but with Snafu
// we have nice Display representations of the error, so we wrap "main" (run) and print any error.
// https://github.com/shepmaster/snafu/issues/110
fn main() {
    if let Err(e) = run() {
        eprintln!("CRITICAL ERROR: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::asset_migration;
    use migration_helpers::{run_migration, Args, Migration, Outcome};
    use std::fs;
    use tempfile::TempDir;

    fn migrate_str(input: &str) -> (String, usize) {
        let rewrite = asset_migration().rewrite(input).unwrap();
        (rewrite.content, rewrite.records)
    }

    #[test]
    fn single_record() {
        let (content, records) =
            migrate_str(r#"{ code: "IT1234567890ABCDEFGH", description: "John Doe" }"#);
        assert_eq!(
            content,
            r#"{ fiscalCode: "IT1234567890ABCDEFGH", patrimony: "-", description: "John Doe" }"#
        );
        assert_eq!(records, 1);
    }

    #[test]
    fn unrelated_text_is_preserved() {
        let input = concat!(
            "export const ASSETS: Asset[] = [\n",
            "    { code: \"IMO-40TDM\", description: \"APARELHO DIGITAL OPENSTAGE 40 TDM\" },\n",
            "    // legacy entry, see ticket\n",
            "    {code:\"IMOB-GWH18QD\",description:\"AR CONDICIONADO 18.000 BTUS 220V\"}\n",
            "];\n",
            "export const VEHICLES = [{ plate: \"ABC1D23\", model: \"Gol\" }];\n",
        );
        let expected = concat!(
            "export const ASSETS: Asset[] = [\n",
            "    { fiscalCode: \"IMO-40TDM\", patrimony: \"-\", description: \"APARELHO DIGITAL OPENSTAGE 40 TDM\" },\n",
            "    // legacy entry, see ticket\n",
            "    { fiscalCode: \"IMOB-GWH18QD\", patrimony: \"-\", description: \"AR CONDICIONADO 18.000 BTUS 220V\" }\n",
            "];\n",
            "export const VEHICLES = [{ plate: \"ABC1D23\", model: \"Gol\" }];\n",
        );

        let (content, records) = migrate_str(input);
        assert_eq!(content, expected);
        assert_eq!(records, 2);
    }

    #[test]
    fn values_are_copied_verbatim() {
        let (content, _) =
            migrate_str(r#"{ code: "", description: "Café $1 ${code} \n 'x' / 100%" }"#);
        assert_eq!(
            content,
            r#"{ fiscalCode: "", patrimony: "-", description: "Café $1 ${code} \n 'x' / 100%" }"#
        );
    }

    #[test]
    fn record_split_across_lines() {
        let (content, records) =
            migrate_str("{\n  code: \"A1\",\n  description: \"Desk\"\n}");
        assert_eq!(
            content,
            r#"{ fiscalCode: "A1", patrimony: "-", description: "Desk" }"#
        );
        assert_eq!(records, 1);
    }

    #[test]
    fn migrated_records_are_not_matched() {
        let input = r#"{ fiscalCode: "A1", patrimony: "-", description: "Desk" }"#;
        let (content, records) = migrate_str(input);
        assert_eq!(content, input);
        assert_eq!(records, 0);
    }

    #[test]
    fn other_shapes_are_not_matched() {
        for input in [
            r#"{ description: "Desk", code: "A1" }"#,
            r#"{ code: "A1", description: "Desk", extra: "x" }"#,
            r#"{ code: 'A1', description: 'Desk' }"#,
            r#"{ code: "A\"1", description: "Desk" }"#,
        ] {
            let (content, records) = migrate_str(input);
            assert_eq!(content, input);
            assert_eq!(records, 0);
        }
    }

    #[test]
    fn rerun_reports_no_matches() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("constants.ts");
        fs::write(
            &path,
            "const A = [\n  { code: \"X\", description: \"Y\" },\n];\n",
        )
        .unwrap();
        let args = Args::parse(
            vec!["asset-fiscal-code".to_string()],
            path.clone(),
        );

        let first = run_migration(asset_migration(), &args).unwrap();
        let migrated = fs::read_to_string(&path).unwrap();
        let second = run_migration(asset_migration(), &args).unwrap();

        assert_eq!(first, Outcome::Migrated { records: 1 });
        assert_eq!(
            migrated,
            "const A = [\n  { fiscalCode: \"X\", patrimony: \"-\", description: \"Y\" },\n];\n"
        );
        assert_eq!(second, Outcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), migrated);
    }
}

//! Application Error Types

use derive_more::{Display, Error};

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// The stage of a run that failed.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("unable to load configuration")]
    Config,
    #[display("unable to open the song database")]
    Catalog,
    #[display("unable to scan for charts")]
    Scan,
    #[display("unable to classify charts")]
    Classify,
    #[display("unable to move charts")]
    Relocate,
    #[display("unable to read the answer")]
    Prompt,
}

/// Renders the whole error tree for the terminal: the failed stage first,
/// then every cause beneath it, indented by depth.
///
/// Source locations stay out of it; they're logged at `debug` instead.
pub fn report(err: &Error) -> String {
    let mut out = format!("Error: {}", err.frame());
    causes(err.frame(), 1, &mut out);
    out
}

fn causes(frame: &exn::Frame, depth: usize, out: &mut String) {
    let parent = frame.to_string();
    for child in frame.children() {
        let message = child.to_string();
        // Kinds that wrap a child kind repeat its message verbatim.
        if message == parent {
            causes(child, depth, out);
            continue;
        }
        out.push('\n');
        out.push_str(&"  ".repeat(depth));
        out.push_str("caused by: ");
        out.push_str(&message);
        causes(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exn::ResultExt;
    use sabun_catalog::error::ErrorKind as CatalogErrorKind;

    fn open_catalog() -> sabun_catalog::error::Result<()> {
        exn::bail!(CatalogErrorKind::MissingColumn("genre"))
    }

    #[test]
    fn test_report_names_the_missing_column() {
        let err = open_catalog().or_raise(|| ErrorKind::Catalog).unwrap_err();
        let report = report(&err);
        assert_eq!(
            report,
            "Error: unable to open the song database\n  caused by: catalog is missing required column `genre`"
        );
    }

    #[test]
    fn test_report_walks_every_level() {
        let err = Err::<(), _>(CatalogErrorKind::Busy { attempts: 3 })
            .or_raise(|| CatalogErrorKind::Database)
            .or_raise(|| ErrorKind::Catalog)
            .unwrap_err();
        let lines: Vec<_> = report(&err).lines().map(str::to_owned).collect();
        assert_eq!(lines, [
            "Error: unable to open the song database",
            "  caused by: database error",
            "    caused by: database busy after 3 attempts",
        ]);
    }

    #[test]
    fn test_report_without_causes() {
        let err = exn::Exn::new(ErrorKind::Prompt);
        assert_eq!(report(&err), "Error: unable to read the answer");
    }
}

use crate::organizer::{registry, Action, OrganizeReport};
use std::io::{self, Write};

fn write_action(action: &Action, writer: &mut impl Write) -> io::Result<()> {
    match action {
        Action::Move { from, to } => {
            writeln!(writer, "  Move:   {} -> {}", from.display(), to.display())
        }
        Action::RemoveDir { path } => writeln!(writer, "  Remove: {}", path.display()),
        Action::Rename { from, to } => {
            writeln!(writer, "  Rename: {} -> {}", from.display(), to.display())
        }
        Action::Skip { path, reason } => {
            writeln!(writer, "  Skip:   {} ({})", path.display(), reason)
        }
    }
}

/// Display a dry-run report in a formatted output.
pub fn display_dry_run(report: &OrganizeReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;

    if report.is_empty() {
        writeln!(writer, "Nothing to do.")?;
        return Ok(());
    }

    writeln!(writer, "Planned operations:")?;
    writeln!(writer)?;
    for action in &report.actions {
        write_action(action, writer)?;
    }

    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(
        writer,
        "{} operations would be performed",
        report.mutation_count()
    )?;
    if report.skip_count() > 0 {
        writeln!(writer, "{} files skipped", report.skip_count())?;
    }
    writeln!(writer)?;
    writeln!(writer, "Run without --dry-run to apply these changes.")?;

    Ok(())
}

/// Display what a live run actually did.
pub fn display_execution_result(
    report: &OrganizeReport,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;

    if report.is_empty() {
        writeln!(writer, "Nothing to do.")?;
        return Ok(());
    }

    for action in &report.actions {
        write_action(action, writer)?;
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "Performed {} operations ({} skipped).",
        report.mutation_count(),
        report.skip_count()
    )?;

    Ok(())
}

/// List every registered organizer with its description.
pub fn list_organizers(writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "Available organizers:")?;
    writeln!(writer)?;
    for (key, organizer) in registry() {
        writeln!(writer, "  {}", key)?;
        writeln!(writer, "      {}", organizer.description())?;
    }
    Ok(())
}

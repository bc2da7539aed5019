//! Group hierarchy listing

use std::io::Write;

use crate::error::Result;
use crate::report::walker::Visit;

/// Write each visited group as `<name> [<tag>]` followed by `  id=<id>`,
/// indented two spaces per depth level.
pub fn write_tree<W: Write>(out: &mut W, visits: &[Visit<'_>]) -> Result<()> {
    for visit in visits {
        let prefix = "  ".repeat(visit.depth);
        let group = visit.group;
        writeln!(
            out,
            "{}{} [{}]",
            prefix,
            group.name,
            group.tag.as_deref().unwrap_or("")
        )?;
        writeln!(out, "{}  id={}", prefix, group.id)?;
    }
    out.flush()?;
    Ok(())
}

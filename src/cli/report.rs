//! Issue report command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use log::{info, warn};

use crate::cli::{Cli, RunContext};
use crate::error::{Error, Result};
use crate::output::tree::write_tree;
use crate::output::{ReportEmitter, StatsReporter};
use crate::report::{self, GroupIndex, GroupScope, IssueReport, ReportOptions};

/// Run the report described by `cli`.
pub async fn run(cli: &Cli) -> Result<()> {
    let ctx = RunContext::new(cli).await?;
    let groups = report::fetch_groups(&ctx.session).await?;

    let options = ReportOptions {
        scope: GroupScope::from_name(cli.group.as_deref()),
        recurse: !cli.no_recurse,
        active_only: true,
        page_size: ctx.options.page_size,
        detailed: cli.detailed,
        scan_types: cli.scan_types.clone(),
    };

    if let GroupScope::Named(name) = &options.scope
        && !groups.iter().any(|g| options.scope.matches(g))
    {
        warn!("No group named '{}'", name);
    }

    let mut out = open_output(cli.output.as_deref())?;

    if cli.tree {
        let index = GroupIndex::new(&groups);
        let visits = index.walk(&options.scope, options.recurse);
        return write_tree(&mut out, &visits);
    }

    let mut report = IssueReport::new(
        &ctx.session,
        &options,
        ReportEmitter::new(out, cli.format),
        StatsReporter::new(io::stderr(), cli.api_stats),
    );
    report.run(&groups).await?;

    if report.emitted() == 0 {
        info!("No open issues found");
    }
    Ok(())
}

fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| Error::OutputFile {
                path: PathBuf::from(path),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}

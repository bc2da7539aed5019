//! Issue report over the server group hierarchy
//!
//! Walks the scoped groups depth-first, pages through each group's active
//! servers, and hands every server to the [`IssueResolver`] before the next
//! page is requested. Output order follows traversal order exactly.

use std::io::Write;

use log::{debug, info};

use crate::client::models::{Group, GroupList, ScanType};
use crate::client::pagination::ServerListQuery;
use crate::client::{HaloApi, Session};
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{ApiError, Result};
use crate::output::{ReportEmitter, StatsReporter};

pub mod issues;
pub mod retry;
pub mod servers;
pub mod walker;

pub use issues::IssueResolver;
pub use servers::ServerPager;
pub use walker::{GroupIndex, GroupScope};

/// What to report and how
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Groups the walk starts from
    pub scope: GroupScope,
    /// Descend into child groups
    pub recurse: bool,
    /// Only list active servers
    pub active_only: bool,
    /// Servers requested per page
    pub page_size: usize,
    /// Emit one detail record per issue instead of the issue listing
    pub detailed: bool,
    /// Restrict issues to these scan types; empty means all
    pub scan_types: Vec<ScanType>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            scope: GroupScope::Roots,
            recurse: true,
            active_only: true,
            page_size: DEFAULT_PAGE_SIZE,
            detailed: false,
            scan_types: Vec::new(),
        }
    }
}

/// Totals of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub groups: usize,
    pub servers: usize,
    pub payloads: usize,
}

/// Fetch the full flat group list.
///
/// Any failure here is fatal for the run: there is nothing to traverse.
pub async fn fetch_groups<C: HaloApi>(session: &Session<C>) -> Result<Vec<Group>> {
    let url = format!("{}/v2/groups", session.api_root());
    let body = session.get_json(&url).await?;
    let list: GroupList = serde_json::from_value(body)?;

    let groups = list.groups.ok_or(ApiError::MissingField("groups"))?;
    info!(
        "Found {} groups in list",
        list.count.unwrap_or(groups.len())
    );
    Ok(groups)
}

/// Report generator writing payloads to `W` and API stats to `D`
pub struct IssueReport<'a, C, W: Write, D: Write> {
    session: &'a Session<C>,
    options: &'a ReportOptions,
    emitter: ReportEmitter<W>,
    stats: StatsReporter<D>,
}

impl<'a, C: HaloApi, W: Write, D: Write> IssueReport<'a, C, W, D> {
    pub fn new(
        session: &'a Session<C>,
        options: &'a ReportOptions,
        emitter: ReportEmitter<W>,
        stats: StatsReporter<D>,
    ) -> Self {
        Self {
            session,
            options,
            emitter,
            stats,
        }
    }

    /// Report on every group in scope, in walk order.
    pub async fn run(&mut self, groups: &[Group]) -> Result<RunSummary> {
        let index = GroupIndex::new(groups);
        let visits = index.walk(&self.options.scope, self.options.recurse);
        debug!("{} group(s) in scope", visits.len());

        let mut summary = RunSummary::default();
        for visit in visits {
            self.process_group(visit.group, &mut summary).await?;
            summary.groups += 1;
        }

        info!(
            "Reported {} payload(s) for {} server(s) in {} group(s)",
            summary.payloads, summary.servers, summary.groups
        );
        Ok(summary)
    }

    async fn process_group(&mut self, group: &Group, summary: &mut RunSummary) -> Result<()> {
        debug!("Processing group {} ({})", group.name, group.id);

        let query = ServerListQuery::new(group.id.as_str())
            .page_size(self.options.page_size)
            .active_only(self.options.active_only);
        let mut pager = ServerPager::for_query(&query, self.session.api_root())?;
        let resolver = IssueResolver::new(
            self.session,
            &self.options.scan_types,
            self.options.detailed,
        );

        while let Some(page) = pager.next_page(self.session).await {
            self.stats.report(self.session.call_stats())?;

            for server in page.servers {
                if self.options.active_only && !server.is_active() {
                    continue;
                }
                let Some(server_id) = server.id else {
                    debug!("Skipping server without id in group {}", group.id);
                    continue;
                };
                debug!(
                    "Resolving issues of server {} ({})",
                    server_id,
                    server.hostname.as_deref().unwrap_or("unknown host")
                );

                summary.payloads += resolver.resolve(&server_id, &mut self.emitter).await?;
                summary.servers += 1;
            }
        }

        debug!(
            "Group {} listed in {} page request(s)",
            group.id,
            pager.pages_fetched()
        );
        Ok(())
    }

    /// Payloads written so far
    pub fn emitted(&self) -> usize {
        self.emitter.emitted()
    }

    #[cfg(test)]
    fn into_outputs(self) -> (W, D) {
        (self.emitter.into_inner(), self.stats.into_inner())
    }
}

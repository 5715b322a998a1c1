//! `rescache browse` – follow relative expressions from a starting resource.

use anyhow::{Context, Result};
use rescache_core::Service;

use super::report::ServiceReport;

pub fn browse_report(service: &Service, start: &str, exprs: &[String]) -> Result<ServiceReport> {
    let mut report = ServiceReport::new(service);
    let mut current = report
        .record(service, start, || service.resource(start))
        .with_context(|| format!("resolve start {start:?}"))?;

    for expr in exprs {
        let from = current.url().clone();
        current = report
            .record(service, expr, || current.relative(expr))
            .with_context(|| format!("apply {expr:?} from {from}"))?;
    }
    Ok(report)
}

pub fn run_browse(service: &Service, start: &str, exprs: &[String], json: bool) -> Result<()> {
    let report = browse_report(service, start, exprs)?;
    print!("{}", report.render(json)?);
    Ok(())
}

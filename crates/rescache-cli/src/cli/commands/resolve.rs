//! `rescache resolve` – resolve paths below one service.

use anyhow::{Context, Result};
use rescache_core::Service;

use super::report::ServiceReport;

pub fn resolve_report(service: &Service, paths: &[String]) -> Result<ServiceReport> {
    let mut report = ServiceReport::new(service);
    for path in paths {
        report
            .record(service, path, || service.resource(path))
            .with_context(|| format!("resolve {path:?} against {}", service.base_url()))?;
    }
    Ok(report)
}

pub fn run_resolve(service: &Service, paths: &[String], json: bool) -> Result<()> {
    let report = resolve_report(service, paths)?;
    print!("{}", report.render(json)?);
    Ok(())
}

//! Serializable command output.

use std::sync::Arc;

use anyhow::Result;
use rescache_core::{CanonicalUrl, Resource, ResolveError, Service};
use serde::Serialize;

/// One resolved resource: what was asked for and where it landed.
#[derive(Debug, Serialize)]
pub struct Resolution {
    pub input: String,
    pub url: CanonicalUrl,
    /// The handle already existed in the service's cache.
    pub shared: bool,
}

#[derive(Debug, Serialize)]
pub struct ServiceReport {
    pub base: CanonicalUrl,
    pub resources: Vec<Resolution>,
}

impl ServiceReport {
    pub fn new(service: &Service) -> Self {
        Self {
            base: service.base_url().as_canonical().clone(),
            resources: Vec::new(),
        }
    }

    /// Runs `lookup` and records its result; `shared` is set when the
    /// service cache did not grow.
    pub fn record<F>(
        &mut self,
        service: &Service,
        input: &str,
        lookup: F,
    ) -> Result<Arc<Resource>, ResolveError>
    where
        F: FnOnce() -> Result<Arc<Resource>, ResolveError>,
    {
        let before = service.len();
        let resource = lookup()?;
        self.resources.push(Resolution {
            input: input.to_string(),
            url: resource.url().clone(),
            shared: service.len() == before,
        });
        Ok(resource)
    }

    /// Plain text: one `input<TAB>url` line per resource.
    pub fn to_text(&self) -> String {
        let width = self
            .resources
            .iter()
            .map(|r| r.input.len())
            .max()
            .unwrap_or(0);
        let mut out = format!("base: {}\n", self.base);
        for r in &self.resources {
            let marker = if r.shared { " (shared)" } else { "" };
            out.push_str(&format!("{:<width$}  {}{}\n", r.input, r.url, marker));
        }
        out
    }

    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            Ok(serde_json::to_string_pretty(self)? + "\n")
        } else {
            Ok(self.to_text())
        }
    }
}

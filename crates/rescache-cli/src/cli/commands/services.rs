//! `rescache services` – list configured services.

use anyhow::Result;
use rescache_core::config::RescacheConfig;
use rescache_core::url_model;

pub fn services_output(cfg: &RescacheConfig) -> String {
    if cfg.services.is_empty() {
        return "No services configured.\n".to_string();
    }
    let mut out = format!("{:<2}{:<16} {}\n", "", "NAME", "BASE");
    for svc in &cfg.services {
        let marker = if cfg.default_service.as_deref() == Some(svc.name.as_str()) {
            "*"
        } else {
            ""
        };
        let base = match url_model::normalize(&svc.base_url) {
            Ok(url) => url.to_string(),
            Err(e) => format!("<{e}>"),
        };
        out.push_str(&format!("{:<2}{:<16} {}\n", marker, svc.name, base));
    }
    out
}

pub fn run_services(cfg: &RescacheConfig) -> Result<()> {
    print!("{}", services_output(cfg));
    Ok(())
}

//! Print anchor matches with their following lines, each JSON-quoted so
//! tabs and trailing spaces are visible.

use linepatch_core::anchor::{Marker, SearchWindow, find_all};
use linepatch_core::config::loader::ConfigLoader;
use linepatch_core::document::{DocumentStore, FsStore};
use std::path::Path;

use crate::InspectArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &InspectArgs) {
    // Config is optional here; it only supplies logging settings.
    if config.is_some() || profile.is_some() {
        super::load_config(config, profile, "inspect");
    } else {
        let logging = ConfigLoader::load(None, None).map(|rc| rc.logging).unwrap_or_default();
        crate::logging::init(&logging);
    }

    let marker = if args.regex {
        match Marker::pattern(&args.marker) {
            Ok(m) => m,
            Err(e) => super::fail("inspect", format!("invalid pattern: {e}")),
        }
    } else {
        Marker::literal(args.marker.as_str())
    };

    let doc = match FsStore.load(&args.file) {
        Ok(d) => d,
        Err(e) => super::fail("inspect", e),
    };

    let matches = find_all(doc.lines(), &marker, SearchWindow::whole(doc.len()));
    if matches.is_empty() {
        println!("(no matches for {marker})");
        return;
    }

    for anchor in &matches {
        println!("-- line {} --", anchor.line + 1);
        let end = anchor.line.saturating_add(args.context).saturating_add(1).min(doc.len());
        for idx in anchor.line..end {
            let quoted = serde_json::to_string(&doc.lines()[idx])
                .unwrap_or_else(|_| format!("{:?}", doc.lines()[idx]));
            println!("{:>5}: {quoted}", idx + 1);
        }
    }
    println!("-- {} matches --", matches.len());
}
